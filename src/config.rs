// src/config.rs

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const LOG_FILE_NAME: &str = "moneytrack.log";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Where the account is stored.
    pub data_file: PathBuf,

    #[serde(default = "default_use_colors")]
    pub use_colors: bool,

    #[serde(default)]
    pub verbose: bool,

    #[serde(default)]
    pub logging: LogConfig,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LogConfig {
    #[serde(default)]
    pub enabled: bool,

    #[serde(default)]
    pub directory: Option<PathBuf>,
}

fn default_use_colors() -> bool {
    true
}

#[derive(Error, Debug, PartialEq)]
pub enum ConfigValidationError {
    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Empty field: {0}")]
    EmptyField(String),
}

impl Config {
    pub fn new(data_file: PathBuf) -> Self {
        Self {
            data_file,
            use_colors: default_use_colors(),
            verbose: false,
            logging: LogConfig::default(),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.data_file.as_os_str().is_empty() {
            return Err(ConfigValidationError::EmptyField("data_file".to_string()));
        }

        if self.logging.enabled {
            match &self.logging.directory {
                None => {
                    return Err(ConfigValidationError::MissingField(
                        "logging.directory".to_string(),
                    ))
                }
                Some(dir) if dir.as_os_str().is_empty() => {
                    return Err(ConfigValidationError::EmptyField(
                        "logging.directory".to_string(),
                    ))
                }
                Some(_) => {}
            }
        }

        Ok(())
    }

    /// The log file, when logging to a file is enabled.
    pub fn log_file(&self) -> Option<PathBuf> {
        if !self.logging.enabled {
            return None;
        }
        self.logging
            .directory
            .as_ref()
            .map(|dir| dir.join(LOG_FILE_NAME))
    }

    /// The effective configuration as YAML.
    pub fn to_yaml(&self) -> Result<String, serde_yaml::Error> {
        serde_yaml::to_string(self)
    }
}

// Builder pattern for testing
#[cfg(test)]
#[derive(Default)]
pub struct ConfigBuilder {
    data_file: PathBuf,
    use_colors: bool,
    verbose: bool,
    log_directory: Option<PathBuf>,
}

#[cfg(test)]
impl ConfigBuilder {
    pub fn data_file(mut self, data_file: &str) -> Self {
        self.data_file = PathBuf::from(data_file);
        self
    }

    pub fn use_colors(mut self, use_colors: bool) -> Self {
        self.use_colors = use_colors;
        self
    }

    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn log_directory(mut self, directory: &str) -> Self {
        self.log_directory = Some(PathBuf::from(directory));
        self
    }

    pub fn build(self) -> Config {
        Config {
            data_file: self.data_file,
            use_colors: self.use_colors,
            verbose: self.verbose,
            logging: LogConfig {
                enabled: self.log_directory.is_some(),
                directory: self.log_directory,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_new_config_defaults() {
        let config = Config::new(PathBuf::from("/data/account.txt"));
        assert!(config.use_colors);
        assert!(!config.verbose);
        assert_eq!(config.logging, LogConfig::default());
        assert_eq!(config.log_file(), None);
    }

    #[test]
    fn test_validate_valid_config() {
        let config = ConfigBuilder::default()
            .data_file("/data/account.txt")
            .log_directory("/tmp/logs")
            .build();

        assert!(config.validate().is_ok());
        assert_eq!(
            config.log_file(),
            Some(PathBuf::from("/tmp/logs/moneytrack.log"))
        );
    }

    #[test]
    fn test_validate_empty_data_file() {
        let config = ConfigBuilder::default().data_file("").build();
        assert_eq!(
            config.validate(),
            Err(ConfigValidationError::EmptyField("data_file".to_string()))
        );
    }

    #[test]
    fn test_validate_logging_without_directory() {
        let mut config = ConfigBuilder::default()
            .data_file("/data/account.txt")
            .build();
        config.logging.enabled = true;

        assert_eq!(
            config.validate(),
            Err(ConfigValidationError::MissingField(
                "logging.directory".to_string()
            ))
        );
    }

    #[test]
    fn test_yaml_output() {
        let config = ConfigBuilder::default()
            .data_file("/data/account.txt")
            .use_colors(false)
            .verbose(true)
            .build();

        assert_eq!(
            config.to_yaml().unwrap(),
            "data_file: /data/account.txt\nuse_colors: false\nverbose: true\nlogging:\n  enabled: false\n  directory: null\n"
        );
    }
}

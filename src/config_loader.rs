// src/config_loader.rs
// Builds the effective Config from defaults, an optional YAML file and
// command line overrides.

use std::path::PathBuf;

use config::FileFormat;
use log::debug;
use thiserror::Error;

use crate::{
    config::{Config, ConfigValidationError},
    filesystem::{FileSystem, FileSystemError},
};

pub const APP_DIR_NAME: &str = "moneytrack";
pub const DATA_FILE_NAME: &str = "account.txt";

#[derive(Error, Debug)]
pub enum ConfigLoadError {
    #[error("Failed to read configuration file: {0}")]
    ReadError(String),

    #[error("Configuration file not found: {0}")]
    NotFound(String),

    #[error("Multiple configuration files found: {0}")]
    MultipleFound(String),

    #[error("Failed to parse configuration: {0}")]
    Parse(#[from] config::ConfigError),

    #[error("Invalid configuration: {0}")]
    Validation(#[from] ConfigValidationError),

    #[error(transparent)]
    FileSystem(#[from] FileSystemError),
}

/// Values given on the command line. They win over the config file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigOverrides {
    pub config_path: Option<PathBuf>,
    pub data_file: Option<PathBuf>,
    pub verbose: bool,
    pub no_color: bool,
}

pub struct YamlConfigLoader<'a> {
    fs: &'a dyn FileSystem,
}

impl<'a> YamlConfigLoader<'a> {
    pub fn new(fs: &'a dyn FileSystem) -> Self {
        Self { fs }
    }

    /// Config files present under the platform config directory.
    pub fn find_config_paths(&self) -> Vec<PathBuf> {
        let mut paths = Vec::new();

        if let Ok(config_dir) = self.fs.config_dir() {
            let app_dir = config_dir.join(APP_DIR_NAME);
            for name in ["config.yaml", "config.yml"] {
                let candidate = app_dir.join(name);
                if self.fs.path_exists(&candidate) {
                    paths.push(candidate);
                }
            }
        }

        paths
    }

    fn config_path(&self, overrides: &ConfigOverrides) -> Result<Option<PathBuf>, ConfigLoadError> {
        if let Some(path) = &overrides.config_path {
            let expanded = self.fs.expand_path(path)?;
            if !self.fs.path_exists(&expanded) {
                return Err(ConfigLoadError::NotFound(expanded.display().to_string()));
            }
            return Ok(Some(expanded));
        }

        let mut found = self.find_config_paths();
        match found.len() {
            0 => Ok(None),
            1 => Ok(found.pop()),
            _ => Err(ConfigLoadError::MultipleFound(
                found
                    .iter()
                    .map(|p| p.display().to_string())
                    .collect::<Vec<_>>()
                    .join(", "),
            )),
        }
    }

    fn default_data_file(&self) -> Result<PathBuf, ConfigLoadError> {
        Ok(self.fs.data_dir()?.join(APP_DIR_NAME).join(DATA_FILE_NAME))
    }

    pub fn load(&self, overrides: &ConfigOverrides) -> Result<Config, ConfigLoadError> {
        let mut builder = config::Config::builder()
            .set_default(
                "data_file",
                self.default_data_file()?.to_string_lossy().into_owned(),
            )?
            .set_default("use_colors", true)?
            .set_default("verbose", false)?
            .set_default("logging.enabled", false)?;

        if let Some(path) = self.config_path(overrides)? {
            debug!("Loading configuration from {}", path.display());
            let contents = self
                .fs
                .read_file(&path)
                .map_err(|e| ConfigLoadError::ReadError(e.to_string()))?;
            builder = builder.add_source(config::File::from_str(&contents, FileFormat::Yaml));
        } else {
            debug!("No configuration file found, using defaults");
        }

        if let Some(data_file) = &overrides.data_file {
            builder = builder.set_override("data_file", data_file.to_string_lossy().into_owned())?;
        }
        if overrides.verbose {
            builder = builder.set_override("verbose", true)?;
        }
        if overrides.no_color {
            builder = builder.set_override("use_colors", false)?;
        }

        let mut config: Config = builder.build()?.try_deserialize()?;

        config.data_file = self.fs.expand_path(&config.data_file)?;
        if let Some(dir) = config.logging.directory.take() {
            config.logging.directory = Some(self.fs.expand_path(&dir)?);
        }

        config.validate()?;
        Ok(config)
    }
}

// src/cli.rs

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::config_loader::ConfigOverrides;

/// Moneytrack - A personal finance tracker for the terminal
#[derive(Parser, Debug, Clone)]
#[clap(author, version, about, long_about = None)]
pub struct Cli {
    /// Use this configuration file instead of searching for one
    #[clap(long, short = 'c', global = true)]
    pub config: Option<PathBuf>,

    /// Override the account data file from config
    #[clap(long, short = 'd', global = true)]
    pub data_file: Option<PathBuf>,

    /// Show detailed output
    #[clap(long, short = 'v', global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[clap(long, global = true)]
    pub no_color: bool,

    /// Subcommand to execute; starts the interactive prompt when omitted
    #[clap(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Run a single tracker command, e.g. `exec list goals`
    Exec {
        /// The command line as typed at the prompt
        #[clap(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
        line: Vec<String>,
    },

    /// Configuration management commands
    Config(ConfigCommands),
}

#[derive(Args, Debug, Clone)]
pub struct ConfigCommands {
    #[clap(subcommand)]
    pub command: ConfigSubcommands,
}

#[derive(Subcommand, Debug, Clone)]
pub enum ConfigSubcommands {
    /// Print the effective configuration
    Show,

    /// Validate the moneytrack configuration
    Validate,
}

impl Cli {
    /// Parse command line arguments into a Cli structure
    pub fn parse_args() -> Self {
        Cli::parse()
    }

    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            config_path: self.config.clone(),
            data_file: self.data_file.clone(),
            verbose: self.verbose,
            no_color: self.no_color,
        }
    }
}

pub fn get_command_description(cli: &Cli) -> String {
    match &cli.command {
        None => "Start interactive session".to_string(),
        Some(Commands::Exec { line }) => format!("Run '{}'", line.join(" ")),
        Some(Commands::Config(cfg_cmd)) => match &cfg_cmd.command {
            ConfigSubcommands::Show => "Show configuration".to_string(),
            ConfigSubcommands::Validate => "Validate configuration".to_string(),
        },
    }
}

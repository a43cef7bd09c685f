// src/main.rs

use std::{
    fs::OpenOptions,
    io::{self, BufRead, Write},
    process,
};

use anyhow::{Context, Result};
use log::{debug, LevelFilter};

use moneytrack::{
    cli::{self, Cli, Commands, ConfigSubcommands},
    config::Config,
    config_loader::YamlConfigLoader,
    filesystem::{FileSystem, RealFileSystem},
    session::{Response, Session},
    storage::MoneyStorage,
    ui::ConsoleRenderer,
};

fn main() {
    let cli = Cli::parse_args();

    let code = match run(&cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("Error: {:#}", err);
            1
        }
    };

    process::exit(code);
}

fn run(cli: &Cli) -> Result<i32> {
    let fs = RealFileSystem;
    let config = YamlConfigLoader::new(&fs)
        .load(&cli.overrides())
        .context("Could not load configuration")?;

    init_logging(&config, &fs)?;
    debug!("{}", cli::get_command_description(cli));

    match &cli.command {
        Some(Commands::Config(cfg_cmd)) => match cfg_cmd.command {
            ConfigSubcommands::Show => {
                print!("{}", config.to_yaml()?);
                Ok(0)
            }
            ConfigSubcommands::Validate => {
                println!("Configuration is valid");
                Ok(0)
            }
        },
        Some(Commands::Exec { line }) => {
            let mut session = open_session(&config)?;
            let response = session.handle(&line.join(" "), today());
            print_response(&response);
            Ok(if response.failed { 1 } else { 0 })
        }
        None => {
            let mut session = open_session(&config)?;
            repl(&mut session)?;
            Ok(0)
        }
    }
}

fn init_logging(config: &Config, fs: &RealFileSystem) -> Result<()> {
    let level = if config.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };

    match config.log_file() {
        Some(path) => {
            if let Some(dir) = path.parent() {
                fs.create_dir_all(dir)?;
            }
            let log_file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&path)
                .with_context(|| format!("Failed to open log file {}", path.display()))?;

            env_logger::Builder::new()
                .filter_level(level)
                .target(env_logger::Target::Pipe(Box::new(log_file)))
                .init();
        }
        None => {
            env_logger::Builder::new().filter_level(level).init();
        }
    }

    Ok(())
}

fn open_session(config: &Config) -> Result<Session<RealFileSystem>> {
    let storage = MoneyStorage::new(RealFileSystem, &config.data_file);
    let renderer = ConsoleRenderer::new(config.use_colors, config.use_colors);
    Session::open(storage, renderer)
        .with_context(|| format!("Could not load {}", config.data_file.display()))
}

fn repl(session: &mut Session<RealFileSystem>) -> Result<()> {
    print!("{}", session.welcome());
    io::stdout().flush()?;

    for line in io::stdin().lock().lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let response = session.handle(&line, today());
        print_response(&response);
        io::stdout().flush()?;

        if response.exit {
            break;
        }
    }

    Ok(())
}

fn print_response(response: &Response) {
    print!("{}", response.output);
    if !response.details.is_empty() {
        print!("{}", response.details);
    }
}

fn today() -> jiff::civil::Date {
    jiff::Zoned::now().date()
}

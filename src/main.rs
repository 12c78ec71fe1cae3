// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{Shell, generate};
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError, error, info};
use std::io::{IsTerminal, Write};
use std::path::{Path, PathBuf};

use doctrans::app_config::{Config, LogLevel};
use doctrans::errors::ConfigError;
use doctrans::file_utils::FileManager;
use doctrans::profile_menu::select_profile;
use doctrans::{ConsoleReporter, Controller};

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => LogLevel::Error,
            CliLogLevel::Warn => LogLevel::Warn,
            CliLogLevel::Info => LogLevel::Info,
            CliLogLevel::Debug => LogLevel::Debug,
            CliLogLevel::Trace => LogLevel::Trace,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate shell completions for doctrans
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// doctrans - translate document JSON page by page with a local LLM
///
/// Reads every .json document in the configured data folder, sends each page
/// to the inference endpoint and appends the translations to one text file
/// per document in the result folder.
#[derive(Parser, Debug)]
#[command(name = "doctrans")]
#[command(version)]
#[command(about = "Page-by-page document translation with a local LLM")]
#[command(long_about = "doctrans extracts page text from document JSON files and translates it through a local inference server.

EXAMPLES:
    doctrans                              # Pick a model profile interactively
    doctrans -m 1                         # Use model profile '1'
    doctrans -c /srv/jobs/config.json     # Use another configuration file
    doctrans completions bash > doctrans.bash

RESUMING:
    A document whose output file already exists is skipped. Delete the output
    file to translate that document again.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Configuration file path
    #[arg(short, long, default_value = "config.json")]
    config_path: PathBuf,

    /// Model profile key; skips the interactive menu
    #[arg(short, long, env = "DOCTRANS_MODEL")]
    model: Option<String>,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

// @struct: Custom logger implementation, filtered by the global max level
struct CustomLogger;

impl CustomLogger {
    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        log::set_boxed_logger(Box::new(CustomLogger))?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI color for log level
    fn color_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "1;31",
            Level::Warn => "1;33",
            Level::Info => "1;32",
            Level::Debug => "1;36",
            Level::Trace => "1;35",
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S%.3f");
            let _ = writeln!(
                std::io::stderr(),
                "\x1B[{}m{} {}\x1B[0m",
                Self::color_for_level(record.level()),
                now,
                record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    CustomLogger::init(LevelFilter::Info)?;

    let cli = CommandLineOptions::parse();

    if let Some(Commands::Completions { shell }) = cli.command {
        let mut cmd = CommandLineOptions::command();
        generate(shell, &mut cmd, "doctrans", &mut std::io::stdout());
        return Ok(());
    }

    if let Some(level) = &cli.log_level {
        log::set_max_level((&LogLevel::from(level.clone())).into());
    }

    let mut config = match Config::load(&cli.config_path) {
        Ok(config) => config,
        Err(e) => {
            if let Some(ConfigError::Missing(path)) = e.downcast_ref::<ConfigError>() {
                error!("CRITICAL ERROR: config file not found at: {:?}", path);
                return Ok(());
            }
            return Err(e);
        }
    };
    config.validate().context("Configuration validation failed")?;

    if cli.log_level.is_none() {
        log::set_max_level((&config.log_level).into());
    }

    let config_dir = config_base_dir(&cli.config_path);
    config.resolve_paths(&config_dir);

    let data_folder = config.global_settings.data_folder.clone();
    let result_folder = config.global_settings.result_folder.clone();
    FileManager::ensure_dir(&data_folder)?;
    FileManager::ensure_dir(&result_folder)?;

    info!("--- Translation Pipeline Ready ---");

    let key = match cli.model {
        Some(key) => key,
        None => {
            let stdin = std::io::stdin();
            select_profile(&config.models, stdin.lock(), std::io::stdout())?
        }
    };
    let profile = config.profile(&key)?.clone();
    info!("Using {} ({})", profile.name, profile.base_model);

    // No progress bar when stderr is redirected to a file
    let reporter = if std::io::stderr().is_terminal() {
        ConsoleReporter::new()
    } else {
        ConsoleReporter::plain()
    };
    let controller = Controller::with_config(&config, &reporter);
    controller.run(&data_folder, &result_folder, &profile).await?;

    Ok(())
}

// Relative folders in the config are relative to the config file itself
fn config_base_dir(config_path: &Path) -> PathBuf {
    match config_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

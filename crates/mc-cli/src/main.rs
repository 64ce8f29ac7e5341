//! mc-cli binary entrypoint.

mod commands;
pub mod paths;

use clap::Parser;
use colored::Colorize;
use commands::Commands;
use mc_runtime::{ContainerConfig, Settings};
use std::process;

/// A simple CLI to manage a Minecraft Bedrock server running in Docker
#[derive(Parser)]
#[command(name = "mc-cli", version, about, long_about = None)]
struct Cli {
    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true, env = "MC_CLI_LOG_LEVEL", default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

/// Parses CLI arguments, loads configuration and dispatches to command handlers.
fn main() {
    let cli = Cli::parse();

    if let Err(msg) = init_logging(&cli.log_level) {
        eprintln!("{} {}", "✗".red().bold(), msg);
        process::exit(1);
    }

    let config = match load_config() {
        Ok(c) => c,
        Err(msg) => {
            eprintln!("{} {}", "✗".red().bold(), msg);
            process::exit(1);
        }
    };

    tracing::debug!(
        container = %config.container,
        docker = %config.docker,
        "loaded configuration"
    );
    commands::execute(cli.command, &config);
}

/// Installs a compact stderr subscriber. `RUST_LOG` wins over `--log-level`.
fn init_logging(level: &str) -> Result<(), String> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .or_else(|_| tracing_subscriber::EnvFilter::try_new(level))
        .map_err(|e| format!("Invalid log level `{level}`: {e}"))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();

    Ok(())
}

/// Reads `config.toml` from the mc-cli home and fills in defaults.
fn load_config() -> Result<ContainerConfig, String> {
    let config_path = paths::config_path().ok_or("Could not determine home directory.")?;
    let compose_dir = paths::default_compose_dir().ok_or("Could not determine home directory.")?;
    let backups_dir = paths::default_backups_dir().ok_or("Could not determine home directory.")?;

    let settings = Settings::load(&config_path).map_err(|e| e.to_string())?;
    Ok(settings.resolve(compose_dir, backups_dir))
}

//! `questprop` command-line entry point.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use questprop::app::run_app;
use questprop::config::AppConfig;
use questprop::keys::DEFAULT_EXIT_KEY;
use questprop::style;
use questprop::{BridgeError, Platform};
use tracing::error;
use tracing_subscriber::EnvFilter;

const UNSUPPORTED_OS: &str = "Unsupported OS. Please use Mac, Windows or Linux.";

#[derive(Debug, Parser)]
#[command(
    name = "questprop",
    version,
    about = "Set and show Oculus/Meta Quest debug properties over adb"
)]
struct Cli {
    /// Bridge (adb) executable to use instead of the bundled platform-tools copy.
    #[arg(long, value_name = "PATH")]
    bridge: Option<PathBuf>,
    /// Key that exits the program from any menu.
    #[arg(long, value_name = "CHAR", default_value_t = DEFAULT_EXIT_KEY, value_parser = parse_exit_key)]
    exit_key: char,
    /// Delay between device checks while waiting for a headset.
    #[arg(
        long,
        value_name = "MS",
        default_value_t = 1000,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    poll_interval_ms: u64,
    /// Append diagnostics to this file.
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,
    /// Log filter directive (e.g. `debug`, `questprop::bridge=trace`).
    #[arg(long, value_name = "FILTER", default_value = "info")]
    log_level: String,
}

/// Configuration for a host reporting `os`. An explicit `--bridge` skips
/// the platform lookup.
fn config_for(os: &str, cli: &Cli) -> Result<AppConfig, BridgeError> {
    let mut config = match &cli.bridge {
        Some(path) => AppConfig::with_bridge(path),
        None => AppConfig::for_platform(Platform::from_os(os)?),
    };
    config.exit_key = cli.exit_key;
    config.poll_interval = Duration::from_millis(cli.poll_interval_ms);
    Ok(config)
}

/// Message and exit code for errors that stop the tool before the menu.
fn startup_failure(err: &BridgeError) -> Option<(&'static str, i32)> {
    match err {
        BridgeError::UnsupportedPlatform(_) => Some((UNSUPPORTED_OS, 1)),
        BridgeError::BridgeUnavailable(_) | BridgeError::DeviceNotConnected(_) => None,
    }
}

fn parse_exit_key(text: &str) -> Result<char, String> {
    let mut chars = text.chars();
    match (chars.next(), chars.next()) {
        (Some(ch), None) if ch.is_ascii_digit() => {
            Err("exit key must not be a digit (digits select menu entries)".to_string())
        }
        (Some(ch), None) if ch.is_control() || ch.is_whitespace() => {
            Err("exit key must be a printable character".to_string())
        }
        (Some(ch), None) => Ok(ch.to_ascii_lowercase()),
        _ => Err("exit key must be a single character".to_string()),
    }
}

fn init_logging(path: Option<&Path>, filter: &str) -> anyhow::Result<()> {
    // Without a log file nothing is installed; stray output would corrupt the
    // menu screen.
    let Some(path) = path else {
        return Ok(());
    };
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("open log file {}", path.display()))?;
    let filter = EnvFilter::try_new(filter).with_context(|| format!("invalid log filter '{filter}'"))?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(std::sync::Mutex::new(file))
        .init();
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_file.as_deref(), &cli.log_level)?;
    let config = match config_for(std::env::consts::OS, &cli) {
        Ok(config) => config,
        Err(err) => {
            error!("{err}");
            let Some((message, code)) = startup_failure(&err) else {
                return Err(err.into());
            };
            println!("{}", style::error(message));
            std::process::exit(code);
        }
    };
    run_app(&config)
}

mod app;
mod cli;
mod clipboard;
mod config;
mod console;
mod constants;
mod markers;
mod paths;
mod sharing;
mod store;

use std::process::ExitCode;

use clap::Parser;
use tracing::{debug, warn};
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_subscriber::EnvFilter;

use cli::Cli;
use config::LoadConfigResult;
use constants::{DEFAULT_FILE_LOG_FILTER, DEFAULT_STDERR_LOG_FILTER};

/// Set up file logging for debug builds
#[cfg(debug_assertions)]
fn file_log_writer() -> Option<(NonBlocking, WorkerGuard)> {
    use std::fs::OpenOptions;
    use std::io::Write;

    // Create logs directory if it doesn't exist
    let logs_dir = paths::logs_dir();
    if std::fs::create_dir_all(&logs_dir).is_err() {
        eprintln!("Failed to create logs directory");
        return None;
    }

    let log_file_path = logs_dir.join("ba-tiles.log");

    // Append session separator to existing log file
    if let Ok(mut file) = OpenOptions::new().append(true).open(&log_file_path) {
        let timestamp = chrono::Local::now().format("%Y-%m-%d %H:%M:%S");
        let separator = "=".repeat(80);
        let _ = writeln!(
            file,
            "\n\n{}\n=== New Session Started at {} ===\n{}\n",
            separator, timestamp, separator
        );
    }

    let file_appender = tracing_appender::rolling::never(&logs_dir, "ba-tiles.log");
    Some(tracing_appender::non_blocking(file_appender))
}

#[cfg(not(debug_assertions))]
fn file_log_writer() -> Option<(NonBlocking, WorkerGuard)> {
    None
}

fn setup_logging(verbose: bool) -> Option<WorkerGuard> {
    use tracing_subscriber::prelude::*;

    // Use env filter to control log levels, falling back to quiet stderr output
    let env_filter = |default: &str| {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default))
    };

    let stderr_filter = if verbose {
        EnvFilter::new(DEFAULT_FILE_LOG_FILTER)
    } else {
        env_filter(DEFAULT_STDERR_LOG_FILTER)
    };

    // Configure stderr layer (stdout carries exported markers)
    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_filter(stderr_filter);

    // Configure file layer (no ANSI colors for file output)
    let (file_layer, guard) = match file_log_writer() {
        Some((writer, guard)) => {
            let layer = tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_target(true)
                .with_level(true)
                .with_filter(env_filter(DEFAULT_FILE_LOG_FILTER));
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(file_layer)
        .init();

    guard
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Keep the guard alive for the duration of the program
    let _log_guard = setup_logging(cli.verbose);

    if let Err(e) = paths::ensure_directories() {
        warn!("Failed to create application directories: {}", e);
    }

    let LoadConfigResult {
        mut config,
        reset_reason,
    } = config::load_config();
    if let Some(reason) = reset_reason {
        eprintln!("{}. Using default settings.", reason);
    }

    match app::run(cli, &mut config) {
        Ok(code) => code,
        Err(e) => {
            debug!("Command failed: {:?}", e);
            eprintln!("ba-tiles: {}", e);
            ExitCode::FAILURE
        }
    }
}

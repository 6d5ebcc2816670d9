//! Logging setup for hosts embedding the engine.
//!
//! Engine code logs through bevy's `info!`/`warn!`/`debug!` macros, which are
//! `tracing` events. Hosts that don't run bevy's `LogPlugin` can call
//! [`setup_default_logging`] (or [`setup_logging`] with their own directory)
//! once at startup to get a file + stdout subscriber.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::prelude::*;

/// Name of the session log file inside the logs directory
pub const LOG_FILE_NAME: &str = "thumbforge.log";

/// Filter used when `RUST_LOG` is not set
pub const DEFAULT_LOG_FILTER: &str = "info,thumbforge=debug";

/// Install a tracing subscriber writing to `logs_dir/thumbforge.log` and stdout.
///
/// Returns the appender guard; keep it alive for the duration of the program or
/// buffered log lines are lost. Returns `None` if the directory can't be created
/// or a global subscriber is already installed.
pub fn setup_logging(logs_dir: &Path) -> Option<WorkerGuard> {
    if std::fs::create_dir_all(logs_dir).is_err() {
        eprintln!("Failed to create logs directory {:?}", logs_dir);
        return None;
    }

    let log_file_path = logs_dir.join(LOG_FILE_NAME);

    // Append session separator to existing log file
    if let Ok(mut file) = OpenOptions::new().append(true).open(&log_file_path) {
        let _ = writeln!(file, "{}", session_separator(chrono::Local::now()));
    }

    let file_appender = tracing_appender::rolling::never(logs_dir, LOG_FILE_NAME);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    // No ANSI colors for file output
    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_target(true)
        .with_level(true);

    let stdout_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stdout)
        .with_ansi(true)
        .with_target(true)
        .with_level(true);

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(DEFAULT_LOG_FILTER));

    if tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .with(stdout_layer)
        .try_init()
        .is_err()
    {
        eprintln!("A global tracing subscriber is already installed");
        return None;
    }

    Some(guard)
}

/// [`setup_logging`] into the engine's logs directory
pub fn setup_default_logging() -> Option<WorkerGuard> {
    setup_logging(&crate::paths::logs_dir())
}

/// Banner written between sessions in the shared log file.
fn session_separator<Tz: chrono::TimeZone>(now: chrono::DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    let separator = "=".repeat(80);
    format!(
        "\n\n{}\n=== New Session Started at {} ===\n{}\n",
        separator,
        now.format("%Y-%m-%d %H:%M:%S"),
        separator
    )
}

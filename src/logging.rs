//! Logging configuration using the tracing ecosystem.
//!
//! Logs go to a daily rotating file, never to the terminal, so they cannot
//! corrupt the grid. The level is taken from `RUST_LOG`.

use std::path::PathBuf;

use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{filter::EnvFilter, fmt, prelude::*};

/// Default log level if RUST_LOG is not set.
const DEFAULT_LOG_FILTER: &str = "tableforge=info,warn";

/// Initialize the logging system.
///
/// Sets up tracing with a daily rotating file appender in the user's local
/// data directory and a `RUST_LOG`-driven filter.
///
/// Logs are stored in the platform-specific local data directory:
/// - Linux: `~/.local/share/tableforge/logs/`
/// - macOS: `~/Library/Application Support/tableforge/logs/`
/// - Windows: `C:\Users\<User>\AppData\Local\tableforge\logs\`
///
/// # Errors
///
/// Returns an error if the log directory cannot be determined or created,
/// or if a global subscriber is already set.
pub fn init() -> anyhow::Result<()> {
    let log_dir = get_log_directory()?;
    std::fs::create_dir_all(&log_dir)?;

    let file_appender = RollingFileAppender::new(Rotation::DAILY, &log_dir, "tableforge.log");

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    let subscriber = tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(file_appender)
                .with_ansi(false)
                .with_target(true)
                .with_file(true)
                .with_line_number(true),
        )
        .with(filter);

    tracing::subscriber::set_global_default(subscriber)?;

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "TableForge starting up");
    tracing::debug!(log_dir = %log_dir.display(), "Log directory");

    Ok(())
}

/// Platform local data directory with `tableforge/logs` appended.
fn get_log_directory() -> anyhow::Result<PathBuf> {
    let base_dir = dirs::data_local_dir()
        .ok_or_else(|| anyhow::anyhow!("Could not determine local data directory"))?;

    Ok(base_dir.join("tableforge").join("logs"))
}

/// Get the path where logs are stored, for display in the help screen.
pub fn log_directory() -> Option<PathBuf> {
    get_log_directory().ok()
}

/// Log application shutdown.
pub fn shutdown() {
    tracing::info!("TableForge shutting down");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_directory_has_expected_structure() {
        if let Some(dir) = log_directory() {
            assert!(dir.ends_with("tableforge/logs"));
        }
    }
}

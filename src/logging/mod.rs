//! Application logging functionality
//!
//! Sets up the tracing subscriber and handles log file management under
//! ~/.config/meshtext/logs/

use std::fs;
use std::path::PathBuf;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// Filter used when RUST_LOG is not set
pub const DEFAULT_FILTER: &str = "meshtext=info";

/// Get the path to the meshtext config directory
pub fn config_dir() -> PathBuf {
    let config_dir = dirs::config_dir()
        .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")));
    config_dir.join("meshtext")
}

/// Get the path to the logs directory
pub fn logs_dir() -> PathBuf {
    config_dir().join("logs")
}

/// File name of today's log file
pub fn current_log_file_name() -> String {
    let timestamp = chrono::Utc::now().format("%Y-%m-%d");
    format!("meshtext-{}.log", timestamp)
}

/// Get the path to the current log file
pub fn current_log_file() -> PathBuf {
    logs_dir().join(current_log_file_name())
}

/// Initialize the logs directory
pub fn initialize_logs_directory() -> anyhow::Result<()> {
    let logs_dir = logs_dir();
    fs::create_dir_all(&logs_dir)?;
    Ok(())
}

/// Install the global subscriber: formatted output on stderr, and with
/// `log_to_file` a copy in today's log file.
///
/// Keep the returned guard alive until exit, it flushes the file writer.
pub fn init(log_to_file: bool) -> anyhow::Result<Option<WorkerGuard>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let stderr_layer = fmt::layer().with_writer(std::io::stderr).with_target(false);

    let (file_layer, guard) = if log_to_file {
        initialize_logs_directory()?;
        let appender = tracing_appender::rolling::never(logs_dir(), current_log_file_name());
        let (writer, guard) = tracing_appender::non_blocking(appender);
        let layer = fmt::layer().with_writer(writer).with_ansi(false);
        (Some(layer), Some(guard))
    } else {
        (None, None)
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(file_layer)
        .try_init()?;

    if log_to_file {
        tracing::info!("Logging to {:?}", current_log_file());
    }
    Ok(guard)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_file_lives_in_the_logs_directory() {
        let file = current_log_file();
        assert_eq!(file.parent(), Some(logs_dir().as_path()));
        let name = current_log_file_name();
        assert!(name.starts_with("meshtext-") && name.ends_with(".log"));
    }
}

//! Logging infrastructure for tiledrape.
//!
//! Provides structured logging to stderr and, optionally, to a log file:
//! - Console output goes to stderr so command output on stdout stays clean
//! - The log file is cleared on session start
//! - `RUST_LOG` overrides the configured level

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use time::macros::format_description;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::fmt::time::LocalTime;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use crate::config::LoggingSettings;

/// Guard that must be kept alive for the duration of logging.
///
/// Dropping this guard will flush and close the log file writer.
pub struct LoggingGuard {
    _file_guard: Option<WorkerGuard>,
}

/// Initialize the global logging subscriber.
///
/// # Arguments
///
/// * `settings` - Level and optional log file from the config file
///
/// # Returns
///
/// LoggingGuard that must be kept alive for file logging to work
///
/// # Errors
///
/// Returns error if the log file cannot be created or a global subscriber
/// is already installed
pub fn init_logging(settings: &LoggingSettings) -> Result<LoggingGuard, io::Error> {
    let timer = LocalTime::new(format_description!(
        "[year]-[month]-[day] [hour]:[minute]:[second].[subsecond digits:3]"
    ));

    let (file_layer, file_guard) = match &settings.file {
        Some(path) => {
            let (dir, name) = split_log_path(path)?;
            fs::create_dir_all(&dir)?;
            // Start every session with an empty log
            fs::write(path, "")?;

            let appender = tracing_appender::rolling::never(dir, name);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_timer(timer.clone());
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    let console_layer = tracing_subscriber::fmt::layer()
        .with_writer(io::stderr)
        .with_target(false)
        .with_timer(timer);

    tracing_subscriber::registry()
        .with(env_filter(&settings.level))
        .with(console_layer)
        .with(file_layer)
        .try_init()
        .map_err(io::Error::other)?;

    Ok(LoggingGuard {
        _file_guard: file_guard,
    })
}

/// Filter from `RUST_LOG`, falling back to `default_level`.
fn env_filter(default_level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level))
}

fn split_log_path(path: &Path) -> Result<(PathBuf, PathBuf), io::Error> {
    let name = path.file_name().ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("log path '{}' has no file name", path.display()),
        )
    })?;
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    Ok((dir, PathBuf::from(name)))
}

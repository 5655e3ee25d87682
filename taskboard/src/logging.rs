//! Tracing subscriber setup for hosts embedding the board.

use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;

/// Default log file name, placed in the system temp directory.
pub const DEFAULT_LOG_FILE: &str = "taskboard.log";

/// Initialize file-based logging (non-blocking).
///
/// `RUST_LOG` takes precedence over `level` when set. Returns the writer
/// guard, which must be held for the lifetime of the program so buffered
/// events are flushed. Returns `None` if `file_path` has no usable parent
/// or file name, or if a global subscriber is already installed.
#[must_use]
pub fn init_logging(level: &str, file_path: Option<&Path>) -> Option<WorkerGuard> {
    let default_path = std::env::temp_dir().join(DEFAULT_LOG_FILE);
    let log_path = file_path.unwrap_or(&default_path);

    let log_dir = log_path.parent()?;
    let file_name = log_path.file_name()?.to_str()?;

    let file_appender = tracing_appender::rolling::never(log_dir, file_name);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_env_filter(env_filter)
        .with_ansi(false)
        .try_init()
        .ok()?;

    Some(guard)
}

//! ログ初期化
//!
//! Diagnostic events go to a daily rolling file when the log directory is
//! usable, and to stderr only when a level is set explicitly
//! (`CHECK_LOG_LEVEL` / `RUST_LOG`). The human-readable report is printed
//! separately by [`crate::report::Console`].

use std::io;
use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Log file name prefix inside the log directory
pub const LOG_FILE_NAME: &str = "integration-checker.log";

const DEFAULT_FILE_LEVEL: &str = "info";

/// Create the log directory if it does not exist yet.
pub fn ensure_log_dir(dir: &Path) -> io::Result<()> {
    if dir.is_dir() {
        return Ok(());
    }
    std::fs::create_dir_all(dir)
}

fn level_override() -> Option<String> {
    std::env::var("CHECK_LOG_LEVEL")
        .or_else(|_| std::env::var("RUST_LOG"))
        .ok()
}

fn filter(default: &str) -> EnvFilter {
    level_override()
        .and_then(|level| EnvFilter::try_new(level).ok())
        .unwrap_or_else(|| EnvFilter::new(default))
}

/// Install the global subscriber.
///
/// The returned guard flushes the file writer on drop and must be held until
/// the process exits.
pub fn init(log_dir: Option<&Path>) -> Result<Option<WorkerGuard>, anyhow::Error> {
    let (file_layer, guard) = match log_dir {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, LOG_FILE_NAME);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_filter(filter(DEFAULT_FILE_LEVEL));
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    let stderr_layer = level_override().map(|_| {
        fmt::layer()
            .with_writer(io::stderr)
            .with_target(false)
            .with_filter(filter(DEFAULT_FILE_LEVEL))
    });

    tracing_subscriber::registry()
        .with(file_layer)
        .with(stderr_layer)
        .try_init()?;

    Ok(guard)
}

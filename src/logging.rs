//! File-based tracing setup. The terminal belongs to the UI, so events go to
//! a daily-rolling log file instead of stdout.

use std::path::Path;
use std::sync::OnceLock;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use crate::error::{AppError, Result};

const LOG_FILE_PREFIX: &str = "nerx.log";

static LOG_GUARD: OnceLock<WorkerGuard> = OnceLock::new();

/// Install the global subscriber writing under `log_dir`.
///
/// `RUST_LOG` takes precedence over `level`.
pub fn init(log_dir: &Path, level: &str) -> Result<()> {
    std::fs::create_dir_all(log_dir)
        .map_err(|e| AppError::Logging(format!("{}: {}", log_dir.display(), e)))?;

    let file_appender = tracing_appender::rolling::daily(log_dir, LOG_FILE_PREFIX);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
    let _ = LOG_GUARD.set(guard);

    tracing_subscriber::fmt()
        .with_env_filter(filter(level))
        .with_ansi(false)
        .with_target(true)
        .with_writer(non_blocking)
        .try_init()
        .map_err(|e| AppError::Logging(e.to_string()))
}

fn filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new(crate::config::DEFAULT_LOG_LEVEL))
}

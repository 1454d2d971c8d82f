//! Tracing subscriber setup.

use std::path::Path;

use anyhow::Result;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

pub const LOG_FILE_PREFIX: &str = "aikenize.log";

fn env_filter(default: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default))
}

/// Logs to stderr, warnings and up unless `RUST_LOG` says otherwise.
pub fn init_stderr() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter("aikenize=warn"))
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Logs to a daily-rolling file in `log_dir`, so the prompt stays clean.
///
/// The returned guard flushes buffered lines on drop; keep it alive for the
/// whole session.
pub fn init_file(log_dir: &Path) -> Result<WorkerGuard> {
    std::fs::create_dir_all(log_dir)?;
    let appender = tracing_appender::rolling::daily(log_dir, LOG_FILE_PREFIX);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter("aikenize=info"))
        .with_writer(writer)
        .with_ansi(false)
        .try_init();

    Ok(guard)
}

//! tracing subscriber setup.
//!
//! The CLI logs to stderr. The interactive UI owns the terminal, so it logs
//! to a file through a non-blocking appender instead.

use std::path::Path;

use anyhow::{Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

fn filter(directive: &str) -> EnvFilter {
    EnvFilter::try_new(directive).unwrap_or_else(|_| EnvFilter::new("warn"))
}

/// Installs a compact stderr subscriber. A second call is a no-op.
pub fn init_stderr(directive: &str) {
    let _ = tracing_subscriber::fmt()
        .compact()
        .with_env_filter(filter(directive))
        .with_writer(std::io::stderr)
        .try_init();
}

/// Installs a file subscriber writing to `path`.
///
/// The returned guard flushes buffered lines on drop; keep it alive for the
/// lifetime of the UI.
///
/// # Errors
/// Returns an error if the log directory cannot be created.
pub fn init_file(path: &Path, directive: &str) -> Result<WorkerGuard> {
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create log directory {}", dir.display()))?;
    let file_name = path
        .file_name()
        .map_or_else(|| "aora.log".into(), |n| n.to_os_string());

    let appender = tracing_appender::rolling::never(dir, file_name);
    let (writer, guard) = tracing_appender::non_blocking(appender);
    let _ = tracing_subscriber::fmt()
        .with_ansi(false)
        .with_env_filter(filter(directive))
        .with_writer(writer)
        .try_init();
    Ok(guard)
}

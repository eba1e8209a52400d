use std::io;
use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use crate::error::RssiResult;

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Initialize tracing for a full-screen binary.
///
/// Logs go to `log_path` when given; otherwise logging is off, since the
/// terminal belongs to the UI. Keep the returned guard alive until exit so
/// buffered lines are flushed.
pub fn init_tui(log_path: Option<&Path>) -> RssiResult<Option<WorkerGuard>> {
    if let Some(path) = log_path {
        let file = std::fs::File::create(path)?;
        let (writer, guard) = tracing_appender::non_blocking(file);
        tracing_subscriber::fmt()
            .with_env_filter(env_filter())
            .with_writer(writer)
            .with_ansi(false)
            .init();
        Ok(Some(guard))
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::new("off"))
            .with_writer(io::sink)
            .init();
        Ok(None)
    }
}

/// Initialize tracing to stderr for the line-oriented scan tool.
pub fn init_stderr() {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

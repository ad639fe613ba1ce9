use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

/// Filter from `RUST_LOG`, falling back to `info`.
fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Logs to a daily rolling file under `dir`, since the terminal belongs to the maze.
/// Keep the returned guard alive until exit or buffered lines are lost.
pub fn init_file_logging(dir: &Path) -> WorkerGuard {
    let appender = tracing_appender::rolling::daily(dir, "mazerun.log");
    let (writer, guard) = tracing_appender::non_blocking(appender);
    // Ignore the error if a subscriber is already set (tests)
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(writer)
        .with_ansi(false)
        .try_init();
    guard
}

/// Logs to stderr, for headless runs.
pub fn init_stderr_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(std::io::stderr)
        .try_init();
}

use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Initialize file logging under `<dir>/logs`. The terminal belongs to the
/// TUI, so nothing is written to stdout or stderr.
///
/// Returns a guard that must be held for the app lifetime, or None when the
/// log directory is unusable (logging is then disabled).
pub fn init_logging(dir: &Path) -> Option<WorkerGuard> {
    let logs_dir = dir.join("logs");
    std::fs::create_dir_all(&logs_dir).ok()?;

    let file_appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix("diary")
        .filename_suffix("log")
        .build(&logs_dir)
        .ok()?;
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,diary=debug"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_target(true)
                .with_file(true)
                .with_line_number(true),
        )
        .try_init()
        .ok()?;

    Some(guard)
}

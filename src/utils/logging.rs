//! Logging initialization.
//!
//! Structured JSON logging to stdout and a daily-rolling file, so the
//! watcher's own output stays machine-parseable alongside the access log it
//! tails.

use tracing_appender::rolling;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize the logging system.
///
/// Logs are written as JSON to stdout and to a daily file under `LOG_DIR`
/// (default `logs/`), named `nginx-watcher.log.YYYY-MM-DD`. The level filter
/// comes from `RUST_LOG`, falling back to `info,nginx_watcher=debug`.
///
/// The returned `WorkerGuard` must be kept alive in `main`, otherwise
/// buffered log lines are lost on shutdown.
pub fn init_logging() -> tracing_appender::non_blocking::WorkerGuard {
    let log_dir = std::env::var("LOG_DIR").unwrap_or_else(|_| "logs".to_string());

    let file_appender = rolling::daily(&log_dir, "nginx-watcher.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let stdout_layer = fmt::layer()
        .json()
        .with_timer(fmt::time::UtcTime::rfc_3339())
        .with_current_span(true)
        .flatten_event(false);

    let file_layer = fmt::layer()
        .json()
        .with_timer(fmt::time::UtcTime::rfc_3339())
        .with_current_span(true)
        .flatten_event(false)
        .with_ansi(false)
        .with_writer(non_blocking);

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,nginx_watcher=debug"));

    if let Err(err) = tracing_subscriber::registry()
        .with(filter)
        .with(stdout_layer)
        .with(file_layer)
        .try_init()
    {
        // A second init only happens when something else already installed a
        // subscriber; the watcher still runs, just without these layers.
        eprintln!("Failed to initialize tracing: {}", err);
    }

    guard
}

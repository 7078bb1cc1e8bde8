//! Error types for the watcher pipeline.

use reqwest::StatusCode;

/// Watcher result type
pub type WatcherResult<T> = Result<T, WatcherError>;

/// Errors surfaced by the tailing and delivery layers.
///
/// Tail I/O errors are transient by contract: the run loop logs them and
/// retries after a backoff. Webhook errors are contained inside the notifier
/// and reported as a not-delivered result.
#[derive(Debug, thiserror::Error)]
pub enum WatcherError {
    #[error("Log file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Webhook request failed: {0}")]
    Webhook(#[from] reqwest::Error),

    #[error("Webhook returned status {status}")]
    WebhookStatus { status: StatusCode },
}

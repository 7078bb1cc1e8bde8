//! Alert taxonomy and event model.
//!
//! An [`AlertEvent`] is ephemeral: built by the watcher pipeline when a
//! detector fires and the cooldown gate passes, handed to the notifier once,
//! then dropped. Nothing is persisted.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Slack attachment colors (hex)
pub mod colors {
    /// Failover - orange
    pub const FAILOVER: &str = "#FFA500";
    /// High error rate - red
    pub const ERROR_RATE: &str = "#FF0000";
    /// Recovery - green (no recovery alerts are emitted; breach-only alerting)
    pub const RECOVERY: &str = "#00FF00";
    /// Informational - blue
    pub const INFO: &str = "#0000FF";
}

/// Alert kinds raised by the watcher.
///
/// Each kind has its own cooldown track and its own attachment color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertKind {
    /// The upstream pool identity changed between consecutive requests
    Failover,
    /// The windowed error rate exceeded the configured threshold
    ErrorRate,
}

impl AlertKind {
    /// Slack attachment color for this kind
    pub fn color(&self) -> &'static str {
        match self {
            AlertKind::Failover => colors::FAILOVER,
            AlertKind::ErrorRate => colors::ERROR_RATE,
        }
    }

    /// Stable lowercase name, matching the serialized form
    pub fn as_str(&self) -> &'static str {
        match self {
            AlertKind::Failover => "failover",
            AlertKind::ErrorRate => "error_rate",
        }
    }
}

impl fmt::Display for AlertKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single alert ready for delivery.
#[derive(Debug, Clone, Serialize)]
pub struct AlertEvent {
    /// Unique event id
    pub id: Uuid,
    /// Alert kind
    pub kind: AlertKind,
    /// Human-readable message body (Slack markdown)
    pub message: String,
    /// Creation time
    pub timestamp: DateTime<Utc>,
}

impl AlertEvent {
    /// Create an alert event with a preformatted message.
    pub fn new(kind: AlertKind, message: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            message: message.into(),
            timestamp: Utc::now(),
        }
    }

    /// Build the failover alert for a pool transition.
    pub fn failover(previous_pool: &str, current_pool: &str) -> Self {
        let timestamp = Utc::now();
        let message = format!(
            "🔄 *Failover Detected*\n\
             • Previous pool: `{}`\n\
             • Current pool: `{}`\n\
             • Time: {}\n\
             • Action: Check health of `{}` container",
            previous_pool,
            current_pool,
            timestamp.format("%Y-%m-%d %H:%M:%S"),
            previous_pool
        );

        Self {
            id: Uuid::new_v4(),
            kind: AlertKind::Failover,
            message,
            timestamp,
        }
    }

    /// Build the high-error-rate alert for a threshold breach.
    pub fn high_error_rate(
        percent: f64,
        threshold_percent: f64,
        error_count: usize,
        total_count: usize,
        pool: &str,
    ) -> Self {
        let timestamp = Utc::now();
        let message = format!(
            "⚠️ *High Error Rate Detected*\n\
             • Error rate: `{:.2}%` (threshold: {:.1}%)\n\
             • Window: {}/{} requests\n\
             • Current pool: `{}`\n\
             • Time: {}\n\
             • Action: Inspect `{}` logs for issues",
            percent,
            threshold_percent,
            error_count,
            total_count,
            pool,
            timestamp.format("%Y-%m-%d %H:%M:%S"),
            pool
        );

        Self {
            id: Uuid::new_v4(),
            kind: AlertKind::ErrorRate,
            message,
            timestamp,
        }
    }

    /// Slack attachment color for this event
    pub fn color(&self) -> &'static str {
        self.kind.color()
    }
}

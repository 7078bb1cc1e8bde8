//! Monitoring pipeline for blue/green nginx deployments
//!
//! This module provides the log-to-alert pipeline:
//! - Access log tailing and parsing
//! - Sliding-window failover and error-rate detection
//! - Slack webhook notifications

pub mod access_log;
pub mod error_rate;
pub mod failover;
pub mod slack_alert;
pub mod tail;
pub mod watcher;
pub mod window;

pub use access_log::RequestRecord;
pub use error_rate::ErrorRateDetector;
pub use failover::FailoverDetector;
pub use slack_alert::SlackAlert;
pub use tail::LogTailer;
pub use watcher::AccessLogWatcher;
pub use window::RequestWindow;

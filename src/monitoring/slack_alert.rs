//! Slack alert delivery for deployment notifications
//!
//! Sends alerts to a Slack channel via incoming webhook.
//! Uses legacy attachment formatting with color-coded severity.

use std::time::Duration;

use reqwest::Client;
use serde::Serialize;
use tracing::{error, info};

use crate::alert::{AlertEvent, AlertKind};
use crate::utils::WatcherError;

/// Title shown on every alert attachment
pub const ALERT_TITLE: &str = "🚨 Blue/Green Deployment Alert";

/// Footer identifying the sender
pub const ALERT_FOOTER: &str = "Nginx Log Watcher";

/// Per-request delivery timeout
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

/// Slack webhook message payload
#[derive(Debug, Serialize)]
pub struct SlackMessage {
    /// Attachments carrying the alert body
    pub attachments: Vec<SlackAttachment>,
}

/// Slack attachment for color-coded messages
#[derive(Debug, Clone, Serialize)]
pub struct SlackAttachment {
    /// Sidebar color (hex string)
    pub color: String,
    /// Attachment title
    pub title: String,
    /// Attachment body (mrkdwn)
    pub text: String,
    /// Footer text
    pub footer: String,
    /// Timestamp (Unix epoch seconds)
    pub ts: i64,
}

impl SlackMessage {
    /// Build the webhook payload for an alert event.
    pub fn from_event(event: &AlertEvent) -> Self {
        Self {
            attachments: vec![SlackAttachment {
                color: event.color().to_string(),
                title: ALERT_TITLE.to_string(),
                text: event.message.clone(),
                footer: ALERT_FOOTER.to_string(),
                ts: event.timestamp.timestamp(),
            }],
        }
    }
}

/// Slack alert service
#[derive(Debug, Clone)]
pub struct SlackAlert {
    /// Webhook URL
    webhook_url: String,
    /// HTTP client
    client: Client,
    /// Whether alerts are enabled
    enabled: bool,
    /// Whether maintenance mode suppresses failover alerts
    maintenance_mode: bool,
}

impl SlackAlert {
    /// Create a new Slack alert service
    pub fn new(webhook_url: impl Into<String>) -> Self {
        Self {
            webhook_url: webhook_url.into(),
            client: Client::new(),
            enabled: true,
            maintenance_mode: false,
        }
    }

    /// Create a disabled alert service (for testing)
    pub fn disabled() -> Self {
        Self {
            webhook_url: String::new(),
            client: Client::new(),
            enabled: false,
            maintenance_mode: false,
        }
    }

    /// Set maintenance mode, which suppresses failover alerts while a
    /// planned switchover is underway
    pub fn with_maintenance_mode(mut self, maintenance_mode: bool) -> Self {
        self.maintenance_mode = maintenance_mode;
        self
    }

    /// Check if alerts are enabled
    pub fn is_enabled(&self) -> bool {
        self.enabled && !self.webhook_url.is_empty()
    }

    /// Check if an alert kind is suppressed by maintenance mode.
    ///
    /// Only failover alerts are suppressed; error-rate alerts still fire
    /// because a broken deployment is actionable even mid-switchover.
    pub fn is_suppressed(&self, kind: AlertKind) -> bool {
        self.maintenance_mode && kind == AlertKind::Failover
    }

    /// Get the webhook URL (for testing)
    pub fn webhook_url(&self) -> &str {
        &self.webhook_url
    }

    /// Deliver an alert event to Slack, returning whether delivery succeeded.
    ///
    /// Without a webhook URL the alert is logged locally instead. Delivery is
    /// a single attempt; a failed send is logged and dropped, never retried.
    pub async fn notify(&self, event: &AlertEvent) -> bool {
        if !self.is_enabled() {
            info!(
                kind = %event.kind,
                message = %event.message,
                "Webhook not configured, logging alert locally"
            );
            return false;
        }

        if self.is_suppressed(event.kind) {
            info!(kind = %event.kind, "Maintenance mode active, alert suppressed");
            return false;
        }

        let payload = SlackMessage::from_event(event);

        match self.send_payload(&payload).await {
            Ok(()) => true,
            Err(e) => {
                error!(error = %e, kind = %event.kind, "Failed to deliver alert");
                false
            }
        }
    }

    /// Send raw Slack message payload
    async fn send_payload(&self, payload: &SlackMessage) -> Result<(), WatcherError> {
        let response = self
            .client
            .post(&self.webhook_url)
            .timeout(REQUEST_TIMEOUT)
            .json(payload)
            .send()
            .await
            .map_err(|e| {
                error!(error = %e, "Failed to send Slack webhook");
                WatcherError::Webhook(e)
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            error!(status = %status, body = %body, "Slack webhook returned error");
            return Err(WatcherError::WebhookStatus { status });
        }

        info!("Slack alert sent successfully");
        Ok(())
    }
}

use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Runtime configuration for the access log watcher
#[derive(Debug, Clone)]
pub struct WatcherConfig {
    /// Slack incoming webhook URL (empty disables delivery)
    pub slack_webhook_url: String,
    /// Error-rate alert threshold, percent
    pub error_rate_threshold: f64,
    /// Sliding window capacity in requests
    pub window_size: usize,
    /// Minimum seconds between alerts of the same kind
    pub alert_cooldown_secs: u64,
    /// Access log file to tail
    pub log_file: PathBuf,
    /// Whether a planned switchover is underway
    pub maintenance_mode: bool,
}

impl WatcherConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        let slack_webhook_url = env::var("SLACK_WEBHOOK_URL").unwrap_or_default();
        if slack_webhook_url.is_empty() {
            tracing::warn!("SLACK_WEBHOOK_URL not set, alerts will only be logged locally");
        }

        let error_rate_threshold = env::var("ERROR_RATE_THRESHOLD")
            .unwrap_or_else(|_| "2.0".to_string())
            .parse()
            .map_err(|_| ConfigError::InvalidThreshold)?;

        let window_size: usize = env::var("WINDOW_SIZE")
            .unwrap_or_else(|_| "200".to_string())
            .parse()
            .map_err(|_| ConfigError::InvalidWindowSize)?;

        if window_size == 0 {
            return Err(ConfigError::InvalidWindowSize);
        }

        let alert_cooldown_secs = env::var("ALERT_COOLDOWN_SEC")
            .unwrap_or_else(|_| "300".to_string())
            .parse()
            .map_err(|_| ConfigError::InvalidCooldown)?;

        let log_file = PathBuf::from(
            env::var("LOG_FILE").unwrap_or_else(|_| "/var/log/nginx/access.log".to_string()),
        );

        let maintenance_mode = env::var("MAINTENANCE_MODE")
            .unwrap_or_else(|_| "false".to_string())
            .to_lowercase()
            == "true";

        Ok(Self {
            slack_webhook_url,
            error_rate_threshold,
            window_size,
            alert_cooldown_secs,
            log_file,
            maintenance_mode,
        })
    }

    /// Cooldown between alerts of the same kind
    pub fn alert_cooldown(&self) -> Duration {
        Duration::from_secs(self.alert_cooldown_secs)
    }
}

impl Default for WatcherConfig {
    fn default() -> Self {
        Self {
            slack_webhook_url: String::new(),
            error_rate_threshold: 2.0,
            window_size: 200,
            alert_cooldown_secs: 300,
            log_file: PathBuf::from("/var/log/nginx/access.log"),
            maintenance_mode: false,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid error rate threshold")]
    InvalidThreshold,
    #[error("Invalid window size")]
    InvalidWindowSize,
    #[error("Invalid alert cooldown")]
    InvalidCooldown,
}

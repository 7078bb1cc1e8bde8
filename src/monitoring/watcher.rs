//! Access log watcher pipeline
//!
//! Wires the tailer, parser, sliding window, detectors, cooldown gate and
//! Slack notifier together:
//! - tail new lines -> parse records -> update window
//! - failover detection -> cooldown gate -> Slack
//! - error-rate detection -> cooldown gate -> Slack

use std::time::{Duration, Instant};

use tracing::{info, instrument, warn};

use crate::alert::{AlertEvent, AlertKind, CooldownGate};
use crate::config::WatcherConfig;
use crate::monitoring::access_log::RequestRecord;
use crate::monitoring::error_rate::ErrorRateDetector;
use crate::monitoring::failover::FailoverDetector;
use crate::monitoring::slack_alert::SlackAlert;
use crate::monitoring::tail::LogTailer;
use crate::monitoring::window::RequestWindow;
use crate::utils::WatcherResult;

/// Pause between polls while waiting for the log file to appear
const FILE_WAIT_INTERVAL: Duration = Duration::from_secs(2);

/// Pause between tail polls
const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Pause after a transient read failure
const ERROR_BACKOFF: Duration = Duration::from_secs(1);

/// Watcher that turns an nginx access log into deployment alerts
pub struct AccessLogWatcher {
    /// Log file tailer
    tailer: LogTailer,
    /// Sliding window of recent requests
    window: RequestWindow,
    /// Pool identity tracking
    failover: FailoverDetector,
    /// Error rate threshold checks
    error_rate: ErrorRateDetector,
    /// Per-kind alert rate limiting
    cooldown: CooldownGate,
    /// Alert delivery
    slack: SlackAlert,
    /// Pause between tail polls
    poll_interval: Duration,
}

impl AccessLogWatcher {
    /// Create a watcher wired up from configuration
    pub fn new(config: &WatcherConfig) -> Self {
        let slack = SlackAlert::new(config.slack_webhook_url.clone())
            .with_maintenance_mode(config.maintenance_mode);

        Self {
            tailer: LogTailer::new(&config.log_file),
            window: RequestWindow::new(config.window_size),
            failover: FailoverDetector::new(),
            error_rate: ErrorRateDetector::new(config.error_rate_threshold),
            cooldown: CooldownGate::new(config.alert_cooldown()),
            slack,
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }

    /// Set the tail poll interval
    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    /// Get the sliding window
    pub fn window(&self) -> &RequestWindow {
        &self.window
    }

    /// Get the tailer
    pub fn tailer(&self) -> &LogTailer {
        &self.tailer
    }

    /// Run one access log line through detection.
    ///
    /// Unparseable and health-check lines are dropped. Detections are logged
    /// even when the cooldown gate holds the alert back; only events that
    /// pass the gate are returned for delivery.
    pub fn ingest_line(&mut self, line: &str, now: Instant) -> Vec<AlertEvent> {
        let record = match RequestRecord::parse(line) {
            Some(record) => record,
            None => return Vec::new(),
        };

        let pool = record.pool.clone();
        self.window.append(record);

        let mut events = Vec::new();

        if let Some(change) = self.failover.observe(&pool) {
            warn!(
                previous_pool = %change.previous,
                current_pool = %change.current,
                "Failover detected"
            );
            if self.cooldown.should_fire(AlertKind::Failover, now) {
                events.push(AlertEvent::failover(&change.previous, &change.current));
            }
        }

        if let Some(breach) = self.error_rate.check(&self.window) {
            warn!(
                error_rate = breach.rate.percent,
                error_count = breach.rate.error_count,
                total_count = breach.rate.total_count,
                pool = %breach.pool,
                "High error rate detected"
            );
            if self.cooldown.should_fire(AlertKind::ErrorRate, now) {
                events.push(AlertEvent::high_error_rate(
                    breach.rate.percent,
                    self.error_rate.threshold_percent(),
                    breach.rate.error_count,
                    breach.rate.total_count,
                    &breach.pool,
                ));
            }
        }

        events
    }

    /// Poll the log once and run every new line through detection.
    ///
    /// Returns the alert events that passed the cooldown gate. Useful for
    /// driving the pipeline step by step.
    pub fn process_once(&mut self) -> WatcherResult<Vec<AlertEvent>> {
        let lines = self.tailer.poll()?;

        let mut events = Vec::new();
        for line in &lines {
            events.extend(self.ingest_line(line, Instant::now()));
        }

        Ok(events)
    }

    /// Run the watch loop continuously.
    ///
    /// Waits for the log file to exist, skips everything already in it, then
    /// polls for new lines and delivers any alerts. Read failures are logged
    /// and retried after a backoff; the loop itself never returns.
    #[instrument(skip(self), level = "info")]
    pub async fn run(&mut self) {
        info!(
            log_file = %self.tailer.path().display(),
            "Starting access log watcher"
        );

        self.tailer.wait_for_file(FILE_WAIT_INTERVAL).await;

        let offset = loop {
            match self.tailer.seek_to_end() {
                Ok(offset) => break offset,
                Err(e) => {
                    warn!(error = %e, "Failed to read log file size, retrying");
                    tokio::time::sleep(ERROR_BACKOFF).await;
                }
            }
        };

        info!(offset, "Watching for new log entries");

        loop {
            match self.process_once() {
                Ok(events) => {
                    for event in &events {
                        self.slack.notify(event).await;
                    }
                    tokio::time::sleep(self.poll_interval).await;
                }
                Err(e) => {
                    warn!(error = %e, "Log read failed, backing off");
                    tokio::time::sleep(ERROR_BACKOFF).await;
                }
            }
        }
    }
}

//! Error-rate threshold detection over the request window.

use crate::monitoring::window::{ErrorRate, RequestWindow};

/// Default breach threshold in percent
pub const DEFAULT_THRESHOLD_PERCENT: f64 = 2.0;

/// A threshold breach observed on the window.
#[derive(Debug, Clone, PartialEq)]
pub struct ErrorRateBreach {
    /// The rate that crossed the threshold
    pub rate: ErrorRate,
    /// Pool of the most recently appended record
    pub pool: String,
}

/// Stateless threshold check, evaluated after every window append.
///
/// Only a breach is reported; the rate dropping back below the threshold
/// produces nothing.
#[derive(Debug)]
pub struct ErrorRateDetector {
    threshold_percent: f64,
}

impl ErrorRateDetector {
    pub fn new(threshold_percent: f64) -> Self {
        Self { threshold_percent }
    }

    /// Configured threshold in percent
    pub fn threshold_percent(&self) -> f64 {
        self.threshold_percent
    }

    /// Check the window; returns a breach when the rate strictly exceeds the
    /// threshold. `None` while the window has insufficient data.
    pub fn check(&self, window: &RequestWindow) -> Option<ErrorRateBreach> {
        let rate = window.error_rate()?;

        if rate.percent > self.threshold_percent {
            let pool = window
                .last()
                .map(|record| record.pool.clone())
                .unwrap_or_else(|| "unknown".to_string());

            return Some(ErrorRateBreach { rate, pool });
        }

        None
    }
}

impl Default for ErrorRateDetector {
    fn default() -> Self {
        Self::new(DEFAULT_THRESHOLD_PERCENT)
    }
}

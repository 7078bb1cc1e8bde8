//! Failover detection over the upstream pool identity.

use tracing::info;

/// A detected pool transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoolChange {
    /// Pool that served traffic before the transition
    pub previous: String,
    /// Pool serving traffic now
    pub current: String,
}

/// Tracks which pool is serving traffic and reports transitions.
///
/// The first non-empty pool observed becomes the baseline without raising an
/// event. Every later observation of a different non-empty pool yields a
/// [`PoolChange`] and moves the baseline, whether or not the caller ends up
/// dispatching an alert for it. Empty pool values never touch the state.
#[derive(Debug, Default)]
pub struct FailoverDetector {
    last_pool: Option<String>,
}

impl FailoverDetector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pool currently tracked as serving traffic, if any
    pub fn last_pool(&self) -> Option<&str> {
        self.last_pool.as_deref()
    }

    /// Observe the pool of one request; returns the transition if one
    /// occurred.
    pub fn observe(&mut self, pool: &str) -> Option<PoolChange> {
        if pool.is_empty() {
            return None;
        }

        match self.last_pool.as_deref() {
            None => {
                info!(pool = %pool, "Initial pool detected");
                self.last_pool = Some(pool.to_string());
                None
            }
            Some(last) if last != pool => {
                let change = PoolChange {
                    previous: last.to_string(),
                    current: pool.to_string(),
                };
                self.last_pool = Some(pool.to_string());
                Some(change)
            }
            Some(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_take_first_pool_as_baseline_without_event() {
        // Arrange
        let mut detector = FailoverDetector::new();

        // Act
        let change = detector.observe("blue");

        // Assert
        assert!(change.is_none());
        assert_eq!(detector.last_pool(), Some("blue"));
    }

    #[test]
    fn should_report_transition_to_different_pool() {
        // Arrange
        let mut detector = FailoverDetector::new();
        detector.observe("blue");

        // Act
        let change = detector.observe("green");

        // Assert
        assert_eq!(
            change,
            Some(PoolChange {
                previous: "blue".to_string(),
                current: "green".to_string(),
            })
        );
        assert_eq!(detector.last_pool(), Some("green"));
    }

    #[test]
    fn should_not_report_same_pool_again() {
        // Arrange
        let mut detector = FailoverDetector::new();
        detector.observe("blue");

        // Act
        let change = detector.observe("blue");

        // Assert
        assert!(change.is_none());
    }

    #[test]
    fn should_report_each_distinct_transition() {
        // Arrange
        let mut detector = FailoverDetector::new();
        detector.observe("blue");

        // Act
        let first = detector.observe("green");
        let back = detector.observe("blue");

        // Assert - flapping yields one event per transition
        assert_eq!(first.map(|c| c.current), Some("green".to_string()));
        assert_eq!(
            back,
            Some(PoolChange {
                previous: "green".to_string(),
                current: "blue".to_string(),
            })
        );
    }

    #[test]
    fn should_ignore_empty_pool_values() {
        // Arrange
        let mut detector = FailoverDetector::new();
        detector.observe("blue");

        // Act
        let change = detector.observe("");

        // Assert - no event, baseline untouched
        assert!(change.is_none());
        assert_eq!(detector.last_pool(), Some("blue"));
    }

    #[test]
    fn should_not_take_empty_pool_as_baseline() {
        // Arrange
        let mut detector = FailoverDetector::new();

        // Act
        detector.observe("");
        let change = detector.observe("green");

        // Assert - green is the baseline, not a transition
        assert!(change.is_none());
        assert_eq!(detector.last_pool(), Some("green"));
    }
}

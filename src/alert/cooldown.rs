//! Per-kind alert cooldown gate.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use tracing::debug;

use crate::alert::AlertKind;

/// Default cooldown between two dispatched alerts of the same kind
pub const DEFAULT_COOLDOWN: Duration = Duration::from_secs(300);

/// Suppresses repeated alerts of the same kind within a cooldown interval.
///
/// The gate tracks the last *attempt* per kind, not the last confirmed
/// delivery: when `should_fire` returns true the timestamp is recorded
/// immediately, so a failed webhook call does not re-arm the alert early.
/// Kinds are independent of each other.
#[derive(Debug)]
pub struct CooldownGate {
    cooldown: Duration,
    last_fired: HashMap<AlertKind, Instant>,
}

impl CooldownGate {
    /// Create a gate with the given cooldown interval.
    pub fn new(cooldown: Duration) -> Self {
        Self {
            cooldown,
            last_fired: HashMap::new(),
        }
    }

    /// Get the configured cooldown interval
    pub fn cooldown(&self) -> Duration {
        self.cooldown
    }

    /// Check whether an alert of `kind` may fire at `now`.
    ///
    /// True iff `kind` has never fired, or strictly more than the cooldown
    /// has elapsed since its last firing. Records the firing when true.
    pub fn should_fire(&mut self, kind: AlertKind, now: Instant) -> bool {
        let ready = match self.last_fired.get(&kind) {
            Some(last) => now.duration_since(*last) > self.cooldown,
            None => true,
        };

        if ready {
            self.last_fired.insert(kind, now);
        } else {
            debug!(kind = %kind, "Alert suppressed by cooldown");
        }

        ready
    }
}

impl Default for CooldownGate {
    fn default() -> Self {
        Self::new(DEFAULT_COOLDOWN)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_fire_first_alert_of_each_kind() {
        // Arrange
        let mut gate = CooldownGate::new(Duration::from_secs(300));
        let now = Instant::now();

        // Act & Assert
        assert!(gate.should_fire(AlertKind::Failover, now));
        assert!(gate.should_fire(AlertKind::ErrorRate, now));
    }

    #[test]
    fn should_suppress_repeat_within_cooldown() {
        // Arrange
        let mut gate = CooldownGate::new(Duration::from_secs(300));
        let start = Instant::now();
        assert!(gate.should_fire(AlertKind::Failover, start));

        // Act
        let within = gate.should_fire(AlertKind::Failover, start + Duration::from_secs(299));

        // Assert
        assert!(!within);
    }

    #[test]
    fn should_suppress_at_exactly_the_cooldown_boundary() {
        // Arrange
        let mut gate = CooldownGate::new(Duration::from_secs(300));
        let start = Instant::now();
        assert!(gate.should_fire(AlertKind::Failover, start));

        // Act - elapsed == cooldown is not strictly greater
        let at_boundary = gate.should_fire(AlertKind::Failover, start + Duration::from_secs(300));

        // Assert
        assert!(!at_boundary);
    }

    #[test]
    fn should_fire_again_after_cooldown_elapses() {
        // Arrange
        let mut gate = CooldownGate::new(Duration::from_secs(300));
        let start = Instant::now();
        assert!(gate.should_fire(AlertKind::Failover, start));

        // Act
        let after = gate.should_fire(AlertKind::Failover, start + Duration::from_secs(301));

        // Assert
        assert!(after);
    }

    #[test]
    fn should_track_kinds_independently() {
        // Arrange
        let mut gate = CooldownGate::new(Duration::from_secs(300));
        let start = Instant::now();

        // Act - failover fires, error rate fires later inside failover's window
        assert!(gate.should_fire(AlertKind::Failover, start));
        let error_rate = gate.should_fire(AlertKind::ErrorRate, start + Duration::from_secs(100));
        let failover_again = gate.should_fire(AlertKind::Failover, start + Duration::from_secs(100));

        // Assert
        assert!(error_rate);
        assert!(!failover_again);
    }

    #[test]
    fn should_restart_cooldown_from_each_firing() {
        // Arrange
        let mut gate = CooldownGate::new(Duration::from_secs(300));
        let start = Instant::now();
        assert!(gate.should_fire(AlertKind::ErrorRate, start));

        // Act - second firing at +301 re-arms the gate from there
        assert!(gate.should_fire(AlertKind::ErrorRate, start + Duration::from_secs(301)));
        let shortly_after = gate.should_fire(AlertKind::ErrorRate, start + Duration::from_secs(400));

        // Assert - only 99s since the second firing
        assert!(!shortly_after);
    }

    #[test]
    fn should_use_default_cooldown_of_five_minutes() {
        // Act
        let gate = CooldownGate::default();

        // Assert
        assert_eq!(gate.cooldown(), Duration::from_secs(300));
    }
}

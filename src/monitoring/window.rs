//! Sliding window of recent request outcomes.

use std::collections::VecDeque;

use crate::monitoring::access_log::RequestRecord;

/// Minimum number of records before an error rate is meaningful
pub const MIN_SAMPLES: usize = 10;

/// Error rate over the current window contents.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ErrorRate {
    /// Number of error records in the window
    pub error_count: usize,
    /// Total records in the window
    pub total_count: usize,
    /// `error_count / total_count * 100`
    pub percent: f64,
}

/// Fixed-capacity FIFO of the most recent request outcomes.
///
/// Appending beyond capacity evicts the oldest record, so the window always
/// holds at most `capacity` records in arrival order.
#[derive(Debug)]
pub struct RequestWindow {
    records: VecDeque<RequestRecord>,
    capacity: usize,
}

impl RequestWindow {
    /// Create a window holding up to `capacity` records.
    pub fn new(capacity: usize) -> Self {
        Self {
            records: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Append a record, evicting the oldest once the window is full.
    pub fn append(&mut self, record: RequestRecord) {
        if self.capacity == 0 {
            return;
        }
        if self.records.len() == self.capacity {
            self.records.pop_front();
        }
        self.records.push_back(record);
    }

    /// Number of records currently held
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True when no records are held
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Maximum number of records the window holds
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Most recently appended record
    pub fn last(&self) -> Option<&RequestRecord> {
        self.records.back()
    }

    /// Number of error records currently held
    pub fn error_count(&self) -> usize {
        self.records.iter().filter(|record| record.is_error).count()
    }

    /// Current error rate, or `None` while fewer than [`MIN_SAMPLES`]
    /// records are held.
    ///
    /// Callers must not alert on a window that reports `None`.
    pub fn error_rate(&self) -> Option<ErrorRate> {
        let total_count = self.records.len();
        if total_count < MIN_SAMPLES {
            return None;
        }

        let error_count = self.error_count();
        Some(ErrorRate {
            error_count,
            total_count,
            percent: error_count as f64 / total_count as f64 * 100.0,
        })
    }

    /// Iterate over the held records, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &RequestRecord> {
        self.records.iter()
    }
}

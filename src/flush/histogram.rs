// Interval frequency histogram with a running mode
//
// The mode is tracked while recording: an interval becomes the mode only by
// strictly exceeding the current maximum count, so among equally frequent
// intervals the one that reached that count first is kept.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Interval length → occurrence count
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntervalHistogram {
    counts: BTreeMap<u64, u64>,
    mode: Option<u64>,
    mode_count: u64,
    total: u64,
}

impl IntervalHistogram {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one occurrence of `interval`
    pub fn record(&mut self, interval: u64) {
        let count = self.counts.entry(interval).or_insert(0);
        *count += 1;
        self.total += 1;

        if *count > self.mode_count {
            self.mode_count = *count;
            self.mode = Some(interval);
        }
    }

    /// Most frequent interval, first to reach the top count on ties
    pub fn mode(&self) -> Option<u64> {
        self.mode
    }

    /// Occurrences of the modal interval
    pub fn mode_count(&self) -> u64 {
        self.mode_count
    }

    pub fn count(&self, interval: u64) -> u64 {
        self.counts.get(&interval).copied().unwrap_or(0)
    }

    /// Number of recorded intervals
    pub fn total(&self) -> u64 {
        self.total
    }

    /// Number of distinct intervals
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// `(interval, count)` pairs in ascending interval order
    pub fn iter(&self) -> impl Iterator<Item = (u64, u64)> + '_ {
        self.counts.iter().map(|(&interval, &count)| (interval, count))
    }
}

impl FromIterator<u64> for IntervalHistogram {
    fn from_iter<I: IntoIterator<Item = u64>>(iter: I) -> Self {
        let mut histogram = Self::new();
        for interval in iter {
            histogram.record(interval);
        }
        histogram
    }
}

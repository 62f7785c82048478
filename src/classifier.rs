//! Threshold classification of latency records
//!
//! Two thresholds split latencies into three disjoint bands:
//! `[0, lat)` normal, `[lat, gc)` buffer flush, `[gc, ..)` GC outlier.

use crate::error::{AnalysisError, Result};
use crate::log_loader::{LatencyLog, LatencyRecord};
use serde::{Deserialize, Serialize};

/// Latency band a record falls into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlushClass {
    /// Fast operation, below `lat_threshold`
    Normal,
    /// Stalled behind a write-buffer flush
    Flush,
    /// Stalled behind background garbage collection
    GcOutlier,
}

/// Latency thresholds for classification
///
/// Invariant: both values finite and `lat_threshold < gc_threshold`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThresholdConfig {
    pub lat_threshold: f64,
    pub gc_threshold: f64,
}

impl ThresholdConfig {
    /// Create a validated threshold pair
    pub fn new(lat_threshold: f64, gc_threshold: f64) -> Result<Self> {
        let config = Self {
            lat_threshold,
            gc_threshold,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.lat_threshold.is_finite()
            || !self.gc_threshold.is_finite()
            || self.lat_threshold >= self.gc_threshold
        {
            return Err(AnalysisError::InvalidThresholdConfig {
                lat: self.lat_threshold,
                gc: self.gc_threshold,
            });
        }
        Ok(())
    }

    /// Classify a raw latency value
    pub fn classify_latency(&self, latency: i64) -> FlushClass {
        let latency = latency as f64;
        if latency < self.lat_threshold {
            FlushClass::Normal
        } else if latency < self.gc_threshold {
            FlushClass::Flush
        } else {
            FlushClass::GcOutlier
        }
    }
}

/// Classify one record
pub fn classify(record: &LatencyRecord, config: &ThresholdConfig) -> FlushClass {
    config.classify_latency(record.latency)
}

/// Per-class record counts of one log
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassCounts {
    pub normal: usize,
    pub flush: usize,
    pub gc_outlier: usize,
}

impl ClassCounts {
    /// Count every record of `log` by class
    pub fn tally(log: &LatencyLog, config: &ThresholdConfig) -> Self {
        let mut counts = Self::default();
        for record in log {
            counts.add(classify(record, config));
        }
        counts
    }

    pub fn add(&mut self, class: FlushClass) {
        match class {
            FlushClass::Normal => self.normal += 1,
            FlushClass::Flush => self.flush += 1,
            FlushClass::GcOutlier => self.gc_outlier += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.normal + self.flush + self.gc_outlier
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn thresholds() -> ThresholdConfig {
        ThresholdConfig::new(500.0, 5000.0).unwrap()
    }

    #[test]
    fn test_band_boundaries() {
        let config = thresholds();
        assert_eq!(config.classify_latency(0), FlushClass::Normal);
        assert_eq!(config.classify_latency(499), FlushClass::Normal);
        assert_eq!(config.classify_latency(500), FlushClass::Flush);
        assert_eq!(config.classify_latency(4999), FlushClass::Flush);
        assert_eq!(config.classify_latency(5000), FlushClass::GcOutlier);
        assert_eq!(config.classify_latency(i64::MAX), FlushClass::GcOutlier);
    }

    #[test]
    fn test_fractional_thresholds() {
        let config = ThresholdConfig::new(99.5, 200.25).unwrap();
        assert_eq!(config.classify_latency(99), FlushClass::Normal);
        assert_eq!(config.classify_latency(100), FlushClass::Flush);
        assert_eq!(config.classify_latency(200), FlushClass::Flush);
        assert_eq!(config.classify_latency(201), FlushClass::GcOutlier);
    }

    #[test]
    fn test_invalid_thresholds_rejected() {
        assert!(matches!(
            ThresholdConfig::new(5000.0, 500.0),
            Err(AnalysisError::InvalidThresholdConfig { .. })
        ));
        assert!(ThresholdConfig::new(500.0, 500.0).is_err());
        assert!(ThresholdConfig::new(f64::NAN, 500.0).is_err());
        assert!(ThresholdConfig::new(1.0, f64::INFINITY).is_err());
    }

    #[test]
    fn test_tally_partitions_log() {
        let log = LatencyLog::from_pairs(
            "mem",
            &[(0, 10), (1, 600), (2, 7000), (3, 20), (4, 4999), (5, 5000)],
        );
        let counts = ClassCounts::tally(&log, &thresholds());
        assert_eq!(counts.normal, 2);
        assert_eq!(counts.flush, 2);
        assert_eq!(counts.gc_outlier, 2);
        assert_eq!(counts.total(), log.len());
    }
}

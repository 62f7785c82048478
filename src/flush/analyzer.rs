// Flush position extraction and gap histogramming

use super::config::IntervalConfig;
use super::histogram::IntervalHistogram;
use crate::classifier::{classify, ClassCounts, FlushClass, ThresholdConfig};
use crate::error::{AnalysisError, Result};
use crate::log_loader::LatencyLog;
use serde::{Deserialize, Serialize};

/// Flush positions and gap statistics of one log
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlushAnalysis {
    /// `sequence_id`s classified as flush, in log order
    pub flush_ids: Vec<usize>,

    /// Every consecutive gap, before warm-up and noise filtering
    pub raw_gaps: Vec<u64>,

    /// Gaps that survived filtering, in log order
    pub gaps: Vec<u64>,

    pub histogram: IntervalHistogram,

    pub class_counts: ClassCounts,

    /// Largest latency among flush-classified records
    pub max_flush_latency: i64,
}

/// Classify `log`, extract flush gaps and build the interval histogram
///
/// Fails with `InsufficientFlushEvents` when fewer than two flush events exist
/// or fewer than `config.min_gaps` gaps survive filtering.
pub fn analyze(
    log: &LatencyLog,
    thresholds: &ThresholdConfig,
    config: &IntervalConfig,
) -> Result<FlushAnalysis> {
    let mut class_counts = ClassCounts::default();
    let mut flush_ids = Vec::new();
    let mut max_flush_latency = 0i64;

    for record in log {
        let class = classify(record, thresholds);
        class_counts.add(class);
        if class == FlushClass::Flush {
            flush_ids.push(record.sequence_id);
            max_flush_latency = max_flush_latency.max(record.latency);
        }
    }

    let raw_gaps: Vec<u64> = flush_ids
        .windows(2)
        .map(|pair| (pair[1] - pair[0]) as u64)
        .collect();

    let gaps: Vec<u64> = raw_gaps
        .iter()
        .skip(config.warmup_gaps)
        .copied()
        .filter(|&gap| gap >= config.min_interval)
        .collect();

    tracing::debug!(
        path = %log.path().display(),
        flush_events = flush_ids.len(),
        raw_gaps = raw_gaps.len(),
        qualifying_gaps = gaps.len(),
        "extracted flush intervals"
    );

    if flush_ids.len() < 2 || gaps.len() < config.min_gaps {
        return Err(AnalysisError::InsufficientFlushEvents {
            flush_events: flush_ids.len(),
            qualifying_gaps: gaps.len(),
            required_gaps: config.min_gaps,
        });
    }

    let histogram: IntervalHistogram = gaps.iter().copied().collect();

    Ok(FlushAnalysis {
        flush_ids,
        raw_gaps,
        gaps,
        histogram,
        class_counts,
        max_flush_latency,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn thresholds() -> ThresholdConfig {
        ThresholdConfig::new(500.0, 5000.0).unwrap()
    }

    #[test]
    fn test_gc_outliers_are_not_flushes() {
        let mut pairs: Vec<(i64, i64)> = (0..12).map(|i| (i * 10, 100)).collect();
        for id in [1usize, 4, 7, 10] {
            pairs[id].1 = 800;
        }
        pairs[5].1 = 9000;
        let log = LatencyLog::from_pairs("read.log", &pairs);

        let analysis = analyze(&log, &thresholds(), &IntervalConfig::default()).unwrap();
        assert_eq!(analysis.flush_ids, vec![1, 4, 7, 10]);
        assert_eq!(analysis.class_counts.gc_outlier, 1);
        assert_eq!(analysis.max_flush_latency, 800);
    }

    #[test]
    fn test_no_flush_events() {
        let log = LatencyLog::from_pairs("read.log", &[(0, 1), (1, 2), (2, 3)]);
        let err = analyze(&log, &thresholds(), &IntervalConfig::default()).unwrap_err();
        assert!(matches!(
            err,
            AnalysisError::InsufficientFlushEvents {
                flush_events: 0,
                qualifying_gaps: 0,
                ..
            }
        ));
    }
}

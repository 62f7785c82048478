// Buffer-size estimate from flush-interval statistics
//
// Mean and population standard deviation come from `stats::Moments`; the
// median uses linear interpolation over sorted gaps.

use super::analyzer::FlushAnalysis;
use super::config::IntervalEstimator;
use crate::stats::{percentile, Moments};
use serde::{Deserialize, Serialize};

/// Inferred write-buffer size and the interval statistics behind it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BufferSizeEstimate {
    pub block_size_kb: u64,
    /// Most frequent qualifying gap
    pub modal_interval: u64,
    /// Median qualifying gap, truncated
    pub median_interval: u64,
    pub min_interval: u64,
    pub max_interval: u64,
    /// `selected interval * block_size_kb`, saturating at `u64::MAX`
    pub buffer_size_kb: u64,
    pub avg_interval: f64,
    /// Population standard deviation
    pub std_interval: f64,
    pub max_flush_latency: i64,
    /// Which interval fed `buffer_size_kb`
    pub estimator: IntervalEstimator,
}

impl BufferSizeEstimate {
    /// Interval used for `buffer_size_kb`
    pub fn selected_interval(&self) -> u64 {
        match self.estimator {
            IntervalEstimator::Mode => self.modal_interval,
            IntervalEstimator::Median => self.median_interval,
        }
    }
}

/// Estimate the write-buffer size from an analysis
///
/// `analyze` guarantees a non-empty gap set, so this cannot fail.
pub fn estimate(
    analysis: &FlushAnalysis,
    block_size_kb: u64,
    estimator: IntervalEstimator,
) -> BufferSizeEstimate {
    let gaps = &analysis.gaps;

    let (avg_interval, std_interval) = Moments::from_u64(gaps)
        .map(|m| (m.mean, m.std_dev))
        .unwrap_or((0.0, 0.0));

    let mut sorted = gaps.clone();
    sorted.sort_unstable();
    let median_interval = percentile(&sorted, 50.0) as u64;
    let min_interval = sorted.first().copied().unwrap_or(0);
    let max_interval = sorted.last().copied().unwrap_or(0);

    let modal_interval = analysis.histogram.mode().unwrap_or(0);

    let mut result = BufferSizeEstimate {
        block_size_kb,
        modal_interval,
        median_interval,
        min_interval,
        max_interval,
        buffer_size_kb: 0,
        avg_interval,
        std_interval,
        max_flush_latency: analysis.max_flush_latency,
        estimator,
    };
    result.buffer_size_kb = result.selected_interval().saturating_mul(block_size_kb);

    tracing::debug!(
        modal_interval,
        median_interval,
        buffer_size_kb = result.buffer_size_kb,
        "estimated write buffer size"
    );

    result
}

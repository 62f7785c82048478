//! Single-stream flush latency summary
//!
//! Works on one mixed log loaded with `RecordFilter::ReadsOnly` and reports
//! min/max/mean/median over the reads that fall in the flush band.

use crate::classifier::{FlushClass, ThresholdConfig};
use crate::error::{AnalysisError, Result};
use crate::log_loader::LatencyLog;
use crate::stats::{median_i64, Moments};
use serde::{Deserialize, Serialize};

/// Distribution of flush-band read latencies
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LatencySummary {
    pub count: usize,
    pub min: i64,
    pub max: i64,
    pub mean: f64,
    pub median: f64,
}

/// Summarize the flush-band latencies of `log`
pub fn summarize(log: &LatencyLog, thresholds: &ThresholdConfig) -> Result<LatencySummary> {
    let mut latencies: Vec<i64> = log
        .iter()
        .filter(|r| thresholds.classify_latency(r.latency) == FlushClass::Flush)
        .map(|r| r.latency)
        .collect();

    let Some(moments) = Moments::from_i64(&latencies) else {
        return Err(AnalysisError::NoFlushReads(log.path().to_path_buf()));
    };

    latencies.sort_unstable();
    let n = latencies.len();
    let median = median_i64(&latencies);

    Ok(LatencySummary {
        count: n,
        min: latencies[0],
        max: latencies[n - 1],
        mean: moments.mean,
        median,
    })
}

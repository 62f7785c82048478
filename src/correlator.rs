//! Timestamp correlation between read and write logs
//!
//! A read that stalls behind a buffer flush is attributed to the write issued
//! immediately before it. Consecutive attributed writes then give the number
//! of writes the buffer absorbed between two flushes.

use crate::classifier::{FlushClass, ThresholdConfig};
use crate::error::{AnalysisError, Result, SearchBound};
use crate::log_loader::{LatencyLog, LatencyRecord};
use serde::{Deserialize, Serialize};

/// Last record with `timestamp < query`
///
/// Locates the first record whose timestamp reaches `query` and returns the
/// id just before it. Fails when no record reaches `query` or when the first
/// record already does.
pub fn find_predecessor_strict(log: &LatencyLog, timestamp: i64) -> Result<usize> {
    let first_reaching = first_match(log, |r| r.timestamp >= timestamp);
    predecessor_of(log, first_reaching, timestamp, SearchBound::Strict)
}

/// Last record with `timestamp <= query`
///
/// Locates the first record whose timestamp exceeds `query` and returns the
/// id just before it. Fails when no record exceeds `query` or when the first
/// record already does.
pub fn find_predecessor_inclusive(log: &LatencyLog, timestamp: i64) -> Result<usize> {
    let first_exceeding = first_match(log, |r| r.timestamp > timestamp);
    predecessor_of(log, first_exceeding, timestamp, SearchBound::Inclusive)
}

/// Index of the first record satisfying `pred`
///
/// Time-ordered logs make `pred` monotone so a binary search is exact;
/// otherwise scan in `sequence_id` order.
fn first_match<F>(log: &LatencyLog, pred: F) -> Option<usize>
where
    F: Fn(&LatencyRecord) -> bool,
{
    let records = log.records();
    if log.is_time_ordered() {
        let idx = records.partition_point(|r| !pred(r));
        (idx < records.len()).then_some(idx)
    } else {
        records.iter().position(pred)
    }
}

fn predecessor_of(
    log: &LatencyLog,
    found: Option<usize>,
    timestamp: i64,
    bound: SearchBound,
) -> Result<usize> {
    match found {
        Some(idx) if idx > 0 => Ok(idx - 1),
        _ => Err(AnalysisError::NoPredecessorFound {
            timestamp,
            bound,
            records: log.len(),
        }),
    }
}

/// What to do when a read has no preceding write
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingPredecessorPolicy {
    /// Abort the run with `NoPredecessorFound`
    #[default]
    Fail,
    /// Drop the read, log a warning and continue
    Skip,
}

/// Bounds for the read-to-write correlation pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CorrelationConfig {
    /// Reads at or after this timestamp are ignored (`None` keeps all)
    pub read_cutoff: Option<i64>,

    /// Also correlate reads at or above `gc_threshold`
    ///
    /// Default: true (every read at or above `lat_threshold` is correlated)
    pub include_gc_outliers: bool,

    pub on_missing: MissingPredecessorPolicy,
}

impl Default for CorrelationConfig {
    fn default() -> Self {
        Self {
            read_cutoff: Some(4900),
            include_gc_outliers: true,
            on_missing: MissingPredecessorPolicy::Fail,
        }
    }
}

/// A slow read attributed to the write issued just before it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorrelatedFlush {
    pub write_sequence_id: usize,
    pub read_sequence_id: usize,
    pub read_timestamp: i64,
    pub read_latency: i64,
    pub class: FlushClass,
}

/// Buffer fill between two consecutive correlated flushes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BufferStep {
    pub write_sequence_id: usize,
    pub read_latency: i64,
    pub buffer_size_bytes: u64,
}

/// Output of one correlation pass
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Correlation {
    pub entries: Vec<CorrelatedFlush>,
    /// Reads dropped under `MissingPredecessorPolicy::Skip`
    pub skipped_reads: Vec<usize>,
}

impl Correlation {
    /// Pair consecutive entries into buffer-size steps
    ///
    /// The last entry has no successor and yields no step. A write id that
    /// does not advance yields a zero-sized step. Sizes saturate at `u64::MAX`.
    pub fn buffer_steps(&self, block_size_kb: u64) -> Vec<BufferStep> {
        let block_bytes = block_size_kb.saturating_mul(1024);
        self.entries
            .windows(2)
            .map(|pair| {
                let writes = pair[1]
                    .write_sequence_id
                    .saturating_sub(pair[0].write_sequence_id) as u64;
                BufferStep {
                    write_sequence_id: pair[0].write_sequence_id,
                    read_latency: pair[0].read_latency,
                    buffer_size_bytes: writes.saturating_mul(block_bytes),
                }
            })
            .collect()
    }
}

/// Attribute every slow read to its preceding write
pub fn correlate(
    reads: &LatencyLog,
    writes: &LatencyLog,
    thresholds: &ThresholdConfig,
    config: &CorrelationConfig,
) -> Result<Correlation> {
    let mut correlation = Correlation::default();

    for read in reads {
        let class = thresholds.classify_latency(read.latency);
        let selected = match class {
            FlushClass::Normal => false,
            FlushClass::Flush => true,
            FlushClass::GcOutlier => config.include_gc_outliers,
        };
        if !selected {
            continue;
        }
        if let Some(cutoff) = config.read_cutoff {
            if read.timestamp >= cutoff {
                continue;
            }
        }

        match find_predecessor_strict(writes, read.timestamp) {
            Ok(write_id) => correlation.entries.push(CorrelatedFlush {
                write_sequence_id: write_id,
                read_sequence_id: read.sequence_id,
                read_timestamp: read.timestamp,
                read_latency: read.latency,
                class,
            }),
            Err(err) => match config.on_missing {
                MissingPredecessorPolicy::Fail => return Err(err),
                MissingPredecessorPolicy::Skip => {
                    tracing::warn!(
                        read_id = read.sequence_id,
                        read_ts = read.timestamp,
                        "skipping read: {}",
                        err
                    );
                    correlation.skipped_reads.push(read.sequence_id);
                }
            },
        }
    }

    tracing::debug!(
        correlated = correlation.entries.len(),
        skipped = correlation.skipped_reads.len(),
        "correlated reads to writes"
    );

    Ok(correlation)
}

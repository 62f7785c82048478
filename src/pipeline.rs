//! One analysis run, end to end
//!
//! validate paths → load logs → correlate and/or estimate → report struct.
//! Rendering is left to `report`, `json_output` and `csv_output`.

use crate::classifier::{ClassCounts, ThresholdConfig};
use crate::config::AnalysisConfig;
use crate::correlator::{correlate, BufferStep, Correlation};
use crate::flush::{analyze, estimate, BufferSizeEstimate, FlushAnalysis};
use crate::latency_summary::{summarize, LatencySummary};
use crate::log_loader::{self, RecordFilter};
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Everything a buffer-analysis run produced
#[derive(Debug, Clone)]
pub struct BufferReport {
    pub read_log: PathBuf,
    pub write_log: PathBuf,
    pub read_records: usize,
    /// `None` when the write log was not needed
    pub write_records: Option<usize>,
    pub thresholds: ThresholdConfig,
    pub read_classes: ClassCounts,
    pub correlation: Option<Correlation>,
    pub buffer_steps: Vec<BufferStep>,
    pub flush: Option<FlushAnalysis>,
    pub estimate: Option<BufferSizeEstimate>,
}

/// Run the read/write buffer analysis
pub fn run_buffer_analysis(
    read_path: &Path,
    write_path: &Path,
    thresholds: &ThresholdConfig,
    config: &AnalysisConfig,
) -> Result<BufferReport> {
    thresholds.validate()?;
    config.validate()?;

    // Both paths are checked before either file is parsed
    log_loader::check_input(read_path).context("Invalid read log")?;
    log_loader::check_input(write_path).context("Invalid write log")?;

    let reads = log_loader::load(read_path, RecordFilter::All).context("Failed to load read log")?;
    let read_classes = ClassCounts::tally(&reads, thresholds);

    let mut report = BufferReport {
        read_log: read_path.to_path_buf(),
        write_log: write_path.to_path_buf(),
        read_records: reads.len(),
        write_records: None,
        thresholds: *thresholds,
        read_classes,
        correlation: None,
        buffer_steps: Vec::new(),
        flush: None,
        estimate: None,
    };

    if config.mode.correlates() {
        let writes = log_loader::load(write_path, RecordFilter::All)
            .context("Failed to load write log")?;
        report.write_records = Some(writes.len());

        let correlation = correlate(&reads, &writes, thresholds, &config.correlation)
            .context("Read/write correlation failed")?;
        report.buffer_steps = correlation.buffer_steps(config.block_size_kb);
        report.correlation = Some(correlation);
    }

    if config.mode.estimates() {
        let analysis = analyze(&reads, thresholds, &config.intervals)
            .context("Flush interval analysis failed")?;
        report.estimate = Some(estimate(&analysis, config.block_size_kb, config.estimator));
        report.flush = Some(analysis);
    }

    Ok(report)
}

/// Everything a single-stream summary run produced
#[derive(Debug, Clone)]
pub struct SummaryReport {
    pub io_log: PathBuf,
    pub read_records: usize,
    pub thresholds: ThresholdConfig,
    pub summary: LatencySummary,
}

/// Run the single-stream latency summary
pub fn run_latency_summary(io_path: &Path, thresholds: &ThresholdConfig) -> Result<SummaryReport> {
    thresholds.validate()?;
    log_loader::check_input(io_path).context("Invalid io log")?;

    let log =
        log_loader::load(io_path, RecordFilter::ReadsOnly).context("Failed to load io log")?;
    let summary = summarize(&log, thresholds).context("Latency summary failed")?;

    Ok(SummaryReport {
        io_log: io_path.to_path_buf(),
        read_records: log.len(),
        thresholds: *thresholds,
        summary,
    })
}

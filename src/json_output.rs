//! JSON output format for analysis reports
//!
//! `--format json` writes one pretty-printed document per run.

use crate::classifier::{ClassCounts, ThresholdConfig};
use crate::correlator::{BufferStep, CorrelatedFlush};
use crate::flush::BufferSizeEstimate;
use crate::latency_summary::LatencySummary;
use crate::pipeline::{BufferReport, SummaryReport};
use serde::{Deserialize, Serialize};

/// Input files and their record counts
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonInputs {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub read_log: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub write_log: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub io_log: Option<String>,
    pub read_records: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub write_records: Option<usize>,
}

/// Correlation half of the report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonCorrelation {
    pub entries: Vec<CorrelatedFlush>,
    pub buffer_steps: Vec<BufferStep>,
    pub skipped_reads: Vec<usize>,
}

/// One histogram bucket
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonIntervalBucket {
    pub interval: u64,
    pub count: u64,
}

/// Flush-interval half of the report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonFlushAnalysis {
    pub flush_ids: Vec<usize>,
    pub gaps: Vec<u64>,
    pub histogram: Vec<JsonIntervalBucket>,
    pub estimate: BufferSizeEstimate,
}

/// Root JSON output structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonOutput {
    /// Tool version
    pub version: String,
    /// Format name
    pub format: String,
    pub inputs: JsonInputs,
    pub thresholds: ThresholdConfig,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub read_classes: Option<ClassCounts>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub correlation: Option<JsonCorrelation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flush_analysis: Option<JsonFlushAnalysis>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latency_summary: Option<LatencySummary>,
}

impl JsonOutput {
    fn new(inputs: JsonInputs, thresholds: ThresholdConfig) -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            format: "flushscope-json-v1".to_string(),
            inputs,
            thresholds,
            read_classes: None,
            correlation: None,
            flush_analysis: None,
            latency_summary: None,
        }
    }

    /// Build from a buffer-analysis report
    pub fn from_buffer_report(report: &BufferReport) -> Self {
        let inputs = JsonInputs {
            read_log: Some(report.read_log.display().to_string()),
            write_log: Some(report.write_log.display().to_string()),
            io_log: None,
            read_records: report.read_records,
            write_records: report.write_records,
        };
        let mut output = Self::new(inputs, report.thresholds);
        output.read_classes = Some(report.read_classes);

        output.correlation = report.correlation.as_ref().map(|c| JsonCorrelation {
            entries: c.entries.clone(),
            buffer_steps: report.buffer_steps.clone(),
            skipped_reads: c.skipped_reads.clone(),
        });

        if let (Some(flush), Some(estimate)) = (&report.flush, &report.estimate) {
            output.flush_analysis = Some(JsonFlushAnalysis {
                flush_ids: flush.flush_ids.clone(),
                gaps: flush.gaps.clone(),
                histogram: flush
                    .histogram
                    .iter()
                    .map(|(interval, count)| JsonIntervalBucket { interval, count })
                    .collect(),
                estimate: estimate.clone(),
            });
        }

        output
    }

    /// Build from a single-stream summary report
    pub fn from_summary_report(report: &SummaryReport) -> Self {
        let inputs = JsonInputs {
            read_log: None,
            write_log: None,
            io_log: Some(report.io_log.display().to_string()),
            read_records: report.read_records,
            write_records: None,
        };
        let mut output = Self::new(inputs, report.thresholds);
        output.latency_summary = Some(report.summary.clone());
        output
    }

    /// Serialize to pretty JSON
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

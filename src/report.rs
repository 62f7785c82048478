//! Human-readable text report
//!
//! Line formats are stable; downstream scripts grep for them.

use crate::correlator::BufferStep;
use crate::flush::{BufferSizeEstimate, IntervalHistogram};
use crate::latency_summary::LatencySummary;
use crate::pipeline::{BufferReport, SummaryReport};
use std::fmt::Write;

/// `[write_id] read_lat:<lat>, buffer_size:<bytes>`
pub fn format_buffer_step(step: &BufferStep) -> String {
    format!(
        "[{:3}] read_lat:{}, buffer_size:{}",
        step.write_sequence_id, step.read_latency, step.buffer_size_bytes
    )
}

/// One-line buffer-size estimate
pub fn format_estimate(estimate: &BufferSizeEstimate) -> String {
    format!(
        "Block size: {:2} KB --> Write buffer size: {} KB (interval - avg: {:.1}, std dev: {:.1}) / max read latency: {} us",
        estimate.block_size_kb,
        estimate.buffer_size_kb,
        estimate.avg_interval,
        estimate.std_interval,
        estimate.max_flush_latency
    )
}

/// Single-stream summary line; mean and median truncate to integers
pub fn format_latency_summary(summary: &LatencySummary) -> String {
    format!(
        "MIN_LATENCY : {}, MAX_LATENCY : {}, AVG_LATENCY: {}, MID_LATENCY: {}",
        summary.min, summary.max, summary.mean as i64, summary.median as i64
    )
}

/// `interval count` table, one row per distinct interval
pub fn format_histogram(histogram: &IntervalHistogram) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "interval     count");
    for (interval, count) in histogram.iter() {
        let marker = if Some(interval) == histogram.mode() {
            "  <- mode"
        } else {
            ""
        };
        let _ = writeln!(out, "{:>8} {:>9}{}", interval, count, marker);
    }
    out
}

/// Render a buffer-analysis report
pub fn render_buffer_report(report: &BufferReport, show_histogram: bool) -> String {
    let mut out = String::new();

    for step in &report.buffer_steps {
        let _ = writeln!(out, "{}", format_buffer_step(step));
    }

    if let (true, Some(flush)) = (show_histogram, &report.flush) {
        let _ = writeln!(out, "flush positions: {:?}", flush.flush_ids);
        out.push_str(&format_histogram(&flush.histogram));
    }

    if let Some(ref estimate) = report.estimate {
        let _ = writeln!(out, "{}", format_estimate(estimate));
    }

    out
}

/// Render a single-stream summary report
pub fn render_summary_report(report: &SummaryReport) -> String {
    format!("{}\n", format_latency_summary(&report.summary))
}

//! CSV output format for analysis reports
//!
//! `--format csv` emits one table per section, each preceded by a `# name`
//! comment row so the sections can be split with a line filter.

use crate::correlator::BufferStep;
use crate::flush::{BufferSizeEstimate, IntervalHistogram};
use crate::latency_summary::LatencySummary;
use crate::pipeline::{BufferReport, SummaryReport};

/// Escape CSV field (handle commas, quotes, newlines)
fn escape_field(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

/// `write_id,read_latency,buffer_size_bytes` rows
pub fn buffer_steps_csv(steps: &[BufferStep]) -> String {
    let mut output = String::from("write_id,read_latency,buffer_size_bytes\n");
    for step in steps {
        output.push_str(&format!(
            "{},{},{}\n",
            step.write_sequence_id, step.read_latency, step.buffer_size_bytes
        ));
    }
    output
}

/// `interval,count` rows in ascending interval order
pub fn histogram_csv(histogram: &IntervalHistogram) -> String {
    let mut output = String::from("interval,count\n");
    for (interval, count) in histogram.iter() {
        output.push_str(&format!("{},{}\n", interval, count));
    }
    output
}

/// Single-row estimate table
pub fn estimate_csv(estimate: &BufferSizeEstimate) -> String {
    format!(
        "block_size_kb,buffer_size_kb,modal_interval,median_interval,min_interval,max_interval,avg_interval,std_interval,max_flush_latency\n{},{},{},{},{},{},{:.6},{:.6},{}\n",
        estimate.block_size_kb,
        estimate.buffer_size_kb,
        estimate.modal_interval,
        estimate.median_interval,
        estimate.min_interval,
        estimate.max_interval,
        estimate.avg_interval,
        estimate.std_interval,
        estimate.max_flush_latency
    )
}

/// Single-row latency summary table
pub fn latency_summary_csv(log: &str, summary: &LatencySummary) -> String {
    format!(
        "log,count,min,max,mean,median\n{},{},{},{},{:.6},{:.6}\n",
        escape_field(log),
        summary.count,
        summary.min,
        summary.max,
        summary.mean,
        summary.median
    )
}

/// Render a buffer-analysis report as CSV sections
pub fn render_buffer_report(report: &BufferReport) -> String {
    let mut output = String::new();

    if report.correlation.is_some() {
        output.push_str("# buffer_steps\n");
        output.push_str(&buffer_steps_csv(&report.buffer_steps));
    }

    if let (Some(flush), Some(estimate)) = (&report.flush, &report.estimate) {
        output.push_str("# interval_histogram\n");
        output.push_str(&histogram_csv(&flush.histogram));
        output.push_str("# estimate\n");
        output.push_str(&estimate_csv(estimate));
    }

    output
}

/// Render a single-stream summary as CSV
pub fn render_summary_report(report: &SummaryReport) -> String {
    latency_summary_csv(&report.io_log.display().to_string(), &report.summary)
}

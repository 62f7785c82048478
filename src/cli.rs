//! CLI argument parsing for flushscope

use crate::config::{AnalysisConfig, AnalysisMode};
use crate::correlator::MissingPredecessorPolicy;
use crate::flush::IntervalEstimator;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Output format for analysis reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text format (default)
    Text,
    /// JSON format for machine parsing
    Json,
    /// CSV format for spreadsheet analysis
    Csv,
}

#[derive(Parser, Debug)]
#[command(name = "flushscope")]
#[command(version)]
#[command(
    about = "Infer SSD write-buffer size from read/write latency logs",
    long_about = None
)]
pub struct Cli {
    /// Read latency log (elapsed_time,latency[,write_type] per line)
    #[arg(long = "read_log", value_name = "PATH", required_unless_present = "io_log")]
    pub read_log: Option<PathBuf>,

    /// Write latency log (elapsed_time,latency[,write_type] per line)
    #[arg(long = "write_log", value_name = "PATH", required_unless_present = "io_log")]
    pub write_log: Option<PathBuf>,

    /// Mixed log for the single-stream latency summary (reads are write_type 0)
    #[arg(
        long = "io_log",
        value_name = "PATH",
        conflicts_with_all = ["read_log", "write_log", "mode", "estimator"]
    )]
    pub io_log: Option<PathBuf>,

    /// Latencies at or above this are flush-triggered
    #[arg(short = 'l', long = "lat_threshold", value_name = "LATENCY")]
    pub lat_threshold: f64,

    /// Latencies at or above this are GC outliers
    #[arg(short = 'g', long = "gc_threshold", value_name = "LATENCY")]
    pub gc_threshold: f64,

    /// Block size of the write stream in KB (default: 4)
    #[arg(long = "block_size", value_name = "KB")]
    pub block_size: Option<u64>,

    /// Which analysis to run (default: both)
    #[arg(long = "mode", value_enum)]
    pub mode: Option<AnalysisMode>,

    /// Interval statistic used for the buffer size (default: mode)
    #[arg(long = "estimator", value_enum)]
    pub estimator: Option<IntervalEstimator>,

    /// Minimum flush-to-flush gap kept in the histogram (default: 2)
    #[arg(long = "min-interval", value_name = "N")]
    pub min_interval: Option<u64>,

    /// Leading gaps discarded as warm-up (default: 1)
    #[arg(long = "warmup-gaps", value_name = "N")]
    pub warmup_gaps: Option<usize>,

    /// Qualifying gaps required for an estimate (default: 2)
    #[arg(long = "min-gaps", value_name = "N")]
    pub min_gaps: Option<usize>,

    /// Ignore reads at or after this timestamp when correlating (default: 4900)
    #[arg(long = "read-cutoff", value_name = "TS", conflicts_with = "no_read_cutoff")]
    pub read_cutoff: Option<i64>,

    /// Correlate reads regardless of timestamp
    #[arg(long = "no-read-cutoff")]
    pub no_read_cutoff: bool,

    /// Do not correlate reads at or above the GC threshold
    #[arg(long = "skip-gc-reads")]
    pub skip_gc_reads: bool,

    /// Skip reads with no preceding write instead of failing
    #[arg(long = "skip-missing")]
    pub skip_missing: bool,

    /// TOML file with analysis bounds (flags override it)
    #[arg(long = "config", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(long = "format", value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Print flush positions and the interval histogram (text format)
    #[arg(long = "histogram")]
    pub histogram: bool,

    /// Enable debug tracing on stderr
    #[arg(long = "debug")]
    pub debug: bool,
}

impl Cli {
    /// Layer explicit flags over `base`
    pub fn apply_overrides(&self, mut base: AnalysisConfig) -> AnalysisConfig {
        if let Some(block_size) = self.block_size {
            base.block_size_kb = block_size;
        }
        if let Some(mode) = self.mode {
            base.mode = mode;
        }
        if let Some(estimator) = self.estimator {
            base.estimator = estimator;
        }
        if let Some(min_interval) = self.min_interval {
            base.intervals.min_interval = min_interval;
        }
        if let Some(warmup_gaps) = self.warmup_gaps {
            base.intervals.warmup_gaps = warmup_gaps;
        }
        if let Some(min_gaps) = self.min_gaps {
            base.intervals.min_gaps = min_gaps;
        }
        if let Some(cutoff) = self.read_cutoff {
            base.correlation.read_cutoff = Some(cutoff);
        }
        if self.no_read_cutoff {
            base.correlation.read_cutoff = None;
        }
        if self.skip_gc_reads {
            base.correlation.include_gc_outliers = false;
        }
        if self.skip_missing {
            base.correlation.on_missing = MissingPredecessorPolicy::Skip;
        }
        base
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: [&str; 9] = [
        "flushscope",
        "--read_log",
        "r.log",
        "--write_log",
        "w.log",
        "-l",
        "500",
        "-g",
        "5000",
    ];

    fn parse_with(extra: &[&str]) -> Cli {
        let args: Vec<&str> = BASE.iter().chain(extra.iter()).copied().collect();
        Cli::parse_from(args)
    }

    #[test]
    fn test_cli_parses_required_flags() {
        let cli = parse_with(&[]);
        assert_eq!(cli.read_log, Some(PathBuf::from("r.log")));
        assert_eq!(cli.write_log, Some(PathBuf::from("w.log")));
        assert_eq!(cli.lat_threshold, 500.0);
        assert_eq!(cli.gc_threshold, 5000.0);
        assert_eq!(cli.format, OutputFormat::Text);
        assert!(!cli.debug);
    }

    #[test]
    fn test_cli_long_threshold_names() {
        let cli = Cli::parse_from([
            "flushscope",
            "--read_log",
            "r.log",
            "--write_log",
            "w.log",
            "--lat_threshold",
            "250.5",
            "--gc_threshold",
            "9000",
        ]);
        assert_eq!(cli.lat_threshold, 250.5);
        assert_eq!(cli.gc_threshold, 9000.0);
    }

    #[test]
    fn test_cli_missing_threshold_is_error() {
        let result = Cli::try_parse_from(["flushscope", "--read_log", "r", "--write_log", "w", "-l", "1"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_missing_write_log_is_error() {
        let result = Cli::try_parse_from(["flushscope", "--read_log", "r", "-l", "1", "-g", "2"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_io_log_replaces_read_write() {
        let cli = Cli::try_parse_from(["flushscope", "--io_log", "io.log", "-l", "1", "-g", "2"])
            .unwrap();
        assert_eq!(cli.io_log, Some(PathBuf::from("io.log")));
        assert!(cli.read_log.is_none());
    }

    #[test]
    fn test_cli_io_log_conflicts_with_read_log() {
        let result = Cli::try_parse_from([
            "flushscope",
            "--io_log",
            "io.log",
            "--read_log",
            "r.log",
            "-l",
            "1",
            "-g",
            "2",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_defaults_leave_config_untouched() {
        let cli = parse_with(&[]);
        let config = cli.apply_overrides(AnalysisConfig::default());
        assert_eq!(config, AnalysisConfig::default());
    }

    #[test]
    fn test_cli_overrides_apply() {
        let cli = parse_with(&[
            "--block_size",
            "16",
            "--mode",
            "estimate",
            "--estimator",
            "median",
            "--min-interval",
            "3",
            "--warmup-gaps",
            "0",
            "--no-read-cutoff",
            "--skip-gc-reads",
            "--skip-missing",
        ]);
        let config = cli.apply_overrides(AnalysisConfig::default());
        assert_eq!(config.block_size_kb, 16);
        assert_eq!(config.mode, AnalysisMode::Estimate);
        assert_eq!(config.estimator, IntervalEstimator::Median);
        assert_eq!(config.intervals.min_interval, 3);
        assert_eq!(config.intervals.warmup_gaps, 0);
        assert_eq!(config.correlation.read_cutoff, None);
        assert!(!config.correlation.include_gc_outliers);
        assert_eq!(
            config.correlation.on_missing,
            MissingPredecessorPolicy::Skip
        );
    }

    #[test]
    fn test_cli_read_cutoff_conflicts_with_disable() {
        let result = Cli::try_parse_from([
            "flushscope",
            "--read_log",
            "r",
            "--write_log",
            "w",
            "-l",
            "1",
            "-g",
            "2",
            "--read-cutoff",
            "100",
            "--no-read-cutoff",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_format_json() {
        let cli = parse_with(&["--format", "json"]);
        assert_eq!(cli.format, OutputFormat::Json);
    }
}

//! Analysis configuration
//!
//! Bounds that the analysis would otherwise hard-code (block size, gap floor,
//! warm-up count, read cutoff) live here with documented defaults. A TOML file
//! can override them; explicit CLI flags override the file.
//!
//! # Example flushscope.toml
//!
//! ```toml
//! block_size_kb = 16
//! mode = "estimate"
//! estimator = "mode"
//!
//! [intervals]
//! min_interval = 2
//! warmup_gaps = 1
//!
//! [correlation]
//! read_cutoff = 4900
//! on_missing = "skip"
//! ```

use crate::correlator::CorrelationConfig;
use crate::error::{AnalysisError, Result};
use crate::flush::{IntervalConfig, IntervalEstimator};
use anyhow::Context;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Which halves of the buffer analysis to run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum AnalysisMode {
    /// Read-to-write correlation only
    Correlate,
    /// Flush-interval buffer estimate only
    Estimate,
    /// Both (default)
    #[default]
    Both,
}

impl AnalysisMode {
    pub fn correlates(self) -> bool {
        matches!(self, AnalysisMode::Correlate | AnalysisMode::Both)
    }

    pub fn estimates(self) -> bool {
        matches!(self, AnalysisMode::Estimate | AnalysisMode::Both)
    }
}

/// Full configuration for one buffer-analysis run (thresholds excluded)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Block size of the benchmark's write stream in KB
    ///
    /// Default: 4
    pub block_size_kb: u64,

    pub mode: AnalysisMode,

    pub estimator: IntervalEstimator,

    pub intervals: IntervalConfig,

    pub correlation: CorrelationConfig,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            block_size_kb: 4,
            mode: AnalysisMode::Both,
            estimator: IntervalEstimator::Mode,
            intervals: IntervalConfig::default(),
            correlation: CorrelationConfig::default(),
        }
    }
}

impl AnalysisConfig {
    /// Load configuration from a TOML file; missing keys take defaults
    pub fn from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::from_toml(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }

    /// Parse configuration from TOML text
    pub fn from_toml(content: &str) -> anyhow::Result<Self> {
        toml::from_str(content).context("Failed to parse TOML")
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.block_size_kb == 0 {
            return Err(AnalysisError::InvalidConfig(
                "block_size_kb must be >= 1".to_string(),
            ));
        }
        if self.block_size_kb.checked_mul(1024).is_none() {
            return Err(AnalysisError::InvalidConfig(format!(
                "block_size_kb {} overflows a byte count",
                self.block_size_kb
            )));
        }
        self.intervals.validate()
    }
}

// Filtering bounds for flush-interval analysis
//
// Every bound has a documented default; none is hard-coded in the analyzer.

use crate::error::{AnalysisError, Result};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Which interval statistic feeds the buffer-size estimate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum IntervalEstimator {
    /// Most frequent qualifying gap (default)
    #[default]
    Mode,
    /// Median of qualifying gaps, truncated to an integer
    Median,
}

/// Gap filtering configuration
///
/// # Example
/// ```
/// use flushscope::flush::IntervalConfig;
///
/// let config = IntervalConfig::default();
/// assert_eq!(config.min_interval, 2);
/// assert_eq!(config.warmup_gaps, 1);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IntervalConfig {
    /// Gaps shorter than this are noise (back-to-back flush reads)
    ///
    /// Default: 2
    pub min_interval: u64,

    /// Leading gaps discarded as warm-up before histogramming
    ///
    /// Default: 1
    pub warmup_gaps: usize,

    /// Qualifying gaps required to produce an estimate
    ///
    /// Default: 2
    pub min_gaps: usize,
}

impl Default for IntervalConfig {
    fn default() -> Self {
        Self {
            min_interval: 2,
            warmup_gaps: 1,
            min_gaps: 2,
        }
    }
}

impl IntervalConfig {
    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.min_interval == 0 {
            return Err(AnalysisError::InvalidConfig(
                "min_interval must be >= 1".to_string(),
            ));
        }
        if self.min_gaps == 0 {
            return Err(AnalysisError::InvalidConfig(
                "min_gaps must be >= 1".to_string(),
            ));
        }
        Ok(())
    }
}

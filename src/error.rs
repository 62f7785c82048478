//! Error taxonomy for log loading and flush analysis
//!
//! Every failure is terminal for the current run. The binary renders the
//! error as a single diagnostic line naming the file, record or stage.

use std::path::PathBuf;
use thiserror::Error;

/// Errors produced by the analysis pipeline
#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("Malformed line {line} in {}: {reason} (content: {content:?})", path.display())]
    MalformedLine {
        path: PathBuf,
        line: usize,
        content: String,
        reason: String,
    },

    #[error("Log file not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("Log file not readable: {}: {source}", path.display())]
    NotReadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("No {bound} predecessor found for timestamp {timestamp} ({records} records searched)")]
    NoPredecessorFound {
        timestamp: i64,
        bound: SearchBound,
        records: usize,
    },

    #[error(
        "Insufficient flush events: {flush_events} flush events, {qualifying_gaps} qualifying gaps (need at least {required_gaps})"
    )]
    InsufficientFlushEvents {
        flush_events: usize,
        qualifying_gaps: usize,
        required_gaps: usize,
    },

    #[error("No flush-band reads in {}", .0.display())]
    NoFlushReads(PathBuf),

    #[error("Invalid threshold config: lat_threshold ({lat}) must be finite and below gc_threshold ({gc})")]
    InvalidThresholdConfig { lat: f64, gc: f64 },

    #[error("Invalid analysis config: {0}")]
    InvalidConfig(String),
}

/// Which side of the query timestamp a predecessor search accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchBound {
    /// Last record with `timestamp < query`
    Strict,
    /// Last record with `timestamp <= query`
    Inclusive,
}

impl std::fmt::Display for SearchBound {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SearchBound::Strict => write!(f, "strict"),
            SearchBound::Inclusive => write!(f, "inclusive"),
        }
    }
}

/// Result type for analysis operations
pub type Result<T> = std::result::Result<T, AnalysisError>;

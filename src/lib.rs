//! flushscope - storage benchmark trace post-processor
//!
//! Parses read/write latency logs from SSD benchmarks, classifies reads into
//! normal / flush / GC-outlier bands, correlates slow reads with the writes
//! that preceded them, and infers the device's write-buffer size from the
//! recurring interval between flush-stalled reads.

pub mod classifier;
pub mod cli;
pub mod config;
pub mod correlator;
pub mod csv_output;
pub mod error;
pub mod flush;
pub mod json_output;
pub mod latency_summary;
pub mod log_loader;
pub mod pipeline;
pub mod report;
pub mod stats;

pub use error::{AnalysisError, Result};

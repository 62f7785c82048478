// Flush-interval analysis and write-buffer size inference
//
// A device with a volatile write buffer stalls reads while it flushes. Under a
// steady write stream the flushes recur every `buffer_size / block_size`
// operations, so the most common gap between flush-classified reads,
// multiplied by the block size, estimates the buffer size.
//
// Pipeline: classify → flush positions → gaps (warm-up and noise dropped)
// → histogram with running mode → estimate.

mod analyzer;
mod config;
mod estimator;
mod histogram;

pub use analyzer::{analyze, FlushAnalysis};
pub use config::{IntervalConfig, IntervalEstimator};
pub use estimator::{estimate, BufferSizeEstimate};
pub use histogram::IntervalHistogram;

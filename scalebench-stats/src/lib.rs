#![warn(missing_docs)]
//! ScaleBench Statistical Reduction
//!
//! Reduces repeated trial latencies to one representative value:
//! - Arithmetic mean over all successful trials (no outlier rejection)
//! - Median, min, max and standard deviation reported for visibility
//!
//! Confidence intervals and regression testing are not provided.

mod percentiles;
mod summary;

pub use percentiles::compute_percentile;
pub use summary::{SummaryStatistics, compute_summary};

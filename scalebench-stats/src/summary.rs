//! Summary Statistics
//!
//! Reduces the per-operation latencies of the successful trials at one size
//! to a representative value. The representative value is the arithmetic
//! mean over every successful trial; nothing is trimmed. Spread figures are
//! carried alongside for visibility only.

use crate::percentiles::compute_percentile;
use serde::{Deserialize, Serialize};

/// Descriptive statistics over one set of trial latencies
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryStatistics {
    /// Arithmetic mean of all samples
    pub mean: f64,
    /// Median (linear interpolation)
    pub median: f64,
    /// Sample standard deviation (0 for fewer than two samples)
    pub std_dev: f64,
    /// Smallest sample
    pub min: f64,
    /// Largest sample
    pub max: f64,
    /// Number of samples reduced
    pub sample_count: usize,
}

/// Compute summary statistics, or `None` when there is nothing to reduce.
///
/// An empty input never produces a zero mean: callers must be able to tell
/// "measured 0" apart from "nothing measured".
pub fn compute_summary(samples: &[f64]) -> Option<SummaryStatistics> {
    if samples.is_empty() {
        return None;
    }

    let n = samples.len();
    let mean = samples.iter().sum::<f64>() / n as f64;

    let std_dev = if n < 2 {
        0.0
    } else {
        let variance = samples.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (n - 1) as f64;
        variance.sqrt()
    };

    let min = samples.iter().copied().fold(f64::INFINITY, f64::min);
    let max = samples.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    Some(SummaryStatistics {
        mean,
        median: compute_percentile(samples, 50.0),
        std_dev,
        min,
        max,
        sample_count: n,
    })
}

impl SummaryStatistics {
    /// Coefficient of variation (relative stddev, percent)
    pub fn coefficient_of_variation(&self) -> f64 {
        if self.mean == 0.0 {
            0.0
        } else {
            (self.std_dev / self.mean) * 100.0
        }
    }
}

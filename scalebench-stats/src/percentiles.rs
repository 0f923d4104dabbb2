//! Percentile Computation
//!
//! Linear interpolation between nearest ranks over the raw samples.

/// Compute a single percentile from samples
///
/// Uses linear interpolation between nearest ranks. Returns 0.0 for an
/// empty slice.
///
/// # Examples
///
/// ```ignore
/// # use scalebench_stats::compute_percentile;
/// let samples = vec![1.0, 2.0, 3.0, 4.0, 5.0];
/// let p50 = compute_percentile(&samples, 50.0);  // Median
/// assert_eq!(p50, 3.0);
/// ```
pub fn compute_percentile(samples: &[f64], percentile: f64) -> f64 {
    if samples.is_empty() {
        return 0.0;
    }

    if samples.len() == 1 {
        return samples[0];
    }

    let mut sorted = samples.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));

    let n = sorted.len();
    let p = percentile.clamp(0.0, 100.0) / 100.0;

    let rank = p * (n - 1) as f64;
    let lower_idx = rank.floor() as usize;
    let upper_idx = (lower_idx + 1).min(n - 1);
    let fraction = rank - lower_idx as f64;

    sorted[lower_idx] + fraction * (sorted[upper_idx] - sorted[lower_idx])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_median_odd() {
        let samples = vec![5.0, 1.0, 3.0, 2.0, 4.0];
        assert!((compute_percentile(&samples, 50.0) - 3.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_median_even_interpolates() {
        let samples = vec![1.0, 2.0, 3.0, 4.0];
        assert!((compute_percentile(&samples, 50.0) - 2.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_bounds() {
        let samples: Vec<f64> = (1..=100).map(|x| x as f64).collect();
        assert!((compute_percentile(&samples, 0.0) - 1.0).abs() < f64::EPSILON);
        assert!((compute_percentile(&samples, 100.0) - 100.0).abs() < f64::EPSILON);
        assert!((compute_percentile(&samples, 250.0) - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_single_and_empty() {
        assert!((compute_percentile(&[42.0], 50.0) - 42.0).abs() < f64::EPSILON);
        assert!((compute_percentile(&[], 50.0) - 0.0).abs() < f64::EPSILON);
    }
}

//! Size Sequencing
//!
//! Turns a size range and a growth strategy into the ordered list of sizes a
//! task is measured at. Output is strictly increasing, stays inside the
//! range and never exceeds the requested sample count.

use crate::task::{SizeRange, Strategy};

/// Produce the sizes to sample for `range` under `strategy`.
///
/// # Examples
///
/// ```ignore
/// # use scalebench_core::{SizeRange, Strategy, sequence};
/// let range = SizeRange::new(512, 16_384).unwrap();
/// let sizes = sequence(range, Strategy::Exponential, 5);
/// assert_eq!(sizes, vec![512, 1218, 2896, 6889, 16_384]);
/// ```
pub fn sequence(range: SizeRange, strategy: Strategy, sample_count: usize) -> Vec<usize> {
    if sample_count == 0 {
        return Vec::new();
    }
    if range.lower() == range.upper() {
        return vec![range.lower()];
    }

    match strategy {
        Strategy::Incremental => incremental(range, sample_count),
        Strategy::Exponential => exponential(range, sample_count),
    }
}

fn incremental(range: SizeRange, sample_count: usize) -> Vec<usize> {
    let (lower, upper) = (range.lower(), range.upper());

    if sample_count >= range.len() {
        return (lower..=upper).collect();
    }

    let span = (upper - lower) as f64;
    let step = ((span / sample_count as f64).round() as usize).max(1);

    (0..sample_count)
        .map(|k| lower + k * step)
        .take_while(|&size| size <= upper)
        .collect()
}

fn exponential(range: SizeRange, sample_count: usize) -> Vec<usize> {
    let (lower, upper) = (range.lower(), range.upper());

    if sample_count == 1 {
        return vec![lower];
    }

    let ratio = (upper as f64 / lower as f64).powf(1.0 / (sample_count - 1) as f64);
    let mut sizes = Vec::with_capacity(sample_count);

    for k in 0..sample_count {
        let size = (lower as f64 * ratio.powi(k as i32)).round() as usize;
        let size = size.clamp(lower, upper);

        // Rounding collapses neighbouring points when the range is narrow
        if sizes.last().is_none_or(|&last| size > last) {
            sizes.push(size);
        }
    }

    sizes
}

//! Robust summary statistics over pixel samples.

use serde::{Deserialize, Serialize};

use crate::consts::{SIGMA_CLIP_MAX_ITERS, SIGMA_CLIP_SIGMA};

/// Parameters for sigma-clipped statistics.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SigmaClipParams {
    /// Maximum number of rejection passes (default: 5).
    pub max_iters: usize,
    /// Values further than `sigma` standard deviations from the median are
    /// rejected (default: 3.0).
    pub sigma: f64,
}

impl Default for SigmaClipParams {
    fn default() -> Self {
        Self {
            max_iters: SIGMA_CLIP_MAX_ITERS,
            sigma: SIGMA_CLIP_SIGMA,
        }
    }
}

/// Mean, median and standard deviation of the values surviving clipping.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ClippedStats {
    pub mean: f64,
    pub median: f64,
    pub std: f64,
}

/// Median of `values`, ignoring NaNs. Returns NaN when nothing is left.
pub fn nan_median(values: &[f64]) -> f64 {
    let mut finite: Vec<f64> = values.iter().copied().filter(|v| !v.is_nan()).collect();
    median_in_place(&mut finite)
}

/// Median of a scratch buffer; the buffer is reordered.
pub fn median_in_place(values: &mut [f64]) -> f64 {
    let n = values.len();
    if n == 0 {
        return f64::NAN;
    }
    let mid = n / 2;
    let (lower, upper, _) = values.select_nth_unstable_by(mid, f64::total_cmp);
    let upper = *upper;
    if n % 2 == 1 {
        upper
    } else {
        let lower = lower.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        (lower + upper) / 2.0
    }
}

/// Population mean and standard deviation of `values`, ignoring NaNs.
pub fn nan_mean_std(values: &[f64]) -> (f64, f64) {
    mean_std(values, |v| !v.is_nan())
}

fn mean_std(values: &[f64], keep: impl Fn(f64) -> bool) -> (f64, f64) {
    let mut sum = 0.0;
    let mut count = 0usize;
    for &v in values {
        if keep(v) {
            sum += v;
            count += 1;
        }
    }
    if count == 0 {
        return (f64::NAN, f64::NAN);
    }
    let mean = sum / count as f64;

    let mut var_sum = 0.0;
    for &v in values {
        if keep(v) {
            let d = v - mean;
            var_sum += d * d;
        }
    }
    (mean, (var_sum / count as f64).sqrt())
}

/// Iteratively reject outliers around the median and summarize the rest.
///
/// Each pass recomputes the median and standard deviation of the surviving
/// values and rejects anything further than `sigma * std` from the median.
/// Stops early once a pass rejects nothing. NaNs are ignored throughout.
pub fn sigma_clipped_stats(values: &[f64], params: &SigmaClipParams) -> ClippedStats {
    let mut kept: Vec<f64> = values.iter().copied().filter(|v| !v.is_nan()).collect();
    let mut scratch = Vec::with_capacity(kept.len());

    for _ in 0..params.max_iters {
        if kept.is_empty() {
            break;
        }
        scratch.clear();
        scratch.extend_from_slice(&kept);
        let median = median_in_place(&mut scratch);
        let (_, std) = mean_std(&kept, |_| true);

        let lo = median - params.sigma * std;
        let hi = median + params.sigma * std;
        let before = kept.len();
        kept.retain(|&v| v >= lo && v <= hi);
        if kept.len() == before {
            break;
        }
    }

    let (mean, std) = mean_std(&kept, |_| true);
    ClippedStats {
        mean,
        median: median_in_place(&mut kept),
        std,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_median_odd_even() {
        assert_eq!(median_in_place(&mut [3.0, 1.0, 2.0]), 2.0);
        assert_eq!(median_in_place(&mut [4.0, 1.0, 3.0, 2.0]), 2.5);
        assert!(median_in_place(&mut []).is_nan());
    }

    #[test]
    fn test_nan_median_skips_nan() {
        assert_eq!(nan_median(&[f64::NAN, 1.0, 5.0, 3.0]), 3.0);
    }

    #[test]
    fn test_sigma_clip_rejects_outlier() {
        let mut values = vec![10.0; 99];
        values.push(1.0e6);
        let stats = sigma_clipped_stats(&values, &SigmaClipParams::default());
        assert_eq!(stats.median, 10.0);
        assert_eq!(stats.mean, 10.0);
        assert_eq!(stats.std, 0.0);
    }

    #[test]
    fn test_mean_std() {
        let (mean, std) = nan_mean_std(&[0.0, 0.0, 1.0, 1.0, f64::NAN]);
        assert!((mean - 0.5).abs() < 1e-12);
        assert!((std - 0.5).abs() < 1e-12);
    }
}

//! Ordinary least squares over unsigned integer samples.
//!
//! All inputs are raw `u64` measurements (sizes, tick counts, event
//! counters); everything after the initial summation is `f64`. Variances
//! here are population variances (divide by `n`, not `n - 1`), which is
//! what the line-fitting algebra expects.
//!
//! # Degenerate fits
//!
//! A channel with zero variance makes [`correlation`] and [`slope`]
//! mathematically undefined. These functions return NaN or infinity in
//! that case rather than panicking; callers treat such values as a
//! degenerate fit.

use crate::constants::LANE_WIDTH;
use crate::result::Regression;

/// Sum a slice of raw measurements.
///
/// Accumulates into `LANE_WIDTH` independent lanes so the loop has no
/// serial dependency chain and autovectorizes cleanly. Overflow wraps;
/// inputs are assumed to fit in the u64 total.
pub fn sum(values: &[u64]) -> u64 {
    let mut lanes = [0u64; LANE_WIDTH];
    let chunks = values.chunks_exact(LANE_WIDTH);
    let tail = chunks.remainder();

    for chunk in chunks {
        for (lane, &v) in lanes.iter_mut().zip(chunk) {
            *lane = lane.wrapping_add(v);
        }
    }

    let mut total = lanes.iter().fold(0u64, |acc, &l| acc.wrapping_add(l));
    for &v in tail {
        total = total.wrapping_add(v);
    }
    total
}

/// Arithmetic mean of a sequence given its precomputed sum.
///
/// # Panics
///
/// Panics in debug builds if `n` is zero.
#[inline]
pub fn mean(sum: u64, n: usize) -> f64 {
    debug_assert!(n > 0, "mean of empty sequence");
    sum as f64 / n as f64
}

/// Center a sequence around its mean.
///
/// Returns a new buffer where element `i` is `values[i] - mean`. The
/// caller owns the result; it is the input to [`variance`] and
/// [`covariance`].
pub fn centered(values: &[u64], mean: f64) -> Vec<f64> {
    values.iter().map(|&v| v as f64 - mean).collect()
}

/// Population variance of a centered sequence: mean of squared deviations.
///
/// # Panics
///
/// Panics in debug builds if `deviations` is empty.
pub fn variance(deviations: &[f64]) -> f64 {
    debug_assert!(!deviations.is_empty(), "variance of empty sequence");
    let sq_sum: f64 = deviations.iter().map(|d| d * d).sum();
    sq_sum / deviations.len() as f64
}

/// Population covariance of two centered sequences of equal length.
///
/// # Panics
///
/// Panics in debug builds if the lengths differ or are zero.
pub fn covariance(dev_a: &[f64], dev_b: &[f64]) -> f64 {
    debug_assert_eq!(dev_a.len(), dev_b.len(), "covariance length mismatch");
    debug_assert!(!dev_a.is_empty(), "covariance of empty sequence");
    let prod_sum: f64 = dev_a.iter().zip(dev_b).map(|(a, b)| a * b).sum();
    prod_sum / dev_a.len() as f64
}

/// Pearson correlation coefficient from variances and covariance.
///
/// Returns NaN or infinity when either variance is zero (degenerate fit).
#[inline]
pub fn correlation(var_x: f64, var_y: f64, cov: f64) -> f64 {
    cov / var_x.sqrt() / var_y.sqrt()
}

/// OLS slope `a` from the independent variable's variance and the
/// covariance. Infinite or NaN when `var_x` is zero (degenerate fit).
#[inline]
pub fn slope(var_x: f64, cov: f64) -> f64 {
    cov / var_x
}

/// OLS intercept `b` from the slope and the two means.
#[inline]
pub fn intercept(slope: f64, mean_x: f64, mean_y: f64) -> f64 {
    mean_y - slope * mean_x
}

/// Fit one regression line through `(x[i], y[i])` pairs.
///
/// Orchestrates the primitives above; the centered buffers are internal
/// transients and never escape this function.
///
/// # Panics
///
/// Panics if `x` and `y` differ in length or are empty.
pub fn fit(x: &[u64], y: &[u64]) -> Regression {
    assert_eq!(x.len(), y.len(), "fit requires equal-length sequences");
    assert!(!x.is_empty(), "fit requires at least one sample");

    let n = x.len();
    let mean_x = mean(sum(x), n);
    let mean_y = mean(sum(y), n);
    let dev_x = centered(x, mean_x);
    let dev_y = centered(y, mean_y);
    let var_x = variance(&dev_x);
    let var_y = variance(&dev_y);
    let cov = covariance(&dev_x, &dev_y);

    let a = slope(var_x, cov);
    Regression {
        r: correlation(var_x, var_y, cov),
        a,
        b: intercept(a, mean_x, mean_y),
    }
}

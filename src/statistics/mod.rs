//! Statistical primitives for cost-model fitting.
//!
//! This module provides the pure numeric layer underneath the calibration
//! driver:
//! - Lane-parallel summation of raw `u64` measurements
//! - Mean, centered deviations, population variance and covariance
//! - Pearson correlation and OLS slope/intercept
//! - [`fit`], the single-regression entry point usable without the driver

mod regression;

pub use regression::{
    centered, correlation, covariance, fit, intercept, mean, slope, sum, variance,
};

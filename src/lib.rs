//! # costfit
//!
//! Discover the linear cost model of a workload by measurement.
//!
//! This crate runs repeated timed trials of an opaque measurement probe
//! across exponentially increasing input sizes and fits, per measured
//! channel, an ordinary-least-squares line through the surviving samples,
//! outputting:
//! - Correlation coefficient `r` (fit confidence)
//! - Slope `a` (cost per unit of input size)
//! - Intercept `b` (fixed overhead)
//!
//! for each of the probe's two channels (typically wall-time plus one
//! auxiliary counter). Noisy trials are rejected with a z-score filter,
//! and the whole sweep is repeated for several independent rounds, keeping
//! the round that fits best.
//!
//! ## Common Pitfall: Under-Resolved Probes
//!
//! The probe signals "my measurement was too coarse to resolve" by
//! returning zero in its *second* channel. The driver reacts by doubling
//! the requested size; a probe that reports a zero second metric even at
//! the configured size cap makes the whole run [`Outcome::Unmeasurable`].
//! Make sure the second channel is a quantity that genuinely becomes
//! nonzero once the workload is large enough.
//!
//! ## Quick Start
//!
//! ```ignore
//! use costfit::{calibrate, Outcome};
//!
//! let outcome = calibrate(|size| {
//!     let start = ticks();
//!     run_workload(size);
//!     (ticks() - start, bytes_touched(size))
//! });
//!
//! match outcome {
//!     Outcome::Calibrated(summary) => {
//!         println!("per-element cost: {:.2} ticks", summary.time.a);
//!     }
//!     Outcome::Unmeasurable { recommendation, .. } => {
//!         println!("skipping: {recommendation}");
//!     }
//! }
//! ```
//!
//! The statistics layer is usable on its own for one-shot fits over data
//! you already have; see [`statistics::fit`].

#![warn(missing_docs)]
#![warn(clippy::all)]

// Core modules
mod calibrator;
mod config;
mod constants;
mod probe;
mod result;

// Functional modules
pub mod statistics;

// Re-exports for public API
pub use calibrator::{accept_batch, calibrate, Calibrator};
pub use config::Config;
pub use constants::{
    DEFAULT_MAX_SIZE, DEFAULT_OUTLIER_SIGMA, DEFAULT_ROUNDS, DEFAULT_SIZE_LEVELS,
    DEFAULT_TRIALS_PER_LEVEL, LANE_WIDTH,
};
pub use probe::Probe;
pub use result::{CalibrationSummary, Outcome, Regression};

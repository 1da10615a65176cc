//! Result types for calibration runs.

use core::fmt;

use serde::{Deserialize, Serialize};

/// One fitted regression line.
///
/// Produced by [`statistics::fit`](crate::statistics::fit) and carried in
/// pairs inside a [`CalibrationSummary`]. A degenerate fit (zero variance
/// in a channel) shows up as NaN or infinite fields; callers should check
/// [`Regression::is_degenerate`] before trusting the coefficients.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Regression {
    /// Pearson correlation coefficient, in `[-1, 1]` for well-formed data.
    pub r: f64,
    /// OLS slope.
    pub a: f64,
    /// OLS intercept.
    pub b: f64,
}

impl Regression {
    /// Predict the dependent value at `x` using this line.
    pub fn predict(&self, x: f64) -> f64 {
        self.a * x + self.b
    }

    /// True when any coefficient is NaN or infinite.
    ///
    /// This happens when a fit ran over a channel with zero variance, or
    /// over a round that accepted no samples at all.
    pub fn is_degenerate(&self) -> bool {
        !(self.r.is_finite() && self.a.is_finite() && self.b.is_finite())
    }

    /// An all-NaN regression, used for rounds with no accepted samples.
    pub(crate) fn degenerate() -> Self {
        Self {
            r: f64::NAN,
            a: f64::NAN,
            b: f64::NAN,
        }
    }
}

impl fmt::Display for Regression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "r={:.4} a={:.4} b={:.4}", self.r, self.a, self.b)
    }
}

/// The best pair of regression lines found across all calibration rounds.
///
/// `time` is the first measured channel and `aux` the second. The pair
/// always comes from the same round; rounds are ranked by the `time`
/// channel's correlation alone.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CalibrationSummary {
    /// Regression of the first channel (typically wall-time) on size.
    pub time: Regression,
    /// Regression of the second channel (auxiliary counter) on size.
    pub aux: Regression,
}

impl CalibrationSummary {
    /// Flatten to `[r1, a1, b1, r2, a2, b2]`, the legacy wire order.
    pub fn to_array(&self) -> [f64; 6] {
        [
            self.time.r,
            self.time.a,
            self.time.b,
            self.aux.r,
            self.aux.a,
            self.aux.b,
        ]
    }
}

impl fmt::Display for CalibrationSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "time: {} | aux: {}", self.time, self.aux)
    }
}

/// Top-level outcome of a calibration run.
///
/// Either the driver converged on a summary, or the probe could not
/// resolve its second metric even at the maximum allowed size and the run
/// was abandoned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Outcome {
    /// Calibration completed; the best round's regression pair.
    Calibrated(CalibrationSummary),

    /// The workload could not be measured on this platform.
    ///
    /// The probe kept reporting a zero second metric even after the input
    /// size was grown to the configured cap. Remaining rounds were skipped
    /// and any earlier rounds discarded.
    Unmeasurable {
        /// Size the driver had grown to when it gave up.
        size_reached: u64,
        /// The configured size cap in effect.
        max_size: u64,
        /// Suggested actions to make the workload measurable.
        recommendation: String,
    },
}

impl Outcome {
    /// The summary, if calibration completed.
    pub fn summary(&self) -> Option<&CalibrationSummary> {
        match self {
            Self::Calibrated(summary) => Some(summary),
            Self::Unmeasurable { .. } => None,
        }
    }

    /// True when the run was abandoned as unmeasurable.
    pub fn is_unmeasurable(&self) -> bool {
        matches!(self, Self::Unmeasurable { .. })
    }

    /// Flatten to the legacy six-value array.
    ///
    /// Unmeasurable runs flatten to all zeros, the convention the original
    /// engine used before the explicit outcome type existed. Prefer
    /// matching on the enum; real fits are never exactly all-zero, but
    /// nothing in the array's type says so.
    pub fn to_array(&self) -> [f64; 6] {
        match self {
            Self::Calibrated(summary) => summary.to_array(),
            Self::Unmeasurable { .. } => [0.0; 6],
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Calibrated(summary) => write!(f, "calibrated ({summary})"),
            Self::Unmeasurable {
                size_reached,
                max_size,
                recommendation,
            } => write!(
                f,
                "unmeasurable at size {size_reached} (cap {max_size}): {recommendation}"
            ),
        }
    }
}

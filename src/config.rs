//! Configuration for the calibration driver.

use crate::constants::{
    DEFAULT_MAX_SIZE, DEFAULT_OUTLIER_SIGMA, DEFAULT_ROUNDS, DEFAULT_SIZE_LEVELS,
    DEFAULT_TRIALS_PER_LEVEL, LANE_WIDTH,
};

/// Configuration options for [`Calibrator`](crate::Calibrator).
///
/// The defaults give ten rounds of ten size levels with ten trials each,
/// which resolves a stable linear model on most workloads. Use the preset
/// constructors or the builder methods on `Calibrator` to tune.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Repeated probe trials collected at each size level.
    ///
    /// More trials give the outlier filter more to work with but cost
    /// proportionally more probe invocations. Default: 10.
    pub trials_per_level: usize,

    /// Number of size levels swept per round.
    ///
    /// The input size doubles between levels, so this bounds the dynamic
    /// range of the sweep at `base_size << size_levels`. Default: 10.
    pub size_levels: usize,

    /// Independent calibration rounds.
    ///
    /// Each round is a full sweep producing one candidate regression pair;
    /// the pair with the highest first-channel correlation is returned.
    /// Default: 10.
    pub rounds: usize,

    /// Z-score cutoff for the outlier filter.
    ///
    /// A trial whose first-channel value deviates from the level mean by
    /// more than this many standard deviations is dropped (its second
    /// channel goes with it). Default: 2.0.
    pub outlier_sigma: f64,

    /// Hard cap on the probed input size.
    ///
    /// If the probe still cannot resolve its second metric once the size
    /// has grown to this cap, the whole calibration is declared
    /// unmeasurable. Default: `1 << 24`.
    pub max_size: u64,

    /// Input size a round starts from.
    ///
    /// Defaults to [`LANE_WIDTH`], the vectorization granularity, so the
    /// smallest probed workload is one full vector step.
    pub base_size: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            trials_per_level: DEFAULT_TRIALS_PER_LEVEL,
            size_levels: DEFAULT_SIZE_LEVELS,
            rounds: DEFAULT_ROUNDS,
            outlier_sigma: DEFAULT_OUTLIER_SIGMA,
            max_size: DEFAULT_MAX_SIZE,
            base_size: LANE_WIDTH as u64,
        }
    }
}

impl Config {
    /// Create a new configuration with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a quick configuration for development.
    ///
    /// Three rounds of six levels with five trials each; roughly a tenth
    /// of the default probe budget.
    pub fn quick() -> Self {
        Self {
            trials_per_level: 5,
            size_levels: 6,
            rounds: 3,
            ..Default::default()
        }
    }

    /// Create a thorough configuration for final calibration runs.
    ///
    /// Twenty rounds of twelve levels with twenty trials each.
    pub fn thorough() -> Self {
        Self {
            trials_per_level: 20,
            size_levels: 12,
            rounds: 20,
            ..Default::default()
        }
    }

    /// Maximum number of accepted samples a round can hold.
    pub fn round_capacity(&self) -> usize {
        self.trials_per_level * self.size_levels
    }

    /// Validate the configuration.
    ///
    /// Returns a description of the first problem found, if any.
    pub fn validate(&self) -> Result<(), String> {
        if self.trials_per_level == 0 {
            return Err("trials_per_level must be positive".to_string());
        }
        if self.size_levels == 0 {
            return Err("size_levels must be positive".to_string());
        }
        if self.rounds == 0 {
            return Err("rounds must be positive".to_string());
        }
        if !self.outlier_sigma.is_finite() || self.outlier_sigma <= 0.0 {
            return Err("outlier_sigma must be positive".to_string());
        }
        if self.base_size == 0 {
            return Err("base_size must be positive".to_string());
        }
        if self.max_size < self.base_size {
            return Err("max_size must be at least base_size".to_string());
        }
        Ok(())
    }
}

//! Default tunables for the calibration driver.

/// Lane width for the summation loops.
///
/// The sum over raw measurements accumulates into this many independent
/// lanes so the compiler can vectorize the reduction. It also serves as
/// the baseline input size a calibration round starts from, so the first
/// probed size is already a full vector step.
pub const LANE_WIDTH: usize = 8;

/// Default number of repeated trials per size level.
pub const DEFAULT_TRIALS_PER_LEVEL: usize = 10;

/// Default number of exponentially growing size levels per round.
pub const DEFAULT_SIZE_LEVELS: usize = 10;

/// Default number of independent calibration rounds.
///
/// Each round sweeps all size levels and produces one candidate pair of
/// regression lines; the round with the highest first-channel correlation
/// wins.
pub const DEFAULT_ROUNDS: usize = 10;

/// Default z-score cutoff for the outlier filter.
///
/// A trial is accepted only if its first-channel value lies within this
/// many standard deviations of the level's mean.
pub const DEFAULT_OUTLIER_SIGMA: f64 = 2.0;

/// Default hard cap on the probed input size.
///
/// When the probe keeps reporting an unresolvable second metric and the
/// size has already grown to this cap, the calibration is declared
/// unmeasurable.
pub const DEFAULT_MAX_SIZE: u64 = 1 << 24;

//! The adaptive calibration driver and its `Calibrator` entry point.
//!
//! A calibration run is `rounds` independent sweeps. Each sweep walks
//! `size_levels` exponentially growing input sizes, collects
//! `trials_per_level` probe measurements at each, z-filters them on the
//! first channel, and fits one regression line per channel over the
//! accepted samples. The sweep whose first-channel correlation is highest
//! supplies the returned summary.

use crate::config::Config;
use crate::probe::Probe;
use crate::result::{CalibrationSummary, Outcome, Regression};
use crate::statistics;

/// Main entry point for calibration.
///
/// Holds a [`Config`] and exposes builder methods for the tunables.
///
/// # Example
///
/// ```ignore
/// use costfit::Calibrator;
///
/// let outcome = Calibrator::new()
///     .rounds(5)
///     .outlier_sigma(1.5)
///     .calibrate(|size| measure_workload(size));
/// ```
#[derive(Debug, Clone, Default)]
pub struct Calibrator {
    config: Config,
}

/// Result of one calibration round.
enum Round {
    /// Both channels fitted over the round's accepted samples.
    Fitted(CalibrationSummary),
    /// The probe could not resolve its second metric at the size cap.
    Unmeasurable { size_reached: u64 },
}

impl Calibrator {
    /// Create with default configuration.
    pub fn new() -> Self {
        Self {
            config: Config::default(),
        }
    }

    /// Create with the quick preset (roughly a tenth of the probe budget).
    pub fn quick() -> Self {
        Self {
            config: Config::quick(),
        }
    }

    /// Create with the thorough preset.
    pub fn thorough() -> Self {
        Self {
            config: Config::thorough(),
        }
    }

    /// Create from an explicit configuration.
    ///
    /// # Panics
    ///
    /// Panics if the configuration fails [`Config::validate`].
    pub fn with_config(config: Config) -> Self {
        if let Err(msg) = config.validate() {
            panic!("invalid configuration: {msg}");
        }
        Self { config }
    }

    /// Set trials per size level.
    pub fn trials_per_level(mut self, n: usize) -> Self {
        assert!(n > 0, "trials_per_level must be positive");
        self.config.trials_per_level = n;
        self
    }

    /// Set size levels per round.
    pub fn size_levels(mut self, n: usize) -> Self {
        assert!(n > 0, "size_levels must be positive");
        self.config.size_levels = n;
        self
    }

    /// Set the number of independent rounds.
    pub fn rounds(mut self, n: usize) -> Self {
        assert!(n > 0, "rounds must be positive");
        self.config.rounds = n;
        self
    }

    /// Set the z-score cutoff for the outlier filter.
    pub fn outlier_sigma(mut self, sigma: f64) -> Self {
        assert!(sigma > 0.0, "outlier_sigma must be positive");
        self.config.outlier_sigma = sigma;
        self
    }

    /// Set the hard cap on the probed input size.
    pub fn max_size(mut self, size: u64) -> Self {
        assert!(
            size >= self.config.base_size,
            "max_size must be at least base_size"
        );
        self.config.max_size = size;
        self
    }

    /// Set the input size a round starts from.
    pub fn base_size(mut self, size: u64) -> Self {
        assert!(size > 0, "base_size must be positive");
        self.config.base_size = size;
        self
    }

    /// Get the current configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Run the full calibration against `probe`.
    ///
    /// Invokes the probe strictly sequentially. Returns
    /// [`Outcome::Unmeasurable`] as soon as any round hits the size cap
    /// with an unresolved second metric; rounds already completed are
    /// discarded in that case.
    ///
    /// # Panics
    ///
    /// Panics if the configuration fails [`Config::validate`].
    pub fn calibrate<P: Probe>(&self, mut probe: P) -> Outcome {
        if let Err(msg) = self.config.validate() {
            panic!("invalid configuration: {msg}");
        }

        // Round buffers, allocated once and reused across rounds.
        let cap = self.config.round_capacity();
        let mut x: Vec<u64> = Vec::with_capacity(cap);
        let mut y1: Vec<u64> = Vec::with_capacity(cap);
        let mut y2: Vec<u64> = Vec::with_capacity(cap);
        let mut t1 = vec![0u64; self.config.trials_per_level];
        let mut t2 = vec![0u64; self.config.trials_per_level];

        let mut best = match self.run_round(&mut probe, &mut x, &mut y1, &mut y2, &mut t1, &mut t2)
        {
            Round::Fitted(summary) => summary,
            Round::Unmeasurable { size_reached } => return self.unmeasurable(size_reached),
        };

        for _ in 1..self.config.rounds {
            match self.run_round(&mut probe, &mut x, &mut y1, &mut y2, &mut t1, &mut t2) {
                Round::Fitted(summary) => replace_best(&mut best, summary),
                Round::Unmeasurable { size_reached } => return self.unmeasurable(size_reached),
            }
        }

        Outcome::Calibrated(best)
    }

    /// One full sweep over all size levels.
    fn run_round<P: Probe>(
        &self,
        probe: &mut P,
        x: &mut Vec<u64>,
        y1: &mut Vec<u64>,
        y2: &mut Vec<u64>,
        t1: &mut [u64],
        t2: &mut [u64],
    ) -> Round {
        x.clear();
        y1.clear();
        y2.clear();

        let mut size = self.config.base_size;

        for _ in 0..self.config.size_levels {
            // Collect a full batch at the current size. A zero second
            // metric means the measurement could not resolve: double the
            // size and restart the batch from trial 0, until the cap.
            'batch: loop {
                for (slot1, slot2) in t1.iter_mut().zip(t2.iter_mut()) {
                    let (v1, v2) = probe.measure(size);
                    *slot1 = v1;
                    *slot2 = v2;
                    if v2 == 0 {
                        if size < self.config.max_size {
                            size <<= 1;
                            continue 'batch;
                        }
                        return Round::Unmeasurable { size_reached: size };
                    }
                }
                break;
            }

            accept_batch(size, t1, t2, self.config.outlier_sigma, x, y1, y2);
            size <<= 1;
        }

        if x.is_empty() {
            // Every batch was rejected (e.g. zero-variance trials).
            return Round::Fitted(CalibrationSummary {
                time: Regression::degenerate(),
                aux: Regression::degenerate(),
            });
        }

        Round::Fitted(CalibrationSummary {
            time: statistics::fit(x, y1),
            aux: statistics::fit(x, y2),
        })
    }

    fn unmeasurable(&self, size_reached: u64) -> Outcome {
        Outcome::Unmeasurable {
            size_reached,
            max_size: self.config.max_size,
            recommendation: "the probe's second metric stayed zero at the size cap; \
                             raise max_size or coarsen the probe's workload unit"
                .to_string(),
        }
    }
}

/// Z-filter one batch of trials into the round buffers.
///
/// Computes mean and standard deviation of `t1` and appends
/// `(size, t1[j], t2[j])` to the buffers for every trial whose
/// first-channel z-score is below `outlier_sigma`. The second channel is
/// carried along unfiltered. Returns the number of accepted trials.
///
/// A zero-variance batch yields NaN z-scores, which fail the comparison
/// and drop every trial in the batch.
///
/// Exposed for testing and for callers building custom sweep loops.
pub fn accept_batch(
    size: u64,
    t1: &[u64],
    t2: &[u64],
    outlier_sigma: f64,
    x: &mut Vec<u64>,
    y1: &mut Vec<u64>,
    y2: &mut Vec<u64>,
) -> usize {
    debug_assert_eq!(t1.len(), t2.len(), "trial channel length mismatch");
    debug_assert!(!t1.is_empty(), "empty trial batch");

    let mean_t1 = statistics::mean(statistics::sum(t1), t1.len());
    let std_t1 = statistics::variance(&statistics::centered(t1, mean_t1)).sqrt();

    let mut accepted = 0;
    for (&v1, &v2) in t1.iter().zip(t2) {
        if (v1 as f64 - mean_t1).abs() / std_t1 < outlier_sigma {
            x.push(size);
            y1.push(v1);
            y2.push(v2);
            accepted += 1;
        }
    }
    accepted
}

/// Replace `best` with `candidate` when the candidate's first-channel
/// correlation is strictly higher. Ties keep the incumbent; the second
/// channel is never consulted.
fn replace_best(best: &mut CalibrationSummary, candidate: CalibrationSummary) {
    if candidate.time.r > best.time.r {
        *best = candidate;
    }
}

/// Calibrate with the default configuration.
///
/// Convenience wrapper over [`Calibrator::new`]; see
/// [`Calibrator::calibrate`] for semantics.
pub fn calibrate<P: Probe>(probe: P) -> Outcome {
    Calibrator::new().calibrate(probe)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(r1: f64, r2: f64) -> CalibrationSummary {
        CalibrationSummary {
            time: Regression { r: r1, a: r1, b: 0.0 },
            aux: Regression { r: r2, a: r2, b: 0.0 },
        }
    }

    #[test]
    fn test_higher_correlation_round_wins() {
        let mut best = summary(0.80, 0.99);
        replace_best(&mut best, summary(0.95, 0.10));
        // Both channels come from the round with the better time fit,
        // even though its aux fit is worse.
        assert_eq!(best.time.r, 0.95);
        assert_eq!(best.aux.r, 0.10);
    }

    #[test]
    fn test_tie_keeps_earlier_round() {
        let mut best = summary(0.90, 0.50);
        replace_best(&mut best, summary(0.90, 0.99));
        assert_eq!(best.aux.r, 0.50);
    }

    #[test]
    fn test_outlier_excluded_from_batch() {
        let t1 = [10u64, 10, 10, 10, 1000];
        let t2 = [7u64, 7, 7, 7, 7];
        let (mut x, mut y1, mut y2) = (Vec::new(), Vec::new(), Vec::new());

        let accepted = accept_batch(64, &t1, &t2, 1.5, &mut x, &mut y1, &mut y2);

        assert_eq!(accepted, 4);
        assert_eq!(y1, vec![10, 10, 10, 10]);
        assert_eq!(y2, vec![7, 7, 7, 7]);
        assert_eq!(x, vec![64; 4]);
    }

    #[test]
    fn test_zero_variance_batch_drops_everything() {
        let t1 = [50u64; 5];
        let t2 = [9u64; 5];
        let (mut x, mut y1, mut y2) = (Vec::new(), Vec::new(), Vec::new());

        let accepted = accept_batch(8, &t1, &t2, 2.0, &mut x, &mut y1, &mut y2);

        assert_eq!(accepted, 0);
        assert!(x.is_empty());
    }

    #[test]
    fn test_unmeasurable_probe() {
        let outcome = Calibrator::quick()
            .max_size(1 << 10)
            .calibrate(|size: u64| (size, 0));

        match outcome {
            Outcome::Unmeasurable {
                size_reached,
                max_size,
                ..
            } => {
                assert_eq!(size_reached, 1 << 10);
                assert_eq!(max_size, 1 << 10);
            }
            Outcome::Calibrated(_) => panic!("expected unmeasurable outcome"),
        }
    }

    #[test]
    fn test_doubling_resolves_at_threshold() {
        // Second metric resolves only from size 64 up; the first level
        // must settle on 64 = 8 doubled three times. A small jitter keeps
        // batch variance nonzero so trials pass the outlier filter.
        let mut sizes = Vec::new();
        let mut calls = 0u64;
        let outcome = Calibrator::quick()
            .rounds(1)
            .calibrate(|size: u64| {
                sizes.push(size);
                if size < 64 {
                    return (size, 0);
                }
                calls += 1;
                (3 * size + 5 + calls % 3, 2 * size + 1)
            });

        // Each unresolved size is probed exactly once before doubling; the
        // first resolved level runs the full batch at 64.
        assert_eq!(sizes.iter().filter(|&&s| s == 8).count(), 1);
        assert_eq!(sizes.iter().filter(|&&s| s == 16).count(), 1);
        assert_eq!(sizes.iter().filter(|&&s| s == 32).count(), 1);
        assert_eq!(sizes.iter().filter(|&&s| s == 64).count(), 5);

        let summary = outcome.summary().expect("calibration should complete");
        assert!(summary.time.r > 0.999, "r = {}", summary.time.r);
        assert!((summary.time.a - 3.0).abs() < 0.05, "a = {}", summary.time.a);
    }

    #[test]
    #[should_panic]
    fn test_invalid_outlier_sigma() {
        let _ = Calibrator::new().outlier_sigma(0.0);
    }

    #[test]
    #[should_panic]
    fn test_invalid_config_rejected() {
        let mut config = Config::default();
        config.rounds = 0;
        let _ = Calibrator::with_config(config);
    }
}

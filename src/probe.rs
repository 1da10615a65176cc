//! The measurement probe contract.
//!
//! The calibration driver never measures anything itself; it asks an
//! externally supplied probe to run a workload of a requested size and
//! report two raw cost metrics for it. What the metrics mean (elapsed
//! ticks, instruction counts, allocations) is entirely the probe's
//! business; the driver only requires that the second metric reads zero
//! when the workload was too small to resolve.

/// A measurement probe: size in, two raw metrics out.
///
/// Implemented for any `FnMut(u64) -> (u64, u64)` closure, so most
/// callers never name this trait:
///
/// ```ignore
/// use costfit::calibrate;
///
/// let outcome = calibrate(|size| {
///     let start = now_ticks();
///     run_workload(size);
///     (now_ticks() - start, cache_misses())
/// });
/// ```
///
/// Probes may keep mutable state (counters, scratch buffers); the driver
/// invokes them strictly sequentially.
pub trait Probe {
    /// Run one trial at the requested input size and return the pair of
    /// measured metrics `(t1, t2)`.
    ///
    /// Returning `t2 == 0` signals that the measurement was too coarse to
    /// resolve at this size; the driver reacts by growing the size.
    fn measure(&mut self, size: u64) -> (u64, u64);
}

impl<F> Probe for F
where
    F: FnMut(u64) -> (u64, u64),
{
    fn measure(&mut self, size: u64) -> (u64, u64) {
        self(size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_closure_is_a_probe() {
        let mut probe = |size: u64| (size * 2, size + 1);
        assert_eq!(probe.measure(8), (16, 9));
    }

    #[test]
    fn test_stateful_probe() {
        let mut calls = 0u64;
        let mut probe = move |size: u64| {
            calls += 1;
            (size, calls)
        };
        assert_eq!(probe.measure(4), (4, 1));
        assert_eq!(probe.measure(4), (4, 2));
    }
}

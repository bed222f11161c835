//! Monotonic timing of kernel invocations.

use std::time::Instant;

use crate::errors::{HarnessError, HarnessResult};

/// High-resolution monotonic clock used to bracket kernel calls.
pub struct MonotonicClock;

impl MonotonicClock {
    /// Confirm the clock source is monotonic before any measurement. Two
    /// consecutive readings must not go backwards; if they do, the run fails
    /// instead of silently falling back to a wall clock.
    pub fn probe() -> HarnessResult<()> {
        let first = Instant::now();
        let second = Instant::now();
        if second.checked_duration_since(first).is_none() {
            return Err(HarnessError::ClockUnavailable);
        }
        Ok(())
    }

    /// Run one call with a clock reading immediately before and after,
    /// returning the elapsed seconds. The caller keeps all I/O outside the
    /// closure.
    pub fn time<E>(call: impl FnOnce() -> Result<(), E>) -> Result<f64, E> {
        let start = Instant::now();
        call()?;
        Ok(start.elapsed().as_secs_f64())
    }
}

/// Accumulates per-call elapsed times into a mean for one swept size.
#[derive(Debug, Default)]
pub struct TimingAccumulator {
    total_seconds: f64,
    samples: u32,
}

impl TimingAccumulator {
    pub fn new() -> Self {
        TimingAccumulator::default()
    }

    pub fn record(&mut self, seconds: f64) {
        self.total_seconds += seconds;
        self.samples += 1;
    }

    pub fn total_seconds(&self) -> f64 {
        self.total_seconds
    }

    /// Arithmetic mean of the recorded samples.
    pub fn mean(&self) -> f64 {
        if self.samples == 0 {
            0.0
        } else {
            self.total_seconds / f64::from(self.samples)
        }
    }
}

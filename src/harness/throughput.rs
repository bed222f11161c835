//! Throughput computation and per-size report lines.

use crate::config::Dims;

/// Millions of floating-point operations per second.
///
/// A zero elapsed time reports infinity rather than dividing by zero; it can
/// legitimately happen when a trivial size is timed at coarse clock
/// granularity.
pub fn mflops(flop_count: f64, seconds: f64) -> f64 {
    if seconds == 0.0 {
        f64::INFINITY
    } else {
        flop_count / seconds * 1e-6
    }
}

/// Measurement outcome for one swept size.
#[derive(Debug, Clone)]
pub struct SizeReport {
    pub dims: Dims,
    /// Operations of one call, already scaled for the element type.
    pub flop_count: f64,
    pub mean_seconds: f64,
    pub mflops: f64,
}

impl SizeReport {
    pub fn new(dims: Dims, flop_count: f64, mean_seconds: f64) -> Self {
        SizeReport {
            dims,
            flop_count,
            mean_seconds,
            mflops: mflops(flop_count, mean_seconds),
        }
    }

    /// One human-readable line for the diagnostic stream.
    pub fn format_line(&self, label: &str) -> String {
        format!(
            " {} : {:10.2} MFlops {:12.9} sec",
            label, self.mflops, self.mean_seconds
        )
    }
}

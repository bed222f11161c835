//! Top-level error type for a benchmark run.

use thiserror::Error;

use super::{ConfigError, GoldenFileError, KernelError};

/// Any failure that terminates a benchmark run.
///
/// The taxonomy mirrors the run lifecycle: configuration problems are
/// detected before any sweep work, allocation problems while the workspace
/// is being sized, golden-file problems while operands are populated or
/// results persisted, and kernel/clock problems inside the measured region.
#[derive(Error, Debug)]
pub enum HarnessError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("failed to allocate {elements} elements for operand {role}")]
    AllocationFailure { role: String, elements: usize },

    #[error(transparent)]
    GoldenFile(#[from] GoldenFileError),

    #[error("no monotonic clock source is available")]
    ClockUnavailable,

    #[error(transparent)]
    Kernel(#[from] KernelError),
}

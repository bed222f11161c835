//! Error types reported by kernel routines.

use thiserror::Error;

/// Errors a kernel routine can report for the arguments it was handed.
///
/// The harness propagates these untouched; it never retries or repairs a
/// failed kernel call.
#[derive(Error, Debug)]
pub enum KernelError {
    #[error("{kernel}: operand {role} holds {actual} elements but {required} are required")]
    BufferTooSmall {
        kernel: &'static str,
        role: &'static str,
        actual: usize,
        required: usize,
    },

    #[error("{kernel}: leading dimension {lda} is below the row count {rows}")]
    InvalidLeadingDimension {
        kernel: &'static str,
        lda: usize,
        rows: usize,
    },

    #[error("{kernel}: singular diagonal element at index {index}")]
    SingularDiagonal { kernel: &'static str, index: usize },
}

//! Kernel strategy objects for the benchmark harness.
//!
//! Each kernel module holds two things: a reference routine with the
//! classic BLAS argument conventions (column-major slices, leading
//! dimensions, strided vectors) and a stateless adapter implementing the
//! [`Kernel`] trait, which is all the harness sees. Adapters describe the
//! operand set, per-size element counts, and operation count, and map the
//! workspace buffers onto the routine's calling convention. They perform no
//! I/O and report routine errors untouched.

use serde::{Deserialize, Serialize};

use crate::config::{Dims, KernelOptions};
use crate::errors::KernelError;
use crate::harness::workspace::BufferSet;
use crate::operand::OperandRole;
use crate::precision::Precision;
use crate::utils::scalar::{Scalar, stride_span};

pub mod axpy;
pub mod gemm;
pub mod gemv;
pub mod spr;
pub mod syr2;
pub mod trmv;
pub mod trsm;

pub use axpy::AxpyKernel;
pub use gemm::GemmKernel;
pub use gemv::GemvKernel;
pub use spr::SprKernel;
pub use syr2::Syr2Kernel;
pub use trmv::TrmvKernel;
pub use trsm::TrsmKernel;

/// The benchmarkable kernels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KernelKind {
    Axpy,
    Gemm,
    Gemv,
    Spr,
    Syr2,
    Trmv,
    Trsm,
}

impl KernelKind {
    /// Get a kernel by name.
    pub fn get_by_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "axpy" => Some(KernelKind::Axpy),
            "gemm" => Some(KernelKind::Gemm),
            "gemv" => Some(KernelKind::Gemv),
            "spr" => Some(KernelKind::Spr),
            "syr2" => Some(KernelKind::Syr2),
            "trmv" => Some(KernelKind::Trmv),
            "trsm" => Some(KernelKind::Trsm),
            _ => None,
        }
    }

    pub fn all() -> [KernelKind; 7] {
        [
            KernelKind::Axpy,
            KernelKind::Gemm,
            KernelKind::Gemv,
            KernelKind::Spr,
            KernelKind::Syr2,
            KernelKind::Trmv,
            KernelKind::Trsm,
        ]
    }

    pub fn name(self) -> &'static str {
        match self {
            KernelKind::Axpy => "axpy",
            KernelKind::Gemm => "gemm",
            KernelKind::Gemv => "gemv",
            KernelKind::Spr => "spr",
            KernelKind::Syr2 => "syr2",
            KernelKind::Trmv => "trmv",
            KernelKind::Trsm => "trsm",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            KernelKind::Axpy => "vector scale-add: y <- alpha*x + y",
            KernelKind::Gemm => "matrix-matrix product: C <- alpha*op(A)*op(B) + beta*C",
            KernelKind::Gemv => "matrix-vector product: y <- alpha*op(A)*x + beta*y",
            KernelKind::Spr => "symmetric packed rank-1 update: A <- alpha*x*x' + A",
            KernelKind::Syr2 => "symmetric rank-2 update: A <- alpha*x*y' + alpha*y*x' + A",
            KernelKind::Trmv => "triangular matrix-vector product: x <- op(A)*x",
            KernelKind::Trsm => "triangular solve: B <- alpha*inv(op(A))*B",
        }
    }

    /// `spr` and `syr2` exist only at real precisions, as in BLAS.
    pub fn supports_complex(self) -> bool {
        !matches!(self, KernelKind::Spr | KernelKind::Syr2)
    }

    /// Conventional alpha for the benchmarked call.
    pub fn default_alpha(self) -> (f64, f64) {
        match self {
            KernelKind::Axpy => (2.0, 2.0),
            KernelKind::Gemm => (1.0, 0.0),
            _ => (1.0, 1.0),
        }
    }

    /// Conventional beta for the benchmarked call; unused by most kernels.
    pub fn default_beta(self) -> (f64, f64) {
        match self {
            KernelKind::Gemv => (1.0, 0.0),
            _ => (0.0, 0.0),
        }
    }
}

impl std::fmt::Display for KernelKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Strategy interface between the harness and one numeric kernel.
pub trait Kernel: Send + Sync {
    fn name(&self) -> &'static str;

    /// Input operands, in population order.
    fn inputs(&self) -> &'static [OperandRole];

    /// The operand the kernel updates in place; always one of `inputs()`.
    fn result(&self) -> OperandRole;

    /// Logical elements operand `role` spans at the given dimensions
    /// (components per element are accounted for by the caller).
    fn element_count(&self, role: OperandRole, dims: &Dims) -> usize;

    /// Floating-point operations of one call at real precision.
    fn flop_count(&self, dims: &Dims) -> f64;

    /// Label printed in front of each per-size report line.
    fn size_label(&self, dims: &Dims) -> String {
        format!("{:6}", dims.n)
    }

    /// Run the kernel once against the workspace buffers.
    fn invoke(&self, buffers: &mut BufferSet<'_>, dims: &Dims) -> Result<(), KernelError>;
}

/// Builds the kernel adapter for a configured run.
pub fn for_kind(kind: KernelKind, options: &KernelOptions, precision: Precision) -> Box<dyn Kernel> {
    match kind {
        KernelKind::Axpy => Box::new(AxpyKernel::new(options, precision)),
        KernelKind::Gemm => Box::new(GemmKernel::new(options, precision)),
        KernelKind::Gemv => Box::new(GemvKernel::new(options, precision)),
        KernelKind::Spr => Box::new(SprKernel::new(options)),
        KernelKind::Syr2 => Box::new(Syr2Kernel::new(options)),
        KernelKind::Trmv => Box::new(TrmvKernel::new(options, precision)),
        KernelKind::Trsm => Box::new(TrsmKernel::new(options, precision)),
    }
}

pub(crate) fn check_vector<T: Scalar>(
    kernel: &'static str,
    role: &'static str,
    buffer_len: usize,
    count: usize,
    inc: i64,
) -> Result<(), KernelError> {
    let required = stride_span(count, inc) * T::COMPONENTS;
    if buffer_len < required {
        return Err(KernelError::BufferTooSmall {
            kernel,
            role,
            actual: buffer_len,
            required,
        });
    }
    Ok(())
}

pub(crate) fn check_matrix<T: Scalar>(
    kernel: &'static str,
    role: &'static str,
    buffer_len: usize,
    elements: usize,
) -> Result<(), KernelError> {
    let required = elements * T::COMPONENTS;
    if buffer_len < required {
        return Err(KernelError::BufferTooSmall {
            kernel,
            role,
            actual: buffer_len,
            required,
        });
    }
    Ok(())
}

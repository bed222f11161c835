//! Symmetric packed rank-1 update kernel: `A <- alpha*x*x' + A`.
//!
//! `A` uses packed triangular storage: column j of the referenced triangle
//! is stored contiguously, n(n+1)/2 elements in total. Real precisions only,
//! as in BLAS.

use super::{Kernel, check_vector};
use crate::config::{Dims, KernelOptions, Uplo};
use crate::errors::KernelError;
use crate::harness::workspace::BufferSet;
use crate::operand::OperandRole;
use crate::utils::scalar::{stride_span, stride_start};

pub(crate) fn packed_len(n: usize) -> usize {
    n * (n + 1) / 2
}

/// Reference routine with the BLAS `spr` convention.
pub(crate) fn spr(
    uplo: Uplo,
    n: usize,
    alpha: f64,
    x: &[f64],
    incx: i64,
    ap: &mut [f64],
) -> Result<(), KernelError> {
    check_vector::<f64>("spr", "x", x.len(), n, incx)?;
    if ap.len() < packed_len(n) {
        return Err(KernelError::BufferTooSmall {
            kernel: "spr",
            role: "a",
            actual: ap.len(),
            required: packed_len(n),
        });
    }
    if n == 0 || alpha == 0.0 {
        return Ok(());
    }

    let kx = stride_start(n, incx);
    let mut jx = kx;
    let mut kk = 0usize;
    match uplo {
        Uplo::Upper => {
            // Column j holds rows 0..=j at ap[kk..kk+j+1].
            for j in 0..n {
                let xj = x[jx as usize];
                if xj != 0.0 {
                    let temp = alpha * xj;
                    let mut ix = kx;
                    for i in 0..=j {
                        ap[kk + i] += x[ix as usize] * temp;
                        ix += incx;
                    }
                }
                jx += incx;
                kk += j + 1;
            }
        }
        Uplo::Lower => {
            // Column j holds rows j..n at ap[kk..kk+n-j].
            for j in 0..n {
                let xj = x[jx as usize];
                if xj != 0.0 {
                    let temp = alpha * xj;
                    let mut ix = jx;
                    for offset in 0..(n - j) {
                        ap[kk + offset] += x[ix as usize] * temp;
                        ix += incx;
                    }
                }
                jx += incx;
                kk += n - j;
            }
        }
    }
    Ok(())
}

/// Harness adapter for the symmetric packed rank-1 update kernel.
pub struct SprKernel {
    uplo: Uplo,
    alpha: f64,
    incx: i64,
}

impl SprKernel {
    pub fn new(options: &KernelOptions) -> Self {
        SprKernel {
            uplo: options.uplo,
            alpha: options.alpha.0,
            incx: options.incx,
        }
    }
}

impl Kernel for SprKernel {
    fn name(&self) -> &'static str {
        "spr"
    }

    fn inputs(&self) -> &'static [OperandRole] {
        &[OperandRole::A, OperandRole::X]
    }

    fn result(&self) -> OperandRole {
        OperandRole::A
    }

    fn element_count(&self, role: OperandRole, dims: &Dims) -> usize {
        match role {
            OperandRole::A => packed_len(dims.n),
            OperandRole::X => stride_span(dims.n, self.incx),
            _ => 0,
        }
    }

    fn flop_count(&self, dims: &Dims) -> f64 {
        dims.n as f64 * dims.n as f64
    }

    fn invoke(&self, buffers: &mut BufferSet<'_>, dims: &Dims) -> Result<(), KernelError> {
        spr(self.uplo, dims.n, self.alpha, buffers.x, self.incx, buffers.a)
    }
}

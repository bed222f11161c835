//! Symmetric rank-2 update kernel: `A <- alpha*x*y' + alpha*y*x' + A`.
//!
//! `A` uses full column-major storage; only the referenced triangle is
//! touched. Real precisions only, as in BLAS.

use super::{Kernel, check_matrix, check_vector};
use crate::config::{Dims, KernelOptions, Uplo};
use crate::errors::KernelError;
use crate::harness::workspace::BufferSet;
use crate::operand::OperandRole;
use crate::utils::scalar::{stride_span, stride_start};

/// Reference routine with the BLAS `syr2` convention.
#[allow(clippy::too_many_arguments)]
pub(crate) fn syr2(
    uplo: Uplo,
    n: usize,
    alpha: f64,
    x: &[f64],
    incx: i64,
    y: &[f64],
    incy: i64,
    a: &mut [f64],
    lda: usize,
) -> Result<(), KernelError> {
    if lda < n.max(1) {
        return Err(KernelError::InvalidLeadingDimension {
            kernel: "syr2",
            lda,
            rows: n,
        });
    }
    check_vector::<f64>("syr2", "x", x.len(), n, incx)?;
    check_vector::<f64>("syr2", "y", y.len(), n, incy)?;
    check_matrix::<f64>("syr2", "a", a.len(), lda * n)?;
    if n == 0 || alpha == 0.0 {
        return Ok(());
    }

    let kx = stride_start(n, incx);
    let ky = stride_start(n, incy);
    let mut jx = kx;
    let mut jy = ky;
    for j in 0..n {
        let xj = x[jx as usize];
        let yj = y[jy as usize];
        if xj != 0.0 || yj != 0.0 {
            let temp1 = alpha * yj;
            let temp2 = alpha * xj;
            match uplo {
                Uplo::Upper => {
                    let mut ix = kx;
                    let mut iy = ky;
                    for i in 0..=j {
                        a[i + j * lda] += x[ix as usize] * temp1 + y[iy as usize] * temp2;
                        ix += incx;
                        iy += incy;
                    }
                }
                Uplo::Lower => {
                    let mut ix = jx;
                    let mut iy = jy;
                    for i in j..n {
                        a[i + j * lda] += x[ix as usize] * temp1 + y[iy as usize] * temp2;
                        ix += incx;
                        iy += incy;
                    }
                }
            }
        }
        jx += incx;
        jy += incy;
    }
    Ok(())
}

/// Harness adapter for the symmetric rank-2 update kernel.
pub struct Syr2Kernel {
    uplo: Uplo,
    alpha: f64,
    incx: i64,
    incy: i64,
}

impl Syr2Kernel {
    pub fn new(options: &KernelOptions) -> Self {
        Syr2Kernel {
            uplo: options.uplo,
            alpha: options.alpha.0,
            incx: options.incx,
            incy: options.incy,
        }
    }
}

impl Kernel for Syr2Kernel {
    fn name(&self) -> &'static str {
        "syr2"
    }

    fn inputs(&self) -> &'static [OperandRole] {
        &[OperandRole::X, OperandRole::Y, OperandRole::A]
    }

    fn result(&self) -> OperandRole {
        OperandRole::A
    }

    fn element_count(&self, role: OperandRole, dims: &Dims) -> usize {
        match role {
            OperandRole::A => dims.n * dims.n,
            OperandRole::X => stride_span(dims.n, self.incx),
            OperandRole::Y => stride_span(dims.n, self.incy),
            _ => 0,
        }
    }

    fn flop_count(&self, dims: &Dims) -> f64 {
        2.0 * dims.n as f64 * dims.n as f64
    }

    fn invoke(&self, buffers: &mut BufferSet<'_>, dims: &Dims) -> Result<(), KernelError> {
        syr2(
            self.uplo,
            dims.n,
            self.alpha,
            buffers.x,
            self.incx,
            buffers.y,
            self.incy,
            buffers.a,
            dims.n.max(1),
        )
    }
}

//! Triangular matrix-vector product kernel: `x <- op(A)*x`.

use super::{Kernel, check_matrix, check_vector};
use crate::config::{Diag, Dims, KernelOptions, Trans, Uplo};
use crate::errors::KernelError;
use crate::harness::workspace::BufferSet;
use crate::operand::OperandRole;
use crate::precision::Precision;
use crate::utils::scalar::{Complex, Scalar, maybe_conj, stride_span, stride_start};

/// Reference routine with the BLAS `trmv` convention: full column-major
/// storage of which only the selected triangle is referenced.
#[allow(clippy::too_many_arguments)]
pub(crate) fn trmv<T: Scalar>(
    uplo: Uplo,
    trans: Trans,
    diag: Diag,
    n: usize,
    a: &[f64],
    lda: usize,
    x: &mut [f64],
    incx: i64,
) -> Result<(), KernelError> {
    if lda < n.max(1) {
        return Err(KernelError::InvalidLeadingDimension {
            kernel: "trmv",
            lda,
            rows: n,
        });
    }
    check_matrix::<T>("trmv", "a", a.len(), lda * n)?;
    check_vector::<T>("trmv", "x", x.len(), n, incx)?;
    if n == 0 {
        return Ok(());
    }

    let nonunit = diag == Diag::NonUnit;
    let kx = stride_start(n, incx);

    match (trans, uplo) {
        (Trans::NoTrans, Uplo::Upper) => {
            let mut jx = kx;
            for j in 0..n {
                let xj = T::load(x, jx as usize);
                if !xj.is_zero() {
                    let mut ix = kx;
                    for i in 0..j {
                        let sum = T::load(x, ix as usize) + xj * T::load(a, i + j * lda);
                        sum.store(x, ix as usize);
                        ix += incx;
                    }
                    if nonunit {
                        (xj * T::load(a, j + j * lda)).store(x, jx as usize);
                    }
                }
                jx += incx;
            }
        }
        (Trans::NoTrans, Uplo::Lower) => {
            let last = kx + (n as i64 - 1) * incx;
            let mut jx = last;
            for j in (0..n).rev() {
                let xj = T::load(x, jx as usize);
                if !xj.is_zero() {
                    let mut ix = last;
                    for i in (j + 1..n).rev() {
                        let sum = T::load(x, ix as usize) + xj * T::load(a, i + j * lda);
                        sum.store(x, ix as usize);
                        ix -= incx;
                    }
                    if nonunit {
                        (xj * T::load(a, j + j * lda)).store(x, jx as usize);
                    }
                }
                jx -= incx;
            }
        }
        (Trans::Trans | Trans::ConjTrans, Uplo::Upper) => {
            let conj = trans == Trans::ConjTrans;
            let mut jx = kx + (n as i64 - 1) * incx;
            for j in (0..n).rev() {
                let mut temp = T::load(x, jx as usize);
                if nonunit {
                    temp = temp * maybe_conj(T::load(a, j + j * lda), conj);
                }
                let mut ix = jx;
                for i in (0..j).rev() {
                    ix -= incx;
                    temp = temp + maybe_conj(T::load(a, i + j * lda), conj) * T::load(x, ix as usize);
                }
                temp.store(x, jx as usize);
                jx -= incx;
            }
        }
        (Trans::Trans | Trans::ConjTrans, Uplo::Lower) => {
            let conj = trans == Trans::ConjTrans;
            let mut jx = kx;
            for j in 0..n {
                let mut temp = T::load(x, jx as usize);
                if nonunit {
                    temp = temp * maybe_conj(T::load(a, j + j * lda), conj);
                }
                let mut ix = jx;
                for i in j + 1..n {
                    ix += incx;
                    temp = temp + maybe_conj(T::load(a, i + j * lda), conj) * T::load(x, ix as usize);
                }
                temp.store(x, jx as usize);
                jx += incx;
            }
        }
    }
    Ok(())
}

/// Harness adapter for the triangular matrix-vector product kernel.
pub struct TrmvKernel {
    uplo: Uplo,
    trans: Trans,
    diag: Diag,
    incx: i64,
    complex: bool,
}

impl TrmvKernel {
    pub fn new(options: &KernelOptions, precision: Precision) -> Self {
        TrmvKernel {
            uplo: options.uplo,
            trans: options.transa,
            diag: options.diag,
            incx: options.incx,
            complex: precision.is_complex(),
        }
    }
}

impl Kernel for TrmvKernel {
    fn name(&self) -> &'static str {
        "trmv"
    }

    fn inputs(&self) -> &'static [OperandRole] {
        &[OperandRole::A, OperandRole::X]
    }

    fn result(&self) -> OperandRole {
        OperandRole::X
    }

    fn element_count(&self, role: OperandRole, dims: &Dims) -> usize {
        match role {
            OperandRole::A => dims.n * dims.n,
            OperandRole::X => stride_span(dims.n, self.incx),
            _ => 0,
        }
    }

    fn flop_count(&self, dims: &Dims) -> f64 {
        dims.n as f64 * dims.n as f64
    }

    fn invoke(&self, buffers: &mut BufferSet<'_>, dims: &Dims) -> Result<(), KernelError> {
        let lda = dims.n.max(1);
        if self.complex {
            trmv::<Complex>(
                self.uplo, self.trans, self.diag, dims.n, buffers.a, lda, buffers.x, self.incx,
            )
        } else {
            trmv::<f64>(
                self.uplo, self.trans, self.diag, dims.n, buffers.a, lda, buffers.x, self.incx,
            )
        }
    }
}

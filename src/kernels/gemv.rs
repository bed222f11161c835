//! Matrix-vector product kernel: `y <- alpha*op(A)*x + beta*y`.

use super::{Kernel, check_matrix, check_vector};
use crate::config::{Dims, KernelOptions, Trans};
use crate::errors::KernelError;
use crate::harness::workspace::BufferSet;
use crate::operand::OperandRole;
use crate::precision::Precision;
use crate::utils::scalar::{Complex, Scalar, maybe_conj, stride_span, stride_start};

/// Reference routine with the BLAS `gemv` convention: column-major `A`
/// (`m` rows, `n` columns, leading dimension `lda`), strided vectors.
#[allow(clippy::too_many_arguments)]
pub(crate) fn gemv<T: Scalar>(
    trans: Trans,
    m: usize,
    n: usize,
    alpha: T,
    a: &[f64],
    lda: usize,
    x: &[f64],
    incx: i64,
    beta: T,
    y: &mut [f64],
    incy: i64,
) -> Result<(), KernelError> {
    if lda < m.max(1) {
        return Err(KernelError::InvalidLeadingDimension {
            kernel: "gemv",
            lda,
            rows: m,
        });
    }
    let (xlen, ylen) = match trans {
        Trans::NoTrans => (n, m),
        Trans::Trans | Trans::ConjTrans => (m, n),
    };
    check_matrix::<T>("gemv", "a", a.len(), lda * n)?;
    check_vector::<T>("gemv", "x", x.len(), xlen, incx)?;
    check_vector::<T>("gemv", "y", y.len(), ylen, incy)?;
    if m == 0 || n == 0 {
        return Ok(());
    }

    if beta != T::one() {
        let mut iy = stride_start(ylen, incy);
        for _ in 0..ylen {
            let scaled = if beta.is_zero() {
                T::zero()
            } else {
                beta * T::load(y, iy as usize)
            };
            scaled.store(y, iy as usize);
            iy += incy;
        }
    }
    if alpha.is_zero() {
        return Ok(());
    }

    match trans {
        Trans::NoTrans => {
            // y += alpha * A * x, traversed column by column.
            let mut jx = stride_start(n, incx);
            for j in 0..n {
                let temp = alpha * T::load(x, jx as usize);
                if !temp.is_zero() {
                    let mut iy = stride_start(m, incy);
                    for i in 0..m {
                        let sum = T::load(y, iy as usize) + temp * T::load(a, i + j * lda);
                        sum.store(y, iy as usize);
                        iy += incy;
                    }
                }
                jx += incx;
            }
        }
        Trans::Trans | Trans::ConjTrans => {
            let conj = trans == Trans::ConjTrans;
            let mut jy = stride_start(n, incy);
            for j in 0..n {
                let mut temp = T::zero();
                let mut ix = stride_start(m, incx);
                for i in 0..m {
                    let aij = maybe_conj(T::load(a, i + j * lda), conj);
                    temp = temp + aij * T::load(x, ix as usize);
                    ix += incx;
                }
                let sum = T::load(y, jy as usize) + alpha * temp;
                sum.store(y, jy as usize);
                jy += incy;
            }
        }
    }
    Ok(())
}

/// Harness adapter for the matrix-vector product kernel.
pub struct GemvKernel {
    trans: Trans,
    alpha: (f64, f64),
    beta: (f64, f64),
    incx: i64,
    incy: i64,
    complex: bool,
}

impl GemvKernel {
    pub fn new(options: &KernelOptions, precision: Precision) -> Self {
        GemvKernel {
            trans: options.transa,
            alpha: options.alpha,
            beta: options.beta,
            incx: options.incx,
            incy: options.incy,
            complex: precision.is_complex(),
        }
    }

    fn vector_lengths(&self, dims: &Dims) -> (usize, usize) {
        match self.trans {
            Trans::NoTrans => (dims.n, dims.m),
            Trans::Trans | Trans::ConjTrans => (dims.m, dims.n),
        }
    }
}

impl Kernel for GemvKernel {
    fn name(&self) -> &'static str {
        "gemv"
    }

    fn inputs(&self) -> &'static [OperandRole] {
        &[OperandRole::A, OperandRole::X, OperandRole::Y]
    }

    fn result(&self) -> OperandRole {
        OperandRole::Y
    }

    fn element_count(&self, role: OperandRole, dims: &Dims) -> usize {
        let (xlen, ylen) = self.vector_lengths(dims);
        match role {
            OperandRole::A => dims.m * dims.n,
            OperandRole::X => stride_span(xlen, self.incx),
            OperandRole::Y => stride_span(ylen, self.incy),
            _ => 0,
        }
    }

    fn flop_count(&self, dims: &Dims) -> f64 {
        2.0 * dims.m as f64 * dims.n as f64
    }

    fn size_label(&self, dims: &Dims) -> String {
        format!("M={:4}, N={:4}", dims.m, dims.n)
    }

    fn invoke(&self, buffers: &mut BufferSet<'_>, dims: &Dims) -> Result<(), KernelError> {
        let lda = dims.m.max(1);
        if self.complex {
            gemv::<Complex>(
                self.trans,
                dims.m,
                dims.n,
                Complex::from_pair(self.alpha.0, self.alpha.1),
                buffers.a,
                lda,
                buffers.x,
                self.incx,
                Complex::from_pair(self.beta.0, self.beta.1),
                buffers.y,
                self.incy,
            )
        } else {
            gemv::<f64>(
                self.trans,
                dims.m,
                dims.n,
                self.alpha.0,
                buffers.a,
                lda,
                buffers.x,
                self.incx,
                self.beta.0,
                buffers.y,
                self.incy,
            )
        }
    }
}

//! Matrix-matrix product kernel: `C <- alpha*op(A)*op(B) + beta*C`.

use super::{Kernel, check_matrix};
use crate::config::{Dims, KernelOptions, Trans};
use crate::errors::KernelError;
use crate::harness::workspace::BufferSet;
use crate::operand::OperandRole;
use crate::precision::Precision;
use crate::utils::scalar::{Complex, Scalar, maybe_conj};

/// Reference routine with the BLAS `gemm` convention: all matrices
/// column-major, `op(A)` is `m x k`, `op(B)` is `k x n`, `C` is `m x n`.
#[allow(clippy::too_many_arguments)]
pub(crate) fn gemm<T: Scalar>(
    transa: Trans,
    transb: Trans,
    m: usize,
    n: usize,
    k: usize,
    alpha: T,
    a: &[f64],
    lda: usize,
    b: &[f64],
    ldb: usize,
    beta: T,
    c: &mut [f64],
    ldc: usize,
) -> Result<(), KernelError> {
    let (arows, acols) = if transa == Trans::NoTrans { (m, k) } else { (k, m) };
    let (brows, bcols) = if transb == Trans::NoTrans { (k, n) } else { (n, k) };
    if lda < arows.max(1) {
        return Err(KernelError::InvalidLeadingDimension {
            kernel: "gemm",
            lda,
            rows: arows,
        });
    }
    if ldb < brows.max(1) {
        return Err(KernelError::InvalidLeadingDimension {
            kernel: "gemm",
            lda: ldb,
            rows: brows,
        });
    }
    if ldc < m.max(1) {
        return Err(KernelError::InvalidLeadingDimension {
            kernel: "gemm",
            lda: ldc,
            rows: m,
        });
    }
    check_matrix::<T>("gemm", "a", a.len(), lda * acols)?;
    check_matrix::<T>("gemm", "b", b.len(), ldb * bcols)?;
    check_matrix::<T>("gemm", "c", c.len(), ldc * n)?;
    if m == 0 || n == 0 {
        return Ok(());
    }

    let conj_a = transa == Trans::ConjTrans;
    let conj_b = transb == Trans::ConjTrans;
    let op_a = |i: usize, l: usize| -> T {
        let value = if transa == Trans::NoTrans {
            T::load(a, i + l * lda)
        } else {
            T::load(a, l + i * lda)
        };
        maybe_conj(value, conj_a)
    };
    let op_b = |l: usize, j: usize| -> T {
        let value = if transb == Trans::NoTrans {
            T::load(b, l + j * ldb)
        } else {
            T::load(b, j + l * ldb)
        };
        maybe_conj(value, conj_b)
    };

    for j in 0..n {
        for i in 0..m {
            let mut sum = T::zero();
            for l in 0..k {
                sum = sum + op_a(i, l) * op_b(l, j);
            }
            let scaled = if beta.is_zero() {
                T::zero()
            } else {
                beta * T::load(c, i + j * ldc)
            };
            (alpha * sum + scaled).store(c, i + j * ldc);
        }
    }
    Ok(())
}

/// Harness adapter for the matrix-matrix product kernel.
pub struct GemmKernel {
    transa: Trans,
    transb: Trans,
    alpha: (f64, f64),
    beta: (f64, f64),
    complex: bool,
}

impl GemmKernel {
    pub fn new(options: &KernelOptions, precision: Precision) -> Self {
        GemmKernel {
            transa: options.transa,
            transb: options.transb,
            alpha: options.alpha,
            beta: options.beta,
            complex: precision.is_complex(),
        }
    }
}

impl Kernel for GemmKernel {
    fn name(&self) -> &'static str {
        "gemm"
    }

    fn inputs(&self) -> &'static [OperandRole] {
        &[OperandRole::A, OperandRole::B, OperandRole::C]
    }

    fn result(&self) -> OperandRole {
        OperandRole::C
    }

    fn element_count(&self, role: OperandRole, dims: &Dims) -> usize {
        match role {
            OperandRole::A => dims.m * dims.k,
            OperandRole::B => dims.k * dims.n,
            OperandRole::C => dims.m * dims.n,
            _ => 0,
        }
    }

    fn flop_count(&self, dims: &Dims) -> f64 {
        2.0 * dims.m as f64 * dims.n as f64 * dims.k as f64
    }

    fn size_label(&self, dims: &Dims) -> String {
        format!("M={:4}, N={:4}, K={:4}", dims.m, dims.n, dims.k)
    }

    fn invoke(&self, buffers: &mut BufferSet<'_>, dims: &Dims) -> Result<(), KernelError> {
        let (m, n, k) = (dims.m, dims.n, dims.k);
        let lda = (if self.transa == Trans::NoTrans { m } else { k }).max(1);
        let ldb = (if self.transb == Trans::NoTrans { k } else { n }).max(1);
        let ldc = m.max(1);
        if self.complex {
            gemm::<Complex>(
                self.transa,
                self.transb,
                m,
                n,
                k,
                Complex::from_pair(self.alpha.0, self.alpha.1),
                buffers.a,
                lda,
                buffers.b,
                ldb,
                Complex::from_pair(self.beta.0, self.beta.1),
                buffers.c,
                ldc,
            )
        } else {
            gemm::<f64>(
                self.transa,
                self.transb,
                m,
                n,
                k,
                self.alpha.0,
                buffers.a,
                lda,
                buffers.b,
                ldb,
                self.beta.0,
                buffers.c,
                ldc,
            )
        }
    }
}

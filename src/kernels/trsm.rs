//! Triangular solve kernel: `B <- alpha*inv(op(A))*B` or
//! `B <- alpha*B*inv(op(A))`.

use super::{Kernel, check_matrix};
use crate::config::{Diag, Dims, KernelOptions, Side, Trans, Uplo};
use crate::errors::KernelError;
use crate::harness::workspace::BufferSet;
use crate::operand::OperandRole;
use crate::precision::Precision;
use crate::utils::scalar::{Complex, Scalar, maybe_conj};

/// Reference routine with the BLAS `trsm` convention: `B` is `m x n`, the
/// triangular `A` is `m x m` (left side) or `n x n` (right side), both
/// column-major. A zero diagonal element with a non-unit diagonal is
/// reported as singular before any elimination work.
#[allow(clippy::too_many_arguments)]
pub(crate) fn trsm<T: Scalar>(
    side: Side,
    uplo: Uplo,
    transa: Trans,
    diag: Diag,
    m: usize,
    n: usize,
    alpha: T,
    a: &[f64],
    lda: usize,
    b: &mut [f64],
    ldb: usize,
) -> Result<(), KernelError> {
    let ka = if side == Side::Left { m } else { n };
    if lda < ka.max(1) {
        return Err(KernelError::InvalidLeadingDimension {
            kernel: "trsm",
            lda,
            rows: ka,
        });
    }
    if ldb < m.max(1) {
        return Err(KernelError::InvalidLeadingDimension {
            kernel: "trsm",
            lda: ldb,
            rows: m,
        });
    }
    check_matrix::<T>("trsm", "a", a.len(), lda * ka)?;
    check_matrix::<T>("trsm", "b", b.len(), ldb * n)?;
    if m == 0 || n == 0 {
        return Ok(());
    }

    let nonunit = diag == Diag::NonUnit;
    if nonunit {
        for i in 0..ka {
            if T::load(a, i + i * lda).is_zero() {
                return Err(KernelError::SingularDiagonal {
                    kernel: "trsm",
                    index: i,
                });
            }
        }
    }

    let conj = transa == Trans::ConjTrans;
    let at = |i: usize, j: usize| -> T { maybe_conj(T::load(a, i + j * lda), conj) };
    let notrans = transa == Trans::NoTrans;
    let one = T::one();

    match (side, notrans, uplo) {
        // B := alpha*inv(A)*B, back substitution per column.
        (Side::Left, true, Uplo::Upper) => {
            for j in 0..n {
                if alpha != one {
                    for i in 0..m {
                        (alpha * T::load(b, i + j * ldb)).store(b, i + j * ldb);
                    }
                }
                for k in (0..m).rev() {
                    let bkj = T::load(b, k + j * ldb);
                    if !bkj.is_zero() {
                        let pivot = if nonunit { bkj.div(at(k, k)) } else { bkj };
                        pivot.store(b, k + j * ldb);
                        for i in 0..k {
                            (T::load(b, i + j * ldb) - pivot * at(i, k)).store(b, i + j * ldb);
                        }
                    }
                }
            }
        }
        // B := alpha*inv(A)*B, forward substitution per column.
        (Side::Left, true, Uplo::Lower) => {
            for j in 0..n {
                if alpha != one {
                    for i in 0..m {
                        (alpha * T::load(b, i + j * ldb)).store(b, i + j * ldb);
                    }
                }
                for k in 0..m {
                    let bkj = T::load(b, k + j * ldb);
                    if !bkj.is_zero() {
                        let pivot = if nonunit { bkj.div(at(k, k)) } else { bkj };
                        pivot.store(b, k + j * ldb);
                        for i in k + 1..m {
                            (T::load(b, i + j * ldb) - pivot * at(i, k)).store(b, i + j * ldb);
                        }
                    }
                }
            }
        }
        // B := alpha*inv(op(A))*B with op(A) = A' or conj(A)'.
        (Side::Left, false, Uplo::Upper) => {
            for j in 0..n {
                for i in 0..m {
                    let mut temp = alpha * T::load(b, i + j * ldb);
                    for k in 0..i {
                        temp = temp - at(k, i) * T::load(b, k + j * ldb);
                    }
                    if nonunit {
                        temp = temp.div(at(i, i));
                    }
                    temp.store(b, i + j * ldb);
                }
            }
        }
        (Side::Left, false, Uplo::Lower) => {
            for j in 0..n {
                for i in (0..m).rev() {
                    let mut temp = alpha * T::load(b, i + j * ldb);
                    for k in i + 1..m {
                        temp = temp - at(k, i) * T::load(b, k + j * ldb);
                    }
                    if nonunit {
                        temp = temp.div(at(i, i));
                    }
                    temp.store(b, i + j * ldb);
                }
            }
        }
        // B := alpha*B*inv(A), columns resolved left to right.
        (Side::Right, true, Uplo::Upper) => {
            for j in 0..n {
                if alpha != one {
                    for i in 0..m {
                        (alpha * T::load(b, i + j * ldb)).store(b, i + j * ldb);
                    }
                }
                for k in 0..j {
                    let akj = at(k, j);
                    if !akj.is_zero() {
                        for i in 0..m {
                            (T::load(b, i + j * ldb) - akj * T::load(b, i + k * ldb))
                                .store(b, i + j * ldb);
                        }
                    }
                }
                if nonunit {
                    let temp = one.div(at(j, j));
                    for i in 0..m {
                        (temp * T::load(b, i + j * ldb)).store(b, i + j * ldb);
                    }
                }
            }
        }
        (Side::Right, true, Uplo::Lower) => {
            for j in (0..n).rev() {
                if alpha != one {
                    for i in 0..m {
                        (alpha * T::load(b, i + j * ldb)).store(b, i + j * ldb);
                    }
                }
                for k in j + 1..n {
                    let akj = at(k, j);
                    if !akj.is_zero() {
                        for i in 0..m {
                            (T::load(b, i + j * ldb) - akj * T::load(b, i + k * ldb))
                                .store(b, i + j * ldb);
                        }
                    }
                }
                if nonunit {
                    let temp = one.div(at(j, j));
                    for i in 0..m {
                        (temp * T::load(b, i + j * ldb)).store(b, i + j * ldb);
                    }
                }
            }
        }
        // B := alpha*B*inv(op(A)), columns resolved right to left.
        (Side::Right, false, Uplo::Upper) => {
            for k in (0..n).rev() {
                if nonunit {
                    let temp = one.div(at(k, k));
                    for i in 0..m {
                        (temp * T::load(b, i + k * ldb)).store(b, i + k * ldb);
                    }
                }
                for j in 0..k {
                    let ajk = at(j, k);
                    if !ajk.is_zero() {
                        for i in 0..m {
                            (T::load(b, i + j * ldb) - ajk * T::load(b, i + k * ldb))
                                .store(b, i + j * ldb);
                        }
                    }
                }
                if alpha != one {
                    for i in 0..m {
                        (alpha * T::load(b, i + k * ldb)).store(b, i + k * ldb);
                    }
                }
            }
        }
        (Side::Right, false, Uplo::Lower) => {
            for k in 0..n {
                if nonunit {
                    let temp = one.div(at(k, k));
                    for i in 0..m {
                        (temp * T::load(b, i + k * ldb)).store(b, i + k * ldb);
                    }
                }
                for j in k + 1..n {
                    let ajk = at(j, k);
                    if !ajk.is_zero() {
                        for i in 0..m {
                            (T::load(b, i + j * ldb) - ajk * T::load(b, i + k * ldb))
                                .store(b, i + j * ldb);
                        }
                    }
                }
                if alpha != one {
                    for i in 0..m {
                        (alpha * T::load(b, i + k * ldb)).store(b, i + k * ldb);
                    }
                }
            }
        }
    }
    Ok(())
}

/// Harness adapter for the triangular solve kernel.
pub struct TrsmKernel {
    side: Side,
    uplo: Uplo,
    transa: Trans,
    diag: Diag,
    alpha: (f64, f64),
    complex: bool,
}

impl TrsmKernel {
    pub fn new(options: &KernelOptions, precision: Precision) -> Self {
        TrsmKernel {
            side: options.side,
            uplo: options.uplo,
            transa: options.transa,
            diag: options.diag,
            alpha: options.alpha,
            complex: precision.is_complex(),
        }
    }

    fn triangle_order(&self, dims: &Dims) -> usize {
        if self.side == Side::Left { dims.m } else { dims.n }
    }
}

impl Kernel for TrsmKernel {
    fn name(&self) -> &'static str {
        "trsm"
    }

    fn inputs(&self) -> &'static [OperandRole] {
        &[OperandRole::A, OperandRole::B]
    }

    fn result(&self) -> OperandRole {
        OperandRole::B
    }

    fn element_count(&self, role: OperandRole, dims: &Dims) -> usize {
        match role {
            OperandRole::A => {
                let ka = self.triangle_order(dims);
                ka * ka
            }
            OperandRole::B => dims.m * dims.n,
            _ => 0,
        }
    }

    fn flop_count(&self, dims: &Dims) -> f64 {
        let m = dims.m as f64;
        m * m * m
    }

    fn size_label(&self, dims: &Dims) -> String {
        format!("{:6}", dims.m)
    }

    fn invoke(&self, buffers: &mut BufferSet<'_>, dims: &Dims) -> Result<(), KernelError> {
        let lda = self.triangle_order(dims).max(1);
        let ldb = dims.m.max(1);
        if self.complex {
            trsm::<Complex>(
                self.side,
                self.uplo,
                self.transa,
                self.diag,
                dims.m,
                dims.n,
                Complex::from_pair(self.alpha.0, self.alpha.1),
                buffers.a,
                lda,
                buffers.b,
                ldb,
            )
        } else {
            trsm::<f64>(
                self.side,
                self.uplo,
                self.transa,
                self.diag,
                dims.m,
                dims.n,
                self.alpha.0,
                buffers.a,
                lda,
                buffers.b,
                ldb,
            )
        }
    }
}

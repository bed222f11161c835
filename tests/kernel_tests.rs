//! Hand-computed spot checks for the reference kernels, exercised through
//! the same strategy interface the harness uses.

use linbench::config::{Diag, Dims, KernelOptions, Side, Trans, Uplo};
use linbench::errors::KernelError;
use linbench::harness::Workspace;
use linbench::kernels::{self, Kernel, KernelKind};
use linbench::operand::OperandRole;
use linbench::Precision;

const DELTA: f64 = 1e-12;

fn square(n: usize) -> Dims {
    Dims { m: n, n, k: n }
}

fn run_kernel(
    kind: KernelKind,
    options: &KernelOptions,
    precision: Precision,
    dims: &Dims,
    inputs: &[(OperandRole, &[f64])],
) -> Result<Workspace, KernelError> {
    let kernel = kernels::for_kind(kind, options, precision);
    let mut workspace =
        Workspace::allocate(kernel.as_ref(), dims, precision.components()).unwrap();
    for (role, values) in inputs {
        workspace.buffer_mut(*role)[..values.len()].copy_from_slice(values);
    }
    kernel.invoke(&mut workspace.buffers(), dims)?;
    Ok(workspace)
}

fn assert_close(actual: &[f64], expected: &[f64]) {
    assert_eq!(actual.len(), expected.len());
    for (index, (a, e)) in actual.iter().zip(expected).enumerate() {
        assert!(
            (a - e).abs() < DELTA,
            "element {index}: got {a}, expected {e}"
        );
    }
}

#[test]
fn axpy_scales_and_adds() {
    let mut options = KernelOptions::for_kernel(KernelKind::Axpy);
    options.alpha = (2.0, 0.0);
    let ws = run_kernel(
        KernelKind::Axpy,
        &options,
        Precision::Real64,
        &square(3),
        &[
            (OperandRole::X, &[1.0, 2.0, 3.0]),
            (OperandRole::Y, &[10.0, 20.0, 30.0]),
        ],
    )
    .unwrap();
    assert_close(ws.buffer(OperandRole::Y), &[12.0, 24.0, 36.0]);
}

#[test]
fn axpy_walks_negative_increments_backwards() {
    let mut options = KernelOptions::for_kernel(KernelKind::Axpy);
    options.alpha = (2.0, 0.0);
    options.incx = -1;
    let ws = run_kernel(
        KernelKind::Axpy,
        &options,
        Precision::Real64,
        &square(3),
        &[
            (OperandRole::X, &[1.0, 2.0, 3.0]),
            (OperandRole::Y, &[0.0, 0.0, 0.0]),
        ],
    )
    .unwrap();
    // y_i pairs with x_(n-1-i) when incx is negative.
    assert_close(ws.buffer(OperandRole::Y), &[6.0, 4.0, 2.0]);
}

#[test]
fn axpy_complex_multiplies_pairs() {
    let mut options = KernelOptions::for_kernel(KernelKind::Axpy);
    options.alpha = (2.0, 2.0);
    let ws = run_kernel(
        KernelKind::Axpy,
        &options,
        Precision::Complex64,
        &square(2),
        &[
            // x = [1, i], y = 0
            (OperandRole::X, &[1.0, 0.0, 0.0, 1.0]),
            (OperandRole::Y, &[0.0, 0.0, 0.0, 0.0]),
        ],
    )
    .unwrap();
    // (2+2i)*1 = 2+2i, (2+2i)*i = -2+2i
    assert_close(ws.buffer(OperandRole::Y), &[2.0, 2.0, -2.0, 2.0]);
}

#[test]
fn gemv_multiplies_column_major() {
    let mut options = KernelOptions::for_kernel(KernelKind::Gemv);
    options.alpha = (1.0, 0.0);
    // A = [[1, 2], [3, 4]] column-major.
    let ws = run_kernel(
        KernelKind::Gemv,
        &options,
        Precision::Real64,
        &square(2),
        &[
            (OperandRole::A, &[1.0, 3.0, 2.0, 4.0]),
            (OperandRole::X, &[1.0, 1.0]),
            (OperandRole::Y, &[0.0, 0.0]),
        ],
    )
    .unwrap();
    assert_close(ws.buffer(OperandRole::Y), &[3.0, 7.0]);
}

#[test]
fn gemv_transposed_multiplies_rows() {
    let mut options = KernelOptions::for_kernel(KernelKind::Gemv);
    options.alpha = (1.0, 0.0);
    options.transa = Trans::Trans;
    let ws = run_kernel(
        KernelKind::Gemv,
        &options,
        Precision::Real64,
        &square(2),
        &[
            (OperandRole::A, &[1.0, 3.0, 2.0, 4.0]),
            (OperandRole::X, &[1.0, 1.0]),
            (OperandRole::Y, &[0.0, 0.0]),
        ],
    )
    .unwrap();
    assert_close(ws.buffer(OperandRole::Y), &[4.0, 6.0]);
}

#[test]
fn gemv_beta_keeps_prior_contents() {
    let options = KernelOptions::for_kernel(KernelKind::Gemv);
    // Default gemv beta is one; alpha real part is one.
    let ws = run_kernel(
        KernelKind::Gemv,
        &options,
        Precision::Real64,
        &square(2),
        &[
            (OperandRole::A, &[1.0, 3.0, 2.0, 4.0]),
            (OperandRole::X, &[1.0, 1.0]),
            (OperandRole::Y, &[100.0, 100.0]),
        ],
    )
    .unwrap();
    assert_close(ws.buffer(OperandRole::Y), &[103.0, 107.0]);
}

#[test]
fn gemm_multiplies_square_matrices() {
    let options = KernelOptions::for_kernel(KernelKind::Gemm);
    // A = [[1, 2], [3, 4]], B = [[5, 6], [7, 8]].
    let ws = run_kernel(
        KernelKind::Gemm,
        &options,
        Precision::Real64,
        &square(2),
        &[
            (OperandRole::A, &[1.0, 3.0, 2.0, 4.0]),
            (OperandRole::B, &[5.0, 7.0, 6.0, 8.0]),
            (OperandRole::C, &[9.0, 9.0, 9.0, 9.0]),
        ],
    )
    .unwrap();
    // Default beta is zero, so the stale C contents are discarded.
    assert_close(ws.buffer(OperandRole::C), &[19.0, 43.0, 22.0, 50.0]);
}

#[test]
fn gemm_honors_transb() {
    let mut options = KernelOptions::for_kernel(KernelKind::Gemm);
    options.transb = Trans::Trans;
    let ws = run_kernel(
        KernelKind::Gemm,
        &options,
        Precision::Real64,
        &square(2),
        &[
            (OperandRole::A, &[1.0, 3.0, 2.0, 4.0]),
            (OperandRole::B, &[5.0, 7.0, 6.0, 8.0]),
            (OperandRole::C, &[0.0, 0.0, 0.0, 0.0]),
        ],
    )
    .unwrap();
    // C = A * B' with B = [[5, 6], [7, 8]].
    assert_close(ws.buffer(OperandRole::C), &[17.0, 39.0, 23.0, 53.0]);
}

#[test]
fn gemm_rectangular_dims_follow_overrides() {
    let options = KernelOptions::for_kernel(KernelKind::Gemm);
    let dims = Dims { m: 1, n: 2, k: 3 };
    // A is 1x3: [1, 2, 3]; B is 3x2 column-major [[1, 1], [1, 1], [1, 1]].
    let ws = run_kernel(
        KernelKind::Gemm,
        &options,
        Precision::Real64,
        &dims,
        &[
            (OperandRole::A, &[1.0, 2.0, 3.0]),
            (OperandRole::B, &[1.0, 1.0, 1.0, 1.0, 1.0, 1.0]),
            (OperandRole::C, &[0.0, 0.0]),
        ],
    )
    .unwrap();
    assert_close(ws.buffer(OperandRole::C), &[6.0, 6.0]);
}

#[test]
fn spr_updates_packed_upper_triangle() {
    let mut options = KernelOptions::for_kernel(KernelKind::Spr);
    options.alpha = (1.0, 0.0);
    let ws = run_kernel(
        KernelKind::Spr,
        &options,
        Precision::Real64,
        &square(2),
        &[
            (OperandRole::A, &[0.0, 0.0, 0.0]),
            (OperandRole::X, &[1.0, 2.0]),
        ],
    )
    .unwrap();
    // A += x*x' packed as [a11, a12, a22].
    assert_close(ws.buffer(OperandRole::A), &[1.0, 2.0, 4.0]);
}

#[test]
fn spr_lower_packs_by_column() {
    let mut options = KernelOptions::for_kernel(KernelKind::Spr);
    options.alpha = (1.0, 0.0);
    options.uplo = Uplo::Lower;
    let ws = run_kernel(
        KernelKind::Spr,
        &options,
        Precision::Real64,
        &square(3),
        &[
            (OperandRole::A, &[0.0; 6]),
            (OperandRole::X, &[1.0, 2.0, 3.0]),
        ],
    )
    .unwrap();
    // Lower packed: [a11, a21, a31, a22, a32, a33].
    assert_close(ws.buffer(OperandRole::A), &[1.0, 2.0, 3.0, 4.0, 6.0, 9.0]);
}

#[test]
fn syr2_updates_upper_triangle_only() {
    let mut options = KernelOptions::for_kernel(KernelKind::Syr2);
    options.alpha = (1.0, 0.0);
    let ws = run_kernel(
        KernelKind::Syr2,
        &options,
        Precision::Real64,
        &square(2),
        &[
            (OperandRole::X, &[1.0, 0.0]),
            (OperandRole::Y, &[0.0, 1.0]),
            (OperandRole::A, &[0.0, 0.0, 0.0, 0.0]),
        ],
    )
    .unwrap();
    // x*y' + y*x' = [[0, 1], [1, 0]]; only the upper triangle is stored.
    assert_close(ws.buffer(OperandRole::A), &[0.0, 0.0, 1.0, 0.0]);
}

#[test]
fn trmv_upper_nonunit_product() {
    let mut options = KernelOptions::for_kernel(KernelKind::Trmv);
    options.diag = Diag::NonUnit;
    // A = [[2, 1], [0, 3]] column-major.
    let ws = run_kernel(
        KernelKind::Trmv,
        &options,
        Precision::Real64,
        &square(2),
        &[
            (OperandRole::A, &[2.0, 0.0, 1.0, 3.0]),
            (OperandRole::X, &[1.0, 1.0]),
        ],
    )
    .unwrap();
    assert_close(ws.buffer(OperandRole::X), &[3.0, 3.0]);
}

#[test]
fn trmv_transposed_product() {
    let mut options = KernelOptions::for_kernel(KernelKind::Trmv);
    options.diag = Diag::NonUnit;
    options.transa = Trans::Trans;
    let ws = run_kernel(
        KernelKind::Trmv,
        &options,
        Precision::Real64,
        &square(2),
        &[
            (OperandRole::A, &[2.0, 0.0, 1.0, 3.0]),
            (OperandRole::X, &[1.0, 1.0]),
        ],
    )
    .unwrap();
    // A' * [1, 1] = [2, 4].
    assert_close(ws.buffer(OperandRole::X), &[2.0, 4.0]);
}

#[test]
fn trmv_unit_diagonal_is_implicit() {
    let options = KernelOptions::for_kernel(KernelKind::Trmv);
    // Stored diagonal values must be ignored with the default unit diagonal.
    let ws = run_kernel(
        KernelKind::Trmv,
        &options,
        Precision::Real64,
        &square(2),
        &[
            (OperandRole::A, &[99.0, 0.0, 1.0, 99.0]),
            (OperandRole::X, &[1.0, 1.0]),
        ],
    )
    .unwrap();
    assert_close(ws.buffer(OperandRole::X), &[2.0, 1.0]);
}

#[test]
fn trmv_lower_notrans_product() {
    let mut options = KernelOptions::for_kernel(KernelKind::Trmv);
    options.diag = Diag::NonUnit;
    options.uplo = Uplo::Lower;
    // A = [[2, 0], [1, 3]] column-major.
    let ws = run_kernel(
        KernelKind::Trmv,
        &options,
        Precision::Real64,
        &square(2),
        &[
            (OperandRole::A, &[2.0, 1.0, 0.0, 3.0]),
            (OperandRole::X, &[1.0, 1.0]),
        ],
    )
    .unwrap();
    assert_close(ws.buffer(OperandRole::X), &[2.0, 4.0]);
}

#[test]
fn trsm_left_upper_back_substitution() {
    let mut options = KernelOptions::for_kernel(KernelKind::Trsm);
    options.diag = Diag::NonUnit;
    options.alpha = (1.0, 0.0);
    let dims = Dims { m: 2, n: 1, k: 2 };
    // A = [[2, 1], [0, 4]], b = [4, 8]; solve A*x = b.
    let ws = run_kernel(
        KernelKind::Trsm,
        &options,
        Precision::Real64,
        &dims,
        &[
            (OperandRole::A, &[2.0, 0.0, 1.0, 4.0]),
            (OperandRole::B, &[4.0, 8.0]),
        ],
    )
    .unwrap();
    assert_close(ws.buffer(OperandRole::B), &[1.0, 2.0]);
}

#[test]
fn trsm_solution_reproduces_rhs() {
    let mut options = KernelOptions::for_kernel(KernelKind::Trsm);
    options.diag = Diag::NonUnit;
    options.alpha = (1.0, 0.0);
    let dims = square(3);
    let a = [3.0, 0.0, 0.0, 1.0, 2.0, 0.0, -1.0, 0.5, 4.0];
    let b = [6.0, 4.0, 8.0, -3.0, 1.0, 2.0, 0.0, 5.0, -4.0];
    let ws = run_kernel(
        KernelKind::Trsm,
        &options,
        Precision::Real64,
        &dims,
        &[(OperandRole::A, &a), (OperandRole::B, &b)],
    )
    .unwrap();

    // Multiply the solution back: U * X must equal the original B.
    let x = ws.buffer(OperandRole::B);
    for j in 0..3 {
        for i in 0..3 {
            let mut sum = 0.0;
            for l in i..3 {
                sum += a[i + l * 3] * x[l + j * 3];
            }
            assert!((sum - b[i + j * 3]).abs() < 1e-9);
        }
    }
}

#[test]
fn trsm_right_side_solves_xa_equals_b() {
    let mut options = KernelOptions::for_kernel(KernelKind::Trsm);
    options.diag = Diag::NonUnit;
    options.side = Side::Right;
    options.alpha = (1.0, 0.0);
    let dims = Dims { m: 1, n: 2, k: 2 };
    // A = [[2, 1], [0, 4]], B = [2, 4]; solve X*A = B.
    let ws = run_kernel(
        KernelKind::Trsm,
        &options,
        Precision::Real64,
        &dims,
        &[
            (OperandRole::A, &[2.0, 0.0, 1.0, 4.0]),
            (OperandRole::B, &[2.0, 4.0]),
        ],
    )
    .unwrap();
    assert_close(ws.buffer(OperandRole::B), &[1.0, 0.75]);
}

#[test]
fn trsm_reports_singular_diagonal() {
    let mut options = KernelOptions::for_kernel(KernelKind::Trsm);
    options.diag = Diag::NonUnit;
    let dims = Dims { m: 2, n: 1, k: 2 };
    let result = run_kernel(
        KernelKind::Trsm,
        &options,
        Precision::Real64,
        &dims,
        &[
            (OperandRole::A, &[2.0, 0.0, 1.0, 0.0]),
            (OperandRole::B, &[4.0, 8.0]),
        ],
    );
    assert!(matches!(
        result,
        Err(KernelError::SingularDiagonal { index: 1, .. })
    ));
}

#[test]
fn flop_counts_follow_kernel_formulas() {
    let options_axpy = KernelOptions::for_kernel(KernelKind::Axpy);
    let kernel = kernels::for_kind(KernelKind::Axpy, &options_axpy, Precision::Real64);
    assert_eq!(kernel.flop_count(&square(100)), 200.0);

    let options_gemm = KernelOptions::for_kernel(KernelKind::Gemm);
    let kernel = kernels::for_kind(KernelKind::Gemm, &options_gemm, Precision::Real64);
    assert_eq!(kernel.flop_count(&Dims { m: 2, n: 3, k: 4 }), 48.0);

    let options_trsm = KernelOptions::for_kernel(KernelKind::Trsm);
    let kernel = kernels::for_kind(KernelKind::Trsm, &options_trsm, Precision::Real64);
    assert_eq!(kernel.flop_count(&square(10)), 1000.0);

    let options_spr = KernelOptions::for_kernel(KernelKind::Spr);
    let kernel = kernels::for_kind(KernelKind::Spr, &options_spr, Precision::Real64);
    assert_eq!(kernel.flop_count(&square(10)), 100.0);

    let options_syr2 = KernelOptions::for_kernel(KernelKind::Syr2);
    let kernel = kernels::for_kind(KernelKind::Syr2, &options_syr2, Precision::Real64);
    assert_eq!(kernel.flop_count(&square(10)), 200.0);
}

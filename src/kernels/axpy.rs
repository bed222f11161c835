//! Vector scale-add kernel: `y <- alpha*x + y`.

use super::{Kernel, check_vector};
use crate::config::{Dims, KernelOptions};
use crate::errors::KernelError;
use crate::harness::workspace::BufferSet;
use crate::operand::OperandRole;
use crate::precision::Precision;
use crate::utils::scalar::{Complex, Scalar, stride_span, stride_start};

/// Reference routine with the BLAS `axpy` convention: strided vectors,
/// negative increments walk backwards.
pub(crate) fn axpy<T: Scalar>(
    n: usize,
    alpha: T,
    x: &[f64],
    incx: i64,
    y: &mut [f64],
    incy: i64,
) -> Result<(), KernelError> {
    check_vector::<T>("axpy", "x", x.len(), n, incx)?;
    check_vector::<T>("axpy", "y", y.len(), n, incy)?;
    if n == 0 || alpha.is_zero() {
        return Ok(());
    }

    let mut ix = stride_start(n, incx);
    let mut iy = stride_start(n, incy);
    for _ in 0..n {
        let sum = T::load(y, iy as usize) + alpha * T::load(x, ix as usize);
        sum.store(y, iy as usize);
        ix += incx;
        iy += incy;
    }
    Ok(())
}

/// Harness adapter for the vector scale-add kernel.
pub struct AxpyKernel {
    alpha: (f64, f64),
    incx: i64,
    incy: i64,
    complex: bool,
}

impl AxpyKernel {
    pub fn new(options: &KernelOptions, precision: Precision) -> Self {
        AxpyKernel {
            alpha: options.alpha,
            incx: options.incx,
            incy: options.incy,
            complex: precision.is_complex(),
        }
    }
}

impl Kernel for AxpyKernel {
    fn name(&self) -> &'static str {
        "axpy"
    }

    fn inputs(&self) -> &'static [OperandRole] {
        &[OperandRole::X, OperandRole::Y]
    }

    fn result(&self) -> OperandRole {
        OperandRole::Y
    }

    fn element_count(&self, role: OperandRole, dims: &Dims) -> usize {
        match role {
            OperandRole::X => stride_span(dims.n, self.incx),
            OperandRole::Y => stride_span(dims.n, self.incy),
            _ => 0,
        }
    }

    fn flop_count(&self, dims: &Dims) -> f64 {
        2.0 * dims.n as f64
    }

    fn invoke(&self, buffers: &mut BufferSet<'_>, dims: &Dims) -> Result<(), KernelError> {
        if self.complex {
            let alpha = Complex::from_pair(self.alpha.0, self.alpha.1);
            axpy::<Complex>(dims.n, alpha, buffers.x, self.incx, buffers.y, self.incy)
        } else {
            axpy::<f64>(dims.n, self.alpha.0, buffers.x, self.incx, buffers.y, self.incy)
        }
    }
}

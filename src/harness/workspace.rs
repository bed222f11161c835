//! Operand buffers owned by the sweep controller.
//!
//! One flat `f64` buffer per operand role, allocated exactly once per run at
//! the largest size the sweep can reach, then reused for every swept size so
//! no allocation happens anywhere near the timed region.

use crate::config::Dims;
use crate::errors::{HarnessError, HarnessResult};
use crate::kernels::Kernel;
use crate::operand::OperandRole;

/// The long-lived operand buffers of one benchmark run.
pub struct Workspace {
    a: Vec<f64>,
    b: Vec<f64>,
    c: Vec<f64>,
    x: Vec<f64>,
    y: Vec<f64>,
}

/// Mutable views over all workspace buffers, handed to a kernel invocation.
///
/// The fields borrow disjoint buffers, so a kernel can read some operands
/// while updating its result operand.
pub struct BufferSet<'w> {
    pub a: &'w mut [f64],
    pub b: &'w mut [f64],
    pub c: &'w mut [f64],
    pub x: &'w mut [f64],
    pub y: &'w mut [f64],
}

impl Workspace {
    /// Allocate buffers for every input operand of `kernel`, sized for
    /// `max_dims`. Allocation failure is reported, not aborted on.
    pub fn allocate(
        kernel: &dyn Kernel,
        max_dims: &Dims,
        components: usize,
    ) -> HarnessResult<Self> {
        let mut workspace = Workspace {
            a: Vec::new(),
            b: Vec::new(),
            c: Vec::new(),
            x: Vec::new(),
            y: Vec::new(),
        };
        for &role in kernel.inputs() {
            let elements = kernel.element_count(role, max_dims) * components;
            let buffer = workspace.vec_mut(role);
            buffer
                .try_reserve_exact(elements)
                .map_err(|_| HarnessError::AllocationFailure {
                    role: role.to_string(),
                    elements,
                })?;
            buffer.resize(elements, 0.0);
        }
        Ok(workspace)
    }

    fn vec_mut(&mut self, role: OperandRole) -> &mut Vec<f64> {
        match role {
            OperandRole::A => &mut self.a,
            OperandRole::B => &mut self.b,
            OperandRole::C => &mut self.c,
            OperandRole::X => &mut self.x,
            OperandRole::Y => &mut self.y,
        }
    }

    pub fn buffer(&self, role: OperandRole) -> &[f64] {
        match role {
            OperandRole::A => &self.a,
            OperandRole::B => &self.b,
            OperandRole::C => &self.c,
            OperandRole::X => &self.x,
            OperandRole::Y => &self.y,
        }
    }

    pub fn buffer_mut(&mut self, role: OperandRole) -> &mut [f64] {
        self.vec_mut(role).as_mut_slice()
    }

    /// Views over all buffers at once, for a kernel invocation.
    pub fn buffers(&mut self) -> BufferSet<'_> {
        BufferSet {
            a: &mut self.a,
            b: &mut self.b,
            c: &mut self.c,
            x: &mut self.x,
            y: &mut self.y,
        }
    }
}

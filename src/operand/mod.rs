//! Operand lifecycle: roles, golden-file persistence, and random generation.
//!
//! Every kernel names its operands by a small set of roles (matrix A/B/C,
//! vector X/Y). Golden files persist one operand each, so a benchmark run
//! can be recorded once and replayed deterministically later.

mod generate;
mod store;

use serde::{Deserialize, Serialize};

pub use generate::fill_uniform;
pub use store::{GoldenHeader, GoldenStore};

/// Logical role of an operand within a kernel invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OperandRole {
    A,
    B,
    C,
    X,
    Y,
}

impl OperandRole {
    /// Lower-case letter used in golden file names.
    pub fn letter(self) -> char {
        match self {
            OperandRole::A => 'a',
            OperandRole::B => 'b',
            OperandRole::C => 'c',
            OperandRole::X => 'x',
            OperandRole::Y => 'y',
        }
    }
}

impl std::fmt::Display for OperandRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.letter())
    }
}

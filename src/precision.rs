//! Numeric precisions a kernel can be benchmarked at.
//!
//! The four precisions match the classic BLAS naming scheme: `s` and `d`
//! for single and double real, `c` and `z` for single and double complex.
//! All arithmetic inside this crate is carried out in `f64` (complex values
//! as interleaved real/imaginary pairs); the precision selects the on-disk
//! value format, the component count per logical element, and the FLOP
//! multiplier applied when reporting throughput.

use serde::{Deserialize, Serialize};

/// Element type of the benchmarked operands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Precision {
    Real32,
    Real64,
    Complex32,
    Complex64,
}

impl Precision {
    /// Get precision by name. Accepts the BLAS prefix letters as well as the
    /// spelled-out names.
    pub fn get_by_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "s" | "real32" => Some(Precision::Real32),
            "d" | "real64" => Some(Precision::Real64),
            "c" | "complex32" => Some(Precision::Complex32),
            "z" | "complex64" => Some(Precision::Complex64),
            _ => None,
        }
    }

    /// BLAS routine prefix letter, used in golden file names.
    pub fn prefix(self) -> char {
        match self {
            Precision::Real32 => 's',
            Precision::Real64 => 'd',
            Precision::Complex32 => 'c',
            Precision::Complex64 => 'z',
        }
    }

    pub fn is_complex(self) -> bool {
        matches!(self, Precision::Complex32 | Precision::Complex64)
    }

    /// Scalar components per logical element: 1 for real, 2 for complex
    /// (interleaved real/imaginary parts).
    pub fn components(self) -> usize {
        if self.is_complex() { 2 } else { 1 }
    }

    /// Multiplier applied to the real FLOP count, reflecting the cost of a
    /// complex multiply-add relative to a real one.
    pub fn flop_multiplier(self) -> f64 {
        if self.is_complex() { 4.0 } else { 1.0 }
    }

    /// Serialize one scalar component in the fixed golden-file format:
    /// plain fixed-point for 64-bit values, 14 fractional digits for 32-bit.
    pub fn format_value(self, value: f64) -> String {
        match self {
            Precision::Real64 | Precision::Complex64 => format!("{value:.6}"),
            Precision::Real32 | Precision::Complex32 => format!("{value:.14}"),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Precision::Real32 => "real32",
            Precision::Real64 => "real64",
            Precision::Complex32 => "complex32",
            Precision::Complex64 => "complex64",
        }
    }
}

impl std::fmt::Display for Precision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

//! Error types for sweep and kernel configuration.

use thiserror::Error;

/// Errors detected while building or validating a harness configuration.
///
/// All of these are fatal and reported before any sweep work starts.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("sweep step must be at least 1, got {step}")]
    NonPositiveStep { step: i64 },

    #[error("sweep start must be at least 1, got {from}")]
    NonPositiveFrom { from: i64 },

    #[error("sweep range is empty: from {from} to {to}")]
    EmptyRange { from: i64, to: i64 },

    #[error("loop count must be at least 1, got {loops}")]
    InvalidLoops { loops: i64 },

    #[error("{name} must be a non-zero increment")]
    ZeroIncrement { name: &'static str },

    #[error("dimension override {name} must be positive, got {value}")]
    InvalidDimOverride { name: &'static str, value: i64 },

    #[error("invalid value '{value}' for {name}, expected one of {expected}")]
    InvalidFlag {
        name: &'static str,
        value: String,
        expected: &'static str,
    },

    #[error("invalid integer '{value}' for {name}")]
    InvalidInteger { name: String, value: String },

    #[error("unknown kernel '{name}'")]
    UnknownKernel { name: String },

    #[error("unknown precision '{value}'")]
    UnknownPrecision { value: String },

    #[error("kernel '{kernel}' supports only real precisions, got {precision}")]
    UnsupportedPrecision { kernel: String, precision: String },
}

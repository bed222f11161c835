//! Error types for the benchmark harness.
//!
//! This module contains specific error types used throughout the library,
//! avoiding generic error wrappers like `anyhow` or `Box<dyn Error>` for
//! better error handling and debugging.

mod config_error;
mod golden_file_error;
mod harness_error;
mod kernel_error;

pub use config_error::ConfigError;
pub use golden_file_error::GoldenFileError;
pub use harness_error::HarnessError;
pub use kernel_error::KernelError;

/// Result type alias for configuration parsing and validation.
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for harness operations.
pub type HarnessResult<T> = std::result::Result<T, HarnessError>;

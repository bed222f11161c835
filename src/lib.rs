//! Micro-benchmark harness for dense linear-algebra kernels.
//!
//! This library drives a numeric kernel (vector scale-add, matrix products,
//! symmetric rank updates, triangular solves) across a sweep of problem
//! sizes, populates its operands either with fresh pseudo-random data or
//! from previously recorded golden files, times each invocation with a
//! monotonic high-resolution clock, and reports throughput in MFLOP/s.
//!
//! The kernels themselves are opaque collaborators; the harness only cares
//! about their operand shapes, their operation counts, and a way to invoke
//! them against pre-allocated buffers.

pub mod config;
pub mod errors;
pub mod harness;
pub mod kernels;
pub mod operand;
pub mod precision;

mod utils;

pub use config::{Dims, Environment, HarnessConfig, KernelOptions, SweepConfig};
pub use harness::{BenchmarkHarness, SizeReport};
pub use kernels::KernelKind;
pub use precision::Precision;

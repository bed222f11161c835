//! Command-line entry point for the linear-algebra kernel benchmark.
//!
//! Usage: `linbench <kernel> [random_input] [from] [to] [step]`, with the
//! four positional arguments optional and in strict order. Everything else
//! (loop count, increments, transpose/triangle flags, dimension overrides,
//! precision, golden directory) comes from environment variables read once
//! at startup.

use std::env;
use std::process;

use linbench::errors::HarnessResult;
use linbench::{BenchmarkHarness, Environment, HarnessConfig, KernelKind};
use log::error;

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().skip(1).collect();
    let Some(kernel_name) = args.first() else {
        print_usage();
        process::exit(1);
    };
    let Some(kernel) = KernelKind::get_by_name(kernel_name) else {
        error!("unknown kernel '{kernel_name}'");
        print_usage();
        process::exit(1);
    };

    if let Err(err) = run(kernel, &args[1..]) {
        error!("{err}");
        process::exit(1);
    }
}

fn run(kernel: KernelKind, args: &[String]) -> HarnessResult<()> {
    let env = Environment::capture();
    let config = HarnessConfig::parse(kernel, args, &env)?;
    let harness = BenchmarkHarness::new(config)?;
    harness.run()?;
    Ok(())
}

fn print_usage() {
    eprintln!("usage: linbench <kernel> [random_input] [from] [to] [step]");
    eprintln!("Available kernels:");
    for kind in KernelKind::all() {
        eprintln!("  {:<5} - {}", kind.name(), kind.description());
    }
}

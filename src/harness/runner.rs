//! The benchmark harness: drives one kernel across the configured sweep.
//!
//! Every swept size goes through the same strict pipeline:
//! populate operands, time `loops` kernel calls, persist the result, report
//! throughput. File I/O never overlaps the timed region, and the operand
//! buffers are allocated exactly once before the sweep starts.

use log::info;
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::config::{Dims, HarnessConfig};
use crate::errors::HarnessResult;
use crate::harness::throughput::SizeReport;
use crate::harness::timing::{MonotonicClock, TimingAccumulator};
use crate::harness::workspace::Workspace;
use crate::kernels::{self, Kernel};
use crate::operand::{GoldenHeader, GoldenStore, OperandRole, fill_uniform};

/// Generic benchmark engine, parameterized over a kernel strategy.
pub struct BenchmarkHarness {
    config: HarnessConfig,
    kernel: Box<dyn Kernel>,
    store: GoldenStore,
    routine: String,
}

impl BenchmarkHarness {
    /// Validates the configuration, probes the clock, and builds the kernel
    /// adapter. All fatal configuration problems surface here, before any
    /// sweep work.
    pub fn new(config: HarnessConfig) -> HarnessResult<Self> {
        config.validate()?;
        MonotonicClock::probe()?;

        let kernel = kernels::for_kind(config.kernel, &config.options, config.precision);
        let routine = config.routine_name();
        let store = GoldenStore::new(config.golden_dir.clone());
        Ok(BenchmarkHarness {
            config,
            kernel,
            store,
            routine,
        })
    }

    pub fn config(&self) -> &HarnessConfig {
        &self.config
    }

    /// Run the full sweep, printing one report line per size and returning
    /// the collected measurements.
    pub fn run(&self) -> HarnessResult<Vec<SizeReport>> {
        let sweep = &self.config.sweep;
        let options = &self.config.options;

        info!(
            "benchmarking {} ({} sizes, {} loops each)",
            self.routine,
            sweep.size_count(),
            sweep.loops
        );
        eprintln!(
            "From : {:3}  To : {:3}  Step = {:3}  Inc_x = {}  Inc_y = {}  Loops = {}",
            sweep.from, sweep.to, sweep.step, options.incx, options.incy, sweep.loops
        );

        let components = self.config.precision.components();
        let max_dims = self.config.max_dims();
        let mut workspace = Workspace::allocate(self.kernel.as_ref(), &max_dims, components)?;
        let mut rng = match self.config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        eprintln!("   SIZE       Flops");

        let mut reports = Vec::with_capacity(sweep.size_count());
        for size in sweep.sizes() {
            let dims = self.config.resolve_dims(size);

            self.populate(&mut workspace, &dims, &mut rng)?;

            let mut timing = TimingAccumulator::new();
            for _ in 0..sweep.loops {
                let seconds =
                    MonotonicClock::time(|| self.kernel.invoke(&mut workspace.buffers(), &dims))?;
                timing.record(seconds);
            }

            self.persist_result(&workspace, &dims)?;

            let flop_count =
                self.kernel.flop_count(&dims) * self.config.precision.flop_multiplier();
            let report = SizeReport::new(dims, flop_count, timing.mean());
            eprintln!("{}", report.format_line(&self.kernel.size_label(&dims)));
            reports.push(report);
        }
        Ok(reports)
    }

    /// Fill every input operand for the current size: freshly generated and
    /// recorded in generate mode, replayed and shape-checked in replay mode.
    fn populate(
        &self,
        workspace: &mut Workspace,
        dims: &Dims,
        rng: &mut StdRng,
    ) -> HarnessResult<()> {
        let components = self.config.precision.components();
        for &role in self.kernel.inputs() {
            let values = self.kernel.element_count(role, dims) * components;
            let path = self.store.operand_path(&self.routine, role);
            let header = self.header(role, values);
            let buffer = &mut workspace.buffer_mut(role)[..values];
            if self.config.sweep.random_input {
                fill_uniform(rng, buffer);
                self.store.write(&path, &header, buffer)?;
            } else {
                self.store.read(&path, &header, buffer)?;
            }
        }
        Ok(())
    }

    /// The result operand is always written back out, in both modes, so a
    /// later run can diff it against a trusted reference.
    fn persist_result(&self, workspace: &Workspace, dims: &Dims) -> HarnessResult<()> {
        let role = self.kernel.result();
        let values =
            self.kernel.element_count(role, dims) * self.config.precision.components();
        let path = self.store.result_path(&self.routine);
        let header = self.header(role, values);
        self.store
            .write(&path, &header, &workspace.buffer(role)[..values])?;
        Ok(())
    }

    fn header(&self, role: OperandRole, values: usize) -> GoldenHeader {
        GoldenHeader {
            routine: self.routine.clone(),
            role,
            precision: self.config.precision,
            values,
        }
    }
}

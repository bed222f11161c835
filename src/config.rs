//! Harness configuration: sweep parameters, kernel options, and the
//! environment they are read from.
//!
//! Everything configurable lives in [`HarnessConfig`], built exactly once at
//! startup from positional CLI arguments plus a captured [`Environment`] and
//! immutable afterwards. The library never reads process state after that
//! point.

use std::collections::HashMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::errors::{ConfigError, ConfigResult};
use crate::kernels::KernelKind;
use crate::precision::Precision;

/// Snapshot of the environment variables the harness recognizes.
///
/// Captured once in `main`; tests construct it from literal pairs instead of
/// mutating process-global state.
#[derive(Debug, Clone, Default)]
pub struct Environment {
    vars: HashMap<String, String>,
}

impl Environment {
    /// Capture the current process environment.
    pub fn capture() -> Self {
        Environment {
            vars: std::env::vars().collect(),
        }
    }

    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Environment {
            vars: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.vars.get(key).map(String::as_str)
    }

    fn int(&self, key: &str) -> ConfigResult<Option<i64>> {
        match self.get(key) {
            None => Ok(None),
            Some(raw) => raw.trim().parse().map(Some).map_err(|_| {
                ConfigError::InvalidInteger {
                    name: key.to_string(),
                    value: raw.to_string(),
                }
            }),
        }
    }

    fn flag(&self, key: &str) -> Option<char> {
        self.get(key)
            .and_then(|value| value.chars().next())
            .map(|c| c.to_ascii_uppercase())
    }
}

/// Transpose flag for matrix operands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Trans {
    #[default]
    NoTrans,
    Trans,
    ConjTrans,
}

impl Trans {
    fn from_char(c: char, name: &'static str) -> ConfigResult<Self> {
        match c {
            'N' => Ok(Trans::NoTrans),
            'T' => Ok(Trans::Trans),
            'C' => Ok(Trans::ConjTrans),
            other => Err(ConfigError::InvalidFlag {
                name,
                value: other.to_string(),
                expected: "N, T, C",
            }),
        }
    }
}

/// Which triangle of a symmetric or triangular matrix is referenced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Uplo {
    #[default]
    Upper,
    Lower,
}

impl Uplo {
    fn from_char(c: char) -> ConfigResult<Self> {
        match c {
            'U' => Ok(Uplo::Upper),
            'L' => Ok(Uplo::Lower),
            other => Err(ConfigError::InvalidFlag {
                name: "UPLO",
                value: other.to_string(),
                expected: "U, L",
            }),
        }
    }
}

/// Whether a triangular matrix has an implicit unit diagonal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Diag {
    #[default]
    Unit,
    NonUnit,
}

impl Diag {
    fn from_char(c: char) -> ConfigResult<Self> {
        match c {
            'U' => Ok(Diag::Unit),
            'N' => Ok(Diag::NonUnit),
            other => Err(ConfigError::InvalidFlag {
                name: "DIAG",
                value: other.to_string(),
                expected: "U, N",
            }),
        }
    }
}

/// Side the triangular matrix appears on in `trsm`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Side {
    #[default]
    Left,
    Right,
}

impl Side {
    fn from_char(c: char) -> ConfigResult<Self> {
        match c {
            'L' => Ok(Side::Left),
            'R' => Ok(Side::Right),
            other => Err(ConfigError::InvalidFlag {
                name: "SIDE",
                value: other.to_string(),
                expected: "L, R",
            }),
        }
    }
}

/// The problem-size sweep: which sizes are visited and how often each kernel
/// call is repeated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SweepConfig {
    pub from: i64,
    pub to: i64,
    pub step: i64,
    pub loops: u32,
    /// Generate fresh random operands (and record them) instead of replaying
    /// previously recorded golden files.
    pub random_input: bool,
}

impl Default for SweepConfig {
    fn default() -> Self {
        SweepConfig {
            from: 1,
            to: 200,
            step: 1,
            loops: 1,
            random_input: false,
        }
    }
}

impl SweepConfig {
    /// Validates the sweep parameters.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.from < 1 {
            return Err(ConfigError::NonPositiveFrom { from: self.from });
        }
        if self.step < 1 {
            return Err(ConfigError::NonPositiveStep { step: self.step });
        }
        if self.to < self.from {
            return Err(ConfigError::EmptyRange {
                from: self.from,
                to: self.to,
            });
        }
        if self.loops == 0 {
            return Err(ConfigError::InvalidLoops { loops: 0 });
        }
        Ok(())
    }

    /// Lazy, restartable sequence of swept sizes: `from, from+step, ... <= to`.
    pub fn sizes(&self) -> SizeSweep {
        debug_assert!(self.step >= 1, "sizes() requires a validated config");
        SizeSweep {
            next: self.from,
            to: self.to,
            step: self.step.max(1),
        }
    }

    /// Number of sizes the sweep visits.
    pub fn size_count(&self) -> usize {
        if self.to < self.from {
            0
        } else {
            ((self.to - self.from) / self.step + 1) as usize
        }
    }
}

/// Iterator over the swept problem sizes.
#[derive(Debug, Clone)]
pub struct SizeSweep {
    next: i64,
    to: i64,
    step: i64,
}

impl Iterator for SizeSweep {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        if self.next > self.to {
            return None;
        }
        let current = self.next;
        self.next += self.step;
        Some(current as usize)
    }
}

/// Independent dimension overrides; a present override holds that axis fixed
/// while the remaining axes follow the swept size.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct DimOverrides {
    pub m: Option<i64>,
    pub n: Option<i64>,
    pub k: Option<i64>,
}

impl DimOverrides {
    pub fn validate(&self) -> ConfigResult<()> {
        for (name, value) in [
            ("PARAM_M", self.m),
            ("PARAM_N", self.n),
            ("PARAM_K", self.k),
        ] {
            if let Some(value) = value {
                if value < 1 {
                    return Err(ConfigError::InvalidDimOverride { name, value });
                }
            }
        }
        Ok(())
    }

    /// Largest dimension any axis can reach given the sweep upper bound.
    pub fn max_with(&self, to: i64) -> i64 {
        [self.m, self.n, self.k]
            .into_iter()
            .flatten()
            .fold(to, i64::max)
    }
}

/// Problem dimensions for one kernel invocation. Kernels read only the axes
/// they use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dims {
    pub m: usize,
    pub n: usize,
    pub k: usize,
}

/// Scalar and flag options forwarded to the kernel routines.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KernelOptions {
    pub transa: Trans,
    pub transb: Trans,
    pub uplo: Uplo,
    pub diag: Diag,
    pub side: Side,
    pub incx: i64,
    pub incy: i64,
    /// (real, imaginary); the imaginary part is ignored at real precisions.
    pub alpha: (f64, f64),
    pub beta: (f64, f64),
}

impl KernelOptions {
    /// Option defaults for a kernel, including its conventional alpha/beta.
    pub fn for_kernel(kind: KernelKind) -> Self {
        KernelOptions {
            transa: Trans::default(),
            transb: Trans::default(),
            uplo: Uplo::default(),
            diag: Diag::default(),
            side: Side::default(),
            incx: 1,
            incy: 1,
            alpha: kind.default_alpha(),
            beta: kind.default_beta(),
        }
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if self.incx == 0 {
            return Err(ConfigError::ZeroIncrement { name: "INCX" });
        }
        if self.incy == 0 {
            return Err(ConfigError::ZeroIncrement { name: "INCY" });
        }
        Ok(())
    }
}

/// Complete configuration of one benchmark run.
#[derive(Debug, Clone)]
pub struct HarnessConfig {
    pub kernel: KernelKind,
    pub precision: Precision,
    pub sweep: SweepConfig,
    pub overrides: DimOverrides,
    pub options: KernelOptions,
    /// Directory golden files are written to and replayed from.
    pub golden_dir: PathBuf,
    /// Fixed generator seed; `None` seeds from the operating system.
    pub seed: Option<u64>,
}

impl HarnessConfig {
    pub fn new(kernel: KernelKind) -> Self {
        HarnessConfig {
            kernel,
            precision: Precision::Real64,
            sweep: SweepConfig::default(),
            overrides: DimOverrides::default(),
            options: KernelOptions::for_kernel(kernel),
            golden_dir: PathBuf::from("."),
            seed: None,
        }
    }

    /// Build a configuration from the positional CLI arguments
    /// (`random_input from to step`, all optional, strict order) and the
    /// captured environment.
    pub fn parse(kernel: KernelKind, args: &[String], env: &Environment) -> ConfigResult<Self> {
        let mut config = Self::new(kernel);

        let mut positional = args.iter();
        if let Some(raw) = positional.next() {
            config.sweep.random_input = parse_cli_int("random_input", raw)? != 0;
        }
        if let Some(raw) = positional.next() {
            config.sweep.from = parse_cli_int("from", raw)?;
        }
        if let Some(raw) = positional.next() {
            // The upper bound is clamped, not rejected, when below `from`.
            config.sweep.to = parse_cli_int("to", raw)?.max(config.sweep.from);
        }
        if let Some(raw) = positional.next() {
            config.sweep.step = parse_cli_int("step", raw)?;
        }

        if let Some(loops) = env.int("LOOPS")? {
            if loops < 1 {
                return Err(ConfigError::InvalidLoops { loops });
            }
            config.sweep.loops = loops as u32;
        }
        if let Some(incx) = env.int("INCX")? {
            config.options.incx = incx;
        }
        if let Some(incy) = env.int("INCY")? {
            config.options.incy = incy;
        }

        // TRANS sets both transpose flags; TRANSA/TRANSB override individually.
        if let Some(c) = env.flag("TRANS") {
            let trans = Trans::from_char(c, "TRANS")?;
            config.options.transa = trans;
            config.options.transb = trans;
        }
        if let Some(c) = env.flag("TRANSA") {
            config.options.transa = Trans::from_char(c, "TRANSA")?;
        }
        if let Some(c) = env.flag("TRANSB") {
            config.options.transb = Trans::from_char(c, "TRANSB")?;
        }
        if let Some(c) = env.flag("UPLO") {
            config.options.uplo = Uplo::from_char(c)?;
        }
        if let Some(c) = env.flag("DIAG") {
            config.options.diag = Diag::from_char(c)?;
        }
        if let Some(c) = env.flag("SIDE") {
            config.options.side = Side::from_char(c)?;
        }

        config.overrides.m = env.int("PARAM_M")?;
        config.overrides.n = env.int("PARAM_N")?;
        config.overrides.k = env.int("PARAM_K")?;

        if let Some(raw) = env.get("PRECISION") {
            config.precision =
                Precision::get_by_name(raw).ok_or_else(|| ConfigError::UnknownPrecision {
                    value: raw.to_string(),
                })?;
        }
        if let Some(dir) = env.get("GOLDEN_DIR") {
            config.golden_dir = PathBuf::from(dir);
        }
        if let Some(seed) = env.int("SEED")? {
            config.seed = Some(seed as u64);
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> ConfigResult<()> {
        self.sweep.validate()?;
        self.overrides.validate()?;
        self.options.validate()?;
        if self.precision.is_complex() && !self.kernel.supports_complex() {
            return Err(ConfigError::UnsupportedPrecision {
                kernel: self.kernel.name().to_string(),
                precision: self.precision.to_string(),
            });
        }
        Ok(())
    }

    /// Dimensions for one swept size, with overrides taking precedence on
    /// their axis.
    pub fn resolve_dims(&self, size: usize) -> Dims {
        Dims {
            m: self.overrides.m.map_or(size, |v| v as usize),
            n: self.overrides.n.map_or(size, |v| v as usize),
            k: self.overrides.k.map_or(size, |v| v as usize),
        }
    }

    /// Dimensions used for buffer sizing: the largest value any axis reaches
    /// across the whole sweep.
    pub fn max_dims(&self) -> Dims {
        let max = self.overrides.max_with(self.sweep.to) as usize;
        Dims {
            m: max,
            n: max,
            k: max,
        }
    }

    /// Routine name with the precision prefix, e.g. `daxpy`.
    pub fn routine_name(&self) -> String {
        format!("{}{}", self.precision.prefix(), self.kernel.name())
    }
}

fn parse_cli_int(name: &'static str, raw: &str) -> ConfigResult<i64> {
    raw.trim()
        .parse()
        .map_err(|_| ConfigError::InvalidInteger {
            name: name.to_string(),
            value: raw.to_string(),
        })
}

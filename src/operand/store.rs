//! Plain-text golden files for operands and results.
//!
//! One file per logical operand, one scalar component per line. The first
//! line is a `#`-prefixed JSON shape header recording which operand the file
//! holds and how many values were written, so a replay run validates the
//! recorded shape instead of assuming the recording run used the same sweep
//! parameters.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use log::debug;
use serde::{Deserialize, Serialize};

use super::OperandRole;
use crate::errors::GoldenFileError;
use crate::precision::Precision;

/// Shape record stored on the first line of every golden file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoldenHeader {
    /// Prefixed routine name, e.g. `daxpy`.
    pub routine: String,
    pub role: OperandRole,
    pub precision: Precision,
    /// Scalar components in the file (elements times components).
    pub values: usize,
}

/// Reads and writes golden operand files under a fixed directory.
pub struct GoldenStore {
    dir: PathBuf,
}

impl GoldenStore {
    pub fn new(dir: PathBuf) -> Self {
        GoldenStore { dir }
    }

    /// File path for an input operand, e.g. `daxpy_x.txt`.
    pub fn operand_path(&self, routine: &str, role: OperandRole) -> PathBuf {
        self.dir.join(format!("{routine}_{}.txt", role.letter()))
    }

    /// File path for the result operand, e.g. `daxpy_res.txt`.
    pub fn result_path(&self, routine: &str) -> PathBuf {
        self.dir.join(format!("{routine}_res.txt"))
    }

    /// Serialize an operand: header line first, then one component per line.
    pub fn write(
        &self,
        path: &Path,
        header: &GoldenHeader,
        values: &[f64],
    ) -> Result<(), GoldenFileError> {
        debug_assert_eq!(header.values, values.len());

        let file = File::create(path).map_err(|source| io_error(path, source))?;
        let mut writer = BufWriter::new(file);

        let shape = serde_json::to_string(header).map_err(|source| {
            GoldenFileError::MalformedHeader {
                path: display(path),
                source,
            }
        })?;
        writeln!(writer, "# {shape}").map_err(|source| io_error(path, source))?;

        for value in values {
            writeln!(writer, "{}", header.precision.format_value(*value))
                .map_err(|source| io_error(path, source))?;
        }
        writer.flush().map_err(|source| io_error(path, source))?;

        debug!("wrote {} values to {}", values.len(), display(path));
        Ok(())
    }

    /// Replay an operand into `out`, validating the recorded shape first.
    ///
    /// `out` must be sliced to exactly the required component count; a file
    /// recorded with a different count fails with `ShapeMismatch`, and a
    /// file that ends early fails with `ShortRead`.
    pub fn read(
        &self,
        path: &Path,
        expected: &GoldenHeader,
        out: &mut [f64],
    ) -> Result<(), GoldenFileError> {
        debug_assert_eq!(expected.values, out.len());

        let file = File::open(path).map_err(|source| io_error(path, source))?;
        let mut reader = BufReader::new(file);

        let header = read_header(path, &mut reader)?;
        if header.routine != expected.routine || header.role != expected.role {
            return Err(GoldenFileError::OperandMismatch {
                path: display(path),
                expected: format!("{}_{}", expected.routine, expected.role),
                found: format!("{}_{}", header.routine, header.role),
            });
        }
        if header.values != expected.values {
            return Err(GoldenFileError::ShapeMismatch {
                path: display(path),
                recorded: header.values,
                required: expected.values,
            });
        }

        let mut read = 0;
        let mut line = String::new();
        while read < out.len() {
            line.clear();
            let bytes = reader
                .read_line(&mut line)
                .map_err(|source| io_error(path, source))?;
            if bytes == 0 {
                return Err(GoldenFileError::ShortRead {
                    path: display(path),
                    read,
                    required: out.len(),
                });
            }
            let text = line.trim();
            if text.is_empty() {
                continue;
            }
            out[read] = text.parse().map_err(|_| GoldenFileError::MalformedValue {
                path: display(path),
                // +2: one-based, plus the header line
                line: read + 2,
                value: text.to_string(),
            })?;
            read += 1;
        }

        debug!("replayed {} values from {}", read, display(path));
        Ok(())
    }
}

fn read_header(
    path: &Path,
    reader: &mut BufReader<File>,
) -> Result<GoldenHeader, GoldenFileError> {
    let mut line = String::new();
    reader
        .read_line(&mut line)
        .map_err(|source| io_error(path, source))?;

    let Some(shape) = line.trim().strip_prefix('#') else {
        return Err(GoldenFileError::MissingHeader {
            path: display(path),
        });
    };
    serde_json::from_str(shape.trim()).map_err(|source| GoldenFileError::MalformedHeader {
        path: display(path),
        source,
    })
}

fn io_error(path: &Path, source: std::io::Error) -> GoldenFileError {
    GoldenFileError::Io {
        path: display(path),
        source,
    }
}

fn display(path: &Path) -> String {
    path.display().to_string()
}

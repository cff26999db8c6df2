//! Comma-separated matrix loading.
//!
//! Each non-blank line is one row; cells are separated by `,` and may be
//! padded with whitespace. A single trailing comma is tolerated.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use super::instance::QapInstance;
use super::matrix::Matrix;
use crate::error::LoadError;

/// Reads square matrices from CSV sources.
///
/// Without an expected dimension, the first row fixes it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MatrixLoader {
    dimension: Option<usize>,
}

impl MatrixLoader {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Requires every loaded matrix to be exactly `n x n`.
    #[inline]
    pub fn with_dimension(mut self, n: usize) -> Self {
        self.dimension = Some(n);
        self
    }

    /// Loads both matrices and pairs them into an instance.
    pub fn load_instance(
        &self,
        flow: impl AsRef<Path>,
        distance: impl AsRef<Path>,
    ) -> Result<QapInstance, LoadError> {
        let flow = self.from_path(flow)?;
        let distance = self.from_path(distance)?;
        QapInstance::new(flow, distance)
    }

    pub fn from_path(&self, path: impl AsRef<Path>) -> Result<Matrix, LoadError> {
        let path = path.as_ref();
        let file_name = path.display().to_string();
        let file = File::open(path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => LoadError::MissingFile {
                file: file_name.clone(),
            },
            _ => LoadError::Io {
                file: file_name.clone(),
                source: e,
            },
        })?;
        self.from_reader(&file_name, BufReader::new(file))
    }

    /// Parses a matrix from any buffered reader; `name` labels errors.
    pub fn from_reader<R: BufRead>(&self, name: &str, reader: R) -> Result<Matrix, LoadError> {
        let mut width = self.dimension;
        let mut rows = 0usize;
        let mut data = Vec::new();

        for (idx, line) in reader.lines().enumerate() {
            let line_no = idx + 1;
            let line = line.map_err(|source| LoadError::Io {
                file: name.to_string(),
                source,
            })?;
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let line = line.strip_suffix(',').unwrap_or(line);

            let start = data.len();
            for (col, cell) in line.split(',').enumerate() {
                let cell = cell.trim();
                let value: i64 = cell.parse().map_err(|_| LoadError::InvalidCell {
                    file: name.to_string(),
                    line: line_no,
                    column: col + 1,
                    cell: cell.to_string(),
                })?;
                if value < 0 {
                    return Err(LoadError::NegativeCell {
                        file: name.to_string(),
                        line: line_no,
                        column: col + 1,
                        value,
                    });
                }
                data.push(value);
            }

            let found = data.len() - start;
            let expected = *width.get_or_insert(found);
            if found != expected {
                return Err(LoadError::MalformedRow {
                    file: name.to_string(),
                    line: line_no,
                    expected,
                    found,
                });
            }
            rows += 1;
        }

        let n = match width {
            Some(n) if rows > 0 => n,
            _ => {
                return Err(LoadError::Empty {
                    file: name.to_string(),
                })
            }
        };
        if rows != n {
            return Err(LoadError::RowCount {
                file: name.to_string(),
                expected: n,
                found: rows,
            });
        }
        Ok(Matrix::from_flat(n, data))
    }
}

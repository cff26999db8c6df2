//! Error types for instance loading and search configuration.
//!
//! Both families are fatal: a [`LoadError`] aborts before a search starts,
//! and a [`ConfigError`] is reported before any matrix is read. A search
//! that runs out of admissible moves is not an error; see
//! [`FallbackPolicy`](crate::tabu::FallbackPolicy).

use std::fmt;

/// Failure while reading a flow or distance matrix.
///
/// `file` is the path (or caller-supplied name) of the offending source and
/// `line`/`column` are 1-based.
#[derive(Debug)]
pub enum LoadError {
    /// The source does not exist.
    MissingFile { file: String },
    /// The source exists but could not be read.
    Io {
        file: String,
        source: std::io::Error,
    },
    /// The source contains no rows.
    Empty { file: String },
    /// A row has a different number of cells than the matrix dimension.
    MalformedRow {
        file: String,
        line: usize,
        expected: usize,
        found: usize,
    },
    /// A cell is not an integer.
    InvalidCell {
        file: String,
        line: usize,
        column: usize,
        cell: String,
    },
    /// A cell holds a negative value.
    NegativeCell {
        file: String,
        line: usize,
        column: usize,
        value: i64,
    },
    /// The number of rows differs from the matrix dimension.
    RowCount {
        file: String,
        expected: usize,
        found: usize,
    },
    /// Flow and distance matrices have different dimensions.
    DimensionMismatch { flow: usize, distance: usize },
    /// Cell values are large enough that a cost could overflow `i64`.
    CostOverflow {
        size: usize,
        max_flow: i64,
        max_distance: i64,
    },
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadError::MissingFile { file } => write!(f, "{file}: no such file"),
            LoadError::Io { file, source } => write!(f, "{file}: {source}"),
            LoadError::Empty { file } => write!(f, "{file}: matrix is empty"),
            LoadError::MalformedRow {
                file,
                line,
                expected,
                found,
            } => write!(
                f,
                "{file}:{line}: expected {expected} cells, found {found}"
            ),
            LoadError::InvalidCell {
                file,
                line,
                column,
                cell,
            } => write!(f, "{file}:{line}:{column}: `{cell}` is not an integer"),
            LoadError::NegativeCell {
                file,
                line,
                column,
                value,
            } => write!(f, "{file}:{line}:{column}: negative value {value}"),
            LoadError::RowCount {
                file,
                expected,
                found,
            } => write!(f, "{file}: expected {expected} rows, found {found}"),
            LoadError::DimensionMismatch { flow, distance } => write!(
                f,
                "flow matrix is {flow}x{flow} but distance matrix is {distance}x{distance}"
            ),
            LoadError::CostOverflow {
                size,
                max_flow,
                max_distance,
            } => write!(
                f,
                "costs of a {size}x{size} instance with flow up to {max_flow} and distance up to {max_distance} overflow 64-bit integers"
            ),
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LoadError::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Invalid search parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Fewer than two facilities leave no move to make.
    TooFewFacilities { n: usize },
    /// A fixed tenure of zero disables the tabu list entirely.
    ZeroTenure,
    /// Dynamic tenure bounds must satisfy `1 <= min <= max`.
    InvalidTenureRange { min: usize, max: usize },
    /// A fixed tenure and a dynamic tenure range were both given.
    ConflictingTenure { tenure: usize, min: usize, max: usize },
    /// Dynamic tenure needs a refresh interval of at least one iteration.
    ZeroRefreshInterval,
    /// The visited-permutation queue needs room for at least one entry.
    ZeroVisitedCapacity,
    /// The starting permutation is not a bijection on `0..n`.
    InvalidPermutation { n: usize },
    /// Unrecognised admissibility strategy name.
    UnknownStrategy(String),
    /// Unrecognised fallback policy name.
    UnknownFallback(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::TooFewFacilities { n } => {
                write!(f, "at least 2 facilities are required, got {n}")
            }
            ConfigError::ZeroTenure => write!(f, "tabu tenure must be at least 1"),
            ConfigError::InvalidTenureRange { min, max } => {
                write!(f, "invalid tenure range [{min}, {max}]")
            }
            ConfigError::ConflictingTenure { tenure, min, max } => write!(
                f,
                "fixed tenure {tenure} conflicts with dynamic range [{min}, {max}]"
            ),
            ConfigError::ZeroRefreshInterval => {
                write!(f, "tenure refresh interval must be at least 1")
            }
            ConfigError::ZeroVisitedCapacity => {
                write!(f, "visited-set capacity must be at least 1")
            }
            ConfigError::InvalidPermutation { n } => {
                write!(f, "starting solution is not a permutation of 0..{n}")
            }
            ConfigError::UnknownStrategy(s) => write!(
                f,
                "unknown strategy `{s}` (expected plain, frequency, aspiration-global or aspiration-local)"
            ),
            ConfigError::UnknownFallback(s) => write!(
                f,
                "unknown fallback `{s}` (expected least-tabu or best-overall)"
            ),
        }
    }
}

impl std::error::Error for ConfigError {}

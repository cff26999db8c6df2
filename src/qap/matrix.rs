//! Square integer matrices backing flow and distance data.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A dense, row-major `n x n` matrix of non-negative integers.
///
/// # Examples
///
/// ```
/// use u_qap::qap::Matrix;
///
/// let m = Matrix::from_rows(vec![vec![0, 4], vec![4, 0]]).unwrap();
/// assert_eq!(m.size(), 2);
/// assert_eq!(m.get(0, 1), 4);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Matrix {
    n: usize,
    data: Vec<i64>,
}

impl Matrix {
    /// Builds a matrix from rows.
    ///
    /// Returns `None` if `rows` is empty, not square, or holds a negative
    /// value.
    pub fn from_rows(rows: Vec<Vec<i64>>) -> Option<Self> {
        let n = rows.len();
        if n == 0 || rows.iter().any(|r| r.len() != n) {
            return None;
        }
        let data: Vec<i64> = rows.into_iter().flatten().collect();
        if data.iter().any(|&v| v < 0) {
            return None;
        }
        Some(Self { n, data })
    }

    /// Wraps already-validated row-major data.
    pub(crate) fn from_flat(n: usize, data: Vec<i64>) -> Self {
        debug_assert_eq!(data.len(), n * n);
        Self { n, data }
    }

    /// An `n x n` matrix of zeros.
    pub fn zeros(n: usize) -> Self {
        Self {
            n,
            data: vec![0; n * n],
        }
    }

    /// Dimension `n`.
    #[inline]
    pub fn size(&self) -> usize {
        self.n
    }

    #[inline]
    pub fn get(&self, i: usize, j: usize) -> i64 {
        self.data[i * self.n + j]
    }

    #[inline]
    pub fn row(&self, i: usize) -> &[i64] {
        &self.data[i * self.n..(i + 1) * self.n]
    }

    /// Sets a single cell.
    ///
    /// # Panics
    /// Panics if `value` is negative or the index is out of range.
    pub fn set(&mut self, i: usize, j: usize, value: i64) {
        assert!(value >= 0, "matrix values must be non-negative");
        self.data[i * self.n + j] = value;
    }

    /// Largest cell value, 0 for an empty matrix.
    pub fn max_value(&self) -> i64 {
        self.data.iter().copied().max().unwrap_or(0)
    }
}

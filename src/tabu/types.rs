//! Swap moves and the pairwise-exchange neighborhood.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Transposition of two facility positions, stored with `i < j`.
///
/// Moves with the same pair are equivalent regardless of argument order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Move {
    i: usize,
    j: usize,
}

impl Move {
    /// Creates the move exchanging positions `a` and `b`.
    ///
    /// # Panics
    /// Panics if `a == b`.
    pub fn new(a: usize, b: usize) -> Self {
        assert_ne!(a, b, "a move must exchange two distinct positions");
        if a < b {
            Self { i: a, j: b }
        } else {
            Self { i: b, j: a }
        }
    }

    #[inline]
    pub fn i(&self) -> usize {
        self.i
    }

    #[inline]
    pub fn j(&self) -> usize {
        self.j
    }

    /// Swaps the two positions in place. Applying a move twice is a no-op.
    #[inline]
    pub fn apply(&self, perm: &mut [usize]) {
        perm.swap(self.i, self.j);
    }

    /// Returns a copy of `perm` with the move applied.
    pub fn applied(&self, perm: &[usize]) -> Vec<usize> {
        let mut out = perm.to_vec();
        self.apply(&mut out);
        out
    }
}

/// All `n * (n - 1) / 2` swap moves, lexicographic on `(i, j)`.
pub fn swap_moves(n: usize) -> impl Iterator<Item = Move> {
    (0..n).flat_map(move |i| ((i + 1)..n).map(move |j| Move { i, j }))
}

/// The full swap neighborhood for permutations of size `n`.
///
/// Its content and order never change, so a search builds it once and
/// walks it every iteration.
#[derive(Debug, Clone)]
pub struct Neighborhood {
    moves: Vec<Move>,
}

impl Neighborhood {
    pub fn new(n: usize) -> Self {
        Self {
            moves: swap_moves(n).collect(),
        }
    }

    #[inline]
    pub fn moves(&self) -> &[Move] {
        &self.moves
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.moves.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Move> {
        self.moves.iter()
    }
}

/// A move evaluated against the current permutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Candidate {
    pub mv: Move,
    /// Cost of the permutation after applying `mv`.
    pub cost: i64,
    /// Iterations until `mv` stops being tabu; 0 means free.
    pub remaining: usize,
    /// How often `mv` has recently been selected.
    pub frequency: usize,
}

impl Candidate {
    #[inline]
    pub fn is_tabu(&self) -> bool {
        self.remaining > 0
    }
}

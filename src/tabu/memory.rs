//! Short- and long-term search memory.
//!
//! - [`RecencyMemory`]: per-move tenure counters (the classic tabu matrix)
//! - [`VisitedSet`]: FIFO of recently visited permutations
//! - [`FrequencyTable`]: per-move selection counts used for diversification
//! - [`TenureSchedule`]: fixed or periodically resampled tenure values

use std::collections::VecDeque;

use rand::Rng;

use super::config::TenurePolicy;
use super::types::{Candidate, Move};

/// Memory deciding which moves are currently tabu.
pub trait TabuMemory: Send + Sync {
    /// Called once with the starting permutation.
    fn start(&mut self, _initial: &[usize]) {}

    /// Iterations until applying `mv` to `current` stops being tabu.
    ///
    /// Returns 0 for a free move. Larger values expire later.
    fn remaining(&self, current: &[usize], mv: Move) -> usize;

    /// Records that `mv` was applied, producing `after`.
    fn record(&mut self, mv: Move, after: &[usize], tenure: usize);

    /// Advances the memory by one iteration.
    fn decay(&mut self);
}

/// Tenure counters for every `(i, j)` pair.
///
/// A move is tabu while its counter is positive. Counters are set when the
/// move is applied and decremented once per iteration, floored at 0.
#[derive(Debug, Clone)]
pub struct RecencyMemory {
    n: usize,
    tenure: Vec<usize>,
}

impl RecencyMemory {
    pub fn new(n: usize) -> Self {
        Self {
            n,
            tenure: vec![0; n * n],
        }
    }

    #[inline]
    pub fn tenure(&self, mv: Move) -> usize {
        self.tenure[mv.i() * self.n + mv.j()]
    }

    #[inline]
    pub fn is_tabu(&self, mv: Move) -> bool {
        self.tenure(mv) > 0
    }

    pub fn forbid(&mut self, mv: Move, tenure: usize) {
        self.tenure[mv.i() * self.n + mv.j()] = tenure;
    }
}

impl TabuMemory for RecencyMemory {
    #[inline]
    fn remaining(&self, _current: &[usize], mv: Move) -> usize {
        self.tenure(mv)
    }

    fn record(&mut self, mv: Move, _after: &[usize], tenure: usize) {
        self.forbid(mv, tenure);
    }

    fn decay(&mut self) {
        for t in self.tenure.iter_mut() {
            *t = t.saturating_sub(1);
        }
    }
}

/// The last `capacity` visited permutations.
///
/// A move is tabu if it leads back to a stored permutation; inserting into a
/// full queue evicts the oldest entry.
#[derive(Debug, Clone)]
pub struct VisitedSet {
    capacity: usize,
    queue: VecDeque<Vec<usize>>,
}

impl VisitedSet {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            queue: VecDeque::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn push(&mut self, perm: &[usize]) {
        if self.capacity == 0 {
            return;
        }
        if self.queue.len() >= self.capacity {
            self.queue.pop_front();
        }
        self.queue.push_back(perm.to_vec());
    }

    /// Position (0 = oldest) of `current` with `mv` applied, if stored.
    fn position_after(&self, current: &[usize], mv: Move) -> Option<usize> {
        let (i, j) = (mv.i(), mv.j());
        self.queue.iter().position(|stored| {
            stored.len() == current.len()
                && stored[i] == current[j]
                && stored[j] == current[i]
                && stored
                    .iter()
                    .zip(current)
                    .enumerate()
                    .all(|(k, (s, c))| k == i || k == j || s == c)
        })
    }
}

impl TabuMemory for VisitedSet {
    fn start(&mut self, initial: &[usize]) {
        self.push(initial);
    }

    fn remaining(&self, current: &[usize], mv: Move) -> usize {
        self.position_after(current, mv).map_or(0, |k| k + 1)
    }

    fn record(&mut self, _mv: Move, after: &[usize], _tenure: usize) {
        self.push(after);
    }

    fn decay(&mut self) {}
}

/// Selection counts per move.
///
/// A selected move gains one; every free move that was passed over loses
/// one, floored at 0.
#[derive(Debug, Clone)]
pub struct FrequencyTable {
    n: usize,
    counts: Vec<usize>,
}

impl FrequencyTable {
    pub fn new(n: usize) -> Self {
        Self {
            n,
            counts: vec![0; n * n],
        }
    }

    #[inline]
    pub fn frequency(&self, mv: Move) -> usize {
        self.counts[mv.i() * self.n + mv.j()]
    }

    /// Applies one iteration's bookkeeping for `selected`.
    ///
    /// `candidates` carry the tabu status each move had when it was
    /// evaluated.
    pub fn update(&mut self, candidates: &[Candidate], selected: Move) {
        for c in candidates {
            if c.mv != selected && !c.is_tabu() {
                let slot = &mut self.counts[c.mv.i() * self.n + c.mv.j()];
                *slot = slot.saturating_sub(1);
            }
        }
        self.counts[selected.i() * self.n + selected.j()] += 1;
    }
}

/// Produces the tenure given to each applied move.
#[derive(Debug, Clone)]
pub struct TenureSchedule {
    policy: TenurePolicy,
    held: usize,
}

impl TenureSchedule {
    pub fn new(policy: TenurePolicy) -> Self {
        let held = match policy {
            TenurePolicy::Fixed(t) => t,
            TenurePolicy::Dynamic { min, .. } => min,
        };
        Self { policy, held }
    }

    /// Tenure for the move applied at `iteration`.
    ///
    /// A dynamic policy draws a fresh value from `[min, max]` whenever
    /// `iteration` is a multiple of the refresh interval and holds it
    /// until the next refresh.
    pub fn next<R: Rng>(&mut self, iteration: usize, rng: &mut R) -> usize {
        if let TenurePolicy::Dynamic {
            min,
            max,
            refresh_interval,
        } = self.policy
        {
            if iteration % refresh_interval.max(1) == 0 {
                self.held = rng.random_range(min..=max);
            }
        }
        self.held
    }
}

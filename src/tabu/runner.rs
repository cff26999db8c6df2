//! Tabu Search execution engine.
//!
//! # Algorithm
//!
//! 1. Draw a random initial assignment
//! 2. At each iteration:
//!    a. Score every swap move against the current assignment
//!    b. Select the best admissible move (see [`Admissibility`])
//!    c. Apply the move and record it in the tabu memory
//!    d. Decay the memory and update the incumbent if strictly improved
//! 3. Stop after exactly `max_iterations` iterations
//!
//! # Reference
//!
//! Glover, F. (1989). "Tabu Search—Part I", *ORSA Journal on Computing* 1(3), 190-206.
//! Glover, F. (1990). "Tabu Search—Part II", *ORSA Journal on Computing* 2(1), 4-32.

use std::fmt;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tracing::{debug, info, trace, warn};

use super::config::{Admissibility, MemoryKind, TabuConfig};
use super::memory::{FrequencyTable, RecencyMemory, TabuMemory, TenureSchedule, VisitedSet};
use super::select::{select_move, Selection};
use super::types::{Candidate, Move, Neighborhood};
use crate::error::ConfigError;
use crate::qap::QapInstance;

/// Result of a Tabu Search run.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TabuResult {
    /// Seed the run was driven by.
    pub seed: u64,
    /// Starting assignment.
    pub initial: Vec<usize>,
    pub initial_cost: i64,
    /// Assignment after the last iteration.
    pub final_permutation: Vec<usize>,
    pub final_cost: i64,
    /// Best assignment found.
    pub best: Vec<usize>,
    /// Cost of the best assignment.
    pub best_cost: i64,
    /// Total iterations executed.
    pub iterations: usize,
    /// Iterations completed when the best assignment was reached
    /// (0 = the initial one).
    pub best_iteration: usize,
    /// Iterations in which no move was admissible.
    pub fallback_moves: usize,
    /// Incumbent cost after each iteration.
    pub cost_history: Vec<i64>,
}

fn write_permutation(f: &mut fmt::Formatter<'_>, label: &str, perm: &[usize]) -> fmt::Result {
    write!(f, "{label}:")?;
    for p in perm {
        write!(f, " {p}")?;
    }
    writeln!(f)
}

impl fmt::Display for TabuResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_permutation(f, "Initial Permutation", &self.initial)?;
        write_permutation(f, "Final Permutation", &self.final_permutation)?;
        write_permutation(f, "Best Permutation", &self.best)?;
        write!(f, "Best Cost: {}", self.best_cost)
    }
}

/// Mutable state of one search, owned by the runner.
#[derive(Debug, Clone)]
pub struct SearchState<M> {
    pub current: Vec<usize>,
    pub current_cost: i64,
    pub best: Vec<usize>,
    pub best_cost: i64,
    pub best_iteration: usize,
    pub memory: M,
    pub frequency: FrequencyTable,
}

impl<M: TabuMemory> SearchState<M> {
    pub fn new(instance: &QapInstance, initial: Vec<usize>, mut memory: M) -> Self {
        let cost = instance.cost(&initial);
        memory.start(&initial);
        Self {
            best: initial.clone(),
            current: initial,
            current_cost: cost,
            best_cost: cost,
            best_iteration: 0,
            memory,
            frequency: FrequencyTable::new(instance.size()),
        }
    }

    fn candidate(&self, mv: Move, cost: i64) -> Candidate {
        Candidate {
            mv,
            cost,
            remaining: self.memory.remaining(&self.current, mv),
            frequency: self.frequency.frequency(mv),
        }
    }

    /// Scores every move of `neighborhood` against the current assignment.
    pub fn evaluate(
        &mut self,
        instance: &QapInstance,
        neighborhood: &Neighborhood,
        incremental: bool,
        out: &mut Vec<Candidate>,
    ) {
        out.clear();
        if incremental {
            out.extend(neighborhood.iter().map(|&mv| {
                let delta = instance.swap_delta(&self.current, mv.i(), mv.j());
                self.candidate(mv, self.current_cost + delta)
            }));
        } else {
            for &mv in neighborhood.iter() {
                mv.apply(&mut self.current);
                let cost = instance.cost(&self.current);
                mv.apply(&mut self.current);
                out.push(self.candidate(mv, cost));
            }
        }
    }

    /// Parallel counterpart of [`evaluate`](Self::evaluate); the candidate
    /// order is the same.
    #[cfg(feature = "parallel")]
    pub fn par_evaluate(
        &self,
        instance: &QapInstance,
        neighborhood: &Neighborhood,
        incremental: bool,
        out: &mut Vec<Candidate>,
    ) {
        use rayon::prelude::*;

        let scored: Vec<Candidate> = neighborhood
            .moves()
            .par_iter()
            .map(|&mv| {
                let cost = if incremental {
                    self.current_cost + instance.swap_delta(&self.current, mv.i(), mv.j())
                } else {
                    instance.cost(&mv.applied(&self.current))
                };
                self.candidate(mv, cost)
            })
            .collect();
        *out = scored;
    }

    /// Applies `chosen` and records it in the tabu memory.
    fn apply(&mut self, instance: &QapInstance, chosen: Candidate, tenure: usize, incremental: bool) {
        chosen.mv.apply(&mut self.current);
        self.current_cost = if incremental {
            debug_assert_eq!(chosen.cost, instance.cost(&self.current));
            chosen.cost
        } else {
            instance.cost(&self.current)
        };
        self.memory.record(chosen.mv, &self.current, tenure);
        self.memory.decay();
    }

    /// Promotes the current assignment if it is strictly better.
    fn update_best(&mut self, iteration: usize) -> bool {
        if self.current_cost < self.best_cost {
            self.best.clone_from(&self.current);
            self.best_cost = self.current_cost;
            self.best_iteration = iteration;
            true
        } else {
            false
        }
    }
}

/// Tabu Search runner.
pub struct TabuRunner;

impl TabuRunner {
    /// Runs Tabu Search from a random initial assignment.
    ///
    /// # Examples
    ///
    /// ```
    /// use u_qap::qap::{Matrix, QapInstance};
    /// use u_qap::tabu::{TabuConfig, TabuRunner};
    ///
    /// let flow = Matrix::from_rows(vec![vec![0, 1, 2], vec![1, 0, 3], vec![2, 3, 0]]).unwrap();
    /// let dist = Matrix::from_rows(vec![vec![0, 1, 1], vec![1, 0, 2], vec![1, 2, 0]]).unwrap();
    /// let qap = QapInstance::new(flow, dist).unwrap();
    ///
    /// let config = TabuConfig::default().with_max_iterations(50).with_seed(42);
    /// let result = TabuRunner::run(&qap, &config).unwrap();
    /// assert_eq!(result.best_cost, qap.cost(&result.best));
    /// ```
    pub fn run(instance: &QapInstance, config: &TabuConfig) -> Result<TabuResult, ConfigError> {
        Self::run_inner(instance, config, None)
    }

    /// Runs Tabu Search from a given initial assignment.
    pub fn run_from(
        instance: &QapInstance,
        config: &TabuConfig,
        initial: Vec<usize>,
    ) -> Result<TabuResult, ConfigError> {
        if !instance.is_permutation(&initial) {
            return Err(ConfigError::InvalidPermutation {
                n: instance.size(),
            });
        }
        Self::run_inner(instance, config, Some(initial))
    }

    fn run_inner(
        instance: &QapInstance,
        config: &TabuConfig,
        initial: Option<Vec<usize>>,
    ) -> Result<TabuResult, ConfigError> {
        config.validate_for(instance.size())?;

        let seed = config.seed.unwrap_or_else(rand::random);
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let initial = match initial {
            Some(p) => p,
            None => instance.random_permutation(&mut rng),
        };

        let n = instance.size();
        let result = match config.memory {
            MemoryKind::Recency => {
                search(instance, config, initial, RecencyMemory::new(n), seed, &mut rng)
            }
            MemoryKind::Visited { capacity } => {
                search(instance, config, initial, VisitedSet::new(capacity), seed, &mut rng)
            }
        };
        Ok(result)
    }
}

fn search<M: TabuMemory, R: Rng>(
    instance: &QapInstance,
    config: &TabuConfig,
    initial: Vec<usize>,
    memory: M,
    seed: u64,
    rng: &mut R,
) -> TabuResult {
    let neighborhood = Neighborhood::new(instance.size());
    let mut state = SearchState::new(instance, initial.clone(), memory);
    let initial_cost = state.current_cost;
    let mut tenure = TenureSchedule::new(config.tenure);

    let mut candidates = Vec::with_capacity(neighborhood.len());
    let mut cost_history = Vec::with_capacity(config.max_iterations);
    let mut fallback_moves = 0;

    info!(
        n = instance.size(),
        strategy = %config.strategy,
        seed,
        iterations = config.max_iterations,
        max_tenure = config.tenure.max_tenure(),
        initial_cost,
        "starting tabu search"
    );

    for iteration in 0..config.max_iterations {
        evaluate(&mut state, instance, &neighborhood, config, &mut candidates);

        let Some(selection) = select_move(
            &candidates,
            config.strategy,
            config.fallback,
            state.current_cost,
            state.best_cost,
        ) else {
            break;
        };

        if selection.is_fallback() {
            fallback_moves += 1;
            warn!(iteration, fallback = %config.fallback, "no admissible move");
        }
        if let Selection::Aspiration(_) = selection {
            trace!(iteration, "aspiration released a tabu move");
        }

        let chosen = candidates[selection.index()];
        if config.strategy == Admissibility::Frequency {
            state.frequency.update(&candidates, chosen.mv);
        }

        let t = tenure.next(iteration, rng);
        state.apply(instance, chosen, t, config.incremental);

        if state.update_best(iteration + 1) {
            debug!(iteration, best_cost = state.best_cost, "new incumbent");
        }
        cost_history.push(state.best_cost);

        trace!(
            iteration,
            i = chosen.mv.i(),
            j = chosen.mv.j(),
            cost = state.current_cost,
            best_cost = state.best_cost
        );
    }

    info!(
        best_cost = state.best_cost,
        best_iteration = state.best_iteration,
        fallback_moves,
        "tabu search finished"
    );

    TabuResult {
        seed,
        initial,
        initial_cost,
        final_cost: state.current_cost,
        final_permutation: state.current,
        best: state.best,
        best_cost: state.best_cost,
        iterations: cost_history.len(),
        best_iteration: state.best_iteration,
        fallback_moves,
        cost_history,
    }
}

#[cfg(feature = "parallel")]
fn evaluate<M: TabuMemory>(
    state: &mut SearchState<M>,
    instance: &QapInstance,
    neighborhood: &Neighborhood,
    config: &TabuConfig,
    out: &mut Vec<Candidate>,
) {
    if config.parallel {
        state.par_evaluate(instance, neighborhood, config.incremental, out);
    } else {
        state.evaluate(instance, neighborhood, config.incremental, out);
    }
}

#[cfg(not(feature = "parallel"))]
fn evaluate<M: TabuMemory>(
    state: &mut SearchState<M>,
    instance: &QapInstance,
    neighborhood: &Neighborhood,
    config: &TabuConfig,
    out: &mut Vec<Candidate>,
) {
    state.evaluate(instance, neighborhood, config.incremental, out);
}

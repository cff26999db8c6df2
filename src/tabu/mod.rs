//! Tabu Search (TS) for the QAP.
//!
//! A single-solution trajectory metaheuristic that uses memory structures
//! (the tabu list) to forbid recently used moves, preventing cycling and
//! encouraging exploration of new regions of the search space.
//!
//! The engine explores the full pairwise-exchange neighborhood each
//! iteration. Memory and admissibility are configurable:
//!
//! - [`RecencyMemory`] or [`VisitedSet`] short-term memory
//! - [`FrequencyTable`] long-term memory for [`Admissibility::Frequency`]
//! - fixed or dynamic tenure ([`TenurePolicy`])
//! - four admissibility rules ([`Admissibility`])
//! - an explicit [`FallbackPolicy`] when every move is tabu
//!
//! # References
//!
//! - Glover, F. (1989). "Tabu Search—Part I", *ORSA Journal on Computing* 1(3), 190-206.
//! - Glover, F. (1990). "Tabu Search—Part II", *ORSA Journal on Computing* 2(1), 4-32.
//! - Taillard, É. (1991). "Robust taboo search for the quadratic assignment
//!   problem", *Parallel Computing* 17, 443-455.

mod config;
mod memory;
mod runner;
mod select;
mod types;

pub use config::{Admissibility, FallbackPolicy, MemoryKind, TabuConfig, TenurePolicy};
pub use memory::{FrequencyTable, RecencyMemory, TabuMemory, TenureSchedule, VisitedSet};
pub use runner::{SearchState, TabuResult, TabuRunner};
pub use select::{select_move, Selection};
pub use types::{swap_moves, Candidate, Move, Neighborhood};

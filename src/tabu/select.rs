//! Move selection under the admissibility rules.

use super::config::{Admissibility, FallbackPolicy};
use super::types::Candidate;

/// Outcome of one selection step, holding an index into the candidates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    /// The best move permitted by the strategy.
    Admissible(usize),
    /// A tabu move released by the global aspiration criterion.
    Aspiration(usize),
    /// Nothing was admissible; chosen by the fallback policy.
    Fallback(usize),
}

impl Selection {
    #[inline]
    pub fn index(&self) -> usize {
        match *self {
            Selection::Admissible(i) | Selection::Aspiration(i) | Selection::Fallback(i) => i,
        }
    }

    #[inline]
    pub fn is_fallback(&self) -> bool {
        matches!(self, Selection::Fallback(_))
    }
}

/// Picks a move from `candidates`.
///
/// `current_cost` is the cost of the permutation the candidates were
/// evaluated against and `best_cost` the incumbent cost. Returns `None`
/// only for an empty candidate list.
pub fn select_move(
    candidates: &[Candidate],
    strategy: Admissibility,
    fallback: FallbackPolicy,
    current_cost: i64,
    best_cost: i64,
) -> Option<Selection> {
    if candidates.is_empty() {
        return None;
    }

    let chosen = match strategy {
        Admissibility::Plain => best_where(candidates, |c| !c.is_tabu()).map(Selection::Admissible),
        Admissibility::Frequency => {
            best_where(candidates, |c| !c.is_tabu() || c.frequency > 0).map(Selection::Admissible)
        }
        Admissibility::AspirationLocal => {
            best_where(candidates, |c| !c.is_tabu() || c.cost < current_cost)
                .map(Selection::Admissible)
        }
        Admissibility::AspirationGlobal => {
            let free = best_where(candidates, |c| !c.is_tabu());
            let tabu = best_where(candidates, |c| c.is_tabu());
            match tabu {
                Some(t) if candidates[t].cost < best_cost => Some(Selection::Aspiration(t)),
                _ => free.map(Selection::Admissible),
            }
        }
    };

    chosen.or_else(|| fallback_move(candidates, fallback).map(Selection::Fallback))
}

/// Index of the first minimum-cost candidate satisfying `admissible`.
fn best_where<F>(candidates: &[Candidate], admissible: F) -> Option<usize>
where
    F: Fn(&Candidate) -> bool,
{
    let mut best: Option<usize> = None;
    for (idx, c) in candidates.iter().enumerate() {
        if !admissible(c) {
            continue;
        }
        if best.map_or(true, |b| c.cost < candidates[b].cost) {
            best = Some(idx);
        }
    }
    best
}

fn fallback_move(candidates: &[Candidate], policy: FallbackPolicy) -> Option<usize> {
    let key = |c: &Candidate| match policy {
        FallbackPolicy::LeastTabu => (c.remaining, c.cost),
        FallbackPolicy::BestOverall => (0, c.cost),
    };
    let mut best: Option<usize> = None;
    for (idx, c) in candidates.iter().enumerate() {
        if best.map_or(true, |b| key(c) < key(&candidates[b])) {
            best = Some(idx);
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tabu::Move;

    fn cand(i: usize, j: usize, cost: i64, remaining: usize, frequency: usize) -> Candidate {
        Candidate {
            mv: Move::new(i, j),
            cost,
            remaining,
            frequency,
        }
    }

    fn pick(cands: &[Candidate], strategy: Admissibility, current: i64, best: i64) -> Selection {
        select_move(cands, strategy, FallbackPolicy::LeastTabu, current, best).unwrap()
    }

    #[test]
    fn test_plain_skips_tabu() {
        let cands = [cand(0, 1, 5, 3, 0), cand(0, 2, 8, 0, 0), cand(1, 2, 7, 0, 0)];
        assert_eq!(pick(&cands, Admissibility::Plain, 10, 10), Selection::Admissible(2));
    }

    #[test]
    fn test_ties_keep_first() {
        let cands = [cand(0, 1, 9, 0, 0), cand(0, 2, 4, 0, 0), cand(1, 2, 4, 0, 0)];
        for strategy in Admissibility::ALL {
            assert_eq!(pick(&cands, strategy, 10, 10).index(), 1);
        }
    }

    #[test]
    fn test_frequency_admits_tabu_with_positive_count() {
        let cands = [cand(0, 1, 2, 4, 1), cand(0, 2, 3, 4, 0), cand(1, 2, 6, 0, 0)];
        assert_eq!(
            pick(&cands, Admissibility::Frequency, 10, 10),
            Selection::Admissible(0)
        );
        assert_eq!(pick(&cands, Admissibility::Plain, 10, 10), Selection::Admissible(2));
    }

    #[test]
    fn test_aspiration_global_overrides_tabu() {
        let cands = [cand(0, 1, 3, 2, 0), cand(0, 2, 9, 0, 0), cand(1, 2, 12, 0, 0)];
        assert_eq!(
            pick(&cands, Admissibility::AspirationGlobal, 10, 5),
            Selection::Aspiration(0)
        );
        // not better than the incumbent
        assert_eq!(
            pick(&cands, Admissibility::AspirationGlobal, 10, 3),
            Selection::Admissible(1)
        );
    }

    #[test]
    fn test_aspiration_global_ignores_cheaper_free_move() {
        // the tabu move beats the incumbent, so it wins even over a cheaper free move
        let cands = [cand(0, 1, 4, 2, 0), cand(0, 2, 2, 0, 0), cand(1, 2, 12, 0, 0)];
        assert_eq!(
            pick(&cands, Admissibility::AspirationGlobal, 10, 5),
            Selection::Aspiration(0)
        );
        assert_eq!(
            pick(&cands, Admissibility::AspirationGlobal, 10, 4),
            Selection::Admissible(1)
        );
    }

    #[test]
    fn test_aspiration_local_uses_current_cost() {
        let cands = [cand(0, 1, 8, 2, 0), cand(0, 2, 11, 0, 0), cand(1, 2, 12, 0, 0)];
        // 8 beats the current solution (10) though not the incumbent (5)
        assert_eq!(
            pick(&cands, Admissibility::AspirationLocal, 10, 5),
            Selection::Admissible(0)
        );
        assert_eq!(
            pick(&cands, Admissibility::AspirationGlobal, 10, 5),
            Selection::Admissible(1)
        );
    }

    #[test]
    fn test_fallback_least_tabu() {
        let cands = [cand(0, 1, 1, 6, 0), cand(0, 2, 9, 2, 0), cand(1, 2, 4, 2, 0)];
        assert_eq!(pick(&cands, Admissibility::Plain, 10, 10), Selection::Fallback(2));
    }

    #[test]
    fn test_fallback_best_overall() {
        let cands = [cand(0, 1, 1, 6, 0), cand(0, 2, 9, 2, 0), cand(1, 2, 1, 2, 0)];
        let sel = select_move(&cands, Admissibility::Plain, FallbackPolicy::BestOverall, 10, 10);
        assert_eq!(sel, Some(Selection::Fallback(0)));
    }

    #[test]
    fn test_empty_candidates() {
        assert!(select_move(&[], Admissibility::Plain, FallbackPolicy::LeastTabu, 0, 0).is_none());
    }
}

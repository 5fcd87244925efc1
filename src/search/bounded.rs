//! Depth-limited alpha-beta search.
//!
//! Searches `depth` plies below the root and scores every non-terminal
//! frontier node with the supplied evaluator. The evaluator is passed down
//! explicitly, so concurrent searches with different heuristics never
//! interfere.

use log::debug;

use crate::board::GameState;
use crate::eval::Evaluator;

use super::{successors, SearchError, SearchResult, Side};

/// Per-call context: the frontier evaluator and a node counter.
struct Bounded<'e, E: ?Sized> {
    evaluator: &'e E,
    nodes: u64,
}

impl<E: ?Sized> Bounded<'_, E> {
    fn search<S>(
        &mut self,
        state: &S,
        depth: u32,
        side: Side,
        mut alpha: f64,
        mut beta: f64,
    ) -> Result<(f64, Option<S>), SearchError>
    where
        S: GameState,
        E: Evaluator<S>,
    {
        self.nodes += 1;
        if state.is_terminal() {
            return Ok((state.score(), None));
        }
        if depth == 0 {
            return Ok((self.evaluator.evaluate(state), None));
        }

        let mut value = side.worst();
        let mut best_move = None;
        for child in successors(state)? {
            let (child_value, _) = self.search(&child, depth - 1, side.opponent(), alpha, beta)?;
            if side.improves(child_value, value) {
                value = child_value;
                best_move = Some(child);
            }
            if side.tighten(value, &mut alpha, &mut beta) {
                return Ok((value, None));
            }
        }
        Ok((value, best_move))
    }
}

/// Depth-limited search inside an explicit `(alpha, beta)` window.
pub fn bounded_within<S, E>(
    state: &S,
    evaluator: &E,
    depth: u32,
    side: Side,
    alpha: f64,
    beta: f64,
) -> Result<SearchResult<S>, SearchError>
where
    S: GameState,
    E: Evaluator<S> + ?Sized,
{
    let mut ctx = Bounded { evaluator, nodes: 0 };
    let (value, best_move) = ctx.search(state, depth, side, alpha, beta)?;
    debug!(
        "bounded {:?} depth={}: value={} nodes={}",
        side, depth, value, ctx.nodes
    );
    Ok(SearchResult {
        value,
        best_move,
        nodes: ctx.nodes,
    })
}

/// Depth-limited search with the full window.
///
/// At `depth == 0` a non-terminal state is scored by `evaluator` alone;
/// terminal states always return their score.
pub fn bounded_search<S, E>(
    state: &S,
    evaluator: &E,
    depth: u32,
    side: Side,
) -> Result<SearchResult<S>, SearchError>
where
    S: GameState,
    E: Evaluator<S> + ?Sized,
{
    bounded_within(state, evaluator, depth, side, f64::NEG_INFINITY, f64::INFINITY)
}

pub fn bounded_max<S, E>(state: &S, evaluator: &E, depth: u32) -> Result<SearchResult<S>, SearchError>
where
    S: GameState,
    E: Evaluator<S> + ?Sized,
{
    bounded_search(state, evaluator, depth, Side::Max)
}

pub fn bounded_min<S, E>(state: &S, evaluator: &E, depth: u32) -> Result<SearchResult<S>, SearchError>
where
    S: GameState,
    E: Evaluator<S> + ?Sized,
{
    bounded_search(state, evaluator, depth, Side::Min)
}

#[cfg(test)]
mod tests {
    use std::cell::Cell as Counter;

    use super::*;
    use crate::board::{KnightBoard, Location, Player};
    use crate::eval::{advanced_heuristic, base_heuristic, Heuristic};
    use crate::search::exact::{alphabeta_max, maximin};

    fn open_five() -> KnightBoard {
        KnightBoard::open(5, 5, (2, 2), (0, 0), Player::One).unwrap()
    }

    #[test]
    fn depth_zero_is_heuristic_value() {
        let state = open_five();
        let result = bounded_max(&state, &Heuristic::Base, 0).unwrap();
        assert_eq!(result.value, base_heuristic(&state));
        assert!(result.best_move.is_none());
        assert_eq!(result.nodes, 1);
    }

    #[test]
    fn depth_zero_evaluates_once() {
        let state = open_five();
        let calls = Counter::new(0);
        let counting = |s: &KnightBoard| {
            calls.set(calls.get() + 1);
            advanced_heuristic(s)
        };
        let result = bounded_min(&state, &counting, 0).unwrap();
        assert_eq!(calls.get(), 1);
        assert_eq!(result.value, advanced_heuristic(&state));
    }

    #[test]
    fn terminal_ignores_depth_and_heuristic() {
        let mut state = KnightBoard::open(3, 3, (0, 1), (2, 1), Player::One).unwrap();
        let cells: Vec<Location> = state.grid().locations().collect();
        for loc in cells {
            state.block(loc);
        }
        let calls = Counter::new(0);
        let counting = |_: &KnightBoard| {
            calls.set(calls.get() + 1);
            0.0
        };
        for depth in [0, 1, 5] {
            let result = bounded_max(&state, &counting, depth).unwrap();
            assert_eq!(result.value, state.score());
            assert!(result.best_move.is_none());
        }
        assert_eq!(calls.get(), 0);
    }

    #[test]
    fn depth_one_picks_best_heuristic_child() {
        let state = open_five();
        let result = bounded_max(&state, &Heuristic::Base, 1).unwrap();
        let best = result.best_move.unwrap();

        let children = state.moves();
        let mut expected = f64::NEG_INFINITY;
        let mut expected_child = None;
        for child in &children {
            let v = if child.is_terminal() {
                child.score()
            } else {
                base_heuristic(child)
            };
            if v > expected {
                expected = v;
                expected_child = Some(child.clone());
            }
        }
        assert_eq!(result.value, expected);
        assert_eq!(Some(best), expected_child);
    }

    #[test]
    fn deep_enough_matches_exact() {
        // 3x3 games end within a handful of plies, so depth 16 never hits
        // the frontier.
        let state = KnightBoard::open(3, 3, (0, 1), (2, 1), Player::One).unwrap();
        let never = |_: &KnightBoard| -> f64 { panic!("frontier reached") };
        let bounded = bounded_max(&state, &never, 16).unwrap();
        assert_eq!(bounded.value, maximin(&state).unwrap().value);
        assert_eq!(bounded.nodes, alphabeta_max(&state).unwrap().nodes);
    }

    #[test]
    fn pruning_matches_unpruned_depth_limited_value() {
        let state = KnightBoard::open(6, 6, (2, 2), (3, 4), Player::One).unwrap();
        let pruned = bounded_max(&state, &Heuristic::Advanced, 3).unwrap();

        // Plain depth-limited minimax as the reference.
        fn full(state: &KnightBoard, depth: u32, side: Side) -> f64 {
            if state.is_terminal() {
                return state.score();
            }
            if depth == 0 {
                return advanced_heuristic(state);
            }
            let values = state.moves().into_iter().map(|c| full(&c, depth - 1, side.opponent()));
            match side {
                Side::Max => values.fold(f64::NEG_INFINITY, f64::max),
                Side::Min => values.fold(f64::INFINITY, f64::min),
            }
        }

        assert_eq!(pruned.value, full(&state, 3, Side::Max));
        let unpruned_nodes: u64 = {
            fn count(state: &KnightBoard, depth: u32) -> u64 {
                if state.is_terminal() || depth == 0 {
                    return 1;
                }
                1 + state.moves().iter().map(|c| count(c, depth - 1)).sum::<u64>()
            }
            count(&state, 3)
        };
        assert!(pruned.nodes < unpruned_nodes);
    }

    #[test]
    fn state_is_not_mutated() {
        let state = open_five();
        let before = state.clone();
        let _ = bounded_max(&state, &Heuristic::Advanced, 2).unwrap();
        assert_eq!(state, before);
    }
}

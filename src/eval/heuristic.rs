//! Heuristic position evaluation.
//!
//! Scores a non-terminal position from player one's perspective: positive
//! values favor player one, negative values favor player two. Both
//! evaluators take the state by shared reference and probe each player's
//! mobility through [`GameState::mobility`], so the side to move is never
//! changed on the caller's state.

use serde::{Deserialize, Serialize};

use crate::board::{GameState, Location, Player};

use super::territory::{position_penalty, reachable_within};

/// Mobility difference: legal moves of player one minus those of player
/// two, ignoring whose turn it is.
pub fn base_heuristic<S: GameState>(state: &S) -> f64 {
    let p1_moves = state.mobility(Player::One) as f64;
    let p2_moves = state.mobility(Player::Two) as f64;
    p1_moves - p2_moves
}

/// Weights and thresholds of the advanced heuristic.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdvancedWeights {
    pub mobility: f64,
    pub centrality: f64,
    pub position: f64,
    pub territory: f64,
    /// Knight-jump horizon for the territory count.
    pub territory_depth: u32,
    /// Bonus when the opponent is down to `severe_threshold` moves or fewer.
    pub block_bonus: f64,
    /// Penalty when we are down to `severe_threshold` moves or fewer.
    pub block_severe_penalty: f64,
    /// Penalty when we are down to `tight_threshold` moves or fewer.
    pub block_tight_penalty: f64,
    pub severe_threshold: usize,
    pub tight_threshold: usize,
}

impl Default for AdvancedWeights {
    fn default() -> Self {
        AdvancedWeights {
            mobility: 10.0,
            centrality: 3.0,
            position: 5.0,
            territory: 2.0,
            territory_depth: 2,
            block_bonus: 15.0,
            block_severe_penalty: 15.0,
            block_tight_penalty: 8.0,
            severe_threshold: 2,
            tight_threshold: 4,
        }
    }
}

/// Breakdown of an advanced evaluation, one signed term per signal.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AdvancedTerms {
    pub mobility: f64,
    pub centrality: f64,
    pub position: f64,
    pub territory: f64,
    pub blocking: f64,
}

impl AdvancedTerms {
    pub fn total(&self) -> f64 {
        self.mobility + self.centrality + self.position + self.territory + self.blocking
    }
}

/// Weighted multi-factor evaluation with the default weights.
pub fn advanced_heuristic<S: GameState>(state: &S) -> f64 {
    advanced_terms(state, &AdvancedWeights::default()).total()
}

/// Weighted multi-factor evaluation with explicit weights.
pub fn advanced_heuristic_with<S: GameState>(state: &S, weights: &AdvancedWeights) -> f64 {
    advanced_terms(state, weights).total()
}

/// Computes each signed term of the advanced evaluation.
///
/// - mobility: `(p1 - p2) * mobility`
/// - centrality: Manhattan distance to the board center, `(d2 - d1) * centrality`
/// - position: rim penalty, `(pen2 - pen1) * position`
/// - territory: cells within `territory_depth` jumps, `(t1 - t2) * territory`
/// - blocking: opponent bonus and own penalty ladders, applied independently
pub fn advanced_terms<S: GameState>(state: &S, weights: &AdvancedWeights) -> AdvancedTerms {
    let locations = state.player_locations();
    let p1_location = locations.one;
    let p2_location = locations.two;
    let grid = state.grid();
    let rows = grid.rows();
    let cols = grid.cols();

    let p1_moves = state.mobility(Player::One);
    let p2_moves = state.mobility(Player::Two);
    let mobility = (p1_moves as f64 - p2_moves as f64) * weights.mobility;

    let p1_dist = center_distance(p1_location, rows, cols);
    let p2_dist = center_distance(p2_location, rows, cols);
    let centrality = (p2_dist - p1_dist) * weights.centrality;

    let p1_penalty = position_penalty(p1_location, rows, cols) as f64;
    let p2_penalty = position_penalty(p2_location, rows, cols) as f64;
    let position = (p2_penalty - p1_penalty) * weights.position;

    let p1_territory = reachable_within(state, p1_location, weights.territory_depth) as f64;
    let p2_territory = reachable_within(state, p2_location, weights.territory_depth) as f64;
    let territory = (p1_territory - p2_territory) * weights.territory;

    let mut blocking = 0.0;
    if p2_moves <= weights.severe_threshold {
        blocking += weights.block_bonus;
    }
    if p1_moves <= weights.severe_threshold {
        blocking -= weights.block_severe_penalty;
    } else if p1_moves <= weights.tight_threshold {
        blocking -= weights.block_tight_penalty;
    }

    AdvancedTerms {
        mobility,
        centrality,
        position,
        territory,
        blocking,
    }
}

/// Manhattan distance from `loc` to the (possibly fractional) grid center.
fn center_distance(loc: Location, rows: usize, cols: usize) -> f64 {
    let center_row = (rows as f64 - 1.0) / 2.0;
    let center_col = (cols as f64 - 1.0) / 2.0;
    (loc.row as f64 - center_row).abs() + (loc.col as f64 - center_col).abs()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::KnightBoard;

    fn board(size: usize, one: (usize, usize), two: (usize, usize)) -> KnightBoard {
        KnightBoard::open(size, size, one, two, Player::One).unwrap()
    }

    #[test]
    fn base_is_mobility_difference() {
        let state = board(5, (2, 2), (0, 0));
        assert_eq!(base_heuristic(&state), 6.0);
        let state = board(5, (0, 0), (2, 2));
        assert_eq!(base_heuristic(&state), -6.0);
    }

    #[test]
    fn base_ignores_turn() {
        let one = board(8, (4, 4), (1, 1));
        let mut two = one.clone();
        two.set_current_player(Player::Two);
        assert_eq!(base_heuristic(&one), base_heuristic(&two));
    }

    #[test]
    fn base_leaves_current_player() {
        let mut state = board(6, (3, 3), (0, 5));
        state.set_current_player(Player::Two);
        let _ = base_heuristic(&state);
        assert_eq!(state.current_player(), Player::Two);
    }

    #[test]
    fn center_distance_on_even_board() {
        assert_eq!(center_distance(Location::new(0, 0), 8, 8), 7.0);
        assert_eq!(center_distance(Location::new(3, 4), 8, 8), 1.0);
        assert_eq!(center_distance(Location::new(2, 2), 5, 5), 0.0);
    }

    #[test]
    fn center_beats_corner() {
        let state = board(8, (5, 5), (0, 0));
        assert!(advanced_heuristic(&state) > 0.0);
        let state = board(8, (0, 0), (5, 5));
        assert!(advanced_heuristic(&state) < 0.0);
    }

    #[test]
    fn terms_for_center_vs_corner() {
        let state = board(8, (5, 5), (0, 0));
        let terms = advanced_terms(&state, &AdvancedWeights::default());
        // 8 moves against 2
        assert_eq!(terms.mobility, 60.0);
        // distances 3 and 7 from (3.5, 3.5)
        assert_eq!(terms.centrality, 12.0);
        assert_eq!(terms.position, 15.0);
        // opponent is at the severe threshold, we are free
        assert_eq!(terms.blocking, 15.0);
        assert!(terms.territory > 0.0);
        assert_eq!(terms.total(), advanced_heuristic(&state));
    }

    #[test]
    fn blocking_terms_stack() {
        // Both knights cornered: each has two moves, so the bonus and the
        // severe penalty both apply and cancel.
        let state = board(8, (0, 0), (7, 7));
        let terms = advanced_terms(&state, &AdvancedWeights::default());
        assert_eq!(terms.blocking, 0.0);

        // Player one on an edge with four moves, player two free.
        let state = board(8, (0, 3), (4, 4));
        let terms = advanced_terms(&state, &AdvancedWeights::default());
        assert_eq!(terms.blocking, -8.0);
    }

    #[test]
    fn consistent_across_turns() {
        let one = board(8, (4, 4), (1, 1));
        let mut two = one.clone();
        two.set_current_player(Player::Two);
        assert_eq!(advanced_heuristic(&one), advanced_heuristic(&two));
    }

    #[test]
    fn custom_weights_scale_terms() {
        let state = board(8, (5, 5), (0, 0));
        let weights = AdvancedWeights {
            mobility: 1.0,
            centrality: 0.0,
            position: 0.0,
            territory: 0.0,
            block_bonus: 0.0,
            block_severe_penalty: 0.0,
            block_tight_penalty: 0.0,
            ..AdvancedWeights::default()
        };
        assert_eq!(advanced_heuristic_with(&state, &weights), base_heuristic(&state));
    }

    #[test]
    fn weights_from_partial_json() {
        let weights: AdvancedWeights = serde_json::from_str(r#"{"mobility": 4.0}"#).unwrap();
        assert_eq!(weights.mobility, 4.0);
        assert_eq!(weights.centrality, 3.0);
        assert_eq!(weights.territory_depth, 2);
    }
}

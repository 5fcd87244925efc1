//! Adversarial game-tree search.
//!
//! Exact minimax and alpha-beta search to terminal states, and a
//! depth-limited alpha-beta search that falls back to a heuristic at the
//! frontier. Each engine is a single recursive routine parameterized by the
//! [`Side`] to move; player one is always the maximizer.

pub mod bounded;
pub mod config;
pub mod exact;

use crate::board::{GameState, Player};

pub use bounded::{bounded_max, bounded_min, bounded_search, bounded_within};
pub use config::{Algorithm, ConfigError, SearchConfig, DEFAULT_DEPTH};
pub use exact::{
    alphabeta_max, alphabeta_min, alphabeta_search, alphabeta_within, maximin, minimax,
    minimax_search,
};

/// Failures of a search call. Both abort the whole call.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SearchError {
    /// A state claimed to be non-terminal but produced no successors.
    #[error("non-terminal state produced no successor states")]
    NoSuccessors,

    /// Bounded search was configured without a frontier heuristic.
    #[error("bounded search to depth {depth} requires a heuristic")]
    MissingHeuristic { depth: u32 },
}

/// Which extreme the side to move is after.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Max,
    Min,
}

impl Side {
    /// Player one maximizes, player two minimizes.
    pub const fn for_player(player: Player) -> Side {
        match player {
            Player::One => Side::Max,
            Player::Two => Side::Min,
        }
    }

    pub const fn opponent(self) -> Side {
        match self {
            Side::Max => Side::Min,
            Side::Min => Side::Max,
        }
    }

    /// Starting value before any child has been seen.
    #[inline]
    pub const fn worst(self) -> f64 {
        match self {
            Side::Max => f64::NEG_INFINITY,
            Side::Min => f64::INFINITY,
        }
    }

    /// Strict improvement test; the first child to reach a value keeps it.
    #[inline]
    pub fn improves(self, candidate: f64, best: f64) -> bool {
        match self {
            Side::Max => candidate > best,
            Side::Min => candidate < best,
        }
    }

    /// Folds `value` into the window and reports whether the node is cut off.
    #[inline]
    pub(crate) fn tighten(self, value: f64, alpha: &mut f64, beta: &mut f64) -> bool {
        match self {
            Side::Max => {
                *alpha = alpha.max(value);
                value >= *beta
            }
            Side::Min => {
                *beta = beta.min(value);
                value <= *alpha
            }
        }
    }
}

/// Outcome of a search call.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResult<S> {
    /// Exact game value, or heuristic estimate for bounded search.
    pub value: f64,
    /// Best immediate successor. None at a terminal or frontier node.
    pub best_move: Option<S>,
    /// States visited, the root included.
    pub nodes: u64,
}

/// Expands a non-terminal state, rejecting an empty successor list.
#[inline]
pub(crate) fn successors<S: GameState>(state: &S) -> Result<Vec<S>, SearchError> {
    let children = state.moves();
    if children.is_empty() {
        return Err(SearchError::NoSuccessors);
    }
    Ok(children)
}

/// Runs the engine selected by `config` from `state` for `side`.
pub fn search<S: GameState>(
    state: &S,
    config: &SearchConfig,
    side: Side,
) -> Result<SearchResult<S>, SearchError> {
    match config.algorithm {
        Algorithm::Minimax => minimax_search(state, side),
        Algorithm::AlphaBeta => alphabeta_search(state, side),
        Algorithm::Bounded => {
            let heuristic = config.heuristic.ok_or(SearchError::MissingHeuristic {
                depth: config.depth,
            })?;
            bounded_search(state, &heuristic, config.depth, side)
        }
    }
}

//! Engine state management.
//!
//! Holds the current position and string options, builds a
//! [`SearchConfig`] from them and runs the configured search for the side
//! to move.

use std::collections::HashMap;

use log::{debug, info};

use crate::board::{GameState, KnightBoard};
use crate::eval::{Heuristic, UnknownHeuristic};
use crate::protocol::notation::{parse_notation, NotationError};
use crate::search::config::UnknownAlgorithm;
use crate::search::{search, Algorithm, SearchConfig, SearchError, SearchResult, Side};

/// Errors surfaced by the engine front.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("no position set")]
    NoPosition,

    #[error("failed to parse position: {0}")]
    Notation(#[from] NotationError),

    #[error("invalid value '{value}' for option {name}")]
    InvalidOption { name: String, value: String },

    #[error(transparent)]
    Algorithm(#[from] UnknownAlgorithm),

    #[error(transparent)]
    Heuristic(#[from] UnknownHeuristic),

    #[error(transparent)]
    Search(#[from] SearchError),
}

/// Holds the mutable state of the engine between commands.
#[derive(Debug, Default)]
pub struct Engine {
    pub position: Option<KnightBoard>,
    pub options: HashMap<String, String>,
}

impl Engine {
    /// Creates an engine with no position and default options.
    pub fn new() -> Self {
        Engine::default()
    }

    /// Clears the position for a new game. Options are kept.
    pub fn new_game(&mut self) {
        self.position = None;
    }

    /// Sets the current position from board notation.
    pub fn set_position(&mut self, notation: &str) -> Result<(), EngineError> {
        let board = parse_notation(notation)?;
        self.position = Some(board);
        Ok(())
    }

    /// Sets an engine option. Recognized names: `Algorithm`, `Heuristic`,
    /// `Depth`. Values are validated when the configuration is built.
    pub fn set_option(&mut self, name: impl Into<String>, value: Option<String>) {
        self.options.insert(name.into(), value.unwrap_or_default());
    }

    /// Builds the search configuration from the options, falling back to
    /// [`SearchConfig::default`] for anything unset.
    ///
    /// `Heuristic` set to `none` clears the heuristic.
    pub fn config(&self) -> Result<SearchConfig, EngineError> {
        let mut config = SearchConfig::default();

        if let Some(v) = self.options.get("Algorithm") {
            config.algorithm = v.parse::<Algorithm>()?;
        }
        if let Some(v) = self.options.get("Heuristic") {
            config.heuristic = if v.trim().eq_ignore_ascii_case("none") {
                None
            } else {
                Some(v.parse::<Heuristic>()?)
            };
        }
        if let Some(v) = self.options.get("Depth") {
            config.depth = v.trim().parse::<u32>().map_err(|_| EngineError::InvalidOption {
                name: "Depth".to_string(),
                value: v.clone(),
            })?;
        }

        config.validate()?;
        Ok(config)
    }

    /// Searches the current position for the side to move.
    pub fn go(&self) -> Result<SearchResult<KnightBoard>, EngineError> {
        let state = self.position.as_ref().ok_or(EngineError::NoPosition)?;
        let config = self.config()?;
        let side = Side::for_player(state.current_player());
        debug!(
            "go: {} heuristic={:?} depth={} side={:?}",
            config.algorithm, config.heuristic, config.depth, side
        );
        let result = search(state, &config, side)?;
        info!(
            "search done: value={} nodes={} move={}",
            result.value,
            result.nodes,
            result.best_move.is_some()
        );
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Location, Player};
    use crate::eval::base_heuristic;

    #[test]
    fn go_without_position_fails() {
        let engine = Engine::new();
        assert!(matches!(engine.go(), Err(EngineError::NoPosition)));
    }

    #[test]
    fn set_position_rejects_bad_notation() {
        let mut engine = Engine::new();
        assert!(matches!(
            engine.set_position("garbage"),
            Err(EngineError::Notation(NotationError::MissingSide(_)))
        ));
        assert!(engine.position.is_none());
    }

    #[test]
    fn default_config() {
        let engine = Engine::new();
        assert_eq!(engine.config().unwrap(), SearchConfig::default());
    }

    #[test]
    fn options_build_config() {
        let mut engine = Engine::new();
        engine.set_option("Algorithm", Some("bounded".to_string()));
        engine.set_option("Heuristic", Some("base".to_string()));
        engine.set_option("Depth", Some("0".to_string()));
        assert_eq!(
            engine.config().unwrap(),
            SearchConfig::bounded(Heuristic::Base, 0)
        );
    }

    #[test]
    fn invalid_options_are_reported() {
        let mut engine = Engine::new();
        engine.set_option("Depth", Some("deep".to_string()));
        assert!(matches!(
            engine.config(),
            Err(EngineError::InvalidOption { .. })
        ));

        let mut engine = Engine::new();
        engine.set_option("Algorithm", Some("mcts".to_string()));
        assert!(matches!(engine.config(), Err(EngineError::Algorithm(_))));

        let mut engine = Engine::new();
        engine.set_option("Heuristic", Some("none".to_string()));
        assert!(matches!(
            engine.config(),
            Err(EngineError::Search(SearchError::MissingHeuristic { depth: 3 }))
        ));
    }

    #[test]
    fn go_depth_zero_returns_heuristic() {
        let mut engine = Engine::new();
        engine.set_position("..2../...../..1../...../..... 1").unwrap();
        engine.set_option("Heuristic", Some("base".to_string()));
        engine.set_option("Depth", Some("0".to_string()));
        let result = engine.go().unwrap();
        let state = engine.position.as_ref().unwrap();
        assert_eq!(result.value, base_heuristic(state));
        assert!(result.best_move.is_none());
    }

    #[test]
    fn go_exact_for_player_two() {
        let mut engine = Engine::new();
        engine.set_position("1#../.#../...2 2").unwrap();
        engine.set_option("Algorithm", Some("alphabeta".to_string()));
        let result = engine.go().unwrap();
        let best = result.best_move.unwrap();
        assert_eq!(best.current_player(), Player::One);
        assert_ne!(best.location(Player::Two), Location::new(2, 3));
    }

    #[test]
    fn new_game_keeps_options() {
        let mut engine = Engine::new();
        engine.set_position(".1./.../.2. 1").unwrap();
        engine.set_option("Depth", Some("2".to_string()));
        engine.new_game();
        assert!(engine.position.is_none());
        assert_eq!(engine.config().unwrap().depth, 2);
    }
}

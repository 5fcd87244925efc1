//! Search configuration.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::eval::Heuristic;

use super::SearchError;

/// Default depth budget for bounded search.
pub const DEFAULT_DEPTH: u32 = 3;

/// Engine variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Algorithm {
    /// Exhaustive minimax to terminal states.
    Minimax,
    /// Alpha-beta to terminal states.
    AlphaBeta,
    /// Depth-limited alpha-beta with a frontier heuristic.
    Bounded,
}

impl Algorithm {
    pub const fn name(self) -> &'static str {
        match self {
            Algorithm::Minimax => "minimax",
            Algorithm::AlphaBeta => "alphabeta",
            Algorithm::Bounded => "bounded",
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error for an unrecognized algorithm name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown algorithm '{0}' (expected 'minimax', 'alphabeta' or 'bounded')")]
pub struct UnknownAlgorithm(pub String);

impl FromStr for Algorithm {
    type Err = UnknownAlgorithm;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "minimax" => Ok(Algorithm::Minimax),
            "alphabeta" | "alpha_beta" | "alpha-beta" => Ok(Algorithm::AlphaBeta),
            "bounded" => Ok(Algorithm::Bounded),
            _ => Err(UnknownAlgorithm(s.to_string())),
        }
    }
}

/// Which engine to run and, for bounded search, how.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    pub algorithm: Algorithm,
    /// Frontier heuristic. Required by [`Algorithm::Bounded`].
    pub heuristic: Option<Heuristic>,
    /// Depth budget in plies. Only used by [`Algorithm::Bounded`].
    pub depth: u32,
}

impl Default for SearchConfig {
    fn default() -> Self {
        SearchConfig {
            algorithm: Algorithm::Bounded,
            heuristic: Some(Heuristic::Advanced),
            depth: DEFAULT_DEPTH,
        }
    }
}

impl SearchConfig {
    /// Exact alpha-beta, no heuristic.
    pub fn exact() -> Self {
        SearchConfig {
            algorithm: Algorithm::AlphaBeta,
            heuristic: None,
            depth: 0,
        }
    }

    /// Bounded search with the given heuristic and depth.
    pub fn bounded(heuristic: Heuristic, depth: u32) -> Self {
        SearchConfig {
            algorithm: Algorithm::Bounded,
            heuristic: Some(heuristic),
            depth,
        }
    }

    /// Rejects a bounded configuration without a heuristic.
    pub fn validate(&self) -> Result<(), SearchError> {
        if self.algorithm == Algorithm::Bounded && self.heuristic.is_none() {
            return Err(SearchError::MissingHeuristic { depth: self.depth });
        }
        Ok(())
    }

    /// Parses and validates a JSON configuration. Missing fields take
    /// their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: SearchConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }
}

/// Errors from loading a search configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to parse search config JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Invalid(#[from] SearchError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_bounded_advanced() {
        let config = SearchConfig::default();
        assert_eq!(config.algorithm, Algorithm::Bounded);
        assert_eq!(config.heuristic, Some(Heuristic::Advanced));
        assert_eq!(config.depth, 3);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn from_json_fills_defaults() {
        let config = SearchConfig::from_json(r#"{"depth": 5, "heuristic": "base"}"#).unwrap();
        assert_eq!(config, SearchConfig::bounded(Heuristic::Base, 5));

        let config = SearchConfig::from_json(r#"{"algorithm": "alpha_beta", "heuristic": null}"#)
            .unwrap();
        assert_eq!(config.algorithm, Algorithm::AlphaBeta);
        assert_eq!(config.heuristic, None);
    }

    #[test]
    fn from_json_rejects_bounded_without_heuristic() {
        let err = SearchConfig::from_json(r#"{"algorithm": "bounded", "heuristic": null}"#)
            .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid(SearchError::MissingHeuristic { depth: 3 })
        ));
    }

    #[test]
    fn from_json_rejects_garbage() {
        let err = SearchConfig::from_json(r#"{"algorithm": "greedy"}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Json(_)));
    }

    #[test]
    fn parse_algorithm_names() {
        assert_eq!("minimax".parse::<Algorithm>(), Ok(Algorithm::Minimax));
        assert_eq!("AlphaBeta".parse::<Algorithm>(), Ok(Algorithm::AlphaBeta));
        assert_eq!("alpha-beta".parse::<Algorithm>(), Ok(Algorithm::AlphaBeta));
        assert_eq!("bounded".parse::<Algorithm>(), Ok(Algorithm::Bounded));
        assert!("expectimax".parse::<Algorithm>().is_err());
        assert_eq!(Algorithm::AlphaBeta.to_string(), "alphabeta");
    }
}

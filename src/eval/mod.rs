//! Position evaluation.
//!
//! Static estimates of positional advantage used at the depth cutoff of
//! bounded search. Strategies are named and picked explicitly by the caller
//! through [`Heuristic`]; any `Fn(&S) -> f64` also works as an evaluator.

pub mod heuristic;
pub mod territory;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::board::GameState;

pub use heuristic::{
    advanced_heuristic, advanced_heuristic_with, advanced_terms, base_heuristic, AdvancedTerms,
    AdvancedWeights,
};
pub use territory::{position_penalty, reachable_on_grid, reachable_within};

/// Scores a non-terminal state. Positive favors player one.
pub trait Evaluator<S> {
    fn evaluate(&self, state: &S) -> f64;
}

impl<S, F> Evaluator<S> for F
where
    F: Fn(&S) -> f64,
{
    #[inline]
    fn evaluate(&self, state: &S) -> f64 {
        self(state)
    }
}

impl<S: GameState> Evaluator<S> for AdvancedWeights {
    fn evaluate(&self, state: &S) -> f64 {
        advanced_heuristic_with(state, self)
    }
}

/// Named evaluation strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Heuristic {
    /// Mobility difference.
    Base,
    /// Weighted mobility, centrality, rim, territory and blocking terms.
    Advanced,
}

impl Heuristic {
    pub const fn name(self) -> &'static str {
        match self {
            Heuristic::Base => "base",
            Heuristic::Advanced => "advanced",
        }
    }
}

impl<S: GameState> Evaluator<S> for Heuristic {
    fn evaluate(&self, state: &S) -> f64 {
        match self {
            Heuristic::Base => base_heuristic(state),
            Heuristic::Advanced => advanced_heuristic(state),
        }
    }
}

impl fmt::Display for Heuristic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error for an unrecognized heuristic name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown heuristic '{0}' (expected 'base' or 'advanced')")]
pub struct UnknownHeuristic(pub String);

impl FromStr for Heuristic {
    type Err = UnknownHeuristic;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "base" => Ok(Heuristic::Base),
            "advanced" => Ok(Heuristic::Advanced),
            _ => Err(UnknownHeuristic(s.to_string())),
        }
    }
}

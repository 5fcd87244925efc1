//! Isoknight engine library.
//!
//! Game-tree search for the isolation-knight game: exact minimax, alpha-beta
//! pruning, and depth-limited search with heuristic evaluation. Exposes the
//! board representation, evaluators, search engines, position notation, the
//! engine front and self-play game generation.

pub mod board;
pub mod engine;
pub mod eval;
pub mod movegen;
pub mod protocol;
pub mod search;
pub mod selfplay;

//! Board representation and game-state types.
//!
//! Contains the grid, players, locations, the [`GameState`] contract the
//! search engines consume, and the isolation-knight board implementing it.

pub mod grid;
pub mod state;

pub use grid::{Cell, Grid, Location, Player, ALL_PLAYERS};
pub use state::{BoardError, GameState, KnightBoard, PlayerLocations, WIN_SCORE};

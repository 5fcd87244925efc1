//! Game state representation.
//!
//! The search engines only see the [`GameState`] trait: a node of the
//! implicit game tree that can report whether it is finished, score itself
//! when it is, and list its successor states. [`KnightBoard`] is the
//! isolation-knight implementation used throughout the crate.

use super::grid::{Cell, Grid, Location, Player};
use crate::movegen;

/// Score magnitude of a decided game. Positive favors player one.
pub const WIN_SCORE: f64 = 1000.0;

/// Errors raised when constructing a board.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BoardError {
    #[error("player {player:?} location ({}, {}) is outside the {rows}x{cols} grid", .location.row, .location.col)]
    OutOfBounds {
        player: Player,
        location: Location,
        rows: usize,
        cols: usize,
    },

    #[error("both players are placed on ({}, {})", .0.row, .0.col)]
    SharedCell(Location),

    #[error("player {0:?} is placed on a blocked cell")]
    OnBlockedCell(Player),
}

/// Positions of both knights.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PlayerLocations {
    pub one: Location,
    pub two: Location,
}

impl PlayerLocations {
    #[inline]
    pub fn of(&self, player: Player) -> Location {
        match player {
            Player::One => self.one,
            Player::Two => self.two,
        }
    }
}

/// A node of the game tree as seen by the search engines.
///
/// Player one is the maximizing side: `score` is positive when player one
/// has won.
pub trait GameState: Clone {
    /// True iff the side to move has no legal move.
    fn is_terminal(&self) -> bool;

    /// Signed outcome of a finished game. Only meaningful when terminal.
    fn score(&self) -> f64;

    /// Successor states for the side to move, in generation order.
    fn moves(&self) -> Vec<Self>;

    fn player_locations(&self) -> PlayerLocations;

    fn current_player(&self) -> Player;

    fn set_current_player(&mut self, player: Player);

    /// Legal destinations for the current player.
    fn potential_moves(&self) -> Vec<Location>;

    fn grid(&self) -> &Grid;

    /// Legal destinations for `player` regardless of whose turn it is.
    ///
    /// The default probes a private snapshot, so the receiver is never
    /// touched.
    fn potential_moves_for(&self, player: Player) -> Vec<Location> {
        if self.current_player() == player {
            return self.potential_moves();
        }
        let mut probe = self.clone();
        probe.set_current_player(player);
        probe.potential_moves()
    }

    /// Number of legal destinations for `player`.
    fn mobility(&self, player: Player) -> usize {
        self.potential_moves_for(player).len()
    }
}

/// Isolation-knight position: grid, both knights, and the side to move.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KnightBoard {
    grid: Grid,
    locations: [Location; 2],
    turn: Player,
}

impl KnightBoard {
    /// Places both knights on `grid`. Their cells must be in bounds,
    /// distinct and not blocked.
    pub fn new(
        mut grid: Grid,
        one: Location,
        two: Location,
        turn: Player,
    ) -> Result<Self, BoardError> {
        for (player, location) in [(Player::One, one), (Player::Two, two)] {
            match grid.get(location) {
                None => {
                    return Err(BoardError::OutOfBounds {
                        player,
                        location,
                        rows: grid.rows(),
                        cols: grid.cols(),
                    })
                }
                Some(Cell::Blocked) => return Err(BoardError::OnBlockedCell(player)),
                Some(_) => {}
            }
        }
        if one == two {
            return Err(BoardError::SharedCell(one));
        }
        grid.set(one, Cell::Player(Player::One));
        grid.set(two, Cell::Player(Player::Two));
        Ok(KnightBoard {
            grid,
            locations: [one, two],
            turn,
        })
    }

    /// Convenience constructor on an otherwise empty grid.
    pub fn open(
        rows: usize,
        cols: usize,
        one: impl Into<Location>,
        two: impl Into<Location>,
        turn: Player,
    ) -> Result<Self, BoardError> {
        KnightBoard::new(Grid::empty(rows, cols), one.into(), two.into(), turn)
    }

    /// Marks an empty cell as blocked. Returns false if the cell is out of
    /// bounds or not empty.
    pub fn block(&mut self, loc: Location) -> bool {
        if !self.grid.is_open(loc) {
            return false;
        }
        self.grid.set(loc, Cell::Blocked)
    }

    /// Location of `player`'s knight.
    #[inline]
    pub fn location(&self, player: Player) -> Location {
        self.locations[player.index()]
    }

    /// Returns the state after the side to move jumps to `dest`.
    ///
    /// The vacated cell becomes blocked and the turn passes. The caller
    /// must supply a legal destination.
    pub fn apply(&self, dest: Location) -> KnightBoard {
        debug_assert!(self.grid.is_open(dest));
        let mover = self.turn;
        let mut next = self.clone();
        let from = next.locations[mover.index()];
        next.grid.set(from, Cell::Blocked);
        next.grid.set(dest, Cell::Player(mover));
        next.locations[mover.index()] = dest;
        next.turn = mover.opponent();
        next
    }
}

impl GameState for KnightBoard {
    fn is_terminal(&self) -> bool {
        movegen::mobility(&self.grid, self.location(self.turn)) == 0
    }

    fn score(&self) -> f64 {
        match self.turn {
            Player::One => -WIN_SCORE,
            Player::Two => WIN_SCORE,
        }
    }

    fn moves(&self) -> Vec<KnightBoard> {
        movegen::knight_destinations(&self.grid, self.location(self.turn))
            .map(|dest| self.apply(dest))
            .collect()
    }

    fn player_locations(&self) -> PlayerLocations {
        PlayerLocations {
            one: self.locations[0],
            two: self.locations[1],
        }
    }

    fn current_player(&self) -> Player {
        self.turn
    }

    fn set_current_player(&mut self, player: Player) {
        self.turn = player;
    }

    fn potential_moves(&self) -> Vec<Location> {
        movegen::legal_destinations(&self.grid, self.location(self.turn))
    }

    fn grid(&self) -> &Grid {
        &self.grid
    }

    fn potential_moves_for(&self, player: Player) -> Vec<Location> {
        movegen::legal_destinations(&self.grid, self.location(player))
    }

    fn mobility(&self, player: Player) -> usize {
        movegen::mobility(&self.grid, self.location(player))
    }
}

//! Grid cells, players and locations.

use serde::{Deserialize, Serialize};

/// One of the two knights.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    One,
    Two,
}

/// Both players, in id order.
pub const ALL_PLAYERS: [Player; 2] = [Player::One, Player::Two];

impl Player {
    /// Returns the numeric player id (1 or 2).
    pub const fn id(self) -> u8 {
        match self {
            Player::One => 1,
            Player::Two => 2,
        }
    }

    /// Parses a numeric player id.
    pub fn from_id(id: u8) -> Option<Player> {
        match id {
            1 => Some(Player::One),
            2 => Some(Player::Two),
            _ => None,
        }
    }

    /// Returns the other player.
    pub const fn opponent(self) -> Player {
        match self {
            Player::One => Player::Two,
            Player::Two => Player::One,
        }
    }

    /// Index into per-player arrays.
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Player::One => 0,
            Player::Two => 1,
        }
    }
}

/// A (row, col) cell coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Location {
    pub row: usize,
    pub col: usize,
}

impl Location {
    pub const fn new(row: usize, col: usize) -> Self {
        Location { row, col }
    }

    /// Shifts the location by a signed offset. Returns None below zero;
    /// the upper bound is the grid's concern.
    #[inline]
    pub fn offset(self, d_row: isize, d_col: isize) -> Option<Location> {
        Some(Location {
            row: self.row.checked_add_signed(d_row)?,
            col: self.col.checked_add_signed(d_col)?,
        })
    }
}

impl From<(usize, usize)> for Location {
    fn from((row, col): (usize, usize)) -> Self {
        Location { row, col }
    }
}

/// Contents of a single grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Cell {
    #[default]
    Empty,
    Blocked,
    Player(Player),
}

/// Rectangular board of cells, stored row-major.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<Cell>,
}

impl Grid {
    /// Creates a grid with every cell empty.
    pub fn empty(rows: usize, cols: usize) -> Self {
        Grid {
            rows,
            cols,
            cells: vec![Cell::Empty; rows * cols],
        }
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    #[inline]
    pub fn contains(&self, loc: Location) -> bool {
        loc.row < self.rows && loc.col < self.cols
    }

    /// Returns the cell at `loc`, or None when out of bounds.
    #[inline]
    pub fn get(&self, loc: Location) -> Option<Cell> {
        if self.contains(loc) {
            Some(self.cells[loc.row * self.cols + loc.col])
        } else {
            None
        }
    }

    /// Overwrites a cell. Returns false if `loc` is out of bounds.
    pub fn set(&mut self, loc: Location, cell: Cell) -> bool {
        if !self.contains(loc) {
            return false;
        }
        self.cells[loc.row * self.cols + loc.col] = cell;
        true
    }

    /// True if `loc` is in bounds and empty.
    #[inline]
    pub fn is_open(&self, loc: Location) -> bool {
        self.get(loc) == Some(Cell::Empty)
    }

    /// Number of empty cells.
    pub fn open_count(&self) -> usize {
        self.cells.iter().filter(|c| **c == Cell::Empty).count()
    }

    /// Iterates over every location in row-major order.
    pub fn locations(&self) -> impl Iterator<Item = Location> + '_ {
        (0..self.rows).flat_map(move |r| (0..self.cols).map(move |c| Location::new(r, c)))
    }
}

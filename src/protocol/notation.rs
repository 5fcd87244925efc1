//! Board notation encoding and decoding.
//!
//! A one-line text form of a full isolation-knight position, in the spirit
//! of chess FEN: the grid rows top to bottom separated by `/`, a single
//! space, then the side to move.
//!
//! Cells: `.` empty, `#` blocked, `1` / `2` the player knights.
//!
//! Example: `.1./.../.2. 1` is a 3x3 board with player one on (0,1),
//! player two on (2,1), player one to move.

use crate::board::{BoardError, Cell, GameState, Grid, KnightBoard, Location, Player, ALL_PLAYERS};

/// Errors that can occur during notation parsing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NotationError {
    #[error("expected '<rows> <side>', got '{0}'")]
    MissingSide(String),

    #[error("invalid side to move: '{0}'")]
    InvalidSide(String),

    #[error("empty grid")]
    EmptyGrid,

    #[error("row {row} has {found} cells, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("invalid cell character '{ch}' at ({row}, {col})")]
    InvalidCell { ch: char, row: usize, col: usize },

    #[error("player {} does not appear on the grid", .0.id())]
    MissingPlayer(Player),

    #[error("player {} appears more than once", .0.id())]
    DuplicatePlayer(Player),

    #[error(transparent)]
    Board(#[from] BoardError),
}

/// Parses a cell character.
fn parse_cell(c: char) -> Option<Cell> {
    match c {
        '.' => Some(Cell::Empty),
        '#' => Some(Cell::Blocked),
        '1' => Some(Cell::Player(Player::One)),
        '2' => Some(Cell::Player(Player::Two)),
        _ => None,
    }
}

/// Returns the notation character for a cell.
fn cell_char(cell: Cell) -> char {
    match cell {
        Cell::Empty => '.',
        Cell::Blocked => '#',
        Cell::Player(Player::One) => '1',
        Cell::Player(Player::Two) => '2',
    }
}

/// Parses a notation string into a board.
pub fn parse_notation(s: &str) -> Result<KnightBoard, NotationError> {
    let s = s.trim();
    let (rows_part, side_part) = s
        .split_once(char::is_whitespace)
        .ok_or_else(|| NotationError::MissingSide(s.to_string()))?;

    let side_part = side_part.trim();
    let turn = side_part
        .parse::<u8>()
        .ok()
        .and_then(Player::from_id)
        .ok_or_else(|| NotationError::InvalidSide(side_part.to_string()))?;

    let rows: Vec<&str> = rows_part.split('/').collect();
    let width = rows[0].chars().count();
    if width == 0 {
        return Err(NotationError::EmptyGrid);
    }

    let mut grid = Grid::empty(rows.len(), width);
    let mut found: [Option<Location>; 2] = [None, None];

    for (r, row) in rows.iter().enumerate() {
        let count = row.chars().count();
        if count != width {
            return Err(NotationError::RaggedRow {
                row: r,
                expected: width,
                found: count,
            });
        }
        for (c, ch) in row.chars().enumerate() {
            let cell = parse_cell(ch).ok_or(NotationError::InvalidCell { ch, row: r, col: c })?;
            let loc = Location::new(r, c);
            match cell {
                // Knights are placed by the board constructor.
                Cell::Player(p) => {
                    if found[p.index()].replace(loc).is_some() {
                        return Err(NotationError::DuplicatePlayer(p));
                    }
                }
                other => {
                    grid.set(loc, other);
                }
            }
        }
    }

    let mut locations = [Location::new(0, 0); 2];
    for p in ALL_PLAYERS {
        locations[p.index()] = found[p.index()].ok_or(NotationError::MissingPlayer(p))?;
    }

    Ok(KnightBoard::new(grid, locations[0], locations[1], turn)?)
}

/// Encodes a board as a notation string.
pub fn encode_notation(board: &KnightBoard) -> String {
    let grid = board.grid();
    let mut out = String::with_capacity(grid.rows() * (grid.cols() + 1) + 2);
    for r in 0..grid.rows() {
        if r > 0 {
            out.push('/');
        }
        for c in 0..grid.cols() {
            let cell = grid.get(Location::new(r, c)).unwrap_or(Cell::Blocked);
            out.push(cell_char(cell));
        }
    }
    out.push(' ');
    out.push(match board.current_player() {
        Player::One => '1',
        Player::Two => '2',
    });
    out
}

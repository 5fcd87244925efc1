//! Knight move generation.
//!
//! Lists the open cells a knight can jump to from a given location. The
//! offset order is fixed, so successor lists (and with them every search
//! tie-break) are deterministic.

use crate::board::{Grid, Location};

/// Knight jumps in generation order.
pub const KNIGHT_OFFSETS: [(isize, isize); 8] = [
    (-2, -1),
    (-2, 1),
    (-1, -2),
    (-1, 2),
    (1, -2),
    (1, 2),
    (2, -1),
    (2, 1),
];

/// Iterates over the open cells reachable from `from` in one knight jump.
pub fn knight_destinations(grid: &Grid, from: Location) -> impl Iterator<Item = Location> + '_ {
    KNIGHT_OFFSETS
        .iter()
        .filter_map(move |&(dr, dc)| from.offset(dr, dc))
        .filter(move |&to| grid.is_open(to))
}

/// Collects the legal destinations from `from`.
pub fn legal_destinations(grid: &Grid, from: Location) -> Vec<Location> {
    knight_destinations(grid, from).collect()
}

/// Counts the legal destinations from `from` without allocating.
#[inline]
pub fn mobility(grid: &Grid, from: Location) -> usize {
    knight_destinations(grid, from).count()
}

//! Territory and board-position helpers used by the advanced heuristic.

use std::collections::{HashSet, VecDeque};

use crate::board::{GameState, Grid, Location};
use crate::movegen::knight_destinations;

/// Counts the distinct open cells reachable from `location` within
/// `max_depth` knight jumps, excluding `location` itself.
///
/// Breadth-first over the knight graph restricted to open cells. Every
/// layer up to `max_depth` is expanded in full.
pub fn reachable_within<S: GameState>(state: &S, location: Location, max_depth: u32) -> usize {
    reachable_on_grid(state.grid(), location, max_depth)
}

/// Grid-level form of [`reachable_within`].
pub fn reachable_on_grid(grid: &Grid, location: Location, max_depth: u32) -> usize {
    if max_depth == 0 {
        return 0;
    }

    let mut visited: HashSet<Location> = HashSet::new();
    let mut queue: VecDeque<(Location, u32)> = VecDeque::new();
    visited.insert(location);
    queue.push_back((location, 0));

    while let Some((cur, depth)) = queue.pop_front() {
        if depth == max_depth {
            continue;
        }
        for next in knight_destinations(grid, cur) {
            if visited.insert(next) {
                queue.push_back((next, depth + 1));
            }
        }
    }

    visited.len() - 1
}

/// Penalty for sitting on the rim: 3 on a corner, 1 on any other edge
/// cell, 0 in the interior.
pub fn position_penalty(location: Location, rows: usize, cols: usize) -> u32 {
    let row_edge = location.row == 0 || location.row + 1 == rows;
    let col_edge = location.col == 0 || location.col + 1 == cols;
    match (row_edge, col_edge) {
        (true, true) => 3,
        (true, false) | (false, true) => 1,
        (false, false) => 0,
    }
}

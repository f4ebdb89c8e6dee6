//! The two-state Life rule and its neighborhood.

use crate::board::Board;

/// Neighbor offsets in scan order: the row above, the two sides, the row below.
///
/// Offsets are not deduplicated after wrapping. On boards 2 cells wide or
/// high, several offsets reach the same physical cell and each one counts.
pub const NEIGHBOR_OFFSETS: [(isize, isize); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// Next state of a cell given its state and its alive-neighbor count.
#[inline]
pub fn next_state(alive: bool, neighbors: u8) -> bool {
    matches!((alive, neighbors), (true, 2) | (true, 3) | (false, 3))
}

/// Counts alive cells at the eight wrapped offsets around `(x, y)`.
#[inline]
pub fn live_neighbors(board: &Board, x: usize, y: usize) -> u8 {
    let (x, y) = (x as isize, y as isize);
    NEIGHBOR_OFFSETS
        .iter()
        .filter(|(dx, dy)| board.get(x + dx, y + dy))
        .count() as u8
}

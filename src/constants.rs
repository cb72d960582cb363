//! Constants for board dimensions, the starting layout, and search parameters.
//!
//! The board is stored as a flat array of `SIZE * SIZE` cells indexed by
//! `row * SIZE + col`, with row 0 at the bottom (White's side).

// =============================================================================
// Board Geometry
// =============================================================================

/// Number of squares on a side of the board.
pub const SIZE: usize = 10;

/// Total number of cells on the board.
pub const NUM_SQUARES: usize = SIZE * SIZE;

/// Number of queen directions.
pub const NUM_DIRECTIONS: usize = 8;

/// Column/row deltas for each direction, clockwise from north.
/// Order: N, NE, E, SE, S, SW, W, NW
pub const DIRECTION_DELTAS: [(i8, i8); NUM_DIRECTIONS] = [
    (0, 1),   // North (up one row)
    (1, 1),   // NE
    (1, 0),   // East
    (1, -1),  // SE
    (0, -1),  // South
    (-1, -1), // SW
    (-1, 0),  // West
    (-1, 1),  // NW
];

// =============================================================================
// Starting Layout
// =============================================================================

/// Initial White squares: d1, g1, a4, j4.
pub const WHITE_START: [usize; 4] = [3, 6, 30, 39];

/// Initial Black squares: a7, j7, d10, g10.
pub const BLACK_START: [usize; 4] = [60, 69, 93, 96];

// =============================================================================
// Search Parameters
// =============================================================================

/// Magnitude of a won position (positive for White, negative for Black).
/// Larger than any mobility score.
pub const WINNING_VALUE: i32 = i32::MAX - 1;

/// A magnitude greater than any position value.
pub const INFTY: i32 = i32::MAX;

/// Number of moves played per extra ply of search depth. Depth grows as
/// the game goes on: `num_moves / DEPTH_DIVISOR + INITIAL_DEPTH`.
pub const DEPTH_DIVISOR: usize = 30;

/// Search depth at the start of the game.
pub const INITIAL_DEPTH: usize = 1;

//! Amazons: a Game of the Amazons engine.
//!
//! Each side has four queens. A move slides one queen like a chess queen and
//! then throws a spear from its new square along another unblocked queen
//! line; spears block the square for the rest of the game. A side with no
//! legal move loses.
//!
//! ## Modules
//!
//! - [`constants`] - Board dimensions, starting squares, and search parameters
//! - [`square`] - Coordinates and queen-move geometry
//! - [`moves`] - The move value type and its text notation
//! - [`board`] - Game state, legality, make/undo, lazy move enumeration
//! - [`search`] - Minimax with alpha-beta pruning and a mobility evaluator
//! - [`player`] - Automated players (search-backed and random)
//! - [`controller`] - Text command loop
//!
//! ## Example
//!
//! ```
//! use amazons::board::{Board, Piece};
//! use amazons::search::{SearchConfig, SearchEngine};
//!
//! // Create a new game
//! let mut board = Board::new();
//!
//! // Play a move
//! board.try_make_move("d1-d7(g7)".parse().unwrap()).unwrap();
//!
//! // Search for Black's reply
//! let mut engine = SearchEngine::new(SearchConfig::default());
//! let reply = engine.choose_move(&board, Piece::Black).unwrap();
//! println!("Black plays {reply}");
//! ```

pub mod board;
pub mod constants;
pub mod controller;
pub mod moves;
pub mod player;
pub mod search;
pub mod square;

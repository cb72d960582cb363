//! Automated players.
//!
//! A [`Player`] produces the next move for its side given the current board.
//! Manual play is handled by the controller reading text commands, so only
//! automated players live here.

use crate::board::{Board, Piece};
use crate::moves::Move;
use crate::search::{SearchConfig, SearchEngine};

pub trait Player {
    /// The side this player moves for.
    fn side(&self) -> Piece;

    /// The move to play on `board`, or `None` if there is none.
    fn next_move(&mut self, board: &Board) -> Option<Move>;
}

/// Plays the move chosen by alpha-beta search.
pub struct AiPlayer {
    side: Piece,
    engine: SearchEngine,
}

impl AiPlayer {
    pub fn new(side: Piece, config: SearchConfig) -> Self {
        Self {
            side,
            engine: SearchEngine::new(config),
        }
    }

    pub fn engine(&self) -> &SearchEngine {
        &self.engine
    }
}

impl Player for AiPlayer {
    fn side(&self) -> Piece {
        self.side
    }

    fn next_move(&mut self, board: &Board) -> Option<Move> {
        self.engine.choose_move(board, self.side)
    }
}

/// Plays a uniformly random legal move.
pub struct RandomPlayer {
    side: Piece,
    rng: fastrand::Rng,
}

impl RandomPlayer {
    pub fn new(side: Piece, seed: u64) -> Self {
        Self {
            side,
            rng: fastrand::Rng::with_seed(seed),
        }
    }
}

impl Player for RandomPlayer {
    fn side(&self) -> Piece {
        self.side
    }

    fn next_move(&mut self, board: &Board) -> Option<Move> {
        if board.turn() != self.side {
            return None;
        }
        let moves: Vec<Move> = board.legal_moves(self.side).collect();
        if moves.is_empty() {
            return None;
        }
        Some(moves[self.rng.usize(..moves.len())])
    }
}

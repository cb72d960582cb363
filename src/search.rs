//! Minimax search with alpha-beta pruning.
//!
//! Values are always from White's point of view: White maximises, Black
//! minimises. Leaves are scored by [`static_score`], a mobility difference
//! that is dwarfed by [`WINNING_VALUE`] for decided positions.
//!
//! The engine never touches the caller's board. It clones it once per
//! search and walks the clone with `make_move`/`undo`, so an interrupted
//! search leaves nothing half-applied anywhere the caller can see.

use std::time::{Duration, Instant};

use crate::board::{Board, Piece};
use crate::constants::{DEPTH_DIVISOR, INFTY, INITIAL_DEPTH, WINNING_VALUE};
use crate::moves::Move;

/// Search tuning.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchConfig {
    /// Moves per additional ply of depth.
    pub depth_divisor: usize,
    /// Depth at move 0.
    pub initial_depth: usize,
    /// Search exactly this deep, ignoring the move-count heuristic.
    pub fixed_depth: Option<usize>,
    /// Wall-clock budget per move. When set, the engine deepens iteratively
    /// and returns the result of the deepest completed iteration.
    pub time_limit: Option<Duration>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            depth_divisor: DEPTH_DIVISOR,
            initial_depth: INITIAL_DEPTH,
            fixed_depth: None,
            time_limit: None,
        }
    }
}

impl SearchConfig {
    /// Search depth for `board`: one extra ply every `depth_divisor` moves,
    /// never less than 1.
    pub fn max_depth(&self, board: &Board) -> usize {
        let depth = match self.fixed_depth {
            Some(depth) => depth,
            None => {
                board.num_moves().checked_div(self.depth_divisor).unwrap_or(0) + self.initial_depth
            }
        };
        depth.max(1)
    }
}

/// Counters from the most recent search.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Nodes visited, all iterations included.
    pub nodes: u64,
    /// Deepest fully completed iteration.
    pub depth: usize,
    /// Value of the chosen move at that depth.
    pub value: i32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum SearchResult {
    Complete { value: i32, best: Option<Move> },
    TimedOut,
}

/// Depth-limited alpha-beta searcher.
pub struct SearchEngine {
    config: SearchConfig,
    stats: SearchStats,
    deadline: Option<Instant>,
}

impl Default for SearchEngine {
    fn default() -> Self {
        Self::new(SearchConfig::default())
    }
}

impl SearchEngine {
    pub fn new(config: SearchConfig) -> Self {
        Self {
            config,
            stats: SearchStats::default(),
            deadline: None,
        }
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }

    /// Choose a move for `side` on `board`.
    ///
    /// Returns `None` when `side` has no legal move, or when it is not
    /// `side`'s turn. `board` is never modified.
    pub fn choose_move(&mut self, board: &Board, side: Piece) -> Option<Move> {
        self.stats = SearchStats::default();
        if side != board.turn() {
            log::warn!(
                "asked to move for {} but it is {}'s turn",
                side.name(),
                board.turn().name()
            );
            return None;
        }
        if !board.has_legal_move(side) {
            return None;
        }

        let mut scratch = board.clone();
        let max_depth = self.config.max_depth(board);
        let maximizing = side == Piece::White;
        let start = Instant::now();

        let best = match self.config.time_limit {
            None => {
                self.deadline = None;
                self.search_to(&mut scratch, max_depth, maximizing)
            }
            Some(limit) => {
                self.deadline = Some(start + limit);
                let mut best = None;
                for depth in 1..=max_depth {
                    match self.search_to(&mut scratch, depth, maximizing) {
                        Some(mv) => best = Some(mv),
                        None => {
                            log::debug!("deadline hit during depth {depth}, keeping depth {}", depth - 1);
                            break;
                        }
                    }
                }
                best
            }
        };
        debug_assert_eq!(&scratch, board, "search did not restore its scratch board");

        if let Some(mv) = best {
            log::debug!(
                "{} plays {mv}: depth {}, value {}, {} nodes in {:?}",
                side.name(),
                self.stats.depth,
                self.stats.value,
                self.stats.nodes,
                start.elapsed()
            );
        }
        best
    }

    /// One full-width iteration at `depth`. `None` if the deadline cut it
    /// short. The first iteration ignores the deadline so there is always
    /// a move to fall back on.
    fn search_to(&mut self, board: &mut Board, depth: usize, maximizing: bool) -> Option<Move> {
        let check_deadline = depth > 1;
        match self.alpha_beta(board, depth, maximizing, -INFTY, INFTY, check_deadline) {
            SearchResult::Complete { value, best } => {
                self.stats.depth = depth;
                self.stats.value = value;
                best
            }
            SearchResult::TimedOut => None,
        }
    }

    /// Value of `board` searched `depth` plies, and the move achieving it.
    /// The board is returned to its entry state before this returns.
    fn alpha_beta(
        &mut self,
        board: &mut Board,
        depth: usize,
        maximizing: bool,
        mut alpha: i32,
        mut beta: i32,
        check_deadline: bool,
    ) -> SearchResult {
        self.stats.nodes += 1;
        if check_deadline && self.deadline.is_some_and(|d| Instant::now() >= d) {
            return SearchResult::TimedOut;
        }
        if let Some(winner) = board.winner() {
            return SearchResult::Complete {
                value: win_value(winner),
                best: None,
            };
        }
        if depth == 0 {
            return SearchResult::Complete {
                value: mobility_score(board),
                best: None,
            };
        }

        let side = if maximizing { Piece::White } else { Piece::Black };
        // Collected because the enumerator borrows the board we are about to mutate.
        let moves: Vec<Move> = board.legal_moves(side).collect();

        let mut best = None;
        let mut best_value = if maximizing { -INFTY } else { INFTY };
        for mv in moves {
            board.make_move(mv);
            let reply = self.alpha_beta(board, depth - 1, !maximizing, alpha, beta, check_deadline);
            board.undo();

            let value = match reply {
                SearchResult::Complete { value, .. } => value,
                SearchResult::TimedOut => return SearchResult::TimedOut,
            };
            if maximizing && value > best_value {
                best_value = value;
                best = Some(mv);
                alpha = alpha.max(value);
            } else if !maximizing && value < best_value {
                best_value = value;
                best = Some(mv);
                beta = beta.min(value);
            }
            if beta <= alpha {
                break;
            }
        }

        if best.is_none() {
            best_value = if maximizing { -WINNING_VALUE } else { WINNING_VALUE };
        }
        SearchResult::Complete {
            value: best_value,
            best,
        }
    }
}

/// Static value of `board` from White's point of view.
///
/// Decided positions score `±WINNING_VALUE`. Otherwise the score is White's
/// mobility minus Black's, where mobility is the number of squares each
/// piece could move to, ignoring spear throws.
pub fn static_score(board: &Board) -> i32 {
    match board.winner() {
        Some(winner) => win_value(winner),
        None => mobility_score(board),
    }
}

/// White's mobility minus Black's, without checking for a decided game.
pub fn mobility_score(board: &Board) -> i32 {
    mobility(board, Piece::White) - mobility(board, Piece::Black)
}

fn win_value(winner: Piece) -> i32 {
    if winner == Piece::White { WINNING_VALUE } else { -WINNING_VALUE }
}

/// Total queen-move freedom of `side`'s pieces.
pub fn mobility(board: &Board, side: Piece) -> i32 {
    board
        .pieces(side)
        .map(|s| board.reachable_from(s, Some(s)).count() as i32)
        .sum()
}

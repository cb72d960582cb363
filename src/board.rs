//! Amazons board state, legality, and lazy move enumeration.
//!
//! The board owns 100 cells, the side to move, and the stack of applied
//! moves. `make_move`/`undo` mutate it in place and are exact inverses, which
//! is what lets the search explore a line and back out of it without copying.
//!
//! Move generation is lazy: [`ReachableFrom`] walks queen rays one square at
//! a time and [`LegalMoves`] nests three such walks (origins, destinations,
//! spear throws). Both borrow the board, so it cannot change under them.

use std::fmt;

use thiserror::Error;

use crate::constants::{BLACK_START, NUM_DIRECTIONS, NUM_SQUARES, SIZE, WHITE_START};
use crate::moves::Move;
use crate::square::{ParseError, Square};

/// Contents of a cell, and also the two sides.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Piece {
    Empty,
    White,
    Black,
    Spear,
}

impl Piece {
    /// The other side. Empty and Spear map to themselves.
    pub fn opponent(self) -> Piece {
        match self {
            Piece::White => Piece::Black,
            Piece::Black => Piece::White,
            other => other,
        }
    }

    /// Side name for messages ("White" / "Black").
    pub fn name(self) -> &'static str {
        match self {
            Piece::Empty => "Empty",
            Piece::White => "White",
            Piece::Black => "Black",
            Piece::Spear => "Spear",
        }
    }

    fn symbol(self) -> char {
        match self {
            Piece::Empty => '-',
            Piece::White => 'W',
            Piece::Black => 'B',
            Piece::Spear => 'S',
        }
    }

    fn from_symbol(c: char) -> Option<Piece> {
        match c.to_ascii_uppercase() {
            '-' | 'E' => Some(Piece::Empty),
            'W' => Some(Piece::White),
            'B' => Some(Piece::Black),
            'S' => Some(Piece::Spear),
            _ => None,
        }
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Why a move was rejected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MoveError {
    #[error("not your turn: {square} does not hold a {side} piece")]
    NotYourPiece { square: Square, side: &'static str },
    #[error("blocked move: {0}-{1}")]
    BlockedMove(Square, Square),
    #[error("blocked spear: {0}({1})")]
    BlockedSpear(Square, Square),
}

/// The state of an Amazons game.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    cells: [Piece; NUM_SQUARES],
    turn: Piece,
    /// Applied moves, oldest first.
    history: Vec<Move>,
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    /// A board in the initial position, White to move.
    pub fn new() -> Self {
        let mut board = Board {
            cells: [Piece::Empty; NUM_SQUARES],
            turn: Piece::White,
            history: Vec::new(),
        };
        board.init();
        board
    }

    /// Reset to the initial position.
    pub fn init(&mut self) {
        self.cells = [Piece::Empty; NUM_SQUARES];
        for i in WHITE_START {
            self.cells[i] = Piece::White;
        }
        for i in BLACK_START {
            self.cells[i] = Piece::Black;
        }
        self.turn = Piece::White;
        self.history.clear();
    }

    /// Build a board from ten rows of cell symbols, top row (row 10) first.
    ///
    /// Symbols are `-` or `E` (empty), `W`, `B`, `S`, optionally separated by
    /// whitespace. Blank lines and `===` separators are skipped, so the output
    /// of `Display` reads back. The result has White to move and no history.
    pub fn from_layout(layout: &str) -> Result<Board, ParseError> {
        let bad = |why: String| ParseError::Layout(why);
        let rows: Vec<Vec<Piece>> = layout
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty() && !l.starts_with("==="))
            .map(|l| {
                l.chars()
                    .filter(|c| !c.is_whitespace())
                    .map(|c| Piece::from_symbol(c).ok_or_else(|| bad(format!("bad cell {c:?}"))))
                    .collect::<Result<Vec<_>, _>>()
            })
            .collect::<Result<_, _>>()?;

        if rows.len() != SIZE {
            return Err(bad(format!("expected {SIZE} rows, got {}", rows.len())));
        }
        let mut board = Board {
            cells: [Piece::Empty; NUM_SQUARES],
            turn: Piece::White,
            history: Vec::new(),
        };
        for (i, cells) in rows.iter().enumerate() {
            if cells.len() != SIZE {
                return Err(bad(format!("row {} has {} cells", SIZE - i, cells.len())));
            }
            let row = SIZE - 1 - i;
            for (col, &piece) in cells.iter().enumerate() {
                board.put(piece, Square::new(col, row));
            }
        }
        Ok(board)
    }

    /// The side to move.
    #[inline]
    pub fn turn(&self) -> Piece {
        self.turn
    }

    /// Number of moves applied and not undone.
    #[inline]
    pub fn num_moves(&self) -> usize {
        self.history.len()
    }

    /// Applied moves, oldest first.
    pub fn history(&self) -> &[Move] {
        &self.history
    }

    #[inline]
    pub fn get(&self, s: Square) -> Piece {
        self.cells[s.index()]
    }

    /// Overwrite one cell. Intended for setting up positions; it does not
    /// touch the turn or history.
    pub fn put(&mut self, piece: Piece, s: Square) {
        self.cells[s.index()] = piece;
    }

    /// Squares currently holding `side`, in index order.
    pub fn pieces(&self, side: Piece) -> impl Iterator<Item = Square> + '_ {
        Square::all().filter(move |&s| self.get(s) == side)
    }

    /// The winner, if the side to move has no legal move.
    ///
    /// Recomputed on every call: it only asks the enumerator for its first
    /// move, so it never builds the move list.
    pub fn winner(&self) -> Option<Piece> {
        if self.has_legal_move(self.turn) {
            None
        } else {
            Some(self.turn.opponent())
        }
    }

    pub fn has_legal_move(&self, side: Piece) -> bool {
        self.legal_moves(side).next().is_some()
    }

    #[inline]
    fn is_open(&self, s: Square, as_empty: Option<Square>) -> bool {
        self.get(s) == Piece::Empty || as_empty == Some(s)
    }

    /// True iff `from`-`to` is a queen move whose destination and
    /// intermediate squares are empty, counting `as_empty` as empty.
    pub fn is_unblocked_move(&self, from: Square, to: Square, as_empty: Option<Square>) -> bool {
        if !from.is_queen_move(to) || !self.is_open(to, as_empty) {
            return false;
        }
        let dir = from.direction(to);
        (1..from.distance(to)).all(|steps| {
            from.queen_move(dir, steps)
                .is_some_and(|s| self.is_open(s, as_empty))
        })
    }

    /// Check `mv` against the current position, treating `as_empty` as empty
    /// for the piece's path. The spear's path always treats the origin as
    /// empty, since the piece has left it.
    pub fn check_move_ignoring(&self, mv: &Move, as_empty: Option<Square>) -> Result<(), MoveError> {
        if self.get(mv.from()) != self.turn {
            return Err(MoveError::NotYourPiece {
                square: mv.from(),
                side: self.turn.name(),
            });
        }
        if !self.is_unblocked_move(mv.from(), mv.to(), as_empty) {
            return Err(MoveError::BlockedMove(mv.from(), mv.to()));
        }
        if !self.is_unblocked_move(mv.to(), mv.spear(), Some(mv.from())) {
            return Err(MoveError::BlockedSpear(mv.to(), mv.spear()));
        }
        Ok(())
    }

    pub fn check_move(&self, mv: &Move) -> Result<(), MoveError> {
        self.check_move_ignoring(mv, None)
    }

    pub fn is_legal(&self, mv: &Move) -> bool {
        self.check_move(mv).is_ok()
    }

    /// Apply `mv` if it is legal; otherwise leave the board untouched.
    pub fn try_make_move(&mut self, mv: Move) -> Result<(), MoveError> {
        self.check_move(&mv)?;
        self.make_move(mv);
        Ok(())
    }

    /// Apply `mv`, assuming it is legal. No validation.
    pub fn make_move(&mut self, mv: Move) {
        let piece = self.get(mv.from());
        self.put(Piece::Empty, mv.from());
        self.put(piece, mv.to());
        self.put(Piece::Spear, mv.spear());
        self.history.push(mv);
        self.turn = self.turn.opponent();
    }

    /// Take back the last move. No effect on a board without history.
    pub fn undo(&mut self) {
        let Some(mv) = self.history.pop() else {
            return;
        };
        let piece = self.get(mv.to());
        self.put(Piece::Empty, mv.spear());
        self.put(Piece::Empty, mv.to());
        self.put(piece, mv.from());
        self.turn = self.turn.opponent();
    }

    /// Squares reachable from `from` by an unblocked queen move, treating
    /// `as_empty` as empty. Ignores whatever stands on `from`.
    pub fn reachable_from(&self, from: Square, as_empty: Option<Square>) -> ReachableFrom<'_> {
        ReachableFrom {
            board: self,
            from,
            as_empty,
            dir: 0,
            steps: 1,
        }
    }

    /// All legal moves for `side`, whether or not it is `side`'s turn.
    pub fn legal_moves(&self, side: Piece) -> LegalMoves<'_> {
        LegalMoves {
            board: self,
            side,
            next_origin: 0,
            destinations: None,
            spears: None,
        }
    }
}

/// Iterator over the squares reachable from one square, direction by
/// direction, nearest first.
pub struct ReachableFrom<'a> {
    board: &'a Board,
    from: Square,
    as_empty: Option<Square>,
    dir: usize,
    steps: usize,
}

impl Iterator for ReachableFrom<'_> {
    type Item = Square;

    fn next(&mut self) -> Option<Square> {
        while self.dir < NUM_DIRECTIONS {
            match self.from.queen_move(self.dir, self.steps) {
                Some(s) if self.board.is_open(s, self.as_empty) => {
                    self.steps += 1;
                    return Some(s);
                }
                _ => {
                    self.dir += 1;
                    self.steps = 1;
                }
            }
        }
        None
    }
}

/// Iterator over the legal moves of one side.
pub struct LegalMoves<'a> {
    board: &'a Board,
    side: Piece,
    /// Next square index to consider as an origin.
    next_origin: usize,
    /// Current origin and its remaining destinations.
    destinations: Option<(Square, ReachableFrom<'a>)>,
    /// Current origin, destination, and remaining spear throws.
    spears: Option<(Square, Square, ReachableFrom<'a>)>,
}

impl Iterator for LegalMoves<'_> {
    type Item = Move;

    fn next(&mut self) -> Option<Move> {
        loop {
            if let Some((from, to, spears)) = self.spears.as_mut() {
                if let Some(spear) = spears.next() {
                    return Some(Move::new(*from, *to, spear));
                }
                self.spears = None;
            }

            if let Some((from, destinations)) = self.destinations.as_mut() {
                if let Some(to) = destinations.next() {
                    let from = *from;
                    self.spears = Some((from, to, self.board.reachable_from(to, Some(from))));
                    continue;
                }
                self.destinations = None;
            }

            let origin = (self.next_origin..NUM_SQUARES)
                .map(Square::from_index)
                .find(|&s| self.board.get(s) == self.side)?;
            self.next_origin = origin.index() + 1;
            self.destinations = Some((origin, self.board.reachable_from(origin, Some(origin))));
        }
    }
}

/// Ten rows, row 10 first, each cell as ` X`.
impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in (0..SIZE).rev() {
            write!(f, "  ")?;
            for col in 0..SIZE {
                write!(f, " {}", self.get(Square::new(col, row)))?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(s: &str) -> Square {
        s.parse().unwrap()
    }

    fn mv(s: &str) -> Move {
        s.parse().unwrap()
    }

    fn count(board: &Board, piece: Piece) -> usize {
        Square::all().filter(|&s| board.get(s) == piece).count()
    }

    #[test]
    fn test_initial_position() {
        let board = Board::new();
        assert_eq!(board.turn(), Piece::White);
        assert_eq!(board.num_moves(), 0);
        for s in ["d1", "g1", "a4", "j4"] {
            assert_eq!(board.get(sq(s)), Piece::White, "{s}");
        }
        for s in ["a7", "j7", "d10", "g10"] {
            assert_eq!(board.get(sq(s)), Piece::Black, "{s}");
        }
        assert_eq!(count(&board, Piece::Empty), 92);
        assert_eq!(board.winner(), None);
    }

    #[test]
    fn test_make_move_and_undo() {
        let mut board = Board::new();
        let before = board.clone();
        let m = mv("d1-d7(g7)");
        assert!(board.is_legal(&m));

        board.make_move(m);
        assert_eq!(board.get(sq("d1")), Piece::Empty);
        assert_eq!(board.get(sq("d7")), Piece::White);
        assert_eq!(board.get(sq("g7")), Piece::Spear);
        assert_eq!(board.turn(), Piece::Black);
        assert_eq!(board.num_moves(), 1);
        assert_eq!(count(&board, Piece::Spear), 1);

        board.undo();
        assert_eq!(board, before);
    }

    #[test]
    fn test_spear_thrown_back_to_origin() {
        let mut board = Board::new();
        let before = board.clone();
        let m = mv("a4-b4(a4)");
        assert!(board.is_legal(&m));
        board.make_move(m);
        assert_eq!(board.get(sq("a4")), Piece::Spear);
        assert_eq!(board.get(sq("b4")), Piece::White);
        board.undo();
        assert_eq!(board, before);
    }

    #[test]
    fn test_undo_on_fresh_board_is_noop() {
        let mut board = Board::new();
        board.undo();
        board.undo();
        assert_eq!(board, Board::new());
    }

    #[test]
    fn test_try_make_move_rejects() {
        let mut board = Board::new();
        let before = board.clone();

        // Black piece on White's turn.
        assert!(matches!(
            board.try_make_move(mv("a7-a8(a9)")),
            Err(MoveError::NotYourPiece { .. })
        ));
        // Not a queen move.
        assert_eq!(
            board.try_make_move(mv("d1-e3(e4)")),
            Err(MoveError::BlockedMove(sq("d1"), sq("e3")))
        );
        // a7 blocks the file.
        assert_eq!(
            board.try_make_move(mv("a4-a8(a9)")),
            Err(MoveError::BlockedMove(sq("a4"), sq("a8")))
        );
        // Spear through the piece on j4.
        assert_eq!(
            board.try_make_move(mv("a4-b4(j4)")),
            Err(MoveError::BlockedSpear(sq("b4"), sq("j4")))
        );
        assert_eq!(board, before);

        assert_eq!(board.try_make_move(mv("a4-b4(a4)")), Ok(()));
        assert_eq!(board.num_moves(), 1);
    }

    #[test]
    fn test_is_unblocked_move_as_empty() {
        let board = Board::new();
        // g1 sits between d1 and j1.
        assert!(!board.is_unblocked_move(sq("d1"), sq("j1"), None));
        assert!(board.is_unblocked_move(sq("d1"), sq("j1"), Some(sq("g1"))));
        // Destination occupied unless it is the override.
        assert!(!board.is_unblocked_move(sq("d1"), sq("g1"), None));
        assert!(board.is_unblocked_move(sq("d1"), sq("g1"), Some(sq("g1"))));
        assert!(!board.is_unblocked_move(sq("d1"), sq("d1"), Some(sq("d1"))));
    }

    #[test]
    fn test_check_move_ignoring() {
        let board = Board::new();
        let m = mv("d1-j1(j2)");
        assert_eq!(board.check_move(&m), Err(MoveError::BlockedMove(sq("d1"), sq("j1"))));
        assert_eq!(board.check_move_ignoring(&m, Some(sq("g1"))), Ok(()));
    }

    #[test]
    fn test_reachable_from_order() {
        let board = Board::new();
        let reach: Vec<Square> = board.reachable_from(sq("a4"), None).collect();
        // North first, nearest first: a5, a6 then blocked by a7.
        assert_eq!(&reach[..2], &[sq("a5"), sq("a6")]);
        // a4: N 2, NE 5, E 8, SE 2, S 3.
        assert_eq!(reach.len(), 20);
    }

    #[test]
    fn test_initial_legal_move_count() {
        let board = Board::new();
        // Well-known opening branching factor.
        assert_eq!(board.legal_moves(Piece::White).count(), 2176);
        assert_eq!(board.legal_moves(Piece::Black).count(), 2176);
    }

    #[test]
    fn test_winner_when_boxed_in() {
        let layout = "\
            - - - - - - - - - -\n\
            - - - - - - - - - -\n\
            - - - - - - - - - -\n\
            - - - - - - - - - -\n\
            - - - - - - - - - -\n\
            - - - - - - - - - B\n\
            - - - - - - - - - -\n\
            S S - - - - - - - -\n\
            W S - - - - - - - -\n\
            S S - - - - - - - -\n";
        let mut board = Board::from_layout(layout).unwrap();
        assert_eq!(board.turn(), Piece::White);
        assert!(!board.has_legal_move(Piece::White));
        assert_eq!(board.winner(), Some(Piece::Black));

        board.put(Piece::Empty, sq("b2"));
        assert_eq!(board.winner(), None);
    }

    #[test]
    fn test_layout_roundtrip() {
        let mut board = Board::new();
        board.make_move(mv("d1-d7(g7)"));
        let text = format!("===\n{board}===\n");
        let read = Board::from_layout(&text).unwrap();
        for s in Square::all() {
            assert_eq!(read.get(s), board.get(s));
        }
    }

    #[test]
    fn test_layout_errors() {
        assert!(Board::from_layout("W B").is_err());
        let mut rows = vec!["- - - - - - - - - -"; 10];
        rows[3] = "- - - X - - - - - -";
        assert!(Board::from_layout(&rows.join("\n")).is_err());
        rows[3] = "- - - -";
        assert!(Board::from_layout(&rows.join("\n")).is_err());
    }
}

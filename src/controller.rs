//! Line-oriented command loop.
//!
//! The controller owns the authoritative [`Board`]. On an automated side's
//! turn it asks that side's [`Player`] for a move; otherwise it reads a line
//! and executes it as a command.
//!
//! ## Commands
//!
//! - `new` - Start a new game
//! - `quit` - Exit
//! - `seed <n>` - Reseed the random generator used by random players
//! - `dump` - Print the board between `===` lines
//! - `undo` - Take back the last move
//! - `auto <white|black>` - Let the search engine play that side
//! - `manual <white|black>` - Read that side's moves from input
//! - `random <white|black>` - Play random legal moves for that side
//! - `a1-b2(c3)` or `a1 b2 c3` - Play a move for the side to move
//!
//! Input is case-insensitive and `#` starts a comment.

use std::io::{BufRead, Write};

use anyhow::bail;
use thiserror::Error;

use crate::board::{Board, MoveError, Piece};
use crate::moves::Move;
use crate::player::{AiPlayer, Player, RandomPlayer};
use crate::search::SearchConfig;
use crate::square::ParseError;

/// Who makes the moves for one side.
#[derive(Copy, Clone, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum PlayerKind {
    /// Moves typed on the input
    Manual,
    /// Alpha-beta search
    Auto,
    /// Uniformly random legal moves
    Random,
}

/// A command that could not be carried out.
#[derive(Error, Debug)]
pub enum CommandError {
    #[error("bad command: {0}")]
    Unknown(String),
    #[error("bad argument: {0}")]
    BadArgument(String),
    #[error("game is over, use `new` or `undo`")]
    GameOver,
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Move(#[from] MoveError),
}

pub struct Controller {
    board: Board,
    config: SearchConfig,
    white: Option<Box<dyn Player>>,
    black: Option<Box<dyn Player>>,
    kinds: [PlayerKind; 2],
    rng: fastrand::Rng,
    winner: Option<Piece>,
    playing: bool,
}

impl Default for Controller {
    fn default() -> Self {
        Self::new(SearchConfig::default(), PlayerKind::Manual, PlayerKind::Auto, None)
    }
}

impl Controller {
    pub fn new(config: SearchConfig, white: PlayerKind, black: PlayerKind, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => fastrand::Rng::with_seed(seed),
            None => fastrand::Rng::new(),
        };
        let mut controller = Self {
            board: Board::new(),
            config,
            white: None,
            black: None,
            kinds: [white, black],
            rng,
            winner: None,
            playing: false,
        };
        controller.set_player(Piece::White, white);
        controller.set_player(Piece::Black, black);
        controller
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn winner(&self) -> Option<Piece> {
        self.winner
    }

    /// Random players are seeded from the controller's generator, so they
    /// are rebuilt whenever it is reseeded.
    fn set_player(&mut self, side: Piece, kind: PlayerKind) {
        let player: Option<Box<dyn Player>> = match kind {
            PlayerKind::Manual => None,
            PlayerKind::Auto => Some(Box::new(AiPlayer::new(side, self.config.clone()))),
            PlayerKind::Random => Some(Box::new(RandomPlayer::new(side, self.rng.u64(..)))),
        };
        match side {
            Piece::White => {
                self.white = player;
                self.kinds[0] = kind;
            }
            _ => {
                self.black = player;
                self.kinds[1] = kind;
            }
        }
    }

    /// Play until `quit` or end of input.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, output: &mut W) -> anyhow::Result<()> {
        let mut lines = input.lines();
        self.playing = true;

        while self.playing {
            if self.winner.is_none() {
                let turn = self.board.turn();
                let player = match turn {
                    Piece::White => self.white.as_mut(),
                    _ => self.black.as_mut(),
                };
                if let Some(player) = player {
                    match player.next_move(&self.board) {
                        Some(mv) => {
                            writeln!(output, "* {mv}")?;
                            if let Some(note) = self.play(mv)? {
                                writeln!(output, "{note}")?;
                            }
                        }
                        None => {
                            self.winner = self.board.winner();
                            if self.winner.is_none() {
                                bail!("{} player produced no move", turn.name());
                            }
                        }
                    }
                    continue;
                }
            }

            write!(output, "> ")?;
            output.flush()?;
            let Some(line) = lines.next() else {
                break;
            };
            match self.execute(&line?) {
                Ok(Some(reply)) => writeln!(output, "{reply}")?,
                Ok(None) => {}
                Err(e) => {
                    log::warn!("{e}");
                    writeln!(output, "Error: {e}")?;
                }
            }
        }
        output.flush()?;
        Ok(())
    }

    /// Execute one command line, returning any text to show.
    pub fn execute(&mut self, line: &str) -> Result<Option<String>, CommandError> {
        let line = line.split('#').next().unwrap_or("").trim().to_lowercase();
        let parts: Vec<&str> = line.split_whitespace().collect();
        let Some(&command) = parts.first() else {
            return Ok(None);
        };
        let args = &parts[1..];

        match (command, args) {
            ("quit", []) => {
                self.playing = false;
                Ok(None)
            }
            ("new", []) => {
                self.board.init();
                self.winner = None;
                Ok(None)
            }
            ("dump", []) => Ok(Some(format!("===\n{}===", self.board))),
            ("undo", []) => {
                self.board.undo();
                self.winner = self.board.winner();
                Ok(None)
            }
            ("seed", [n]) => {
                let seed = n
                    .parse::<u64>()
                    .map_err(|_| CommandError::BadArgument(format!("seed {n}")))?;
                self.rng.seed(seed);
                for (side, kind) in [(Piece::White, self.kinds[0]), (Piece::Black, self.kinds[1])] {
                    if kind == PlayerKind::Random {
                        self.set_player(side, kind);
                    }
                }
                Ok(None)
            }
            ("auto" | "manual" | "random", [color]) => {
                let side = parse_side(color)?;
                let kind = match command {
                    "auto" => PlayerKind::Auto,
                    "manual" => PlayerKind::Manual,
                    _ => PlayerKind::Random,
                };
                self.set_player(side, kind);
                Ok(None)
            }
            _ => {
                let mv: Move = match line.parse() {
                    Ok(mv) => mv,
                    Err(_) => return Err(CommandError::Unknown(line.clone())),
                };
                self.play(mv)
            }
        }
    }

    /// Validate and apply `mv`, announcing the winner if it ends the game.
    fn play(&mut self, mv: Move) -> Result<Option<String>, CommandError> {
        if self.winner.is_some() {
            return Err(CommandError::GameOver);
        }
        self.board.try_make_move(mv)?;
        self.winner = self.board.winner();
        Ok(self.winner.map(|w| {
            log::info!("{} wins after {} moves", w.name(), self.board.num_moves());
            format!("{} wins.", w.name())
        }))
    }
}

fn parse_side(color: &str) -> Result<Piece, CommandError> {
    match color {
        "white" => Ok(Piece::White),
        "black" => Ok(Piece::Black),
        other => Err(CommandError::BadArgument(other.to_string())),
    }
}

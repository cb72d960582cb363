//! Amazons: play the Game of the Amazons from the terminal.
//!
//! ## Usage
//!
//! - `amazons` - Play as White against the engine
//! - `amazons play --white auto --black random` - Choose who plays each side
//! - `amazons demo` - Watch the engine play itself

use std::io::{self, Write};
use std::time::Duration;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};

use amazons::board::{Board, Piece};
use amazons::controller::{Controller, PlayerKind};
use amazons::player::{AiPlayer, Player};
use amazons::search::SearchConfig;

/// Amazons: a Game of the Amazons engine
#[derive(Parser)]
#[command(name = "amazons")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a game through text commands on stdin
    Play(PlayArgs),
    /// Let the engine play both sides and print the game
    Demo(SearchArgs),
}

#[derive(Args)]
struct PlayArgs {
    /// Who plays White
    #[arg(long, value_enum, default_value_t = PlayerKind::Manual)]
    white: PlayerKind,

    /// Who plays Black
    #[arg(long, value_enum, default_value_t = PlayerKind::Auto)]
    black: PlayerKind,

    /// Seed for random players
    #[arg(long)]
    seed: Option<u64>,

    #[command(flatten)]
    search: SearchArgs,
}

#[derive(Args, Default)]
struct SearchArgs {
    /// Search exactly this many plies instead of deepening with the move count
    #[arg(long)]
    depth: Option<usize>,

    /// Per-move time limit in milliseconds
    #[arg(long)]
    time_limit_ms: Option<u64>,
}

impl SearchArgs {
    fn config(&self) -> SearchConfig {
        SearchConfig {
            fixed_depth: self.depth,
            time_limit: self.time_limit_ms.map(Duration::from_millis),
            ..SearchConfig::default()
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr; stdout carries the game.
    let log_level = if cli.debug { "debug" } else { "info" };
    env_logger::Builder::from_env(
        env_logger::Env::default().filter_or(env_logger::DEFAULT_FILTER_ENV, log_level),
    )
    .target(env_logger::Target::Stderr)
    .init();

    match cli.command {
        Some(Commands::Play(args)) => play(args),
        Some(Commands::Demo(args)) => run_demo(&args),
        None => play(PlayArgs {
            white: PlayerKind::Manual,
            black: PlayerKind::Auto,
            seed: None,
            search: SearchArgs::default(),
        }),
    }
}

fn play(args: PlayArgs) -> Result<()> {
    let mut controller = Controller::new(args.search.config(), args.white, args.black, args.seed);
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    controller.run(stdin.lock(), &mut stdout)
}

fn run_demo(args: &SearchArgs) -> Result<()> {
    println!("Amazons: engine self-play\n");

    let mut board = Board::new();
    let mut white = AiPlayer::new(Piece::White, args.config());
    let mut black = AiPlayer::new(Piece::Black, args.config());
    let mut stdout = io::stdout();

    while board.winner().is_none() {
        let player: &mut dyn Player = match board.turn() {
            Piece::White => &mut white,
            _ => &mut black,
        };
        let Some(mv) = player.next_move(&board) else {
            break;
        };
        board.try_make_move(mv)?;
        writeln!(stdout, "{:>3}. {} {mv}", board.num_moves(), player.side().name())?;
    }

    println!("\n{board}");
    if let Some(winner) = board.winner() {
        println!("{} wins after {} moves.", winner.name(), board.num_moves());
    }
    Ok(())
}

//! Tictac-Rust: tic-tac-toe against an engine in the terminal.
//!
//! ## Usage
//!
//! - `tictac-rust` - Play a game (asks who moves first)
//! - `tictac-rust play --first computer --strategy greedy` - Play with options
//! - `tictac-rust selfplay --games 1000` - Pit the engine against random moves

use std::io;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use tictac_rust::console::{Console, Settings, parse_side_selection};
use tictac_rust::selfplay::run_matches;
use tictac_rust::strategy::Strategy;
use tictac_rust::tracker::Side;

/// Tictac-Rust: tic-tac-toe against an engine that does not lose
#[derive(Parser)]
#[command(name = "tictac-rust")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log engine decisions to stderr (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Play one game in the terminal
    Play(PlayArgs),
    /// Play a batch of games against a random opponent and print totals
    Selfplay {
        /// Number of games
        #[arg(long, default_value_t = 1000)]
        games: usize,
        /// Seed for the random opponent
        #[arg(long, default_value_t = 1)]
        seed: u64,
        /// Engine strategy
        #[arg(long, default_value_t = Strategy::default())]
        strategy: Strategy,
    },
}

#[derive(Args, Default)]
struct PlayArgs {
    /// Engine strategy (greedy or negamax)
    #[arg(long, default_value_t = Strategy::default())]
    strategy: Strategy,
    /// Who moves first (player/computer or 1/2); asked when omitted
    #[arg(long, value_parser = parse_first)]
    first: Option<Side>,
    /// Give up after this many invalid entries in a row
    #[arg(long)]
    max_retries: Option<usize>,
    /// Print the grid after every move
    #[arg(long)]
    show_board: bool,
}

fn parse_first(s: &str) -> Result<Side, String> {
    match s.to_lowercase().as_str() {
        "player" | "p" | "human" => Ok(Side::Human),
        "computer" | "c" => Ok(Side::Automated),
        other => parse_side_selection(other).map_err(|e| e.to_string()),
    }
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Some(Commands::Play(args)) => play(args),
        Some(Commands::Selfplay {
            games,
            seed,
            strategy,
        }) => {
            let stats = run_matches(games, strategy, seed);
            println!("Strategy: {strategy}");
            println!("Games:    {}", stats.games);
            println!("Computer: {}", stats.computer_wins);
            println!("Player:   {}", stats.player_wins);
            println!("Draws:    {}", stats.draws);
            println!("Loss rate: {:.1}%", stats.loss_rate() * 100.0);
            Ok(())
        }
        None => play(PlayArgs::default()),
    }
}

fn play(args: PlayArgs) -> Result<()> {
    let settings = Settings {
        strategy: args.strategy,
        first: args.first,
        max_retries: args.max_retries,
        show_board: args.show_board,
    };
    let stdin = io::stdin();
    let mut console = Console::new(stdin.lock(), io::stdout(), settings);
    console.run()?;
    Ok(())
}

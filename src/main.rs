//! Plays "capture them all" puzzles over stdin/stdout. See
//! [`capture_them_all::Session`] for the list of commands.

use std::io;

use anyhow::Context;
use capture_them_all::chess::position::Position;
use capture_them_all::puzzle::Puzzle;
use capture_them_all::Session;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Puzzle to start with, as FEN piece placement (e.g. "8/8/8/3q4/8/8/8/R7").
    #[arg(long)]
    fen: Option<String>,
    /// Default log filter; `RUST_LOG` takes precedence. Logs go to stderr.
    #[arg(long, default_value = "warn")]
    log_level: String,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&args.log_level))
        .context("parsing log filter")?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
    info!(version = %capture_them_all::version(), "starting");

    let mut input = io::stdin().lock();
    let mut output = io::stdout().lock();
    let mut session = match args.fen {
        Some(fen) => {
            let puzzle = Puzzle::new(Position::try_from(fen.as_str())?)
                .with_context(|| format!("loading puzzle {fen}"))?;
            Session::with_puzzle(puzzle, &mut input, &mut output)
        }
        None => Session::new(&mut input, &mut output),
    };
    session.run()
}

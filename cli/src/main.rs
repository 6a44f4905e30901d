use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use memefield_core::*;

use crate::canvas::TextCanvas;
use crate::command::Command;
use crate::config::Settings;

mod canvas;
mod command;
mod config;

#[derive(Parser, Debug)]
#[command(version, about = "Clear the field without stepping on a mine", long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    /// Read board settings from a TOML file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Board width in cells
    #[arg(long)]
    width: Option<Coord>,

    /// Board height in cells
    #[arg(long)]
    height: Option<Coord>,

    /// Number of mines
    #[arg(short, long)]
    mines: Option<CellCount>,

    /// Force a seed instead of random
    #[arg(short, long)]
    seed: Option<u64>,
}

impl Args {
    fn settings(&self) -> Result<Settings> {
        let cli = Settings {
            width: self.width,
            height: self.height,
            mines: self.mines,
            seed: self.seed,
        };
        let file = match &self.config {
            Some(path) => Settings::load(path)?,
            None => Settings::default(),
        };
        Ok(cli.or(file))
    }
}

/// Logs go to stderr so they never mix with the board, `RUST_LOG` overrides the verbosity flags.
fn init_logging(verbose: &clap_verbosity_flag::Verbosity) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::builder()
        .with_default_directive(verbose.tracing_level_filter().into())
        .from_env_lossy();
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn print_board(out: &mut impl Write, board: &Board, layout: &BoardLayout) -> Result<()> {
    let mut canvas = TextCanvas::default();
    board.draw(layout, &mut canvas);
    write!(out, "{canvas}")?;
    writeln!(out, "mines left: {}", board.mines_left())?;
    Ok(())
}

/// Runs commands from `input` until the game ends, the player quits, or input runs out.
fn play(
    board: &mut Board,
    layout: &BoardLayout,
    input: impl BufRead,
    out: &mut impl Write,
) -> Result<Outcome> {
    print_board(out, board, layout)?;
    writeln!(out, "{}", command::USAGE)?;

    for line in input.lines() {
        let line = line.context("failed to read command")?;
        let event = match command::parse(&line) {
            Ok(Command::Quit) => break,
            Ok(Command::Pointer(event)) => event,
            Err(err) => {
                writeln!(out, "{err:#}\n{}", command::USAGE)?;
                continue;
            }
        };

        match board.handle_pointer(layout, event) {
            None => {
                log::warn!("Ignoring click at {:?}, outside the board", event.pos);
                continue;
            }
            Some(outcome) if !outcome.has_update() => {
                log::info!("Nothing to do: {:?}", outcome);
                continue;
            }
            Some(outcome) => log::debug!("{:?}", outcome),
        }

        print_board(out, board, layout)?;
        if board.is_finished() {
            break;
        }
    }

    match board.outcome() {
        Outcome::Won => writeln!(out, "Field cleared, you win!")?,
        Outcome::Lost => writeln!(out, "Boom, you lose.")?,
        Outcome::InProgress => writeln!(out, "Game abandoned.")?,
    }
    Ok(board.outcome())
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(&args.verbose);

    let settings = args.settings()?;
    let config = settings.game_config()?;
    let seed = settings.seed.unwrap_or_else(rand::random);
    log::info!(
        "New {}x{} game with {} mines, seed: {}",
        config.width,
        config.height,
        config.mines,
        seed
    );

    let mut board = RandomMinefieldGenerator::new(seed).generate(config);
    let layout = BoardLayout::new(board.size(), 1, Anchor::Origin)?;

    let stdin = io::stdin();
    let mut stdout = io::stdout().lock();
    play(&mut board, &layout, stdin.lock(), &mut stdout)?;
    stdout.flush()?;
    Ok(())
}

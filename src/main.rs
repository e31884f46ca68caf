use std::panic;
use std::path::PathBuf;
use std::process::ExitCode;
use std::thread;

use ascii_snake::config::TOO_SMALL_EXIT_DELAY;
use ascii_snake::error::AppError;
use ascii_snake::game::GameState;
use ascii_snake::input::CrosstermInput;
use ascii_snake::logging;
use ascii_snake::renderer;
use ascii_snake::scheduler::{GameLoop, Screen};
use ascii_snake::score::FileScoreStore;
use ascii_snake::terminal_runtime::{TerminalSession, restore_terminal};
use clap::Parser;
use log::{info, warn};

#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Start with wrap-around edges instead of deadly walls.
    #[arg(short, long)]
    wrap: bool,

    /// Seed for food placement, for reproducible runs.
    #[arg(long)]
    seed: Option<u64>,

    /// Write a log to this file.
    #[arg(long = "log-file", value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Log debug detail (with --log-file).
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Some(path) = &cli.log_file {
        if let Err(error) = logging::init(path, cli.verbose) {
            eprintln!("ascii-snake: {error}");
            return ExitCode::FAILURE;
        }
    }

    install_panic_hook();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            let _ = restore_terminal();
            eprintln!("ascii-snake: {error}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<(), AppError> {
    info!("starting: {cli:?}");

    let mut session = TerminalSession::enter()?;
    let size = session.size()?;
    let store = FileScoreStore::at_default_path();

    let state = match cli.seed {
        Some(seed) => GameState::new_with_seed(size, cli.wrap, store, seed),
        None => GameState::new(size, cli.wrap, store),
    };
    let state = match state {
        Ok(state) => state,
        Err(error) => {
            warn!("{error}");
            session.draw(|canvas| renderer::render_too_small(canvas))?;
            thread::sleep(TOO_SMALL_EXIT_DELAY);
            return Err(error.into());
        }
    };

    let mut game_loop = GameLoop::new(CrosstermInput, session, state);
    game_loop.run()?;

    Ok(())
}

fn install_panic_hook() {
    let default_hook = panic::take_hook();

    panic::set_hook(Box::new(move |panic_info| {
        let _ = restore_terminal();
        default_hook(panic_info);
    }));
}

//! Slide 2048 terminal front end
//!
//! Reads one command per line from stdin and prints the board after each move.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use slide_2048::highscores::{HighScoreEntry, now_ms};
use slide_2048::persistence::{self, JsonFileStore, ScoreStore};
use slide_2048::platform::Command;
use slide_2048::sim::{GameEvent, GamePhase, GameState};
use slide_2048::Settings;

#[derive(Parser, Debug)]
#[command(name = "slide-2048", about = "Slide and merge tiles to reach 2048")]
struct Args {
    /// RNG seed for the first game (defaults to the current time)
    #[arg(long)]
    seed: Option<u64>,

    /// Settings file (JSON); missing means defaults
    #[arg(long, default_value = "slide-2048-settings.json")]
    settings: PathBuf,

    /// Continue the game stored in the save file
    #[arg(long)]
    resume: bool,
}

const HELP: &str = "keys: w/a/s/d or up/down/left/right, n = new game, c = continue after win, save, q = quit";

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let settings = Settings::load(&args.settings)
        .with_context(|| format!("loading settings from {}", args.settings.display()))?;
    let mut store = JsonFileStore::new(&settings.highscores_path);

    let saved = if args.resume {
        persistence::load_game(&settings.save_path).context("loading saved game")?
    } else {
        None
    };
    if args.resume && saved.is_none() {
        log::warn!("No saved game at {}", settings.save_path.display());
    }
    let mut state = saved.unwrap_or_else(|| new_game(args.seed, &settings));
    log::info!("Slide 2048 starting (seed {})", state.seed);

    let stdin = io::stdin();
    let mut out = io::stdout().lock();
    run(stdin.lock(), &mut out, &mut store, &mut state, &settings)
}

/// Play commands from `input` until `q` or end of input.
///
/// An unfinished run with points is recorded on the way out, whichever way
/// the session ends.
fn run(
    input: impl BufRead,
    out: &mut impl Write,
    store: &mut impl ScoreStore,
    state: &mut GameState,
    settings: &Settings,
) -> Result<()> {
    let mut best = store.best_score().context("loading high scores")?;
    render(out, state, best, settings)?;

    for line in input.lines() {
        let line = line.context("reading input")?;
        if line.trim().is_empty() {
            continue;
        }

        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(e) => {
                writeln!(out, "{e}. {HELP}")?;
                continue;
            }
        };

        match command {
            Command::Move(direction) => {
                let report = state.step(direction);
                best = best.max(state.score);
                if report.events.contains(&GameEvent::Won) && state.phase == GamePhase::Won {
                    writeln!(out, "You reached 2048! Type `c` to keep going or `n` for a new game.")?;
                }
                if report.events.contains(&GameEvent::GameOver) {
                    finish_run(out, store, state)?;
                    persistence::clear_game(&settings.save_path).context("clearing save")?;
                }
            }
            Command::NewGame => {
                record_unfinished(out, store, state)?;
                state.restart(now_ms());
                state.keep_playing = settings.keep_playing_after_win;
            }
            Command::Continue => state.continue_after_win(),
            Command::Save => {
                persistence::save_game(&settings.save_path, state).context("saving game")?;
                writeln!(out, "Saved to {}", settings.save_path.display())?;
                continue;
            }
            Command::Help => {
                writeln!(out, "{HELP}")?;
                continue;
            }
            Command::Quit => break,
        }

        render(out, state, best, settings)?;
    }

    record_unfinished(out, store, state)
}

fn new_game(seed: Option<u64>, settings: &Settings) -> GameState {
    let mut state = GameState::new(seed.unwrap_or_else(now_ms), settings.four_chance);
    state.keep_playing = settings.keep_playing_after_win;
    state
}

/// Record a run that is still in progress. Finished runs were recorded when
/// they ended; empty ones never place.
fn record_unfinished(
    out: &mut impl Write,
    store: &mut impl ScoreStore,
    state: &GameState,
) -> Result<()> {
    if state.score > 0 && !state.is_over() {
        finish_run(out, store, state)?;
    }
    Ok(())
}

fn finish_run(out: &mut impl Write, store: &mut impl ScoreStore, state: &GameState) -> Result<()> {
    let entry = HighScoreEntry {
        score: state.score,
        highest_tile: state.grid.highest_tile(),
        moves: state.moves,
        timestamp_ms: now_ms(),
    };
    if let Some(rank) = store.record_best(entry).context("recording high score")? {
        log::info!("Score {} placed #{} on the leaderboard", state.score, rank);
        writeln!(out, "New high score #{rank}: {}", state.score)?;
    }
    Ok(())
}

fn render(out: &mut impl Write, state: &GameState, best: u64, settings: &Settings) -> Result<()> {
    writeln!(out, "\nscore {:>6}   best {:>6}", state.score, best.max(state.score))?;
    write!(out, "{}", state.grid)?;
    match state.phase {
        GamePhase::GameOver => writeln!(out, "Game over. Type `n` for a new game.")?,
        GamePhase::Won => writeln!(out, "Paused at 2048. `c` continues.")?,
        GamePhase::Playing if settings.show_hints => writeln!(out, "{HELP}")?,
        GamePhase::Playing => {}
    }
    out.flush()?;
    Ok(())
}

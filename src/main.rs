use std::io;
use std::path::PathBuf;
use std::time::Instant;

use clap::Parser;
use log::{error, info, warn};
use thiserror::Error;
use themed_snake::config::{
    ConfigError, DEFAULT_GRID_SIZE, DEFAULT_INITIAL_SPEED_MS, DEFAULT_MIN_SPEED_MS,
    DEFAULT_SCORE_INCREMENT, DEFAULT_SPEED_DECREMENT_MS, FRAME_INTERVAL, GameConfig,
};
use themed_snake::game::{GameState, GameStatus};
use themed_snake::input::{GameInput, InputHandler};
use themed_snake::logging;
use themed_snake::renderer;
use themed_snake::score::{HighScoreStore, scores_path};
use themed_snake::terminal_runtime::{AppTerminal, TerminalSession};
use themed_snake::theme::{self, LoadedTheme};
use themed_snake::tick_clock::TickClock;
use themed_snake::ui::hud::HudInfo;

#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Board dimension; the board is square.
    #[arg(long, default_value_t = DEFAULT_GRID_SIZE)]
    grid_size: u16,

    /// Starting tick period in milliseconds.
    #[arg(long, default_value_t = DEFAULT_INITIAL_SPEED_MS)]
    initial_speed_ms: u64,

    /// Fastest allowed tick period in milliseconds.
    #[arg(long, default_value_t = DEFAULT_MIN_SPEED_MS)]
    min_speed_ms: u64,

    /// Tick period reduction per food eaten.
    #[arg(long, default_value_t = DEFAULT_SPEED_DECREMENT_MS)]
    speed_decrement_ms: u64,

    /// Points per food eaten.
    #[arg(long, default_value_t = DEFAULT_SCORE_INCREMENT)]
    score_increment: u32,

    /// Theme JSON file (bare theme or generated theme response).
    #[arg(long)]
    theme: Option<PathBuf>,

    /// High score file; defaults to the platform data directory.
    #[arg(long)]
    scores_file: Option<PathBuf>,

    /// Log file; defaults to the platform data directory.
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Log debug events such as every food eaten.
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn game_config(&self) -> GameConfig {
        GameConfig {
            grid_size: self.grid_size,
            initial_speed_ms: self.initial_speed_ms,
            min_speed_ms: self.min_speed_ms,
            speed_decrement_ms: self.speed_decrement_ms,
            score_increment: self.score_increment,
        }
    }
}

#[derive(Debug, Error)]
enum AppError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Io(#[from] io::Error),
}

fn main() -> Result<(), AppError> {
    let cli = Cli::parse();
    let config = cli.game_config();
    let state = GameState::new(config)?;

    let log_file = cli.log_file.clone().unwrap_or_else(logging::log_path);
    if let Err(error) = logging::init(&log_file, cli.verbose) {
        eprintln!("Warning: logging disabled: {error}");
    }
    info!("starting themed-snake with {config:?}");

    let scores_file = cli.scores_file.clone().unwrap_or_else(scores_path);
    let mut store = match HighScoreStore::open(scores_file.clone()) {
        Ok(store) => store,
        Err(error) => {
            eprintln!(
                "Warning: could not read high score from {}: {error}",
                scores_file.display()
            );
            warn!("high score unreadable, starting from 0: {error}");
            HighScoreStore::empty(scores_file)
        }
    };

    let loaded_theme = theme::load_or_default(cli.theme.as_deref());

    let mut session = TerminalSession::enter()?;
    run(session.terminal_mut(), state, &mut store, &loaded_theme)?;
    drop(session);

    info!("exiting");
    Ok(())
}

fn run(
    terminal: &mut AppTerminal,
    mut state: GameState,
    store: &mut HighScoreStore,
    loaded_theme: &LoadedTheme,
) -> io::Result<()> {
    let mut input = InputHandler::new();
    let mut clock = TickClock::new(state.tick_interval(), Instant::now());
    let mut last_status = state.status();
    let mut reference_high_score = store.high_score();

    loop {
        terminal.draw(|frame| {
            renderer::render(
                frame,
                &state,
                HudInfo {
                    high_score: store.high_score(),
                    game_over_reference_high_score: reference_high_score,
                    theme: &loaded_theme.theme,
                    commentary: loaded_theme.commentary.as_deref(),
                },
            )
        })?;

        let timeout = if state.status() == GameStatus::Playing {
            clock.remaining(Instant::now()).min(FRAME_INTERVAL)
        } else {
            FRAME_INTERVAL
        };
        if let Some(game_input) = input.poll_input(timeout)? {
            if matches!(game_input, GameInput::Quit) {
                break;
            }

            state = state.apply_input(game_input);
        }

        // The period always tracks the current speed; no ticks while held.
        let now = Instant::now();
        clock.reconfigure(state.tick_interval());
        if state.status() == GameStatus::Playing {
            if clock.is_due(now) {
                state = state.tick();
                clock.mark(now);
            }
        } else {
            clock.rearm(now);
        }

        if state.status() != last_status {
            if let Some(final_score) = state.final_score() {
                reference_high_score = store.high_score();
                record_final_score(store, final_score);
            }

            last_status = state.status();
        }
    }

    Ok(())
}

fn record_final_score(store: &mut HighScoreStore, final_score: u32) {
    if let Err(error) = store.submit(final_score) {
        error!(
            "failed to save high score to {}: {error}",
            store.path().display()
        );
    }
}

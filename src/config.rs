use std::time::Duration;

use thiserror::Error;

/// Default board dimension (the board is square).
pub const DEFAULT_GRID_SIZE: u16 = 20;

/// Starting tick period in milliseconds.
pub const DEFAULT_INITIAL_SPEED_MS: u64 = 150;

/// Floor on the tick period in milliseconds.
pub const DEFAULT_MIN_SPEED_MS: u64 = 50;

/// Tick period reduction per food eaten.
pub const DEFAULT_SPEED_DECREMENT_MS: u64 = 2;

/// Points awarded per food eaten.
pub const DEFAULT_SCORE_INCREMENT: u32 = 10;

/// Redraw and input polling interval of the host loop.
pub const FRAME_INTERVAL: Duration = Duration::from_millis(16);

/// Terminal columns used for one logical cell, so cells look square.
pub const CELL_WIDTH: u16 = 2;

/// Glyph drawn for every snake segment.
pub const GLYPH_SNAKE_BODY: &str = "██";

/// Head glyphs, one per movement direction.
pub const GLYPH_SNAKE_HEAD_UP: &str = "▀▀";
pub const GLYPH_SNAKE_HEAD_DOWN: &str = "▄▄";
pub const GLYPH_SNAKE_HEAD_LEFT: &str = "◀█";
pub const GLYPH_SNAKE_HEAD_RIGHT: &str = "█▶";

pub const GLYPH_FOOD: &str = "●";

/// Faint dot marking an empty cell.
pub const GLYPH_GRID_DOT: &str = "·";

pub const GLYPH_TABLE_SEPARATOR: &str = "│";

/// Horizontal margin between the terminal edge and the HUD text.
pub const HUD_MARGIN_X: u16 = 1;

/// Tunable rules for one simulation.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct GameConfig {
    /// Board dimension N; valid cells are `0..N` on both axes.
    pub grid_size: u16,
    pub initial_speed_ms: u64,
    pub min_speed_ms: u64,
    pub speed_decrement_ms: u64,
    pub score_increment: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_size: DEFAULT_GRID_SIZE,
            initial_speed_ms: DEFAULT_INITIAL_SPEED_MS,
            min_speed_ms: DEFAULT_MIN_SPEED_MS,
            speed_decrement_ms: DEFAULT_SPEED_DECREMENT_MS,
            score_increment: DEFAULT_SCORE_INCREMENT,
        }
    }
}

/// Rejected configuration values.
#[derive(Debug, Error, Eq, PartialEq)]
pub enum ConfigError {
    #[error("grid size must be at least 2, got {0}")]
    GridTooSmall(u16),
    #[error("minimum speed must be at least 1 ms")]
    ZeroMinSpeed,
    #[error("minimum speed ({min} ms) exceeds initial speed ({initial} ms)")]
    MinAboveInitial { min: u64, initial: u64 },
}

impl GameConfig {
    /// Checks the values the simulation relies on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.grid_size < 2 {
            return Err(ConfigError::GridTooSmall(self.grid_size));
        }

        if self.min_speed_ms == 0 {
            return Err(ConfigError::ZeroMinSpeed);
        }

        if self.min_speed_ms > self.initial_speed_ms {
            return Err(ConfigError::MinAboveInitial {
                min: self.min_speed_ms,
                initial: self.initial_speed_ms,
            });
        }

        Ok(())
    }
}

use std::fs;
use std::io;
use std::path::Path;

use log::{info, warn};
use ratatui::style::Color;
use serde::Deserialize;
use thiserror::Error;

/// Colors applied to every visual element.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Theme {
    pub name: String,
    /// Terminal area outside the board.
    pub background: Color,
    /// Empty board cells.
    pub board: Color,
    pub snake: Color,
    pub snake_head: Color,
    pub food: Color,
    /// Grid dots drawn in empty cells; keep it subtle.
    pub grid: Color,
    pub text: Color,
    pub border: Color,
}

impl Theme {
    /// The built-in slate and green palette.
    #[must_use]
    pub fn classic() -> Self {
        Self {
            name: "Classic".to_owned(),
            background: Color::Rgb(0x0f, 0x17, 0x2a),
            board: Color::Rgb(0x1e, 0x29, 0x3b),
            snake: Color::Rgb(0x22, 0xc5, 0x5e),
            snake_head: Color::Rgb(0x4a, 0xde, 0x80),
            food: Color::Rgb(0xef, 0x44, 0x44),
            grid: Color::Rgb(0x33, 0x41, 0x55),
            text: Color::Rgb(0xf8, 0xfa, 0xfc),
            border: Color::Rgb(0x47, 0x55, 0x69),
        }
    }

    /// Parses a theme document.
    ///
    /// Accepts either a bare theme object or a generator response that wraps
    /// the theme together with a one-line commentary.
    pub fn from_json(raw: &str) -> Result<LoadedTheme, ThemeError> {
        let (file, commentary) = match serde_json::from_str::<ThemeDocument>(raw)? {
            ThemeDocument::Generated { theme, commentary } => (theme, commentary),
            ThemeDocument::Bare(theme) => (theme, None),
        };

        Ok(LoadedTheme {
            theme: file.into_theme()?,
            commentary: commentary.filter(|text| !text.trim().is_empty()),
        })
    }

    /// Reads and parses a theme document from disk.
    pub fn load(path: &Path) -> Result<LoadedTheme, ThemeError> {
        let raw = fs::read_to_string(path)?;
        Self::from_json(&raw)
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::classic()
    }
}

/// A parsed theme plus the optional remark that came with it.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct LoadedTheme {
    pub theme: Theme,
    pub commentary: Option<String>,
}

impl Default for LoadedTheme {
    fn default() -> Self {
        Self {
            theme: Theme::classic(),
            commentary: None,
        }
    }
}

#[derive(Debug, Error)]
pub enum ThemeError {
    #[error("failed to read theme file: {0}")]
    Io(#[from] io::Error),
    #[error("json parse error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("{field} is not a #RRGGBB color: {value:?}")]
    InvalidColor { field: &'static str, value: String },
}

/// Loads the theme at `path`, falling back to the classic palette.
///
/// Theme problems never stop the game; they are logged and ignored.
#[must_use]
pub fn load_or_default(path: Option<&Path>) -> LoadedTheme {
    let Some(path) = path else {
        return LoadedTheme::default();
    };

    match Theme::load(path) {
        Ok(loaded) => {
            info!("loaded theme '{}' from {}", loaded.theme.name, path.display());
            loaded
        }
        Err(error) => {
            warn!(
                "ignoring theme {}: {error}; using the classic theme",
                path.display()
            );
            LoadedTheme::default()
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ThemeDocument {
    Generated {
        theme: ThemeFile,
        #[serde(default)]
        commentary: Option<String>,
    },
    Bare(ThemeFile),
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ThemeFile {
    name: String,
    background_color: String,
    board_color: String,
    snake_color: String,
    snake_head_color: String,
    food_color: String,
    grid_color: String,
    text_color: String,
    border_color: String,
}

impl ThemeFile {
    fn into_theme(self) -> Result<Theme, ThemeError> {
        Ok(Theme {
            background: color_field("backgroundColor", &self.background_color)?,
            board: color_field("boardColor", &self.board_color)?,
            snake: color_field("snakeColor", &self.snake_color)?,
            snake_head: color_field("snakeHeadColor", &self.snake_head_color)?,
            food: color_field("foodColor", &self.food_color)?,
            grid: color_field("gridColor", &self.grid_color)?,
            text: color_field("textColor", &self.text_color)?,
            border: color_field("borderColor", &self.border_color)?,
            name: self.name,
        })
    }
}

fn color_field(field: &'static str, value: &str) -> Result<Color, ThemeError> {
    parse_hex_color(value.trim()).ok_or_else(|| ThemeError::InvalidColor {
        field,
        value: value.to_owned(),
    })
}

fn parse_hex_color(value: &str) -> Option<Color> {
    let hex = value.strip_prefix('#')?;
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }

    let red = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let green = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let blue = u8::from_str_radix(&hex[4..6], 16).ok()?;

    Some(Color::Rgb(red, green, blue))
}

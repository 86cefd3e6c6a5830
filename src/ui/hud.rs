use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use unicode_width::UnicodeWidthStr;

use crate::config::{GLYPH_TABLE_SEPARATOR, HUD_MARGIN_X};
use crate::game::GameState;
use crate::theme::Theme;

/// Values the HUD shows that do not live in the game state.
#[derive(Debug, Clone, Copy)]
pub struct HudInfo<'a> {
    pub high_score: u32,
    /// High score as it was before the current game ended.
    pub game_over_reference_high_score: u32,
    pub theme: &'a Theme,
    pub commentary: Option<&'a str>,
}

/// Renders the two-line HUD and returns the remaining area below it.
#[must_use]
pub fn render_hud(
    frame: &mut Frame<'_>,
    area: Rect,
    state: &GameState,
    info: &HudInfo<'_>,
) -> Rect {
    let [title_area, stats_area, rest] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Min(0),
    ])
    .areas(area);

    let title_area = inset_horizontal(title_area, HUD_MARGIN_X);
    let stats_area = inset_horizontal(stats_area, HUD_MARGIN_X);
    let theme = info.theme;

    let [title_left, title_right] =
        Layout::horizontal([Constraint::Min(0), Constraint::Min(0)]).areas(title_area);
    frame.render_widget(
        Paragraph::new(Line::from("SNAKE")).style(
            Style::default()
                .fg(theme.snake_head)
                .add_modifier(Modifier::BOLD),
        ),
        title_left,
    );
    frame.render_widget(
        Paragraph::new(Line::from(theme.name.as_str()))
            .alignment(Alignment::Right)
            .style(Style::default().fg(theme.grid)),
        title_right,
    );

    let stats = StatsRow {
        length: state.snake().len(),
        speed_ms: state.speed_ms(),
        score: state.score(),
        high_score: info.high_score.max(state.score()),
    };
    frame.render_widget(
        Paragraph::new(stats.line(usize::from(stats_area.width), theme))
            .alignment(Alignment::Right)
            .style(Style::default().fg(theme.text)),
        stats_area,
    );

    rest
}

/// Renders the theme commentary, or the key help when there is none.
pub fn render_footer(frame: &mut Frame<'_>, area: Rect, info: &HudInfo<'_>) {
    let text = info
        .commentary
        .unwrap_or("Arrows/WASD move | Space pause | Enter restart | Q quit");
    frame.render_widget(
        Paragraph::new(Line::from(text))
            .alignment(Alignment::Center)
            .style(Style::default().fg(info.theme.grid)),
        inset_horizontal(area, HUD_MARGIN_X),
    );
}

fn inset_horizontal(area: Rect, margin: u16) -> Rect {
    let total_margin = margin.saturating_mul(2);
    Rect {
        x: area.x.saturating_add(margin),
        y: area.y,
        width: area.width.saturating_sub(total_margin),
        height: area.height,
    }
}

#[derive(Debug, Clone, Copy)]
struct StatsRow {
    length: usize,
    speed_ms: u64,
    score: u32,
    high_score: u32,
}

impl StatsRow {
    fn labels(compact: bool) -> [&'static str; 4] {
        if compact {
            ["L", "V", "S", "H"]
        } else {
            ["Length", "Speed", "Score", "Hi"]
        }
    }

    fn values(self) -> [String; 4] {
        [
            self.length.to_string(),
            format!("{}ms", self.speed_ms),
            self.score.to_string(),
            self.high_score.to_string(),
        ]
    }

    fn width(self, compact: bool) -> usize {
        let sep_width = format!(" {GLYPH_TABLE_SEPARATOR} ").width();
        let fields: usize = Self::labels(compact)
            .iter()
            .zip(self.values())
            .map(|(label, value)| format!("{label}: {value}").width())
            .sum();

        fields + sep_width * 3
    }

    fn line(self, available_width: usize, theme: &Theme) -> Line<'static> {
        let compact = self.width(false) > available_width;
        let sep = format!(" {GLYPH_TABLE_SEPARATOR} ");
        let highlight = self.score > 0 && self.score >= self.high_score;

        let mut spans = Vec::new();
        for (idx, (label, value)) in Self::labels(compact)
            .iter()
            .zip(self.values())
            .enumerate()
        {
            if idx > 0 {
                spans.push(Span::styled(sep.clone(), Style::default().fg(theme.grid)));
            }

            let value_style = match idx {
                2 if highlight => Style::default()
                    .fg(theme.snake_head)
                    .add_modifier(Modifier::BOLD),
                2 => Style::default().fg(theme.snake_head),
                _ => Style::default().fg(theme.text),
            };
            spans.push(Span::raw(format!("{label}: ")));
            spans.push(Span::styled(value, value_style));
        }

        Line::from(spans)
    }
}

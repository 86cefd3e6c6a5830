use ratatui::Frame;
use ratatui::layout::{Constraint, Flex, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::widgets::{Block, Paragraph};

use crate::config::{
    CELL_WIDTH, GLYPH_FOOD, GLYPH_GRID_DOT, GLYPH_SNAKE_BODY, GLYPH_SNAKE_HEAD_DOWN,
    GLYPH_SNAKE_HEAD_LEFT, GLYPH_SNAKE_HEAD_RIGHT, GLYPH_SNAKE_HEAD_UP,
};
use crate::game::{GameState, GameStatus};
use crate::input::Direction;
use crate::snake::Position;
use crate::theme::Theme;
use crate::ui::hud::{HudInfo, render_footer, render_hud};
use crate::ui::menu::{render_game_over_menu, render_pause_menu, render_start_menu};

/// Renders the full game frame from immutable state.
pub fn render(frame: &mut Frame<'_>, state: &GameState, hud_info: HudInfo<'_>) {
    let area = frame.area();
    let theme = hud_info.theme;
    frame.render_widget(
        Paragraph::new("").style(Style::default().bg(theme.background)),
        area,
    );

    let below_hud = render_hud(frame, area, state, &hud_info);
    let [board_area, footer_area] =
        Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(below_hud);
    render_footer(frame, footer_area, &hud_info);

    let board = board_rect(board_area, state.grid_size());
    let block = Block::bordered()
        .border_style(Style::default().fg(theme.border).bg(theme.background))
        .style(Style::default().bg(theme.board));
    let inner = block.inner(board);
    frame.render_widget(block, board);

    render_grid(frame, inner, state, theme);
    render_food(frame, inner, state, theme);
    render_snake(frame, inner, state, theme);

    match state.status() {
        GameStatus::Idle => render_start_menu(frame, board, hud_info.high_score, theme),
        GameStatus::Paused => render_pause_menu(frame, board, theme),
        GameStatus::GameOver => render_game_over_menu(
            frame,
            board,
            state.score(),
            hud_info.game_over_reference_high_score,
            state.death_reason(),
            theme,
        ),
        GameStatus::Playing => {}
    }
}

/// Centers a bordered board of `grid_size` cells inside `area`.
fn board_rect(area: Rect, grid_size: u16) -> Rect {
    let width = grid_size.saturating_mul(CELL_WIDTH).saturating_add(2);
    let height = grid_size.saturating_add(2);

    let [column] = Layout::horizontal([Constraint::Length(width.min(area.width))])
        .flex(Flex::Center)
        .areas(area);
    let [board] = Layout::vertical([Constraint::Length(height.min(area.height))])
        .flex(Flex::Center)
        .areas(column);

    board
}

fn render_grid(frame: &mut Frame<'_>, inner: Rect, state: &GameState, theme: &Theme) {
    let size = i32::from(state.grid_size());
    let style = Style::default().fg(theme.grid).bg(theme.board);
    let buffer = frame.buffer_mut();

    for y in 0..size {
        for x in 0..size {
            if let Some((column, row)) = logical_to_terminal(inner, size, Position::new(x, y)) {
                buffer.set_string(column, row, GLYPH_GRID_DOT, style);
            }
        }
    }
}

fn render_food(frame: &mut Frame<'_>, inner: Rect, state: &GameState, theme: &Theme) {
    let size = i32::from(state.grid_size());
    let Some((x, y)) = logical_to_terminal(inner, size, state.food()) else {
        return;
    };

    let buffer = frame.buffer_mut();
    buffer.set_string(
        x,
        y,
        GLYPH_FOOD,
        Style::default()
            .fg(theme.food)
            .bg(theme.board)
            .add_modifier(Modifier::BOLD),
    );
}

fn render_snake(frame: &mut Frame<'_>, inner: Rect, state: &GameState, theme: &Theme) {
    let size = i32::from(state.grid_size());
    let snake = state.snake();
    let buffer = frame.buffer_mut();

    // Tail first so the head is painted last.
    for (idx, segment) in snake.segments().enumerate().rev() {
        let Some((x, y)) = logical_to_terminal(inner, size, *segment) else {
            continue;
        };

        if idx == 0 {
            buffer.set_string(
                x,
                y,
                head_glyph(snake.direction()),
                Style::default().fg(theme.snake_head).bg(theme.board),
            );
        } else {
            buffer.set_string(
                x,
                y,
                GLYPH_SNAKE_BODY,
                Style::default().fg(theme.snake).bg(theme.board),
            );
        }
    }
}

fn head_glyph(direction: Direction) -> &'static str {
    match direction {
        Direction::Up => GLYPH_SNAKE_HEAD_UP,
        Direction::Down => GLYPH_SNAKE_HEAD_DOWN,
        Direction::Left => GLYPH_SNAKE_HEAD_LEFT,
        Direction::Right => GLYPH_SNAKE_HEAD_RIGHT,
    }
}

/// Maps a cell to its top-left terminal column and row, if visible.
fn logical_to_terminal(inner: Rect, grid_size: i32, position: Position) -> Option<(u16, u16)> {
    if position.x < 0 || position.y < 0 || position.x >= grid_size || position.y >= grid_size {
        return None;
    }

    let x_offset = u16::try_from(position.x).ok()?.checked_mul(CELL_WIDTH)?;
    let y_offset = u16::try_from(position.y).ok()?;

    let x = inner.x.checked_add(x_offset)?;
    let y = inner.y.checked_add(y_offset)?;
    if x.saturating_add(CELL_WIDTH) > inner.right() || y >= inner.bottom() {
        return None;
    }

    Some((x, y))
}

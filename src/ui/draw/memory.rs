//! Memory game drawing functions
//!
//! - Stats header (time, moves, score, pairs) and button states
//! - Card board
//! - Result popup

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::{draw_popup, popup_area, stat_line};
use crate::app::App;
use crate::memory::{MemoryGame, MemoryResult, TOTAL_PAIRS};
use crate::ui::card::CardTile;
use crate::ui::theme::Theme;

/// Preferred size of one card cell, gutter included
const CELL_WIDTH: u16 = 10;
const CELL_HEIGHT: u16 = 4;

/// Countdown turns to the warning color below this many seconds
const LOW_TIME_SECS: u32 = 30;

pub(crate) fn draw_memory(f: &mut Frame, app: &App, area: Rect, theme: &Theme) {
    let Some(game) = app.memory() else {
        return;
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4), // Stats and buttons
            Constraint::Min(1),    // Board
        ])
        .split(area);

    draw_stats(f, game, chunks[0], theme);
    draw_board(f, app, game, chunks[1], theme);

    if app.game_overlay() {
        if let Some(result) = game.result() {
            draw_result(f, result, area, theme);
        }
    }
}

fn draw_stats(f: &mut Frame, game: &MemoryGame, area: Rect, theme: &Theme) {
    let clock_style = if game.time_left() <= LOW_TIME_SECS && game.phase().is_in_progress() {
        Style::default().fg(theme.warning).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(theme.foreground).add_modifier(Modifier::BOLD)
    };
    let label = Style::default().fg(theme.dimmed);

    let stats = Line::from(vec![
        Span::styled(" ⏱ Time ", label),
        Span::styled(game.clock_text(), clock_style),
        Span::styled("   Moves ", label),
        Span::styled(game.moves().to_string(), clock_style.fg(theme.foreground)),
        Span::styled("   Score ", label),
        Span::styled(game.score().to_string(), clock_style.fg(theme.foreground)),
        Span::styled("   Pairs ", label),
        Span::styled(
            format!("{}/{}", game.matched_pairs(), TOTAL_PAIRS),
            clock_style.fg(theme.foreground),
        ),
    ]);

    let button = |key: &'static str, name: &'static str, enabled: bool| {
        let style = if enabled {
            Style::default().fg(theme.accent).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme.dimmed_alt)
        };
        Span::styled(format!(" [{}] {} ", key, name), style)
    };
    let buttons = Line::from(vec![
        button("s", "Start", game.can_start()),
        button("u", "Submit", game.can_submit()),
        button("r", "Reset", game.can_reset()),
    ]);

    let header = Paragraph::new(vec![stats, buttons]).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.dimmed_alt))
            .style(Style::default().bg(theme.background)),
    );
    f.render_widget(header, area);
}

fn draw_board(f: &mut Frame, app: &App, game: &MemoryGame, area: Rect, theme: &Theme) {
    let grid = app.grid();
    let width = (grid.columns * CELL_WIDTH).min(area.width);
    let height = (grid.rows * CELL_HEIGHT).min(area.height);
    let board = popup_area(area, width, height);
    if board.width < grid.columns || board.height < grid.rows {
        return;
    }

    let hidden = app.config().appearance.hidden_card.as_str();
    for (index, card) in game.cards().iter().enumerate() {
        let tile = CardTile::new(card, theme)
            .hidden_glyph(hidden)
            .selected(index == app.board_cursor());
        f.render_widget(tile, grid.cell_rect(board, index));
    }
}

fn stars_text(stars: u8) -> String {
    (1..=5u8)
        .map(|i| if i <= stars { '★' } else { '☆' })
        .collect()
}

fn draw_result(f: &mut Frame, result: &MemoryResult, area: Rect, theme: &Theme) {
    let lines = vec![
        Line::from(Span::styled(
            result.reason.message(),
            Style::default().fg(theme.accent).add_modifier(Modifier::BOLD),
        )),
        Line::default(),
        stat_line("Final score: ", result.score.to_string(), theme),
        stat_line("Moves: ", result.moves.to_string(), theme),
        Line::from(Span::styled(
            stars_text(result.stars),
            Style::default().fg(theme.warning),
        )),
        Line::default(),
        Line::from(Span::styled(
            "Enter: close   r: new game",
            Style::default().fg(theme.dimmed),
        )),
    ];
    draw_popup(f, popup_area(area, 40, 11), "Game over", lines, 0, theme);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stars_text() {
        assert_eq!(stars_text(5), "★★★★★");
        assert_eq!(stars_text(3), "★★★☆☆");
        assert_eq!(stars_text(1), "★☆☆☆☆");
    }
}

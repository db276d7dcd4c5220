//! Drawing functions for the TUI
//!
//! This module contains all rendering logic, split by tab:
//! - `memory` - Memory game board, stats and result popup
//! - `quiz` - Quiz welcome screen, question view, results and review
//!
//! The shared frame (tab bar, status bar) and popup geometry live here.

mod memory;
mod quiz;

use ratatui::{
    layout::{Constraint, Direction, Flex, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Tabs},
    Frame,
};

use crate::app::App;
use crate::command::Tab;
use crate::ui::theme::Theme;

use memory::draw_memory;
use quiz::draw_quiz;
pub use quiz::max_review_scroll;

/// Main draw function
pub fn draw(f: &mut Frame, app: &App) {
    let theme = app.theme();
    let area = f.area();
    let bg_block = Block::default().style(Style::default().bg(theme.background));
    f.render_widget(bg_block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Tab bar
            Constraint::Min(1),    // Active tab
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    draw_tab_bar(f, app, chunks[0], theme);
    match app.tab() {
        Tab::Game => draw_memory(f, app, chunks[1], theme),
        Tab::Quiz => draw_quiz(f, app, chunks[1], theme),
    }
    draw_status_bar(f, app, chunks[2], theme);
}

fn draw_tab_bar(f: &mut Frame, app: &App, area: Rect, theme: &Theme) {
    let titles: Vec<Line> = Tab::ALL
        .iter()
        .map(|tab| Line::from(format!(" {} ", tab.title())))
        .collect();

    let toggle = format!(" {} t: theme ", app.theme_mode().toggle_icon());
    let tabs = Tabs::new(titles)
        .select(app.tab().index())
        .style(Style::default().fg(theme.dimmed).bg(theme.background))
        .highlight_style(
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
        )
        .divider("│")
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.accent))
                .title(" memquiz ")
                .title_top(Line::from(toggle).right_aligned())
                .style(Style::default().bg(theme.background)),
        );

    f.render_widget(tabs, area);
}

/// Key hints for whatever is on screen
fn draw_status_bar(f: &mut Frame, app: &App, area: Rect, theme: &Theme) {
    let hints = if app.overlay_open() {
        match app.tab() {
            Tab::Game => " Enter/Esc: close | r: new game | q: quit",
            Tab::Quiz => " Enter/Esc: close | v: answers | ↑↓: scroll | r: restart | q: quit",
        }
    } else {
        match app.tab() {
            Tab::Game => {
                " ←↑↓→: move | Enter: flip | s: start | u: submit | r: reset | Tab: quiz | t: theme | q: quit"
            }
            Tab::Quiz => {
                " ↑↓: choose | Enter/a-d: answer | ←→: prev/next | s: start | u: submit | Tab: game | t: theme | q: quit"
            }
        }
    };

    let status_bar =
        Paragraph::new(hints).style(Style::default().fg(theme.dimmed).bg(theme.background));
    f.render_widget(status_bar, area);
}

/// Centered rectangle for popups, clamped to `area`
pub(crate) fn popup_area(area: Rect, width: u16, height: u16) -> Rect {
    let [row] = Layout::vertical([Constraint::Length(height.min(area.height))])
        .flex(Flex::Center)
        .areas(area);
    let [rect] = Layout::horizontal([Constraint::Length(width.min(area.width))])
        .flex(Flex::Center)
        .areas(row);
    rect
}

/// Clear `area` and draw a bordered popup with `lines`
pub(crate) fn draw_popup(
    f: &mut Frame,
    area: Rect,
    title: &str,
    lines: Vec<Line<'_>>,
    scroll: u16,
    theme: &Theme,
) {
    f.render_widget(Clear, area);
    let popup = Paragraph::new(lines)
        .style(Style::default().fg(theme.foreground).bg(theme.selection_bg))
        .wrap(ratatui::widgets::Wrap { trim: false })
        .scroll((scroll, 0))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.accent))
                .title(format!(" {} ", title))
                .style(Style::default().bg(theme.selection_bg)),
        );
    f.render_widget(popup, area);
}

/// Label and value on one line
pub(crate) fn stat_line<'a>(label: &'a str, value: String, theme: &Theme) -> Line<'a> {
    Line::from(vec![
        Span::styled(label, Style::default().fg(theme.dimmed)),
        Span::styled(
            value,
            Style::default()
                .fg(theme.foreground)
                .add_modifier(Modifier::BOLD),
        ),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::{Command, GameCommand, QuizCommand};
    use crate::config::Config;
    use crate::prefs::Prefs;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use ratatui::{backend::TestBackend, Terminal};
    use std::time::Instant;

    fn app(tab: Tab) -> App {
        let prefs = Prefs::new(std::env::temp_dir().join("memquiz-draw-unused.json"));
        App::new(Config::default(), prefs, tab, StdRng::seed_from_u64(3))
    }

    fn render(app: &App) -> String {
        let backend = TestBackend::new(100, 40);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| draw(f, app)).unwrap();
        let buffer = terminal.backend().buffer();
        let mut text = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                text.push_str(buffer[(x, y)].symbol());
            }
            text.push('\n');
        }
        text
    }

    #[test]
    fn test_popup_area_centered() {
        let area = Rect::new(0, 0, 100, 40);
        assert_eq!(popup_area(area, 40, 10), Rect::new(30, 15, 40, 10));
        assert_eq!(popup_area(Rect::new(0, 0, 20, 5), 40, 10), Rect::new(0, 0, 20, 5));
    }

    #[test]
    fn test_draw_game_tab() {
        let app = app(Tab::Game);
        let screen = render(&app);
        assert!(screen.contains("Memory Game"));
        assert!(screen.contains("05:00"));
        assert!(screen.contains("Moves"));
    }

    #[test]
    fn test_draw_quiz_welcome_and_question() {
        let mut app = app(Tab::Quiz);
        let screen = render(&app);
        assert!(screen.contains("10 questions"));

        app.dispatch(Command::Quiz(QuizCommand::Start), Instant::now());
        let screen = render(&app);
        assert!(screen.contains("1 / 10"));
        assert!(screen.contains("15:00"));
    }

    #[test]
    fn test_draw_result_popups() {
        let t0 = Instant::now();
        let mut app = app(Tab::Game);
        app.dispatch(Command::Game(GameCommand::Start), t0);
        app.dispatch(Command::Game(GameCommand::Submit), t0);
        assert!(render(&app).contains("Ended manually"));

        app.dispatch(Command::SwitchTab(Tab::Quiz), t0);
        app.dispatch(Command::Quiz(QuizCommand::Start), t0);
        app.dispatch(Command::Quiz(QuizCommand::Submit), t0);
        assert!(render(&app).contains("Percentage"));

        app.dispatch(Command::ShowReview, t0);
        assert!(render(&app).contains("Not answered"));
    }
}

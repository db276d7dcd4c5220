//! Quiz drawing functions
//!
//! - Welcome screen before the quiz starts
//! - Question view with lettered options and a navigation hint
//! - Results popup and scrollable answer review

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use super::{draw_popup, popup_area, stat_line};
use crate::app::{App, QuizOverlay};
use crate::quiz::{QuestionView, QuizEngine, QuizResult, Verdict, SESSION_LENGTH};
use crate::session::Phase;
use crate::ui::theme::Theme;

const OPTION_LETTERS: [char; 4] = ['A', 'B', 'C', 'D'];

/// Question, your answer, correct answer, blank
const REVIEW_LINES_PER_ITEM: u16 = 4;

/// Rows around the review text: tab bar, status bar, popup margin, popup borders
const REVIEW_CHROME_ROWS: u16 = 3 + 1 + 2 + 2;

/// Largest useful review scroll for `items` questions on a screen `screen_height` rows tall
pub fn max_review_scroll(items: usize, screen_height: u16) -> u16 {
    let total = (items as u16).saturating_mul(REVIEW_LINES_PER_ITEM);
    let visible = screen_height.saturating_sub(REVIEW_CHROME_ROWS);
    total.saturating_sub(visible)
}

pub(crate) fn draw_quiz(f: &mut Frame, app: &App, area: Rect, theme: &Theme) {
    let Some(quiz) = app.quiz() else {
        return;
    };

    if quiz.phase() == Phase::NotStarted {
        draw_welcome(f, quiz, area, theme);
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Clock, progress, score
            Constraint::Min(1),    // Question
        ])
        .split(area);

    draw_header(f, quiz, chunks[0], theme);
    if let Some(view) = quiz.question_view() {
        draw_question(f, app, &view, chunks[1], theme);
    }

    match app.quiz_overlay() {
        Some(QuizOverlay::Results) => {
            if let Some(result) = quiz.result() {
                draw_results(f, result, area, theme);
            }
        }
        Some(QuizOverlay::Review { scroll }) => draw_review(f, quiz, area, scroll, theme),
        None => {}
    }
}

fn draw_welcome(f: &mut Frame, quiz: &QuizEngine, area: Rect, theme: &Theme) {
    let minutes = quiz.time_left() / 60;
    let lines = vec![
        Line::from(Span::styled(
            "JavaScript Quiz",
            Style::default().fg(theme.accent).add_modifier(Modifier::BOLD),
        )),
        Line::default(),
        Line::from(format!(
            "You will get {} questions and have {} minutes to answer them.",
            SESSION_LENGTH, minutes
        )),
        Line::from("Each correct answer is worth 10 points."),
        Line::default(),
        Line::from(Span::styled(
            "Press s to start",
            Style::default().fg(theme.correct).add_modifier(Modifier::BOLD),
        )),
    ];

    let welcome = Paragraph::new(lines)
        .alignment(ratatui::layout::Alignment::Center)
        .wrap(Wrap { trim: true })
        .style(Style::default().fg(theme.foreground).bg(theme.background));
    f.render_widget(welcome, popup_area(area, 70, 8));
}

fn draw_header(f: &mut Frame, quiz: &QuizEngine, area: Rect, theme: &Theme) {
    let label = Style::default().fg(theme.dimmed);
    let value = Style::default().fg(theme.foreground).add_modifier(Modifier::BOLD);
    let clock = if quiz.time_left() <= 60 && quiz.phase().is_in_progress() {
        value.fg(theme.warning)
    } else {
        value
    };

    let line = Line::from(vec![
        Span::styled(" ⏱ Time ", label),
        Span::styled(quiz.clock_text(), clock),
        Span::styled("   Question ", label),
        Span::styled(quiz.progress_text(), value),
        Span::styled("   Answered ", label),
        Span::styled(
            format!("{}/{}", quiz.answered_count(), quiz.questions().len()),
            value,
        ),
        Span::styled("   Score ", label),
        Span::styled(quiz.score().to_string(), value),
    ]);

    let header = Paragraph::new(line).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.dimmed_alt))
            .style(Style::default().bg(theme.background)),
    );
    f.render_widget(header, area);
}

fn draw_question(f: &mut Frame, app: &App, view: &QuestionView, area: Rect, theme: &Theme) {
    let mut lines = vec![
        Line::from(Span::styled(
            view.text,
            Style::default().fg(theme.foreground).add_modifier(Modifier::BOLD),
        )),
        Line::default(),
    ];

    for (i, option) in view.options.iter().enumerate() {
        let mut style = match option.verdict {
            Some(Verdict::Correct) => Style::default().fg(theme.correct),
            Some(Verdict::Incorrect) => Style::default().fg(theme.incorrect),
            None => Style::default().fg(theme.foreground),
        };
        if option.selected {
            style = style.add_modifier(Modifier::BOLD);
        }
        let under_cursor = i == app.option_cursor() && !app.overlay_open();
        if under_cursor {
            style = style.bg(theme.selection_bg);
        }

        let marker = match option.verdict {
            Some(Verdict::Correct) => " ✓",
            Some(Verdict::Incorrect) => " ✗",
            None => "",
        };
        let pointer = if under_cursor { "▸ " } else { "  " };
        lines.push(Line::from(vec![
            Span::styled(pointer, Style::default().fg(theme.accent)),
            Span::styled(
                format!("{}) {}{}", OPTION_LETTERS[i], option.text, marker),
                style,
            ),
        ]));
    }

    lines.push(Line::default());
    lines.push(nav_line(view, theme));

    let body = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.accent))
                .title(format!(" Question {} ", view.number))
                .style(Style::default().bg(theme.background)),
        );
    f.render_widget(body, area);
}

fn nav_line(view: &QuestionView, theme: &Theme) -> Line<'static> {
    let enabled = Style::default().fg(theme.accent);
    let disabled = Style::default().fg(theme.dimmed_alt);
    let pick = |on: bool| if on { enabled } else { disabled };

    let mut spans = vec![
        Span::styled("← Previous", pick(view.can_go_previous)),
        Span::raw("   "),
        Span::styled("Next →", pick(view.can_go_next)),
    ];
    if view.show_submit {
        spans.push(Span::raw("   "));
        spans.push(Span::styled(
            "u: Submit quiz",
            Style::default().fg(theme.correct).add_modifier(Modifier::BOLD),
        ));
    }
    Line::from(spans)
}

fn draw_results(f: &mut Frame, result: &QuizResult, area: Rect, theme: &Theme) {
    let lines = vec![
        Line::from(Span::styled(
            result.reason.message(),
            Style::default().fg(theme.accent).add_modifier(Modifier::BOLD),
        )),
        Line::default(),
        stat_line("Score: ", result.score.to_string(), theme),
        stat_line(
            "Correct answers: ",
            format!("{} / {}", result.correct, result.total),
            theme,
        ),
        stat_line("Percentage: ", format!("{}%", result.percentage), theme),
        stat_line("Time used: ", result.time_used_text(), theme),
        Line::default(),
        Line::from(Span::styled(
            result.grade.label(),
            Style::default().fg(theme.warning).add_modifier(Modifier::BOLD),
        )),
        Line::default(),
        Line::from(Span::styled(
            "v: review answers   r: restart   Enter: close",
            Style::default().fg(theme.dimmed),
        )),
    ];
    draw_popup(f, popup_area(area, 50, 14), "Quiz results", lines, 0, theme);
}

fn draw_review(f: &mut Frame, quiz: &QuizEngine, area: Rect, scroll: u16, theme: &Theme) {
    let Some(items) = quiz.review() else {
        return;
    };

    let mut lines = Vec::with_capacity(items.len() * REVIEW_LINES_PER_ITEM as usize);
    for (i, item) in items.iter().enumerate() {
        let (mark, mark_style) = if item.is_correct {
            ("✓", Style::default().fg(theme.correct))
        } else {
            ("✗", Style::default().fg(theme.incorrect))
        };
        lines.push(Line::from(vec![
            Span::styled(format!("{} ", mark), mark_style.add_modifier(Modifier::BOLD)),
            Span::styled(
                format!("{}. {}", i + 1, item.question),
                Style::default().add_modifier(Modifier::BOLD),
            ),
        ]));
        lines.push(Line::from(vec![
            Span::styled("  Your answer: ", Style::default().fg(theme.dimmed)),
            Span::styled(item.chosen_label(), mark_style),
        ]));
        lines.push(Line::from(vec![
            Span::styled("  Correct answer: ", Style::default().fg(theme.dimmed)),
            Span::styled(item.correct, Style::default().fg(theme.correct)),
        ]));
        lines.push(Line::default());
    }

    let height = area.height.saturating_sub(2);
    draw_popup(
        f,
        popup_area(area, 80, height),
        "Answer review",
        lines,
        scroll,
        theme,
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_max_review_scroll() {
        // 40 review lines, 32 visible on a 40-row screen
        assert_eq!(max_review_scroll(10, 40), 8);
        // Everything fits
        assert_eq!(max_review_scroll(10, 60), 0);
        // Unknown screen size allows scrolling through every line
        assert_eq!(max_review_scroll(10, 0), 40);
    }
}

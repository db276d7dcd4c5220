//! Key bindings
//!
//! Maps crossterm key events to `Command`s. The mapping depends on the
//! active tab and on whether a popup is open, so it reads (but never
//! mutates) the app.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::app::{App, QuizOverlay};
use crate::command::{Command, GameCommand, QuizCommand, Tab};
use crate::ui::layout::Direction;

pub fn command_for_key(app: &App, key: KeyEvent) -> Option<Command> {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(Command::Quit);
    }

    // Keys that work everywhere
    match key.code {
        KeyCode::Tab | KeyCode::BackTab => return Some(Command::NextTab),
        KeyCode::F(1) => return Some(Command::SwitchTab(Tab::Game)),
        KeyCode::F(2) => return Some(Command::SwitchTab(Tab::Quiz)),
        KeyCode::Char('t') => return Some(Command::ToggleTheme),
        KeyCode::Char('q') => return Some(Command::Quit),
        _ => {}
    }

    if app.overlay_open() {
        return overlay_command(app, key.code);
    }

    match app.tab() {
        Tab::Game => game_command(app, key.code),
        Tab::Quiz => quiz_command(app, key.code),
    }
}

fn direction(code: KeyCode) -> Option<Direction> {
    match code {
        KeyCode::Up | KeyCode::Char('k') => Some(Direction::Up),
        KeyCode::Down | KeyCode::Char('j') => Some(Direction::Down),
        KeyCode::Left | KeyCode::Char('h') => Some(Direction::Left),
        KeyCode::Right | KeyCode::Char('l') => Some(Direction::Right),
        _ => None,
    }
}

fn overlay_command(app: &App, code: KeyCode) -> Option<Command> {
    let in_review = matches!(app.quiz_overlay(), Some(QuizOverlay::Review { .. }));
    match (app.tab(), code) {
        (_, KeyCode::Esc | KeyCode::Enter) => Some(Command::CloseOverlay),
        (Tab::Game, KeyCode::Char('r')) => Some(Command::Game(GameCommand::Reset)),
        (Tab::Quiz, KeyCode::Char('r')) => Some(Command::Quiz(QuizCommand::Restart)),
        (Tab::Quiz, KeyCode::Char('v')) => Some(Command::ShowReview),
        (Tab::Quiz, KeyCode::Up | KeyCode::Down | KeyCode::Char('k') | KeyCode::Char('j'))
            if in_review =>
        {
            direction(code).map(Command::MoveCursor)
        }
        _ => None,
    }
}

fn game_command(app: &App, code: KeyCode) -> Option<Command> {
    if let Some(dir) = direction(code) {
        return Some(Command::MoveCursor(dir));
    }
    match code {
        KeyCode::Esc => Some(Command::Quit),
        KeyCode::Char('s') => Some(Command::Game(GameCommand::Start)),
        KeyCode::Char('u') => Some(Command::Game(GameCommand::Submit)),
        KeyCode::Char('r') => Some(Command::Game(GameCommand::Reset)),
        KeyCode::Enter | KeyCode::Char(' ') => {
            Some(Command::Game(GameCommand::Flip(app.board_cursor())))
        }
        _ => None,
    }
}

fn quiz_command(app: &App, code: KeyCode) -> Option<Command> {
    match code {
        KeyCode::Esc => Some(Command::Quit),
        KeyCode::Up | KeyCode::Char('k') => Some(Command::MoveCursor(Direction::Up)),
        KeyCode::Down | KeyCode::Char('j') => Some(Command::MoveCursor(Direction::Down)),
        KeyCode::Left | KeyCode::Char('p') => Some(Command::Quiz(QuizCommand::Previous)),
        KeyCode::Right | KeyCode::Char('n') => Some(Command::Quiz(QuizCommand::Next)),
        KeyCode::Enter | KeyCode::Char(' ') => {
            Some(Command::Quiz(QuizCommand::SelectAnswer(app.option_cursor())))
        }
        KeyCode::Char(c @ 'a'..='d') => Some(Command::Quiz(QuizCommand::SelectAnswer(
            (c as u8 - b'a') as usize,
        ))),
        KeyCode::Char('s') => Some(Command::Quiz(QuizCommand::Start)),
        KeyCode::Char('u') => Some(Command::Quiz(QuizCommand::Submit)),
        KeyCode::Char('r') => Some(Command::Quiz(QuizCommand::Restart)),
        KeyCode::Char('v') => Some(Command::ShowReview),
        _ => None,
    }
}

//! Commands accepted from the input layer.
//!
//! ```text
//! key press
//!    │
//!    ▼
//! keymap.rs (context-sensitive mapping)
//!    │
//!    ▼
//! Command (this module)
//!    │
//!    ▼
//! App::dispatch -> engine method
//! ```
//!
//! Engines never see key codes and the renderer never calls engine
//! mutators; everything that changes state goes through a `Command`.

use crate::ui::layout::Direction;

/// The two top-level tabs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum Tab {
    #[default]
    Game,
    Quiz,
}

impl Tab {
    pub const ALL: [Tab; 2] = [Tab::Game, Tab::Quiz];

    pub fn title(self) -> &'static str {
        match self {
            Tab::Game => "Memory Game",
            Tab::Quiz => "JavaScript Quiz",
        }
    }

    pub fn index(self) -> usize {
        match self {
            Tab::Game => 0,
            Tab::Quiz => 1,
        }
    }

    pub fn next(self) -> Self {
        match self {
            Tab::Game => Tab::Quiz,
            Tab::Quiz => Tab::Game,
        }
    }
}

/// Memory game commands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameCommand {
    Start,
    Flip(usize),
    Submit,
    Reset,
}

/// Quiz commands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizCommand {
    Start,
    SelectAnswer(usize),
    Previous,
    Next,
    Submit,
    /// Throw the current session away and create a fresh one
    Restart,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    SwitchTab(Tab),
    NextTab,
    ToggleTheme,
    /// Move the board cursor or the option cursor
    MoveCursor(Direction),
    Game(GameCommand),
    Quiz(QuizCommand),
    /// Open the answer review after a finished quiz
    ShowReview,
    CloseOverlay,
    Quit,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tab_cycle() {
        assert_eq!(Tab::Game.next(), Tab::Quiz);
        assert_eq!(Tab::Quiz.next(), Tab::Game);
        assert_eq!(Tab::default(), Tab::Game);
        for (i, tab) in Tab::ALL.iter().enumerate() {
            assert_eq!(tab.index(), i);
        }
    }
}

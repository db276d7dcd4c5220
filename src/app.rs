use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::time::Instant;

use crate::command::{Command, GameCommand, QuizCommand, Tab};
use crate::config::Config;
use crate::memory::MemoryGame;
use crate::prefs::Prefs;
use crate::quiz::QuizEngine;
use crate::ui::layout::{BoardGrid, Direction};
use crate::ui::max_review_scroll;
use crate::ui::theme::{Theme, ThemeMode};

/// Popup shown over the quiz tab
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizOverlay {
    Results,
    /// Answer review, with its scroll offset
    Review { scroll: u16 },
}

/// Application state and tab controller.
///
/// Engines are created lazily the first time their tab is shown and live
/// until the app exits; only a quiz restart replaces one wholesale.
pub struct App {
    config: Config,
    tab: Tab,
    memory: Option<MemoryGame>,
    quiz: Option<QuizEngine>,
    theme_mode: ThemeMode,
    theme: Theme,
    prefs: Prefs,
    /// Result popup over the game tab
    game_overlay: bool,
    quiz_overlay: Option<QuizOverlay>,
    grid: BoardGrid,
    board_cursor: usize,
    option_cursor: usize,
    /// Question the option cursor was last synced to
    cursor_question: Option<usize>,
    /// Seeds each new engine
    rng: StdRng,
    /// Terminal rows, as of the last frame
    screen_height: u16,
    should_quit: bool,
}

impl App {
    pub fn new(config: Config, prefs: Prefs, initial_tab: Tab, rng: StdRng) -> Self {
        let theme_mode = prefs.theme_mode();
        let theme = config.resolve_theme(theme_mode);
        let mut app = Self {
            config,
            tab: initial_tab,
            memory: None,
            quiz: None,
            theme_mode,
            theme,
            prefs,
            game_overlay: false,
            quiz_overlay: None,
            grid: BoardGrid::default(),
            board_cursor: 0,
            option_cursor: 0,
            cursor_question: None,
            rng,
            screen_height: 0,
            should_quit: false,
        };
        app.switch_tab(initial_tab);
        app
    }

    fn engine_rng(&mut self) -> StdRng {
        StdRng::seed_from_u64(self.rng.gen())
    }

    /// Show a tab, creating its engine on first use
    fn switch_tab(&mut self, tab: Tab) {
        self.tab = tab;
        match tab {
            Tab::Game if self.memory.is_none() => {
                let rng = self.engine_rng();
                let game = MemoryGame::new(self.config.memory_settings(), rng);
                self.grid = BoardGrid::for_cells(game.cards().len());
                self.memory = Some(game);
                tracing::debug!("memory game created");
            }
            Tab::Quiz if self.quiz.is_none() => {
                let rng = self.engine_rng();
                self.quiz = Some(QuizEngine::new(self.config.quiz_settings(), rng));
                tracing::debug!("quiz created");
            }
            _ => {}
        }
    }

    /// Apply a command from the input layer
    pub fn dispatch(&mut self, command: Command, now: Instant) {
        let before = self.ended_flags();
        match command {
            Command::SwitchTab(tab) => self.switch_tab(tab),
            Command::NextTab => self.switch_tab(self.tab.next()),
            Command::ToggleTheme => self.toggle_theme(),
            Command::MoveCursor(direction) => self.move_cursor(direction),
            Command::Game(cmd) => self.dispatch_game(cmd, now),
            Command::Quiz(cmd) => self.dispatch_quiz(cmd, now),
            Command::ShowReview => {
                if self.quiz.as_ref().is_some_and(|q| q.phase().is_ended()) {
                    self.quiz_overlay = Some(QuizOverlay::Review { scroll: 0 });
                }
            }
            Command::CloseOverlay => match self.tab {
                Tab::Game => self.game_overlay = false,
                Tab::Quiz => self.quiz_overlay = None,
            },
            Command::Quit => self.should_quit = true,
        }
        self.after_update(before);
    }

    fn dispatch_game(&mut self, command: GameCommand, now: Instant) {
        let Some(game) = self.memory.as_mut() else {
            return;
        };
        match command {
            GameCommand::Start => {
                game.start(now);
            }
            GameCommand::Flip(index) => {
                game.flip(index, now);
            }
            GameCommand::Submit => {
                game.submit();
            }
            GameCommand::Reset => {
                game.reset();
                self.game_overlay = false;
            }
        }
    }

    fn dispatch_quiz(&mut self, command: QuizCommand, now: Instant) {
        if command == QuizCommand::Restart {
            if self.quiz.is_some() {
                let rng = self.engine_rng();
                self.quiz = Some(QuizEngine::new(self.config.quiz_settings(), rng));
                self.quiz_overlay = None;
                self.cursor_question = None;
                tracing::info!("quiz restarted");
            }
            return;
        }

        let Some(quiz) = self.quiz.as_mut() else {
            return;
        };
        match command {
            QuizCommand::Start => {
                quiz.start(now);
            }
            QuizCommand::SelectAnswer(option) => {
                quiz.select_answer(option, now);
            }
            QuizCommand::Previous => {
                quiz.previous();
            }
            QuizCommand::Next => {
                quiz.next();
            }
            QuizCommand::Submit => {
                quiz.submit(now);
            }
            QuizCommand::Restart => {}
        }
    }

    /// Drive both engines' timers up to `now`
    pub fn advance(&mut self, now: Instant) {
        let before = self.ended_flags();
        if let Some(game) = self.memory.as_mut() {
            game.advance(now);
        }
        if let Some(quiz) = self.quiz.as_mut() {
            quiz.advance(now);
        }
        self.after_update(before);
    }

    /// Earliest timer deadline across both engines
    pub fn next_deadline(&self) -> Option<Instant> {
        let game = self.memory.as_ref().and_then(MemoryGame::next_deadline);
        let quiz = self.quiz.as_ref().and_then(QuizEngine::next_deadline);
        match (game, quiz) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    fn ended_flags(&self) -> (bool, bool) {
        (
            self.memory.as_ref().is_some_and(|g| g.phase().is_ended()),
            self.quiz.as_ref().is_some_and(|q| q.phase().is_ended()),
        )
    }

    /// Open result popups for sessions that just ended and keep the
    /// option cursor on the current question's answer
    fn after_update(&mut self, (game_was_ended, quiz_was_ended): (bool, bool)) {
        let (game_ended, quiz_ended) = self.ended_flags();
        if game_ended && !game_was_ended {
            self.game_overlay = true;
        }
        if quiz_ended && !quiz_was_ended {
            self.quiz_overlay = Some(QuizOverlay::Results);
        }

        if let Some(quiz) = self.quiz.as_ref() {
            let current = quiz.current_index();
            if self.cursor_question != Some(current) {
                self.cursor_question = Some(current);
                self.option_cursor = quiz.answer(current).unwrap_or(0);
            }
        }
    }

    fn move_cursor(&mut self, direction: Direction) {
        match (self.tab, self.quiz_overlay) {
            (Tab::Quiz, Some(QuizOverlay::Review { scroll })) => {
                let items = self.quiz.as_ref().map_or(0, |q| q.questions().len());
                let max = max_review_scroll(items, self.screen_height);
                let scroll = match direction {
                    Direction::Up => scroll.saturating_sub(1),
                    Direction::Down => scroll.saturating_add(1).min(max),
                    _ => scroll,
                };
                self.quiz_overlay = Some(QuizOverlay::Review { scroll });
            }
            (Tab::Game, _) => {
                let total = self.memory.as_ref().map_or(0, |g| g.cards().len());
                self.board_cursor = self.grid.step(self.board_cursor, direction, total);
            }
            (Tab::Quiz, _) => {
                let options = self
                    .quiz
                    .as_ref()
                    .and_then(QuizEngine::question_view)
                    .map_or(0, |v| v.options.len());
                self.option_cursor = match direction {
                    Direction::Up => self.option_cursor.saturating_sub(1),
                    Direction::Down if self.option_cursor + 1 < options => self.option_cursor + 1,
                    _ => self.option_cursor,
                };
            }
        }
    }

    fn toggle_theme(&mut self) {
        self.theme_mode = self.theme_mode.toggled();
        self.theme = self.config.resolve_theme(self.theme_mode);
        self.prefs.set_theme_mode(self.theme_mode);
        tracing::info!(mode = %self.theme_mode, "theme toggled");
        // Saved inline so writes land in toggle order
        if let Err(e) = self.prefs.save() {
            tracing::warn!("Failed to save prefs: {:#}", e);
        }
    }

    /// Record the terminal height the next frame will be drawn at
    pub fn resize(&mut self, height: u16) {
        self.screen_height = height;
    }

    pub fn tab(&self) -> Tab {
        self.tab
    }

    pub fn memory(&self) -> Option<&MemoryGame> {
        self.memory.as_ref()
    }

    pub fn quiz(&self) -> Option<&QuizEngine> {
        self.quiz.as_ref()
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    pub fn theme_mode(&self) -> ThemeMode {
        self.theme_mode
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn grid(&self) -> BoardGrid {
        self.grid
    }

    pub fn board_cursor(&self) -> usize {
        self.board_cursor
    }

    pub fn option_cursor(&self) -> usize {
        self.option_cursor
    }

    pub fn game_overlay(&self) -> bool {
        self.game_overlay
    }

    pub fn quiz_overlay(&self) -> Option<QuizOverlay> {
        self.quiz_overlay
    }

    /// Whether the active tab has a popup open
    pub fn overlay_open(&self) -> bool {
        match self.tab {
            Tab::Game => self.game_overlay,
            Tab::Quiz => self.quiz_overlay.is_some(),
        }
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }
}

//! Quiz session state machine.
//!
//! `NotStarted -> InProgress -> Ended`. A finished quiz is replaced
//! wholesale by a new engine on restart.

use rand::rngs::StdRng;
use std::collections::BTreeMap;
use std::time::{Duration, Instant};

use super::bank::{Question, QUESTION_BANK};
use super::result::{QuizResult, ReviewItem, POINTS_PER_QUESTION};
use crate::clock::{format_countdown, Fired, Scheduler};
use crate::session::{EndReason, Phase};
use crate::shuffle::fisher_yates;

/// Questions drawn from the bank for one session
pub const SESSION_LENGTH: usize = 10;

const TICK: Duration = Duration::from_secs(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuizSettings {
    /// Countdown length in ticks (seconds)
    pub duration_secs: u32,
    /// Pause between answering and moving to the next question
    pub advance_delay: Duration,
}

impl Default for QuizSettings {
    fn default() -> Self {
        Self {
            duration_secs: 900,
            advance_delay: Duration::from_millis(1000),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum QuizEvent {
    /// Move on from the question that was answered
    AutoAdvance { from: usize },
}

/// Highlight for an option once its question has been answered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Correct,
    Incorrect,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionView {
    pub text: &'static str,
    pub selected: bool,
    pub verdict: Option<Verdict>,
}

/// Everything the renderer needs for the current question
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionView {
    /// 1-based
    pub number: usize,
    pub total: usize,
    pub text: &'static str,
    pub options: Vec<OptionView>,
    pub can_go_previous: bool,
    pub can_go_next: bool,
    pub show_submit: bool,
}

pub struct QuizEngine {
    settings: QuizSettings,
    questions: Vec<&'static Question>,
    current: usize,
    /// Question index -> chosen option; absent means unanswered
    answers: BTreeMap<usize, usize>,
    time_left: u32,
    started_at: Option<Instant>,
    phase: Phase,
    result: Option<QuizResult>,
    scheduler: Scheduler<QuizEvent>,
    rng: StdRng,
}

impl QuizEngine {
    pub fn new(settings: QuizSettings, rng: StdRng) -> Self {
        Self {
            settings,
            questions: Vec::new(),
            current: 0,
            answers: BTreeMap::new(),
            time_left: settings.duration_secs,
            started_at: None,
            phase: Phase::NotStarted,
            result: None,
            scheduler: Scheduler::new(),
            rng,
        }
    }

    #[cfg(test)]
    pub fn with_seed(settings: QuizSettings, seed: u64) -> Self {
        use rand::SeedableRng;
        Self::new(settings, StdRng::seed_from_u64(seed))
    }

    /// Draw the session's questions and start the countdown
    pub fn start(&mut self, now: Instant) -> bool {
        if self.phase != Phase::NotStarted {
            tracing::debug!(phase = ?self.phase, "quiz start ignored");
            return false;
        }
        let mut drawn: Vec<&'static Question> = QUESTION_BANK.iter().collect();
        fisher_yates(&mut drawn, &mut self.rng);
        drawn.truncate(SESSION_LENGTH);

        self.questions = drawn;
        self.current = 0;
        self.answers.clear();
        self.started_at = Some(now);
        self.phase = Phase::InProgress;
        self.scheduler.start_countdown(now, TICK);
        tracing::info!(
            questions = self.questions.len(),
            secs = self.time_left,
            "quiz started"
        );
        true
    }

    /// Record (or overwrite) the answer to the current question, then
    /// schedule a move to the next one unless this is the last.
    pub fn select_answer(&mut self, option: usize, now: Instant) -> bool {
        if !self.phase.is_in_progress() {
            return false;
        }
        let Some(question) = self.questions.get(self.current) else {
            return false;
        };
        if option >= question.options.len() {
            tracing::debug!(option, "option out of range");
            return false;
        }

        self.answers.insert(self.current, option);
        if self.current + 1 < self.questions.len() {
            self.scheduler.schedule(
                now,
                self.settings.advance_delay,
                QuizEvent::AutoAdvance { from: self.current },
            );
        }
        true
    }

    pub fn previous(&mut self) -> bool {
        if self.current == 0 {
            return false;
        }
        self.current -= 1;
        true
    }

    pub fn next(&mut self) -> bool {
        if self.current + 1 >= self.questions.len() {
            return false;
        }
        self.current += 1;
        true
    }

    /// End the quiz early. Ignored unless it is running.
    pub fn submit(&mut self, now: Instant) -> bool {
        if !self.phase.is_in_progress() {
            return false;
        }
        self.end(EndReason::Submitted, now);
        true
    }

    /// Apply every countdown tick and delayed event due at `now`
    pub fn advance(&mut self, now: Instant) {
        while let Some(fired) = self.scheduler.pop_due(now) {
            match fired {
                Fired::Tick(due) => {
                    if !self.phase.is_in_progress() {
                        continue;
                    }
                    self.time_left = self.time_left.saturating_sub(1);
                    if self.time_left == 0 {
                        self.end(EndReason::TimeUp, due);
                    }
                }
                Fired::Delayed(QuizEvent::AutoAdvance { from }) => {
                    // The player may have navigated away in the meantime
                    if self.phase.is_in_progress() && self.current == from {
                        self.next();
                    }
                }
            }
        }
    }

    /// `at` is when the session stopped: the submit time, or the last tick's deadline
    fn end(&mut self, reason: EndReason, at: Instant) {
        self.scheduler.cancel_all();
        self.phase = Phase::Ended(reason);
        let time_used = self
            .started_at
            .map(|t| at.saturating_duration_since(t))
            .unwrap_or_default();
        let result = QuizResult::new(reason, self.correct_count(), self.questions.len(), time_used);
        tracing::info!(
            ?reason,
            score = result.score,
            percentage = result.percentage,
            "quiz ended"
        );
        self.result = Some(result);
    }

    fn correct_count(&self) -> usize {
        self.questions
            .iter()
            .enumerate()
            .filter(|(i, q)| self.answers.get(i) == Some(&q.correct))
            .count()
    }

    /// Current score, recomputed from the recorded answers
    pub fn score(&self) -> u32 {
        self.correct_count() as u32 * POINTS_PER_QUESTION
    }

    /// Per-question breakdown, available once the quiz has ended
    pub fn review(&self) -> Option<Vec<ReviewItem>> {
        if !self.phase.is_ended() {
            return None;
        }
        let items = self
            .questions
            .iter()
            .enumerate()
            .map(|(i, q)| {
                let chosen = self.answers.get(&i).copied();
                ReviewItem {
                    question: q.text,
                    chosen: chosen.map(|o| q.options[o]),
                    correct: q.correct_option(),
                    is_correct: chosen == Some(q.correct),
                }
            })
            .collect();
        Some(items)
    }

    /// View data for the question under the pointer
    pub fn question_view(&self) -> Option<QuestionView> {
        let question = self.questions.get(self.current)?;
        let answer = self.answers.get(&self.current).copied();
        let last = self.questions.len() - 1;

        let options = question
            .options
            .iter()
            .enumerate()
            .map(|(i, &text)| {
                let verdict = match answer {
                    Some(_) if i == question.correct => Some(Verdict::Correct),
                    Some(a) if a == i => Some(Verdict::Incorrect),
                    _ => None,
                };
                OptionView {
                    text,
                    selected: answer == Some(i),
                    verdict,
                }
            })
            .collect();

        Some(QuestionView {
            number: self.current + 1,
            total: self.questions.len(),
            text: question.text,
            options,
            can_go_previous: self.current > 0,
            can_go_next: self.current < last,
            show_submit: self.current == last,
        })
    }

    pub fn questions(&self) -> &[&'static Question] {
        &self.questions
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn answer(&self, index: usize) -> Option<usize> {
        self.answers.get(&index).copied()
    }

    pub fn answered_count(&self) -> usize {
        self.answers.len()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn result(&self) -> Option<&QuizResult> {
        self.result.as_ref()
    }

    pub fn time_left(&self) -> u32 {
        self.time_left
    }

    pub fn clock_text(&self) -> String {
        format_countdown(self.time_left)
    }

    /// `n / total` progress label
    pub fn progress_text(&self) -> String {
        let total = if self.questions.is_empty() {
            SESSION_LENGTH
        } else {
            self.questions.len()
        };
        format!("{} / {}", self.current + 1, total)
    }

    #[cfg(test)]
    pub fn countdown_handle(&self) -> Option<crate::clock::TimerHandle> {
        self.scheduler.countdown()
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.scheduler.next_deadline()
    }
}

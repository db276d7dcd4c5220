//! Memory game state machine.
//!
//! `NotStarted -> InProgress -> Ended`. Only `reset` leaves `Ended`.
//! Every method takes the current `Instant`; time moves only through
//! `advance`, which drains the engine's scheduler.

use rand::rngs::StdRng;
use std::time::{Duration, Instant};

use super::deck::{shuffled_deck, Card, TOTAL_PAIRS};
use crate::clock::{format_countdown, Fired, Scheduler};
use crate::session::{EndReason, Phase};

/// Points awarded per matched pair
pub const MATCH_POINTS: u32 = 10;

const TICK: Duration = Duration::from_secs(1);

/// Timing knobs, normally taken from the config file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemorySettings {
    /// Countdown length in ticks (seconds)
    pub duration_secs: u32,
    /// Pause between the last match and the result screen
    pub match_end_delay: Duration,
    /// How long a mismatched pair stays face up
    pub mismatch_delay: Duration,
}

impl Default for MemorySettings {
    fn default() -> Self {
        Self {
            duration_secs: 300,
            match_end_delay: Duration::from_millis(500),
            mismatch_delay: Duration::from_millis(1000),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MemoryEvent {
    /// Turn a mismatched pair face down again
    HideMismatch(usize, usize),
    /// All pairs found, show the result
    FinishBoard,
}

/// Final numbers shown when a game ends
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemoryResult {
    pub reason: EndReason,
    pub score: u32,
    pub moves: u32,
    pub stars: u8,
}

/// Star rating from the move count. A perfect game takes one move per pair.
pub fn calculate_stars(moves: u32, total_pairs: u32) -> u8 {
    let min_moves = total_pairs;
    match moves {
        m if m <= min_moves => 5,
        m if m <= min_moves + 2 => 4,
        m if m <= min_moves + 4 => 3,
        m if m <= min_moves + 6 => 2,
        _ => 1,
    }
}

pub struct MemoryGame {
    settings: MemorySettings,
    cards: Vec<Card>,
    /// Face-up cards waiting for match resolution (never more than two)
    pending: Vec<usize>,
    matched_pairs: usize,
    moves: u32,
    score: u32,
    time_left: u32,
    phase: Phase,
    result: Option<MemoryResult>,
    scheduler: Scheduler<MemoryEvent>,
    rng: StdRng,
}

impl MemoryGame {
    pub fn new(settings: MemorySettings, mut rng: StdRng) -> Self {
        let cards = shuffled_deck(&mut rng);
        Self {
            settings,
            cards,
            pending: Vec::with_capacity(2),
            matched_pairs: 0,
            moves: 0,
            score: 0,
            time_left: settings.duration_secs,
            phase: Phase::NotStarted,
            result: None,
            scheduler: Scheduler::new(),
            rng,
        }
    }

    #[cfg(test)]
    pub fn with_seed(settings: MemorySettings, seed: u64) -> Self {
        use rand::SeedableRng;
        Self::new(settings, StdRng::seed_from_u64(seed))
    }

    /// Begin the countdown. Ignored unless the game has not started yet.
    pub fn start(&mut self, now: Instant) -> bool {
        if self.phase != Phase::NotStarted {
            tracing::debug!(phase = ?self.phase, "start ignored");
            return false;
        }
        self.phase = Phase::InProgress;
        self.scheduler.start_countdown(now, TICK);
        tracing::info!(secs = self.time_left, "memory game started");
        true
    }

    /// Turn a card face up.
    ///
    /// Silently ignored when the game is not running, the index is off the
    /// board, the card is already showing, or two cards are already pending.
    pub fn flip(&mut self, index: usize, now: Instant) -> bool {
        if !self.phase.is_in_progress() || self.pending.len() >= 2 {
            return false;
        }
        let Some(card) = self.cards.get_mut(index) else {
            tracing::debug!(index, "flip outside the board");
            return false;
        };
        if card.flipped || card.matched {
            return false;
        }

        card.flipped = true;
        self.pending.push(index);

        if self.pending.len() == 2 {
            self.moves += 1;
            self.resolve_pair(now);
        }
        true
    }

    fn resolve_pair(&mut self, now: Instant) {
        let (a, b) = (self.pending[0], self.pending[1]);

        if self.cards[a].symbol == self.cards[b].symbol {
            self.cards[a].matched = true;
            self.cards[b].matched = true;
            self.matched_pairs += 1;
            self.score += MATCH_POINTS;
            tracing::debug!(pairs = self.matched_pairs, "pair matched");

            if self.matched_pairs == TOTAL_PAIRS {
                self.scheduler
                    .schedule(now, self.settings.match_end_delay, MemoryEvent::FinishBoard);
            }
        } else {
            self.scheduler.schedule(
                now,
                self.settings.mismatch_delay,
                MemoryEvent::HideMismatch(a, b),
            );
        }

        // Cleared right away: other cards may be flipped while a
        // mismatched pair is still showing.
        self.pending.clear();
    }

    /// End the game early. Ignored unless it is running.
    pub fn submit(&mut self) -> bool {
        if !self.phase.is_in_progress() {
            return false;
        }
        self.end(EndReason::Submitted);
        true
    }

    /// Back to a freshly shuffled, unstarted board. Valid in any phase.
    pub fn reset(&mut self) {
        self.scheduler.cancel_all();
        self.cards = shuffled_deck(&mut self.rng);
        self.pending.clear();
        self.matched_pairs = 0;
        self.moves = 0;
        self.score = 0;
        self.time_left = self.settings.duration_secs;
        self.phase = Phase::NotStarted;
        self.result = None;
        tracing::info!("memory game reset");
    }

    /// Apply every countdown tick and delayed event due at `now`
    pub fn advance(&mut self, now: Instant) {
        while let Some(fired) = self.scheduler.pop_due(now) {
            match fired {
                Fired::Tick(_) => self.on_tick(),
                Fired::Delayed(MemoryEvent::HideMismatch(a, b)) => {
                    for i in [a, b] {
                        if let Some(card) = self.cards.get_mut(i) {
                            if !card.matched {
                                card.flipped = false;
                            }
                        }
                    }
                }
                Fired::Delayed(MemoryEvent::FinishBoard) => {
                    if self.phase.is_in_progress() {
                        self.end(EndReason::Completed);
                    }
                }
            }
        }
    }

    fn on_tick(&mut self) {
        if !self.phase.is_in_progress() {
            return;
        }
        self.time_left = self.time_left.saturating_sub(1);
        if self.time_left == 0 {
            self.end(EndReason::TimeUp);
        }
    }

    fn end(&mut self, reason: EndReason) {
        self.scheduler.cancel_all();
        self.phase = Phase::Ended(reason);
        let result = MemoryResult {
            reason,
            score: self.score,
            moves: self.moves,
            stars: calculate_stars(self.moves, TOTAL_PAIRS as u32),
        };
        tracing::info!(
            ?reason,
            score = result.score,
            moves = result.moves,
            stars = result.stars,
            "memory game ended"
        );
        self.result = Some(result);
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn result(&self) -> Option<&MemoryResult> {
        self.result.as_ref()
    }

    pub fn moves(&self) -> u32 {
        self.moves
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn matched_pairs(&self) -> usize {
        self.matched_pairs
    }

    pub fn time_left(&self) -> u32 {
        self.time_left
    }

    /// Remaining time as `MM:SS`
    pub fn clock_text(&self) -> String {
        format_countdown(self.time_left)
    }

    #[cfg(test)]
    pub fn countdown_handle(&self) -> Option<crate::clock::TimerHandle> {
        self.scheduler.countdown()
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.scheduler.next_deadline()
    }

    pub fn can_start(&self) -> bool {
        self.phase == Phase::NotStarted
    }

    pub fn can_submit(&self) -> bool {
        self.phase.is_in_progress()
    }

    pub fn can_reset(&self) -> bool {
        self.phase != Phase::NotStarted
    }
}

//! Lifecycle shared by the memory game and the quiz.

/// Why a session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndReason {
    /// Every pair matched (memory game only)
    Completed,
    /// The countdown reached zero
    TimeUp,
    /// The player ended it manually
    Submitted,
}

impl EndReason {
    /// Headline shown in the result overlay
    pub fn message(self) -> &'static str {
        match self {
            EndReason::Completed => "Well done! You finished the board!",
            EndReason::TimeUp => "Time is up!",
            EndReason::Submitted => "Ended manually",
        }
    }
}

/// Session phase: `NotStarted -> InProgress -> Ended`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    NotStarted,
    InProgress,
    Ended(EndReason),
}

impl Phase {
    pub fn is_in_progress(self) -> bool {
        matches!(self, Phase::InProgress)
    }

    pub fn is_ended(self) -> bool {
        matches!(self, Phase::Ended(_))
    }
}

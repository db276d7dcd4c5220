//! End-of-quiz scoring, grades and the answer review.

use std::time::Duration;

use crate::clock::format_elapsed;
use crate::session::EndReason;

/// Points for each correctly answered question
pub const POINTS_PER_QUESTION: u32 = 10;

/// Shown in the review for questions the player skipped
pub const UNANSWERED: &str = "Not answered";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Grade {
    Excellent,
    VeryGood,
    Good,
    Acceptable,
    NeedsImprovement,
}

impl Grade {
    pub fn from_percentage(percentage: u32) -> Self {
        match percentage {
            p if p >= 90 => Grade::Excellent,
            p if p >= 80 => Grade::VeryGood,
            p if p >= 70 => Grade::Good,
            p if p >= 60 => Grade::Acceptable,
            _ => Grade::NeedsImprovement,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Grade::Excellent => "Excellent! 🏆",
            Grade::VeryGood => "Very good! 🌟",
            Grade::Good => "Good! 👍",
            Grade::Acceptable => "Acceptable ✅",
            Grade::NeedsImprovement => "Needs improvement 📚",
        }
    }
}

/// `round(correct / total * 100)`, 0 for an empty session
pub fn percentage(correct: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    ((correct as f64 / total as f64) * 100.0).round() as u32
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizResult {
    pub reason: EndReason,
    pub score: u32,
    pub correct: usize,
    pub total: usize,
    pub percentage: u32,
    pub grade: Grade,
    pub time_used: Duration,
}

impl QuizResult {
    pub fn new(reason: EndReason, correct: usize, total: usize, time_used: Duration) -> Self {
        let percentage = percentage(correct, total);
        Self {
            reason,
            score: correct as u32 * POINTS_PER_QUESTION,
            correct,
            total,
            percentage,
            grade: Grade::from_percentage(percentage),
            time_used,
        }
    }

    /// Time used as `m:ss`
    pub fn time_used_text(&self) -> String {
        format_elapsed(self.time_used)
    }
}

/// One row of the post-quiz answer review
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewItem {
    pub question: &'static str,
    /// Text of the chosen option, `None` if unanswered
    pub chosen: Option<&'static str>,
    pub correct: &'static str,
    pub is_correct: bool,
}

impl ReviewItem {
    pub fn chosen_label(&self) -> &'static str {
        self.chosen.unwrap_or(UNANSWERED)
    }
}

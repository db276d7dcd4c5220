//! Tests for the quiz engine

use super::*;
use crate::session::{EndReason, Phase};
use std::collections::HashSet;
use std::time::{Duration, Instant};

fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

fn started(t0: Instant) -> QuizEngine {
    let mut quiz = QuizEngine::with_seed(QuizSettings::default(), 99);
    assert!(quiz.start(t0));
    quiz
}

fn wrong_option(q: &Question) -> usize {
    (q.correct + 1) % q.options.len()
}

#[test]
fn test_not_started() {
    let mut quiz = QuizEngine::with_seed(QuizSettings::default(), 1);
    assert_eq!(quiz.phase(), Phase::NotStarted);
    assert!(quiz.question_view().is_none());
    assert!(!quiz.select_answer(0, Instant::now()));
    assert_eq!(quiz.clock_text(), "15:00");
    assert_eq!(quiz.progress_text(), "1 / 10");
}

#[test]
fn test_session_draws_distinct_questions() {
    for seed in 0..20 {
        let mut quiz = QuizEngine::with_seed(QuizSettings::default(), seed);
        quiz.start(Instant::now());
        let texts: HashSet<&str> = quiz.questions().iter().map(|q| q.text).collect();
        assert_eq!(quiz.questions().len(), SESSION_LENGTH);
        assert_eq!(texts.len(), SESSION_LENGTH);
        assert!(quiz
            .questions()
            .iter()
            .all(|q| QUESTION_BANK.iter().any(|b| b.text == q.text)));
    }
}

#[test]
fn test_double_start_keeps_one_countdown() {
    let t0 = Instant::now();
    let mut quiz = started(t0);
    let handle = quiz.countdown_handle();
    assert!(!quiz.start(t0 + ms(300)));
    assert_eq!(quiz.countdown_handle(), handle);

    quiz.advance(t0 + Duration::from_secs(5));
    assert_eq!(quiz.time_left(), 895);
}

#[test]
fn test_answer_auto_advances_after_delay() {
    let t0 = Instant::now();
    let mut quiz = started(t0);
    assert!(quiz.select_answer(2, t0));
    assert_eq!(quiz.answer(0), Some(2));

    quiz.advance(t0 + ms(999));
    assert_eq!(quiz.current_index(), 0);
    quiz.advance(t0 + ms(1000));
    assert_eq!(quiz.current_index(), 1);
}

#[test]
fn test_answers_can_be_changed() {
    let t0 = Instant::now();
    let mut quiz = started(t0);
    quiz.select_answer(1, t0);
    quiz.select_answer(3, t0 + ms(200));
    assert_eq!(quiz.answer(0), Some(3));
    assert_eq!(quiz.answered_count(), 1);

    // Both scheduled advances belong to question 0; only one move happens
    quiz.advance(t0 + ms(2000));
    assert_eq!(quiz.current_index(), 1);
}

#[test]
fn test_auto_advance_skipped_after_manual_navigation() {
    let t0 = Instant::now();
    let mut quiz = started(t0);
    quiz.select_answer(0, t0);
    assert!(quiz.next());
    assert!(quiz.next());
    quiz.advance(t0 + ms(1500));
    assert_eq!(quiz.current_index(), 2);
}

#[test]
fn test_no_auto_advance_on_last_question() {
    let t0 = Instant::now();
    let mut quiz = started(t0);
    while quiz.next() {}
    assert_eq!(quiz.current_index(), 9);
    quiz.select_answer(0, t0);
    quiz.advance(t0 + ms(1500));
    assert_eq!(quiz.current_index(), 9);
}

#[test]
fn test_navigation_clamped() {
    let t0 = Instant::now();
    let mut quiz = started(t0);
    assert!(!quiz.previous());
    assert_eq!(quiz.current_index(), 0);
    for _ in 0..20 {
        quiz.next();
    }
    assert_eq!(quiz.current_index(), 9);
    assert!(!quiz.next());
    assert!(quiz.previous());
    assert_eq!(quiz.current_index(), 8);
}

#[test]
fn test_out_of_range_option_ignored() {
    let t0 = Instant::now();
    let mut quiz = started(t0);
    assert!(!quiz.select_answer(4, t0));
    assert_eq!(quiz.answer(0), None);
}

#[test]
fn test_question_view_marks() {
    let t0 = Instant::now();
    let mut quiz = started(t0);

    let view = quiz.question_view().expect("view");
    assert_eq!(view.number, 1);
    assert_eq!(view.total, 10);
    assert!(!view.can_go_previous);
    assert!(view.can_go_next);
    assert!(!view.show_submit);
    assert!(view.options.iter().all(|o| !o.selected && o.verdict.is_none()));

    let q = quiz.questions()[0];
    let wrong = wrong_option(q);
    quiz.select_answer(wrong, t0);
    let view = quiz.question_view().expect("view");
    assert!(view.options[wrong].selected);
    assert_eq!(view.options[wrong].verdict, Some(Verdict::Incorrect));
    assert_eq!(view.options[q.correct].verdict, Some(Verdict::Correct));

    while quiz.next() {}
    let view = quiz.question_view().expect("view");
    assert!(view.show_submit);
    assert!(!view.can_go_next);
}

#[test]
fn test_perfect_score() {
    let t0 = Instant::now();
    let mut quiz = started(t0);
    for i in 0..SESSION_LENGTH {
        let correct = quiz.questions()[i].correct;
        quiz.select_answer(correct, t0);
        quiz.next();
    }
    assert_eq!(quiz.score(), 100);
    assert!(quiz.submit(t0 + Duration::from_secs(90)));

    let result = quiz.result().cloned().expect("result");
    assert_eq!(result.reason, EndReason::Submitted);
    assert_eq!(result.score, 100);
    assert_eq!(result.correct, 10);
    assert_eq!(result.percentage, 100);
    assert_eq!(result.grade, Grade::Excellent);
    assert_eq!(result.time_used_text(), "1:30");
}

#[test]
fn test_unanswered_in_review() {
    let t0 = Instant::now();
    let mut quiz = started(t0);
    assert!(quiz.review().is_none());

    let correct = quiz.questions()[0].correct;
    quiz.select_answer(correct, t0);
    quiz.next();
    let wrong = wrong_option(quiz.questions()[1]);
    quiz.select_answer(wrong, t0);
    quiz.submit(t0 + ms(500));

    let result = quiz.result().cloned().expect("result");
    assert_eq!(result.score, 10);
    assert_eq!(result.percentage, 10);
    assert_eq!(result.grade, Grade::NeedsImprovement);

    let review = quiz.review().expect("review after end");
    assert_eq!(review.len(), 10);
    assert!(review[0].is_correct);
    assert!(!review[1].is_correct);
    assert_eq!(review[1].chosen, Some(quiz.questions()[1].options[wrong]));
    for item in &review[2..] {
        assert_eq!(item.chosen, None);
        assert_eq!(item.chosen_label(), UNANSWERED);
        assert!(!item.is_correct);
    }
}

#[test]
fn test_select_ignored_after_end() {
    let t0 = Instant::now();
    let mut quiz = started(t0);
    quiz.submit(t0);
    assert!(!quiz.select_answer(0, t0));
    assert_eq!(quiz.answered_count(), 0);
    assert!(!quiz.submit(t0));
}

#[test]
fn test_time_up() {
    let t0 = Instant::now();
    let mut quiz = started(t0);
    quiz.select_answer(0, t0 + Duration::from_secs(899));
    quiz.advance(t0 + Duration::from_secs(900));

    assert_eq!(quiz.time_left(), 0);
    assert_eq!(quiz.phase(), Phase::Ended(EndReason::TimeUp));
    assert!(quiz.countdown_handle().is_none());
    assert!(quiz.next_deadline().is_none());
    // Pending auto-advance was cancelled with the countdown
    assert_eq!(quiz.current_index(), 0);

    let result = quiz.result().cloned().expect("result");
    assert_eq!(result.time_used, Duration::from_secs(900));
}

#[test]
fn test_time_up_on_late_wakeup_reports_full_duration() {
    let t0 = Instant::now();
    let mut quiz = started(t0);
    // The loop only wakes 4s after the last tick was due
    quiz.advance(t0 + Duration::from_secs(904));

    assert_eq!(quiz.phase(), Phase::Ended(EndReason::TimeUp));
    let result = quiz.result().cloned().expect("result");
    assert_eq!(result.time_used, Duration::from_secs(900));
    assert_eq!(result.time_used_text(), "15:00");
}

//! Countdown and delayed-event scheduling for the game engines.
//!
//! Nothing here reads the wall clock. Callers pass the current `Instant`
//! into every method, and the main loop (or a test) decides how time moves.
//!
//! Each engine owns one `Scheduler`:
//! - at most one repeating countdown, identified by a `TimerHandle`
//! - any number of one-shot delayed events carrying an engine-defined payload
//!
//! `cancel_all` drops both. Engines call it on every state-ending transition
//! and on reset, so a stale callback can never touch a newer board.

use std::time::{Duration, Instant};

/// Identity of a running countdown
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerHandle(u64);

/// Something that came due during `Scheduler::pop_due`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fired<E> {
    /// One countdown period elapsed; carries the instant it was due
    Tick(Instant),
    /// A delayed event reached its deadline
    Delayed(E),
}

#[derive(Debug)]
struct Countdown {
    handle: TimerHandle,
    period: Duration,
    next: Instant,
}

#[derive(Debug)]
struct Delayed<E> {
    due: Instant,
    seq: u64,
    event: E,
}

#[derive(Debug)]
pub struct Scheduler<E> {
    countdown: Option<Countdown>,
    delayed: Vec<Delayed<E>>,
    next_id: u64,
}

impl<E> Default for Scheduler<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> Scheduler<E> {
    pub fn new() -> Self {
        Self {
            countdown: None,
            delayed: Vec::new(),
            next_id: 0,
        }
    }

    fn bump_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }

    /// Start a repeating countdown. Any countdown already running is
    /// cancelled first, so there is never more than one tick stream.
    pub fn start_countdown(&mut self, now: Instant, period: Duration) -> TimerHandle {
        if let Some(old) = self.countdown.take() {
            tracing::debug!(handle = old.handle.0, "replacing running countdown");
        }
        let handle = TimerHandle(self.bump_id());
        self.countdown = Some(Countdown {
            handle,
            period,
            next: now + period,
        });
        handle
    }

    /// Handle of the running countdown, if any
    #[cfg(test)]
    pub fn countdown(&self) -> Option<TimerHandle> {
        self.countdown.as_ref().map(|c| c.handle)
    }

    /// Queue `event` to fire once `delay` has passed
    pub fn schedule(&mut self, now: Instant, delay: Duration, event: E) {
        let seq = self.bump_id();
        self.delayed.push(Delayed {
            due: now + delay,
            seq,
            event,
        });
    }

    /// Number of delayed events still waiting
    #[cfg(test)]
    pub fn pending(&self) -> usize {
        self.delayed.len()
    }

    /// Cancel the countdown and every delayed event
    pub fn cancel_all(&mut self) {
        if self.countdown.is_some() || !self.delayed.is_empty() {
            tracing::debug!(pending = self.delayed.len(), "cancelling timers");
        }
        self.countdown = None;
        self.delayed.clear();
    }

    /// Earliest instant at which something will fire
    pub fn next_deadline(&self) -> Option<Instant> {
        let tick = self.countdown.as_ref().map(|c| c.next);
        let delayed = self.delayed.iter().map(|d| d.due).min();
        match (tick, delayed) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    /// Pop the earliest item that is due at `now`.
    ///
    /// Call in a loop and handle each item before popping the next one:
    /// handling may cancel whatever is left.
    pub fn pop_due(&mut self, now: Instant) -> Option<Fired<E>> {
        let tick_due = self
            .countdown
            .as_ref()
            .map(|c| c.next)
            .filter(|&next| next <= now);

        let delayed_idx = self
            .delayed
            .iter()
            .enumerate()
            .filter(|(_, d)| d.due <= now)
            .min_by_key(|(_, d)| (d.due, d.seq))
            .map(|(i, _)| i);

        match (tick_due, delayed_idx) {
            (Some(tick_at), Some(i)) if self.delayed[i].due < tick_at => {
                Some(Fired::Delayed(self.delayed.remove(i).event))
            }
            (Some(tick_at), _) => {
                if let Some(c) = self.countdown.as_mut() {
                    c.next += c.period;
                }
                Some(Fired::Tick(tick_at))
            }
            (None, Some(i)) => Some(Fired::Delayed(self.delayed.remove(i).event)),
            (None, None) => None,
        }
    }
}

/// `MM:SS` for a countdown display
pub fn format_countdown(secs: u32) -> String {
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

/// `m:ss` for an elapsed duration
pub fn format_elapsed(elapsed: Duration) -> String {
    let secs = elapsed.as_secs();
    format!("{}:{:02}", secs / 60, secs % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SEC: Duration = Duration::from_secs(1);

    fn drain<E>(s: &mut Scheduler<E>, now: Instant) -> Vec<Fired<E>> {
        std::iter::from_fn(|| s.pop_due(now)).collect()
    }

    #[test]
    fn test_countdown_ticks_once_per_period() {
        let t0 = Instant::now();
        let mut s: Scheduler<()> = Scheduler::new();
        s.start_countdown(t0, SEC);

        assert!(drain(&mut s, t0 + Duration::from_millis(999)).is_empty());
        assert_eq!(drain(&mut s, t0 + SEC), vec![Fired::Tick(t0 + SEC)]);
        assert_eq!(drain(&mut s, t0 + SEC * 4).len(), 3);
    }

    #[test]
    fn test_late_drain_reports_tick_deadlines() {
        let t0 = Instant::now();
        let mut s: Scheduler<()> = Scheduler::new();
        s.start_countdown(t0, SEC);

        // Waking 2.7s late still reports each tick at its own deadline
        assert_eq!(
            drain(&mut s, t0 + Duration::from_millis(2700)),
            vec![Fired::Tick(t0 + SEC), Fired::Tick(t0 + SEC * 2)]
        );
    }

    #[test]
    fn test_restart_replaces_countdown() {
        let t0 = Instant::now();
        let mut s: Scheduler<()> = Scheduler::new();
        let first = s.start_countdown(t0, SEC);
        let second = s.start_countdown(t0 + Duration::from_millis(500), SEC);

        assert_ne!(first, second);
        assert_eq!(s.countdown(), Some(second));
        // Only the second stream exists: 1.5s, 2.5s
        assert_eq!(drain(&mut s, t0 + Duration::from_millis(2600)).len(), 2);
    }

    #[test]
    fn test_delayed_events_fire_in_deadline_order() {
        let t0 = Instant::now();
        let mut s = Scheduler::new();
        s.schedule(t0, Duration::from_millis(1000), "late");
        s.schedule(t0, Duration::from_millis(500), "early");
        s.start_countdown(t0, Duration::from_millis(700));

        let fired = drain(&mut s, t0 + SEC);
        assert_eq!(
            fired,
            vec![
                Fired::Delayed("early"),
                Fired::Tick(t0 + Duration::from_millis(700)),
                Fired::Delayed("late")
            ]
        );
        assert_eq!(s.pending(), 0);
    }

    #[test]
    fn test_cancel_all() {
        let t0 = Instant::now();
        let mut s = Scheduler::new();
        s.start_countdown(t0, SEC);
        s.schedule(t0, SEC, 1u8);
        s.cancel_all();

        assert!(s.countdown().is_none());
        assert!(s.next_deadline().is_none());
        assert!(drain(&mut s, t0 + SEC * 10).is_empty());
    }

    #[test]
    fn test_next_deadline() {
        let t0 = Instant::now();
        let mut s = Scheduler::new();
        s.start_countdown(t0, SEC);
        s.schedule(t0, Duration::from_millis(300), ());
        assert_eq!(s.next_deadline(), Some(t0 + Duration::from_millis(300)));
    }

    #[test]
    fn test_format() {
        assert_eq!(format_countdown(300), "05:00");
        assert_eq!(format_countdown(59), "00:59");
        assert_eq!(format_elapsed(Duration::from_secs(65)), "1:05");
        assert_eq!(format_elapsed(Duration::ZERO), "0:00");
    }
}

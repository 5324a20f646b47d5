//! Debounce-within-throttle dispatcher.
//!
//! Values enter the throttle stage first. The leading value of a window passes
//! straight through; later values inside the window collapse into a single
//! trailing slot (latest wins) that is released when the window closes. Whatever
//! leaves the throttle stage goes through the debounce stage, which holds it until
//! `debounce` has elapsed without a newer value. A zero debounce makes that stage a
//! pass-through, a zero throttle disables windowing.
//!
//! The limiter owns no timers. The host feeds it explicit instants through
//! [`RateLimiter::push`] and [`RateLimiter::poll`] and uses
//! [`RateLimiter::next_deadline`] to decide when to wake up.

use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
pub struct RateLimiter<V> {
    debounce: Duration,
    throttle: Duration,
    window_end: Option<Instant>,
    trailing: Option<V>,
    debounced: Option<(Instant, V)>,
}

impl<V> RateLimiter<V> {
    pub fn new(debounce: Duration, throttle: Duration) -> Self {
        Self {
            debounce,
            throttle,
            window_end: None,
            trailing: None,
            debounced: None,
        }
    }

    pub fn debounce(&self) -> Duration {
        self.debounce
    }

    pub fn throttle(&self) -> Duration {
        self.throttle
    }

    /// Feeds a value at `now`. Returns it immediately when both stages let it
    /// through on the leading edge.
    pub fn push(&mut self, value: V, now: Instant) -> Option<V> {
        if let Some(end) = self.window_end {
            if now < end {
                self.trailing = Some(value);
                return None;
            }
        }

        self.trailing = None;
        self.window_end = if self.throttle.is_zero() {
            None
        } else {
            Some(now + self.throttle)
        };
        self.debounce_stage(value, now)
    }

    /// Releases the next value that became due at `now`, if any. Call repeatedly
    /// until it returns `None` to drain everything that is due.
    pub fn poll(&mut self, now: Instant) -> Option<V> {
        loop {
            let debounce_due = self
                .debounced
                .as_ref()
                .map(|(deadline, _)| *deadline)
                .filter(|deadline| *deadline <= now);
            let window_due = self.window_end.filter(|end| *end <= now);

            match (debounce_due, window_due) {
                (Some(deadline), Some(end)) if deadline <= end => return self.take_debounced(),
                (Some(_), None) => return self.take_debounced(),
                (_, Some(end)) => match self.trailing.take() {
                    Some(value) => {
                        self.window_end = Some(end + self.throttle);
                        if let Some(value) = self.debounce_stage(value, end) {
                            return Some(value);
                        }
                    }
                    None => self.window_end = None,
                },
                (None, None) => return None,
            }
        }
    }

    /// Earliest instant at which [`poll`](Self::poll) can release something.
    pub fn next_deadline(&self) -> Option<Instant> {
        let debounce = self.debounced.as_ref().map(|(deadline, _)| *deadline);
        let trailing = self.trailing.as_ref().and(self.window_end);
        match (debounce, trailing) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    pub fn has_pending(&self) -> bool {
        self.trailing.is_some() || self.debounced.is_some()
    }

    /// Drops pending values but keeps the current window, so the next value still
    /// respects the throttle spacing. Returns whether anything was dropped.
    pub fn discard_pending(&mut self) -> bool {
        let had_pending = self.has_pending();
        self.trailing = None;
        self.debounced = None;
        had_pending
    }

    /// Drops every pending value and closes the current window.
    pub fn cancel(&mut self) {
        self.window_end = None;
        self.trailing = None;
        self.debounced = None;
    }

    fn debounce_stage(&mut self, value: V, at: Instant) -> Option<V> {
        if self.debounce.is_zero() {
            return Some(value);
        }
        self.debounced = Some((at + self.debounce, value));
        None
    }

    fn take_debounced(&mut self) -> Option<V> {
        self.debounced.take().map(|(_, value)| value)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/limiter.rs"]
mod tests;

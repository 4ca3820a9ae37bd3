//! Signal debouncing for physical buttons.
//!
//! Mechanical switches bounce: a single press shows up as a burst of rapid
//! transitions. A raw transition is only accepted once it has persisted for
//! the full stability window.

use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
pub struct Debouncer {
    accepted: bool,
    candidate: bool,
    candidate_since: Option<Instant>,
    window: Duration,
}

impl Debouncer {
    pub fn new(window: Duration) -> Self {
        Self {
            accepted: false,
            candidate: false,
            candidate_since: None,
            window,
        }
    }

    /// Feed the current raw level; returns the accepted (stable) level.
    ///
    /// `now` is injected so tests control time.
    pub fn update(&mut self, raw: bool, now: Instant) -> bool {
        if raw == self.accepted {
            // Bounce back to the accepted level cancels any pending change.
            self.candidate_since = None;
            return self.accepted;
        }

        match self.candidate_since {
            Some(since) if self.candidate == raw => {
                if now.duration_since(since) >= self.window {
                    self.accepted = raw;
                    self.candidate_since = None;
                }
            }
            _ => {
                self.candidate = raw;
                self.candidate_since = Some(now);
            }
        }

        self.accepted
    }

    pub fn state(&self) -> bool {
        self.accepted
    }
}

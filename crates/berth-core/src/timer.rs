#![forbid(unsafe_code)]

//! Single-shot deadline timer.
//!
//! [`SingleShot`] arms a deadline and reports the fire when the host loop
//! polls it. There is no background thread and no stored callback: time is
//! always passed in by the caller, which keeps every consumer
//! deterministic under test.
//!
//! # Invariants
//!
//! 1. One `start()` leads to at most one fire.
//! 2. Firing and `stop()` are mutually exclusive outcomes for a given
//!    `start()`: whichever happens first wins.
//! 3. Re-calling `start()` while running restarts the delay window; the
//!    old deadline is discarded, never accumulated.

use std::time::Duration;
use web_time::Instant;

/// A rearmable single-shot timer.
#[derive(Debug, Clone)]
pub struct SingleShot {
    delay: Duration,
    deadline: Option<Instant>,
}

impl SingleShot {
    /// Create a disarmed timer with the given delay.
    #[must_use]
    pub const fn new(delay: Duration) -> Self {
        Self {
            delay,
            deadline: None,
        }
    }

    /// The configured delay.
    #[inline]
    #[must_use]
    pub const fn delay(&self) -> Duration {
        self.delay
    }

    /// Replace the delay. Takes effect on the next `start()`; an armed
    /// deadline keeps its original window.
    pub fn set_delay(&mut self, delay: Duration) {
        self.delay = delay;
    }

    /// Whether the timer is armed and has not yet fired.
    #[inline]
    #[must_use]
    pub const fn is_running(&self) -> bool {
        self.deadline.is_some()
    }

    /// Arm the timer to fire `delay` after `now`.
    ///
    /// Restart semantics: if already running, the window resets.
    pub fn start(&mut self, now: Instant) {
        self.deadline = Some(now + self.delay);
    }

    /// Disarm the timer. No effect if idle or already fired.
    pub fn stop(&mut self) {
        self.deadline = None;
    }

    /// Consume the fire if the deadline has been reached.
    ///
    /// Returns `true` exactly once per `start()` that was not stopped
    /// first; the timer is disarmed by the fire.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}

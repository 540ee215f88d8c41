//! Re-entrancy guard for key presses
//!
//! Presses are queued on a channel while a previous press is being handled
//! (which can block on a slow command or a dialog pause). Those presses were
//! made against a screen that was not yet up to date, so they are dropped
//! rather than replayed.

use std::time::Instant;

#[derive(Clone, Copy, Debug, Default)]
pub struct InputGate {
    busy: Option<(Instant, Instant)>,
}

impl InputGate {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a press made at `at` should be handled.
    #[must_use]
    pub fn admit(&self, at: Instant) -> bool {
        match self.busy {
            Some((started, finished)) => !(started <= at && at < finished),
            None => true,
        }
    }

    /// Remember the window during which a press was being handled.
    pub fn record(&mut self, started: Instant, finished: Instant) {
        self.busy = Some((started, finished));
    }
}

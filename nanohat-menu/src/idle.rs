//! Screensaver countdown

/// Ticks left before the panel blanks.
///
/// Fires exactly once per idle stretch: after the countdown hits zero it
/// stays expired until the next `reset`. An initial value of 0 disables it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct IdleCountdown {
    initial: u32,
    remaining: u32,
    expired: bool,
}

impl IdleCountdown {
    #[must_use]
    pub fn new(initial: u32) -> Self {
        Self {
            initial,
            remaining: initial,
            expired: false,
        }
    }

    /// Count down one idle tick. Returns true on the tick that expires.
    pub fn tick(&mut self) -> bool {
        if self.initial == 0 || self.expired {
            return false;
        }
        self.remaining = self.remaining.saturating_sub(1);
        if self.remaining == 0 {
            self.expired = true;
            return true;
        }
        false
    }

    pub fn reset(&mut self) {
        self.remaining = self.initial;
        self.expired = false;
    }

    #[must_use]
    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.expired
    }
}

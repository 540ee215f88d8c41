use std::time::Instant;

/// The three navigation controls, in panel order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Button {
    Down,
    Select,
    Back,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ButtonPress {
    pub button: Button,
    /// When the key edge was seen, used to drop presses made while busy
    pub at: Instant,
}

impl ButtonPress {
    #[must_use]
    pub fn now(button: Button) -> Self {
        Self {
            button,
            at: Instant::now(),
        }
    }
}

#[derive(Clone, Debug)]
pub enum AppEvent {
    Button(ButtonPress), // Key pressed on the hat
    Shutdown,            // Signal to exit the application
}

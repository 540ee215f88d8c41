//! Operating mode detection
//!
//! The device boots into one of a few modes; alternate modes leave a marker
//! file behind. The mode is read once at startup and decides which menu tree
//! is built and what the home page is titled.

use crate::config::Paths;
use crate::shell::Shell;
use std::path::Path;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Mode {
    Classic,
    Wconsole,
    Hotspot,
}

impl Mode {
    /// Probe marker files. Wconsole wins if both are somehow present.
    pub fn detect<S: Shell + ?Sized>(shell: &S, paths: &Paths) -> Self {
        let mode = if shell.exists(&paths.wconsole_marker) {
            Mode::Wconsole
        } else if shell.exists(&paths.hotspot_marker) {
            Mode::Hotspot
        } else {
            Mode::Classic
        };
        log::info!("Detected {} mode", mode.label());
        mode
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Mode::Classic => "Classic",
            Mode::Wconsole => "Wconsole",
            Mode::Hotspot => "Hotspot",
        }
    }

    /// Interface whose address the home page shows
    #[must_use]
    pub fn home_interface(self) -> &'static str {
        match self {
            Mode::Classic | Mode::Wconsole => "eth0",
            Mode::Hotspot => "wlan0",
        }
    }

    /// Script that flips this mode on or off; classic has none.
    #[must_use]
    pub fn switcher(self, paths: &Paths) -> Option<&Path> {
        match self {
            Mode::Classic => None,
            Mode::Wconsole => Some(&paths.wconsole_switcher),
            Mode::Hotspot => Some(&paths.hotspot_switcher),
        }
    }
}

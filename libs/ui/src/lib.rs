//! Pages and widgets for the NanoHat OLED menu
//!
//! Every screen the menu can show is a plain value (title, rows, nav labels)
//! that knows how to draw itself on any 1-bit `DrawTarget`. Building those
//! values is the menu's job; this crate only lays them out on a 128x64 panel.

pub mod fonts;
pub mod pages;
pub mod widgets;

// Re-export commonly used types
pub use pages::Page;
pub use widgets::{NavBar, NavLabels};

/// Panel width in pixels
pub const DISPLAY_WIDTH: i32 = 128;
/// Top pixel row of the nav-button bar
pub const NAV_BAR_TOP: i32 = 54;

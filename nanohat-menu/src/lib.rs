//! Three-button menu for the NanoHat OLED
//!
//! Drives a 128x64 monochrome panel and three keys (Down, Select, Back) as a
//! hierarchical menu of network and system status pages plus a few system
//! actions (reboot, shutdown, mode switch).
//!
//! # Architecture
//!
//! - `menu` builds the immutable menu tree for the detected `mode`
//! - `navigator` is the pure key-press state machine over that tree
//! - `pager` windows long line lists into scrollable or paged tables
//! - `actions` maps each leaf to facts to show or a system operation
//! - `facts` scrapes commands and `/proc` through the `shell` seam
//! - `app` owns all state and is driven by the event loop in the binary,
//!   one key press or idle tick at a time
//!
//! Nothing in the library talks to hardware: screens leave through the
//! `screen::Surface` trait, and `test_utils` provides in-memory fakes for
//! both seams.
//!
//! ```rust
//! use nanohat_menu::{App, Config, events::{Button, ButtonPress}};
//! use nanohat_menu::test_utils::{FakeShell, RecordingSurface};
//!
//! let mut app = App::new(RecordingSurface::default(), FakeShell::new(), Config::default());
//! app.start();
//! app.handle_press(ButtonPress::now(Button::Select));
//! assert_eq!(app.navigator().path(), [0]);
//! ```

pub mod actions;
pub mod app;
pub mod config;
pub mod constants;
pub mod events;
pub mod facts;
pub mod idle;
pub mod input;
pub mod menu;
pub mod mode;
pub mod navigator;
pub mod pager;
pub mod screen;
pub mod shell;
pub mod test_utils;

pub use app::App;
pub use config::Config;
pub use mode::Mode;
pub use screen::{Screen, Surface};
pub use shell::{CommandError, Shell, SystemShell};

//! What goes on the panel
//!
//! `Screen` is the closed set of things the menu can show. The `Surface`
//! trait is where screens leave the library: the binary implements it on
//! the OLED, tests implement it with a recorder.

use embedded_graphics::{pixelcolor::BinaryColor, prelude::DrawTarget};
use nanohat_ui::Page;
use nanohat_ui::pages::{ClockPage, DialogPage, HomePage, MenuPage, TablePage};
use std::fmt::Display;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Screen {
    Home(HomePage),
    Menu(MenuPage),
    Table(TablePage),
    Dialog(DialogPage),
    Clock(ClockPage),
}

impl<D: DrawTarget<Color = BinaryColor>> Page<D> for Screen {
    fn draw(&mut self, display: &mut D) -> Result<(), D::Error> {
        match self {
            Screen::Home(page) => page.draw(display),
            Screen::Menu(page) => page.draw(display),
            Screen::Table(page) => page.draw(display),
            Screen::Dialog(page) => page.draw(display),
            Screen::Clock(page) => page.draw(display),
        }
    }
}

pub trait Surface {
    type Error: Display;

    /// Replace whatever is on the panel with `screen`.
    ///
    /// # Errors
    /// Returns error if drawing or flushing to the panel fails.
    fn show(&mut self, screen: Screen) -> Result<(), Self::Error>;

    /// Turn the panel off (screensaver, or before a reboot).
    ///
    /// # Errors
    /// Returns error if the panel doesn't accept the command.
    fn blank(&mut self) -> Result<(), Self::Error>;

    /// Turn the panel back on. The caller redraws afterwards.
    ///
    /// # Errors
    /// Returns error if the panel doesn't accept the command.
    fn wake(&mut self) -> Result<(), Self::Error>;
}

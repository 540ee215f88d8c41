use embedded_graphics::{pixelcolor::BinaryColor, prelude::DrawTarget};

pub mod clock;
pub mod dialog;
pub mod home;
pub mod logo;
pub mod menu;
pub mod table;

pub use clock::ClockPage;
pub use dialog::DialogPage;
pub use home::HomePage;
pub use logo::LogoPage;
pub use menu::{MenuPage, MenuRow};
pub use table::TablePage;

/// Trait for UI pages that can be drawn on a display
pub trait Page<D: DrawTarget<Color = BinaryColor>> {
    /// Draw the page content to the display
    fn draw(&mut self, display: &mut D) -> Result<(), D::Error>;

    /// Clear the display and draw the page (convenience method)
    fn show(&mut self, display: &mut D) -> Result<(), D::Error> {
        display.clear(BinaryColor::Off)?;
        self.draw(display)
    }
}

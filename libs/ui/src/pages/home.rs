//! Home page shown at boot and after leaving the root menu.

use super::Page;
use crate::widgets::{NavBar, NavLabels};
use crate::{DISPLAY_WIDTH, fonts};
use embedded_graphics::{
    Drawable,
    pixelcolor::BinaryColor,
    prelude::{DrawTarget, Point},
};
use u8g2_fonts::{
    FontRenderer,
    types::{FontColor, HorizontalAlignment, VerticalPosition},
};

const TITLE_Y: i32 = 1;
const HOSTNAME_Y: i32 = 16;
const INTERFACE_Y: i32 = 27;
const ADDRESS_Y: i32 = 38;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HomePage {
    /// Operating mode label, e.g. "Classic"
    pub title: String,
    pub hostname: String,
    pub interface: String,
    pub address: String,
    pub nav: NavLabels,
}

impl<D: DrawTarget<Color = BinaryColor>> Page<D> for HomePage {
    fn draw(&mut self, display: &mut D) -> Result<(), D::Error> {
        let color = FontColor::Transparent(BinaryColor::On);
        let center_x = DISPLAY_WIDTH / 2;

        FontRenderer::new::<fonts::FONT_TITLE>()
            .render_aligned(
                self.title.as_str(),
                Point::new(center_x, TITLE_Y),
                VerticalPosition::Top,
                HorizontalAlignment::Center,
                color,
                display,
            )
            .ok();

        let font = FontRenderer::new::<fonts::FONT_TABLE>();
        font.render_aligned(
            self.hostname.as_str(),
            Point::new(center_x, HOSTNAME_Y),
            VerticalPosition::Top,
            HorizontalAlignment::Center,
            color,
            display,
        )
        .ok();
        font.render_aligned(
            self.interface.as_str(),
            Point::new(center_x, INTERFACE_Y),
            VerticalPosition::Top,
            HorizontalAlignment::Center,
            color,
            display,
        )
        .ok();

        FontRenderer::new::<fonts::FONT_DIALOG>()
            .render_aligned(
                self.address.as_str(),
                Point::new(center_x, ADDRESS_Y),
                VerticalPosition::Top,
                HorizontalAlignment::Center,
                color,
                display,
            )
            .ok();

        NavBar::new(self.nav).draw(display)
    }
}

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

const ROW_HEIGHT: i32 = 12;

/// A window of text lines with an optional centred title row.
///
/// Lines arrive already truncated to the panel width; scrolling state lives
/// with whoever built the page.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TablePage {
    pub title: Option<String>,
    pub lines: Vec<String>,
    pub nav: NavLabels,
}

impl<D: DrawTarget<Color = BinaryColor>> Page<D> for TablePage {
    fn draw(&mut self, display: &mut D) -> Result<(), D::Error> {
        let font = FontRenderer::new::<fonts::FONT_TABLE>();
        let mut y = 0;

        if let Some(title) = &self.title {
            font.render_aligned(
                title.as_str(),
                Point::new(DISPLAY_WIDTH / 2, y),
                VerticalPosition::Top,
                HorizontalAlignment::Center,
                FontColor::Transparent(BinaryColor::On),
                display,
            )
            .ok();
            y += ROW_HEIGHT;
        }

        for line in &self.lines {
            font.render_aligned(
                line.as_str(),
                Point::new(0, y),
                VerticalPosition::Top,
                HorizontalAlignment::Left,
                FontColor::Transparent(BinaryColor::On),
                display,
            )
            .ok();
            y += ROW_HEIGHT;
        }

        NavBar::new(self.nav).draw(display)
    }
}

use super::Page;
use crate::widgets::{NavBar, NavLabels};
use crate::{DISPLAY_WIDTH, fonts};
use embedded_graphics::{
    Drawable,
    pixelcolor::BinaryColor,
    prelude::{DrawTarget, Point, Primitive, Size},
    primitives::{PrimitiveStyle, Rectangle},
};
use u8g2_fonts::{
    FontRenderer,
    types::{FontColor, HorizontalAlignment, VerticalPosition},
};

// Layout constants for the 128x64 panel
const TITLE_Y: i32 = 1;
const FIRST_ROW_Y: i32 = 15;
const ROW_HEIGHT: i32 = 13;
/// Label cells before the trailing '>' marker
const LABEL_CELLS: usize = 17;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MenuRow {
    pub label: String,
    pub selected: bool,
}

/// One level of the menu tree, already windowed to the visible rows.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MenuPage {
    pub title: String,
    pub rows: Vec<MenuRow>,
    pub nav: NavLabels,
}

impl<D: DrawTarget<Color = BinaryColor>> Page<D> for MenuPage {
    fn draw(&mut self, display: &mut D) -> Result<(), D::Error> {
        FontRenderer::new::<fonts::FONT_TITLE>()
            .render_aligned(
                self.title.as_str(),
                Point::new(DISPLAY_WIDTH / 2, TITLE_Y),
                VerticalPosition::Top,
                HorizontalAlignment::Center,
                FontColor::Transparent(BinaryColor::On),
                display,
            )
            .ok();

        let font = FontRenderer::new::<fonts::FONT_MENU>();
        let mut y = FIRST_ROW_Y;
        for row in &self.rows {
            // Selected row is drawn inverted
            let text_color = if row.selected {
                Rectangle::new(
                    Point::new(0, y),
                    Size::new(DISPLAY_WIDTH.cast_unsigned(), ROW_HEIGHT.cast_unsigned()),
                )
                .into_styled(PrimitiveStyle::with_fill(BinaryColor::On))
                .draw(display)?;
                BinaryColor::Off
            } else {
                BinaryColor::On
            };

            let label: String = row.label.chars().take(LABEL_CELLS).collect();
            let text = format!("{label:<width$}>", width = LABEL_CELLS);
            font.render_aligned(
                text.as_str(),
                Point::new(1, y + 1),
                VerticalPosition::Top,
                HorizontalAlignment::Left,
                FontColor::Transparent(text_color),
                display,
            )
            .ok();

            y += ROW_HEIGHT;
        }

        NavBar::new(self.nav).draw(display)
    }
}

use super::Page;
use crate::widgets::{NavBar, NavLabels};
use crate::{DISPLAY_WIDTH, NAV_BAR_TOP, fonts};
use embedded_graphics::{
    Drawable,
    pixelcolor::BinaryColor,
    prelude::{DrawTarget, Point, Size},
    primitives::Rectangle,
};
use embedded_text::{
    TextBox,
    alignment::{HorizontalAlignment, VerticalAlignment},
    style::TextBoxStyleBuilder,
};
use u8g2_fonts::U8g2TextStyle;

/// Short informational message, optionally dismissable with Back.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DialogPage {
    pub lines: Vec<String>,
    pub nav: NavLabels,
}

impl DialogPage {
    #[must_use]
    pub fn new(lines: &[&str], nav: NavLabels) -> Self {
        Self {
            lines: lines.iter().map(ToString::to_string).collect(),
            nav,
        }
    }
}

impl<D: DrawTarget<Color = BinaryColor>> Page<D> for DialogPage {
    fn draw(&mut self, display: &mut D) -> Result<(), D::Error> {
        let text_bounds = Rectangle::new(
            Point::zero(),
            Size::new(DISPLAY_WIDTH.cast_unsigned(), NAV_BAR_TOP.cast_unsigned()),
        );

        // Long lines wrap inside the box rather than run off the panel
        let character_style = U8g2TextStyle::new(fonts::FONT_DIALOG, BinaryColor::On);
        let textbox_style = TextBoxStyleBuilder::new()
            .alignment(HorizontalAlignment::Left)
            .vertical_alignment(VerticalAlignment::Top)
            .build();

        let message = self.lines.join("\n");
        TextBox::with_textbox_style(&message, text_bounds, character_style, textbox_style)
            .draw(display)?;

        NavBar::new(self.nav).draw(display)
    }
}

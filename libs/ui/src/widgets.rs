use crate::{NAV_BAR_TOP, fonts};
use embedded_graphics::{
    Drawable,
    pixelcolor::BinaryColor,
    prelude::*,
    primitives::Rectangle,
};
use embedded_layout::View;
use u8g2_fonts::{
    FontRenderer,
    types::{FontColor, HorizontalAlignment, VerticalPosition},
};

/// Horizontal offsets of the three labels, one above each physical key.
const DOWN_X: i32 = 0;
const NEXT_X: i32 = 50;
const BACK_X: i32 = 100;
const BAR_HEIGHT: u32 = 10;

/// Labels for the Down / Select / Back keys. `None` hides a label.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NavLabels {
    pub down: Option<&'static str>,
    pub next: Option<&'static str>,
    pub back: Option<&'static str>,
}

impl NavLabels {
    /// Only a back label, for pages whose sole way out is Back.
    #[must_use]
    pub fn back_only(label: &'static str) -> Self {
        Self {
            back: Some(label),
            ..Self::default()
        }
    }
}

#[derive(Clone, Debug)]
pub struct NavBar {
    pub labels: NavLabels,
    pub bounds: Rectangle,
}

impl NavBar {
    #[must_use]
    pub fn new(labels: NavLabels) -> Self {
        Self {
            labels,
            bounds: Rectangle::new(
                Point::new(0, NAV_BAR_TOP),
                Size::new(crate::DISPLAY_WIDTH.cast_unsigned(), BAR_HEIGHT),
            ),
        }
    }
}

impl View for NavBar {
    fn bounds(&self) -> Rectangle {
        self.bounds
    }

    fn translate_impl(&mut self, by: Point) {
        self.bounds.top_left += by;
    }
}

impl Drawable for NavBar {
    type Color = BinaryColor;
    type Output = ();

    fn draw<D>(&self, display: &mut D) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Self::Color>,
    {
        let font = FontRenderer::new::<fonts::FONT_NAV>();
        let origin = self.bounds.top_left;

        for (label, x) in [
            (self.labels.down, DOWN_X),
            (self.labels.next, NEXT_X),
            (self.labels.back, BACK_X),
        ] {
            let Some(label) = label else { continue };
            font.render_aligned(
                label,
                origin + Point::new(x, 0),
                VerticalPosition::Top,
                HorizontalAlignment::Left,
                FontColor::Transparent(BinaryColor::On),
                display,
            )
            .or_else(skip_glyph_errors)?;
        }

        Ok(())
    }
}

/// Surface display errors from a font render, ignore missing-glyph errors.
pub(crate) fn skip_glyph_errors<E>(
    error: u8g2_fonts::Error<E>,
) -> Result<Option<Rectangle>, E> {
    match error {
        u8g2_fonts::Error::DisplayError(e) => Err(e),
        _ => Ok(None),
    }
}

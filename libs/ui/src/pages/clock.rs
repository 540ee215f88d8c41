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

const WEEKDAY_Y: i32 = 2;
const DATE_Y: i32 = 17;
const TIME_Y: i32 = 32;

/// Current date and time, pre-formatted by the caller.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClockPage {
    pub weekday: String,
    pub date: String,
    pub time: String,
    pub zone: String,
    pub nav: NavLabels,
}

impl<D: DrawTarget<Color = BinaryColor>> Page<D> for ClockPage {
    fn draw(&mut self, display: &mut D) -> Result<(), D::Error> {
        let font = FontRenderer::new::<fonts::FONT_CLOCK>();
        let color = FontColor::Transparent(BinaryColor::On);

        font.render_aligned(
            self.weekday.as_str(),
            Point::new(1, WEEKDAY_Y),
            VerticalPosition::Top,
            HorizontalAlignment::Left,
            color,
            display,
        )
        .ok();
        font.render_aligned(
            self.zone.as_str(),
            Point::new(DISPLAY_WIDTH - 1, WEEKDAY_Y),
            VerticalPosition::Top,
            HorizontalAlignment::Right,
            color,
            display,
        )
        .ok();
        font.render_aligned(
            self.date.as_str(),
            Point::new(1, DATE_Y),
            VerticalPosition::Top,
            HorizontalAlignment::Left,
            color,
            display,
        )
        .ok();

        FontRenderer::new::<fonts::FONT_CLOCK_LARGE>()
            .render_aligned(
                self.time.as_str(),
                Point::new(1, TIME_Y),
                VerticalPosition::Top,
                HorizontalAlignment::Left,
                color,
                display,
            )
            .ok();

        NavBar::new(self.nav).draw(display)
    }
}

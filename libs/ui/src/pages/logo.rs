use super::Page;
use crate::fonts;
use embedded_graphics::{image::Image, pixelcolor::BinaryColor, prelude::*};
use tinybmp::Bmp;
use u8g2_fonts::FontRenderer;

const BOOT_LOGO: &[u8] = include_bytes!("../../assets/boot-logo.bmp");

/// Splash shown once before the event loop starts.
pub struct LogoPage;

impl LogoPage {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Default for LogoPage {
    fn default() -> Self {
        Self::new()
    }
}

impl<D: DrawTarget<Color = BinaryColor>> Page<D> for LogoPage {
    fn draw(&mut self, display: &mut D) -> Result<(), D::Error> {
        let display_bounds = display.bounding_box();

        let logo_result: Result<Bmp<BinaryColor>, _> = Bmp::from_slice(BOOT_LOGO);
        if let Ok(logo) = logo_result {
            let logo_size = logo.bounding_box().size;
            let top_left = display_bounds.center() - logo_size / 2;
            Image::new(&logo, top_left).draw(display)?;
        } else {
            log::error!("Failed to parse boot logo BMP - binary may be corrupted");
            FontRenderer::new::<fonts::FONT_TITLE>()
                .render_aligned(
                    "NanoHat",
                    display_bounds.center(),
                    u8g2_fonts::types::VerticalPosition::Center,
                    u8g2_fonts::types::HorizontalAlignment::Center,
                    u8g2_fonts::types::FontColor::Transparent(BinaryColor::On),
                    display,
                )
                .ok();
        }

        Ok(())
    }
}

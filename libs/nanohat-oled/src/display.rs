use crate::common::{BUFFER_SIZE, HEIGHT, WIDTH};
use crate::display_driver::Ssd1306;
use crate::error::OledResult;
use core::convert::Infallible;
use embedded_graphics::{
    geometry::Dimensions,
    pixelcolor::BinaryColor,
    prelude::{DrawTarget, OriginDimensions, Pixel, PointsIter, Size},
    primitives::Rectangle,
};

/// 1-bit frame in SSD1306 page layout: byte `x + (y / 8) * WIDTH`, bit `y % 8`.
pub struct FrameBuffer {
    bytes: Box<[u8]>,
}

impl Default for FrameBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameBuffer {
    #[must_use]
    pub fn new() -> Self {
        Self {
            bytes: vec![0x00; BUFFER_SIZE].into_boxed_slice(),
        }
    }

    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    #[must_use]
    pub fn pixel(&self, x: u32, y: u32) -> bool {
        if x >= WIDTH || y >= HEIGHT {
            return false;
        }
        let index = (x + (y / 8) * WIDTH) as usize;
        self.bytes[index] & (1 << (y % 8)) != 0
    }

    pub fn set_pixel(&mut self, x: u32, y: u32, on: bool) {
        if x >= WIDTH || y >= HEIGHT {
            return;
        }
        let index = (x + (y / 8) * WIDTH) as usize;
        let bit = 1 << (y % 8);
        if on {
            self.bytes[index] |= bit;
        } else {
            self.bytes[index] &= !bit;
        }
    }
}

impl DrawTarget for FrameBuffer {
    type Color = BinaryColor;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(coord, color) in pixels {
            let (x, y) = coord.into();
            if x < 0 || y < 0 {
                continue;
            }
            self.set_pixel(x.cast_unsigned(), y.cast_unsigned(), color.is_on());
        }
        Ok(())
    }

    fn fill_solid(&mut self, area: &Rectangle, color: Self::Color) -> Result<(), Self::Error> {
        let clipped_area = area.intersection(&self.bounding_box());

        if clipped_area.is_zero_sized() {
            return Ok(());
        }

        self.draw_iter(clipped_area.points().map(|p| Pixel(p, color)))
    }

    fn clear(&mut self, color: BinaryColor) -> Result<(), Self::Error> {
        self.bytes.fill(if color.is_on() { 0xFF } else { 0x00 });
        Ok(())
    }
}

impl OriginDimensions for FrameBuffer {
    fn size(&self) -> Size {
        Size::new(WIDTH, HEIGHT)
    }
}

pub struct Display {
    driver: Ssd1306,
    frame: FrameBuffer,
}

impl Display {
    #[must_use]
    pub(crate) fn new(driver: Ssd1306) -> Self {
        Self {
            driver,
            frame: FrameBuffer::new(),
        }
    }

    /// Send the current frame to the panel.
    pub fn update(&mut self) -> OledResult<()> {
        self.driver.flush(self.frame.as_bytes())
    }

    /// Blank the panel immediately, leaving it powered.
    pub fn clear_panel(&mut self) -> OledResult<()> {
        self.frame.clear(BinaryColor::Off)?;
        self.update()
    }

    pub fn set_contrast(&mut self, contrast: u8) -> OledResult<()> {
        self.driver.set_contrast(contrast)
    }

    pub(crate) fn sleep(&mut self) -> OledResult<()> {
        self.driver.display_off()
    }

    pub(crate) fn wake(&mut self) -> OledResult<()> {
        self.driver.display_on()
    }
}

impl DrawTarget for Display {
    type Color = BinaryColor;
    type Error = crate::error::Error;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        Ok(self.frame.draw_iter(pixels)?)
    }

    fn fill_solid(&mut self, area: &Rectangle, color: Self::Color) -> Result<(), Self::Error> {
        Ok(self.frame.fill_solid(area, color)?)
    }

    fn clear(&mut self, color: BinaryColor) -> Result<(), Self::Error> {
        Ok(self.frame.clear(color)?)
    }
}

impl OriginDimensions for Display {
    fn size(&self) -> Size {
        self.frame.size()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_graphics::{
        Drawable,
        prelude::{Point, Primitive},
        primitives::PrimitiveStyle,
    };

    #[test]
    fn pixel_maps_to_page_layout() {
        let mut frame = FrameBuffer::new();
        frame.set_pixel(3, 10, true);
        // y = 10 lives in page 1, bit 2
        assert_eq!(frame.as_bytes()[128 + 3], 0b0000_0100);
        assert!(frame.pixel(3, 10));
        frame.set_pixel(3, 10, false);
        assert_eq!(frame.as_bytes()[128 + 3], 0);
    }

    #[test]
    fn out_of_bounds_pixels_are_ignored() {
        let mut frame = FrameBuffer::new();
        frame.set_pixel(WIDTH, 0, true);
        frame.set_pixel(0, HEIGHT, true);
        let pixels = [
            Pixel(Point::new(-1, 5), BinaryColor::On),
            Pixel(Point::new(5, -1), BinaryColor::On),
        ];
        frame.draw_iter(pixels).unwrap();
        assert!(frame.as_bytes().iter().all(|&b| b == 0));
    }

    #[test]
    fn clear_fills_every_byte() {
        let mut frame = FrameBuffer::new();
        frame.clear(BinaryColor::On).unwrap();
        assert!(frame.as_bytes().iter().all(|&b| b == 0xFF));
        assert_eq!(frame.as_bytes().len(), BUFFER_SIZE);
    }

    #[test]
    fn filled_rectangle_is_clipped_to_panel() {
        let mut frame = FrameBuffer::new();
        Rectangle::new(Point::new(120, 60), Size::new(20, 20))
            .into_styled(PrimitiveStyle::with_fill(BinaryColor::On))
            .draw(&mut frame)
            .unwrap();
        assert!(frame.pixel(127, 63));
        assert!(frame.pixel(120, 60));
        assert!(!frame.pixel(119, 60));
    }
}

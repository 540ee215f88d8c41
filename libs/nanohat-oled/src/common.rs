pub const WIDTH: u32 = 128;
pub const HEIGHT: u32 = 64;
/// One byte per 8-pixel vertical column slice, 8 pages of 128 columns.
pub const PAGES: u32 = HEIGHT / 8;
pub const BUFFER_SIZE: usize = (WIDTH * PAGES) as usize;

pub const DEFAULT_I2C_ADDRESS: u8 = 0x3C;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Rotation {
    #[default]
    Normal,
    UpsideDown,
}

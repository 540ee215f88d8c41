pub mod buttons;
pub mod common;
pub mod device;
pub mod display;
mod display_driver;
mod error;

pub use buttons::{Key, KeyPress};
pub use device::{Device, DeviceConfig, Error, OledResult};

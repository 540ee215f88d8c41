use core::convert::Infallible;
use linux_embedded_hal::gpio_cdev::Error as GpioError;
use linux_embedded_hal::i2cdev::linux::LinuxI2CError;
use std::io::Error as IoError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] IoError),
    /// Key lines could not be requested or read
    #[error("GPIO error: {0}")]
    Gpio(#[from] GpioError),
    /// The I2C bus device could not be opened
    #[error("I2C bus error: {0}")]
    I2cBus(#[from] LinuxI2CError),
    /// A transfer to the panel was not acknowledged
    #[error("OLED write to 0x{address:02X} failed: {reason}")]
    Write { address: u8, reason: String },
    #[error("Infallible")]
    Infallible(#[from] Infallible),
}

pub type OledResult<T> = Result<T, Error>;

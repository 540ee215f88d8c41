use crate::buttons::{Buttons, KeyPins, KeyPress};
use crate::common::{DEFAULT_I2C_ADDRESS, Rotation};
use crate::display::Display;
use crate::display_driver::Ssd1306;
pub use crate::error::{Error, OledResult};
use crossbeam_channel::Receiver;
use linux_embedded_hal::{I2cdev, gpio_cdev::Chip};
use log::info;

const DEFAULT_I2C_BUS_PATH: &str = "/dev/i2c-0";
const DEFAULT_GPIO_CHIP_PATH: &str = "/dev/gpiochip0";
const DEFAULT_K1_PIN: u32 = 0;
const DEFAULT_K2_PIN: u32 = 2;
const DEFAULT_K3_PIN: u32 = 3;

#[derive(Default)]
pub struct DeviceConfig {
    pub i2c_bus_path: Option<String>,
    pub i2c_address: Option<u8>,
    pub gpio_chip_path: Option<String>,
    pub k1_pin: Option<u32>,
    pub k2_pin: Option<u32>,
    pub k3_pin: Option<u32>,
    pub keys_active_low: bool,
    pub rotation: Option<Rotation>,
}

pub struct Device {
    pub display: Display,
    _buttons: Buttons,
}

impl Device {
    pub fn new(config: DeviceConfig) -> OledResult<(Self, Receiver<KeyPress>)> {
        let rotation = config.rotation.unwrap_or_default();
        let i2c_bus_path = config
            .i2c_bus_path
            .unwrap_or_else(|| DEFAULT_I2C_BUS_PATH.to_string());
        let i2c_address = config.i2c_address.unwrap_or(DEFAULT_I2C_ADDRESS);
        let gpio_chip_path = config
            .gpio_chip_path
            .unwrap_or_else(|| DEFAULT_GPIO_CHIP_PATH.to_string());
        let pins = KeyPins {
            k1: config.k1_pin.unwrap_or(DEFAULT_K1_PIN),
            k2: config.k2_pin.unwrap_or(DEFAULT_K2_PIN),
            k3: config.k3_pin.unwrap_or(DEFAULT_K3_PIN),
        };

        info!("Initializing OLED device on {i2c_bus_path}...");

        let i2c_bus = I2cdev::new(&i2c_bus_path)?;
        let driver = Ssd1306::new(i2c_bus, i2c_address, rotation)?;
        let display = Display::new(driver);

        let mut chip = Chip::new(gpio_chip_path)?;
        let (buttons, key_rx) = Buttons::new(&mut chip, pins, config.keys_active_low)?;

        let device = Self {
            display,
            _buttons: buttons,
        };

        Ok((device, key_rx))
    }

    /// Turn the panel off; keys stay live.
    pub fn display_sleep(&mut self) -> OledResult<()> {
        self.display.sleep()
    }

    pub fn display_wake(&mut self) -> OledResult<()> {
        self.display.wake()
    }
}

//! Runtime configuration
//!
//! Read once at startup from an optional JSON file. Every field has a
//! default, so a missing file simply means "run with the defaults".

use crate::constants::{
    CONFIG_ENV, CONFIG_FILE, HOTSPOT_MARKER, HOTSPOT_SWITCHER, IMAGE_VERSION_FILE, THERMAL_ZONE,
    UFW, WCONSOLE_MARKER, WCONSOLE_SWITCHER,
};
use serde::Deserialize;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    /// Event loop tick when no button is pressed
    pub tick_interval_ms: u64,
    /// Idle ticks before the panel is blanked; 0 disables the screensaver
    pub screensaver_ticks: u32,
    /// Upper bound on every external command
    pub command_timeout_secs: u64,
    /// How long a reboot/shutdown notice stays up before the command runs
    pub dialog_pause_ms: u64,
    pub boot_logo_ms: u64,
    pub display: DisplaySettings,
    pub paths: Paths,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tick_interval_ms: 1000,
            screensaver_ticks: 300,
            command_timeout_secs: 5,
            dialog_pause_ms: 1000,
            boot_logo_ms: 2000,
            display: DisplaySettings::default(),
            paths: Paths::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct DisplaySettings {
    pub i2c_bus: String,
    pub i2c_address: u8,
    pub gpio_chip: String,
    pub down_pin: u32,
    pub select_pin: u32,
    pub back_pin: u32,
    pub keys_active_low: bool,
    pub upside_down: bool,
    pub contrast: u8,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            i2c_bus: "/dev/i2c-0".to_string(),
            i2c_address: 0x3C,
            gpio_chip: "/dev/gpiochip0".to_string(),
            down_pin: 0,
            select_pin: 2,
            back_pin: 3,
            keys_active_low: false,
            upside_down: false,
            contrast: 0xCF,
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Paths {
    pub wconsole_marker: PathBuf,
    pub wconsole_switcher: PathBuf,
    pub hotspot_marker: PathBuf,
    pub hotspot_switcher: PathBuf,
    pub ufw: PathBuf,
    pub image_version: PathBuf,
    pub thermal_zone: PathBuf,
}

impl Default for Paths {
    fn default() -> Self {
        Self {
            wconsole_marker: WCONSOLE_MARKER.into(),
            wconsole_switcher: WCONSOLE_SWITCHER.into(),
            hotspot_marker: HOTSPOT_MARKER.into(),
            hotspot_switcher: HOTSPOT_SWITCHER.into(),
            ufw: UFW.into(),
            image_version: IMAGE_VERSION_FILE.into(),
            thermal_zone: THERMAL_ZONE.into(),
        }
    }
}

impl Config {
    /// Load from `$NANOHAT_MENU_CONFIG` or the default location, falling
    /// back to defaults when the file is absent or unusable.
    #[must_use]
    pub fn load() -> Self {
        let path = std::env::var_os(CONFIG_ENV)
            .map_or_else(|| PathBuf::from(CONFIG_FILE), PathBuf::from);
        match Self::read(&path) {
            Ok(config) => {
                log::info!("Loaded config from {}", path.display());
                config
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                log::info!("No config at {}, using defaults", path.display());
                Self::default()
            }
            Err(e) => {
                log::warn!("Ignoring config {}: {e} - using defaults", path.display());
                Self::default()
            }
        }
    }

    /// Read and parse a config file
    ///
    /// # Errors
    /// Returns error if the file can't be read or contains invalid JSON.
    pub fn read(path: &Path) -> io::Result<Self> {
        let content = fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }

    #[must_use]
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms.max(1))
    }

    #[must_use]
    pub fn command_timeout(&self) -> Duration {
        Duration::from_secs(self.command_timeout_secs)
    }

    #[must_use]
    pub fn dialog_pause(&self) -> Duration {
        Duration::from_millis(self.dialog_pause_ms)
    }

    #[must_use]
    pub fn boot_logo(&self) -> Duration {
        Duration::from_millis(self.boot_logo_ms)
    }
}

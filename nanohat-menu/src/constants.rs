//! Device-specific path constants
//!
//! This module centralizes the hardcoded paths used on the NanoPi image.
//! Every path here can be overridden from the config file.

/// Default config file location
pub const CONFIG_FILE: &str = "/etc/nanohat-menu/config.json";

/// Environment variable that overrides `CONFIG_FILE`
pub const CONFIG_ENV: &str = "NANOHAT_MENU_CONFIG";

/// Marker present while the device runs in wconsole mode
pub const WCONSOLE_MARKER: &str = "/etc/wconsole/wconsole.on";
/// Script that switches wconsole mode on/off (and reboots)
pub const WCONSOLE_SWITCHER: &str = "/etc/wconsole/wconsole_switcher";

/// Marker present while the device runs in hotspot mode
pub const HOTSPOT_MARKER: &str = "/etc/wlanpihotspot/hotspot.on";
/// Script that switches hotspot mode on/off (and reboots)
pub const HOTSPOT_SWITCHER: &str = "/etc/wlanpihotspot/hotspot_switcher";

/// Firewall front-end
pub const UFW: &str = "/usr/sbin/ufw";

/// Image version string written by the image builder
pub const IMAGE_VERSION_FILE: &str = "/etc/wlanpiversion";

pub const THERMAL_ZONE: &str = "/sys/class/thermal/thermal_zone0/temp";
pub const HOSTNAME_FILE: &str = "/proc/sys/kernel/hostname";
pub const LOADAVG_FILE: &str = "/proc/loadavg";
pub const MEMINFO_FILE: &str = "/proc/meminfo";

//! Fact providers
//!
//! Each provider scrapes one command or file and returns display-ready
//! lines. Failures never propagate: a provider that can't get its data
//! returns a short placeholder ("unknown", "Err: ...") in place of the data
//! so the page still renders with its normal navigation. Providers whose
//! whole page is a list hand the placeholder back as `Err`, because a failed
//! list is shown bare, without the list's title.

use crate::constants::{HOSTNAME_FILE, LOADAVG_FILE, MEMINFO_FILE};
use crate::shell::Shell;
use std::path::Path;

pub const UNKNOWN: &str = "unknown";
pub const NO_ADDRESS: &str = "No IP address";
pub const MONITOR_MODE: &str = "(Mon mode)";
pub const NO_USB_DEVICES: &str = "No devices detected";
pub const IP_ADDR_ERROR: &str = "Err: ip addr error";
pub const LSUSB_ERROR: &str = "Err: lsusb error";

/// One interface from `ip addr show`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InterfaceAddr {
    pub name: String,
    pub up: bool,
    pub loopback: bool,
    /// First IPv4 address, without prefix length
    pub ipv4: Option<String>,
}

/// Parse `ip addr show` output.
#[must_use]
pub fn parse_ip_addr(output: &str) -> Vec<InterfaceAddr> {
    let mut interfaces: Vec<InterfaceAddr> = Vec::new();

    for line in output.lines() {
        if line.starts_with(char::is_whitespace) {
            let Some(current) = interfaces.last_mut() else {
                continue;
            };
            let mut fields = line.split_whitespace();
            if fields.next() == Some("inet") && current.ipv4.is_none() {
                current.ipv4 = fields
                    .next()
                    .and_then(|cidr| cidr.split('/').next())
                    .map(ToString::to_string);
            }
            continue;
        }

        // "2: eth0: <BROADCAST,MULTICAST,UP,LOWER_UP> mtu 1500 ..."
        let mut parts = line.splitn(3, ": ");
        let (Some(_index), Some(name), Some(rest)) = (parts.next(), parts.next(), parts.next())
        else {
            continue;
        };
        let flags = rest
            .strip_prefix('<')
            .and_then(|r| r.split_once('>'))
            .map_or("", |(flags, _)| flags);
        let has_flag = |flag: &str| flags.split(',').any(|f| f == flag);

        interfaces.push(InterfaceAddr {
            // VLANs and veths show up as "eth0.10@eth0"
            name: name.split('@').next().unwrap_or(name).to_string(),
            up: has_flag("UP"),
            loopback: has_flag("LOOPBACK"),
            ipv4: None,
        });
    }
    interfaces
}

/// Lines for the interfaces page: one per UP interface, "name: address".
///
/// Wireless interfaces without an address are checked for monitor mode.
///
/// # Errors
///
/// Returns the placeholder line when `ip addr show` fails.
pub fn interface_lines<S: Shell + ?Sized>(shell: &S) -> Result<Vec<String>, &'static str> {
    let output = shell.run("ip", &["addr", "show"]).map_err(|e| {
        log::warn!("Interface list unavailable: {e}");
        IP_ADDR_ERROR
    })?;

    Ok(parse_ip_addr(&output)
        .into_iter()
        .filter(|iface| iface.up && !iface.loopback)
        .map(|iface| {
            let address = match iface.ipv4 {
                Some(ip) => ip,
                None if iface.name.starts_with("wlan") && in_monitor_mode(shell, &iface.name) => {
                    MONITOR_MODE.to_string()
                }
                None => NO_ADDRESS.to_string(),
            };
            format!("{}: {address}", iface.name)
        })
        .collect())
}

fn in_monitor_mode<S: Shell + ?Sized>(shell: &S, interface: &str) -> bool {
    match shell.run("iw", &[interface, "info"]) {
        Ok(info) => info.lines().any(|line| line.trim() == "type monitor"),
        Err(e) => {
            log::debug!("iw {interface} info: {e}");
            false
        }
    }
}

/// First IPv4 address of `interface`, if it has one.
pub fn interface_address<S: Shell + ?Sized>(shell: &S, interface: &str) -> Option<String> {
    let output = shell
        .run("ip", &["addr", "show", "dev", interface])
        .map_err(|e| log::debug!("No address for {interface}: {e}"))
        .ok()?;
    parse_ip_addr(&output)
        .into_iter()
        .find_map(|iface| iface.ipv4)
}

/// A wireless interface from `iw dev`
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct WlanInfo {
    pub name: String,
    pub mode: Option<String>,
    pub channel: Option<String>,
    pub ssid: Option<String>,
}

/// Parse `iw dev` output.
#[must_use]
pub fn parse_iw_dev(output: &str) -> Vec<WlanInfo> {
    let mut found: Vec<WlanInfo> = Vec::new();

    for line in output.lines() {
        let line = line.trim();
        if let Some(name) = line.strip_prefix("Interface ") {
            found.push(WlanInfo {
                name: name.to_string(),
                ..WlanInfo::default()
            });
            continue;
        }
        let Some(current) = found.last_mut() else {
            continue;
        };
        if let Some(mode) = line.strip_prefix("type ") {
            current.mode = Some(mode.to_string());
        } else if let Some(ssid) = line.strip_prefix("ssid ") {
            current.ssid = Some(ssid.to_string());
        } else if let Some(channel) = line.strip_prefix("channel ") {
            // "channel 36 (5180 MHz), width: 80 MHz, ..."
            current.channel = channel.split_whitespace().next().map(ToString::to_string);
        }
    }
    found
}

/// One page of lines per wireless interface.
pub fn wlan_pages<S: Shell + ?Sized>(shell: &S) -> Vec<Vec<String>> {
    let output = match shell.run("iw", &["dev"]) {
        Ok(output) => output,
        Err(e) => {
            log::warn!("Wireless list unavailable: {e}");
            return vec![vec!["Err: iw error".to_string()]];
        }
    };

    let wlans = parse_iw_dev(&output);
    if wlans.is_empty() {
        return vec![vec!["No WLAN interfaces".to_string()]];
    }
    wlans
        .into_iter()
        .map(|wlan| {
            vec![
                format!("{}: {}", wlan.name, wlan.mode.as_deref().unwrap_or(UNKNOWN)),
                format!("Ch: {}", wlan.channel.as_deref().unwrap_or("-")),
                format!("SSID: {}", wlan.ssid.as_deref().unwrap_or("-")),
            ]
        })
        .collect()
}

/// Parse `lsusb` output into device descriptions, skipping root hubs.
#[must_use]
pub fn parse_lsusb(output: &str) -> Vec<String> {
    output
        .lines()
        .filter(|line| !line.contains("Linux Foundation"))
        // "Bus 001 Device 002: ID 0bda:8812 Realtek Semiconductor Corp. RTL8812AU"
        .filter_map(|line| line.splitn(7, ' ').nth(6))
        .map(|description| description.trim().to_string())
        .filter(|description| !description.is_empty())
        .collect()
}

/// # Errors
///
/// Returns the placeholder line when `lsusb` fails.
pub fn usb_lines<S: Shell + ?Sized>(shell: &S) -> Result<Vec<String>, &'static str> {
    let output = shell.run("lsusb", &[]).map_err(|e| {
        log::warn!("USB list unavailable: {e}");
        LSUSB_ERROR
    })?;
    let devices = parse_lsusb(&output);
    if devices.is_empty() {
        Ok(vec![NO_USB_DEVICES.to_string()])
    } else {
        Ok(devices)
    }
}

/// Parse `ufw status` into "port ACTION" lines.
#[must_use]
pub fn parse_ufw_status(output: &str) -> Vec<String> {
    const ACTIONS: [&str; 4] = ["ALLOW", "DENY", "LIMIT", "REJECT"];

    let mut lines = Vec::new();
    for line in output.lines() {
        let line = line.trim();
        if let Some(status) = line.strip_prefix("Status:") {
            if status.trim() != "active" {
                lines.push(format!("Status: {}", status.trim()));
            }
            continue;
        }

        let fields: Vec<&str> = line.split_whitespace().collect();
        let Some(action_at) = fields.iter().position(|f| ACTIONS.contains(f)) else {
            continue;
        };
        if action_at == 0 {
            continue;
        }
        lines.push(format!("{} {}", fields[..action_at].join(" "), fields[action_at]));
    }
    lines
}

pub fn firewall_lines<S: Shell + ?Sized>(shell: &S, ufw: &Path) -> Vec<String> {
    let program = ufw.to_string_lossy();
    match shell.run(&program, &["status"]) {
        Ok(output) => parse_ufw_status(&output),
        Err(e) => {
            log::warn!("Firewall status unavailable: {e}");
            vec!["Err: ufw error".to_string()]
        }
    }
}

/// Memory use in MB from `/proc/meminfo`: (used, total)
#[must_use]
pub fn parse_meminfo(meminfo: &str) -> Option<(u64, u64)> {
    let field = |name: &str| -> Option<u64> {
        meminfo
            .lines()
            .find_map(|line| line.strip_prefix(name))
            .and_then(|rest| rest.trim_start_matches(':').split_whitespace().next())
            .and_then(|kb| kb.parse().ok())
    };
    let total = field("MemTotal")?;
    let available = field("MemAvailable")?;
    Some((total.saturating_sub(available) / 1024, total / 1024))
}

/// Root filesystem use from `df -h /`: (used, size, percent)
#[must_use]
pub fn parse_df(output: &str) -> Option<(String, String, String)> {
    let line = output.lines().nth(1)?;
    let fields: Vec<&str> = line.split_whitespace().collect();
    match fields.as_slice() {
        [_, size, used, _, percent, ..] => Some((
            (*used).to_string(),
            (*size).to_string(),
            (*percent).to_string(),
        )),
        _ => None,
    }
}

/// Degrees C from a thermal zone reading; the kernel reports millidegrees.
#[must_use]
pub fn parse_temperature(raw: &str) -> Option<i64> {
    let value: i64 = raw.trim().parse().ok()?;
    Some(if value > 1000 { value / 1000 } else { value })
}

/// The status summary: address, load, memory, disk, temperature.
pub fn summary_lines<S: Shell + ?Sized>(shell: &S, thermal_zone: &Path) -> Vec<String> {
    let ip = shell
        .run("hostname", &["-I"])
        .ok()
        .and_then(|out| out.split_whitespace().next().map(ToString::to_string))
        .unwrap_or_else(|| UNKNOWN.to_string());

    let load = shell
        .read_to_string(Path::new(LOADAVG_FILE))
        .ok()
        .and_then(|s| s.split_whitespace().next().map(ToString::to_string))
        .unwrap_or_else(|| UNKNOWN.to_string());

    let memory = shell
        .read_to_string(Path::new(MEMINFO_FILE))
        .ok()
        .and_then(|s| parse_meminfo(&s))
        .map_or_else(
            || format!("Mem: {UNKNOWN}"),
            |(used, total)| {
                let percent = if total == 0 { 0 } else { used * 100 / total };
                format!("Mem: {used}/{total}MB {percent}%")
            },
        );

    let disk = shell
        .run("df", &["-h", "/"])
        .ok()
        .and_then(|out| parse_df(&out))
        .map_or_else(
            || format!("Disk: {UNKNOWN}"),
            |(used, size, percent)| format!("Disk: {used}/{size} {percent}"),
        );

    let temperature = shell
        .read_to_string(thermal_zone)
        .ok()
        .and_then(|s| parse_temperature(&s))
        .map_or_else(|| format!("CPU Temp: {UNKNOWN}"), |t| format!("CPU Temp: {t}C"));

    vec![
        format!("IP: {ip}"),
        format!("CPU Load: {load}"),
        memory,
        disk,
        temperature,
    ]
}

#[must_use]
pub fn hostname<S: Shell + ?Sized>(shell: &S) -> String {
    shell
        .read_to_string(Path::new(HOSTNAME_FILE))
        .map(|s| s.trim().to_string())
        .ok()
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| UNKNOWN.to_string())
}

/// Image version, with any "Release:" style prefix dropped.
#[must_use]
pub fn image_version<S: Shell + ?Sized>(shell: &S, path: &Path) -> String {
    let Ok(content) = shell.read_to_string(path) else {
        return UNKNOWN.to_string();
    };
    let line = content.lines().next().unwrap_or("").trim();
    let version = line.rsplit_once(':').map_or(line, |(_, v)| v).trim();
    if version.is_empty() {
        UNKNOWN.to_string()
    } else {
        version.to_string()
    }
}

pub fn version_lines<S: Shell + ?Sized>(shell: &S, image_version_file: &Path) -> Vec<String> {
    vec![
        "Menu version:".to_string(),
        env!("CARGO_PKG_VERSION").to_string(),
        format!("Image: {}", image_version(shell, image_version_file)),
        format!("Host: {}", hostname(shell)),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::FakeShell;

    const IP_ADDR: &str = "\
1: lo: <LOOPBACK,UP,LOWER_UP> mtu 65536 qdisc noqueue state UNKNOWN group default qlen 1000
    link/loopback 00:00:00:00:00:00 brd 00:00:00:00:00:00
    inet 127.0.0.1/8 scope host lo
2: eth0: <BROADCAST,MULTICAST,UP,LOWER_UP> mtu 1500 qdisc mq state UP group default qlen 1000
    link/ether 02:81:aa:bb:cc:dd brd ff:ff:ff:ff:ff:ff
    inet 192.168.1.23/24 brd 192.168.1.255 scope global dynamic eth0
    inet6 fe80::81:aaff:febb:ccdd/64 scope link
3: wlan0: <BROADCAST,MULTICAST,UP,LOWER_UP> mtu 1500 qdisc mq state UP group default qlen 1000
    link/ieee802.11/radiotap 00:c0:ca:11:22:33 brd ff:ff:ff:ff:ff:ff
4: eth0.10@eth0: <BROADCAST,MULTICAST> mtu 1500 qdisc noop state DOWN group default qlen 1000
    link/ether 02:81:aa:bb:cc:dd brd ff:ff:ff:ff:ff:ff
";

    #[test]
    fn parses_interfaces_and_first_ipv4() {
        let parsed = parse_ip_addr(IP_ADDR);
        assert_eq!(parsed.len(), 4);
        assert!(parsed[0].loopback);
        assert_eq!(parsed[1].name, "eth0");
        assert_eq!(parsed[1].ipv4.as_deref(), Some("192.168.1.23"));
        assert!(parsed[2].up);
        assert_eq!(parsed[2].ipv4, None);
        assert_eq!(parsed[3].name, "eth0.10");
        assert!(!parsed[3].up);
    }

    #[test]
    fn interface_lines_skip_down_and_loopback() {
        let shell = FakeShell::new()
            .with_output("ip addr show", IP_ADDR)
            .with_output("iw wlan0 info", "Interface wlan0\n\ttype monitor\n");
        assert_eq!(
            interface_lines(&shell).unwrap(),
            ["eth0: 192.168.1.23", "wlan0: (Mon mode)"]
        );
    }

    #[test]
    fn wlan_without_monitor_mode_has_no_address() {
        let shell = FakeShell::new()
            .with_output("ip addr show", IP_ADDR)
            .with_output("iw wlan0 info", "Interface wlan0\n\ttype managed\n");
        assert_eq!(interface_lines(&shell).unwrap()[1], "wlan0: No IP address");
    }

    #[test]
    fn interface_command_failure_is_one_placeholder_line() {
        let shell = FakeShell::new().with_failure("ip addr show");
        assert_eq!(interface_lines(&shell), Err(IP_ADDR_ERROR));
        assert_eq!(usb_lines(&FakeShell::new()), Err(LSUSB_ERROR));
    }

    #[test]
    fn interface_address_for_home_page() {
        let eth0 = "\
2: eth0: <BROADCAST,MULTICAST,UP,LOWER_UP> mtu 1500 qdisc mq state UP group default qlen 1000
    inet 192.168.1.23/24 brd 192.168.1.255 scope global dynamic eth0
";
        let shell = FakeShell::new().with_output("ip addr show dev eth0", eth0);
        assert_eq!(
            interface_address(&shell, "eth0").as_deref(),
            Some("192.168.1.23")
        );
        assert_eq!(interface_address(&FakeShell::new(), "eth0"), None);
    }

    #[test]
    fn parses_iw_dev() {
        let out = "\
phy#0
\tInterface wlan0
\t\tifindex 3
\t\taddr 00:c0:ca:11:22:33
\t\tssid Office
\t\ttype managed
\t\tchannel 36 (5180 MHz), width: 80 MHz, center1: 5210 MHz
phy#1
\tInterface wlan1
\t\ttype monitor
";
        let wlans = parse_iw_dev(out);
        assert_eq!(wlans.len(), 2);
        assert_eq!(wlans[0].ssid.as_deref(), Some("Office"));
        assert_eq!(wlans[0].channel.as_deref(), Some("36"));
        assert_eq!(wlans[1].mode.as_deref(), Some("monitor"));
        assert_eq!(wlans[1].ssid, None);

        let shell = FakeShell::new().with_output("iw dev", out);
        let pages = wlan_pages(&shell);
        assert_eq!(pages[1], ["wlan1: monitor", "Ch: -", "SSID: -"]);
    }

    #[test]
    fn lsusb_filters_root_hubs() {
        let out = "\
Bus 001 Device 002: ID 0bda:8812 Realtek Semiconductor Corp. RTL8812AU 802.11a/b/g/n/ac
Bus 001 Device 001: ID 1d6b:0002 Linux Foundation 2.0 root hub
";
        assert_eq!(
            parse_lsusb(out),
            ["Realtek Semiconductor Corp. RTL8812AU 802.11a/b/g/n/ac"]
        );
    }

    #[test]
    fn usb_with_only_hubs_reports_none() {
        let shell = FakeShell::new().with_output(
            "lsusb",
            "Bus 001 Device 001: ID 1d6b:0002 Linux Foundation 2.0 root hub\n",
        );
        assert_eq!(usb_lines(&shell).unwrap(), [NO_USB_DEVICES]);
    }

    #[test]
    fn ufw_rules_keep_port_and_action() {
        let out = "\
Status: active

To                         Action      From
--                         ------      ----
22/tcp                     ALLOW       Anywhere
8080                       LIMIT       192.168.1.0/24
22/tcp (v6)                ALLOW       Anywhere (v6)
";
        assert_eq!(
            parse_ufw_status(out),
            ["22/tcp ALLOW", "8080 LIMIT", "22/tcp (v6) ALLOW"]
        );
        assert_eq!(parse_ufw_status("Status: inactive\n"), ["Status: inactive"]);
    }

    #[test]
    fn meminfo_df_and_temperature() {
        let meminfo = "MemTotal:         999424 kB\nMemFree:  100 kB\nMemAvailable:     512000 kB\n";
        assert_eq!(parse_meminfo(meminfo), Some((476, 976)));
        assert_eq!(parse_meminfo("MemTotal: 1 kB\n"), None);

        let df = "Filesystem      Size  Used Avail Use% Mounted on\n/dev/root        29G  3.1G   25G  12% /\n";
        assert_eq!(
            parse_df(df),
            Some(("3.1G".to_string(), "29G".to_string(), "12%".to_string()))
        );

        assert_eq!(parse_temperature("48312\n"), Some(48));
        assert_eq!(parse_temperature("52"), Some(52));
        assert_eq!(parse_temperature("hot"), None);
    }

    #[test]
    fn summary_degrades_field_by_field() {
        let shell = FakeShell::new()
            .with_output("hostname -I", "10.0.0.5 fe80::1\n")
            .with_file(LOADAVG_FILE, "0.42 0.30 0.25 1/123 4567\n");
        let lines = summary_lines(&shell, Path::new("/nonexistent/temp"));
        assert_eq!(
            lines,
            [
                "IP: 10.0.0.5",
                "CPU Load: 0.42",
                "Mem: unknown",
                "Disk: unknown",
                "CPU Temp: unknown"
            ]
        );
    }

    #[test]
    fn version_lines_strip_release_prefix() {
        let shell = FakeShell::new()
            .with_file("/etc/wlanpiversion", "WLAN Pi Release: v1.9.0\n")
            .with_file(HOSTNAME_FILE, "wlanpi\n");
        let lines = version_lines(&shell, Path::new("/etc/wlanpiversion"));
        assert_eq!(lines[2], "Image: v1.9.0");
        assert_eq!(lines[3], "Host: wlanpi");
    }
}

//! Leaf actions
//!
//! Every menu leaf is bound to an `ActionId`. `dispatch` maps an id to what
//! it produces: content to show (re-gathered on every refresh tick) or a
//! system operation that reboots, powers off or switches mode.

use crate::config::Paths;
use crate::facts;
use crate::mode::Mode;
use crate::pager::{PagedTable, ScrollCursor, ScrollTable};
use crate::screen::Screen;
use crate::shell::{CommandError, Shell};
use chrono::{DateTime, Local, TimeZone};
use nanohat_ui::NavLabels;
use nanohat_ui::pages::{ClockPage, DialogPage};
use std::fmt;
use std::path::PathBuf;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ActionId {
    Interfaces,
    WlanInterfaces,
    UsbDevices,
    FirewallPorts,
    Summary,
    DateTime,
    Version,
    Reboot,
    Shutdown,
    /// Switch from classic into the given mode
    EnterMode(Mode),
    /// Switch from the given mode back to classic
    LeaveMode(Mode),
    /// Leave a confirmation gate; handled by the navigator
    Cancel,
}

impl ActionId {
    /// Actions with an irreversible side effect. Their pages are never
    /// refreshed, since refreshing would run them again.
    #[must_use]
    pub fn is_mutation(self) -> bool {
        matches!(
            self,
            ActionId::Reboot | ActionId::Shutdown | ActionId::EnterMode(_) | ActionId::LeaveMode(_)
        )
    }
}

/// What an informational action renders
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Content {
    Table(ScrollTable),
    Paged(PagedTable),
    Dialog(DialogPage),
    Clock(ClockPage),
}

impl Content {
    /// Build the screen, clamping the cursor against this content.
    pub fn render(&self, cursor: &mut ScrollCursor) -> Screen {
        match self {
            Content::Table(table) => Screen::Table(table.render(cursor)),
            Content::Paged(paged) => Screen::Table(paged.render(cursor)),
            Content::Dialog(dialog) => {
                cursor.clamp_to(0);
                Screen::Dialog(dialog.clone())
            }
            Content::Clock(clock) => {
                cursor.clamp_to(0);
                Screen::Clock(clock.clone())
            }
        }
    }
}

/// A state-changing system operation
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SystemOp {
    Reboot,
    PowerOff,
    /// Run a mode switcher script with "on"/"off", then reboot
    SwitchMode { switcher: PathBuf, arg: &'static str },
}

impl fmt::Display for SystemOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SystemOp::Reboot => write!(f, "reboot"),
            SystemOp::PowerOff => write!(f, "power off"),
            SystemOp::SwitchMode { switcher, arg } => {
                write!(f, "mode switch ({} {arg})", switcher.display())
            }
        }
    }
}

impl SystemOp {
    /// Dialog shown while the operation runs
    #[must_use]
    pub fn notice(&self) -> DialogPage {
        let lines: &[&str] = match self {
            SystemOp::Reboot => &["Rebooting..."],
            SystemOp::PowerOff => &["Shutting down..."],
            SystemOp::SwitchMode { .. } => &["Booting...", "(new mode)"],
        };
        DialogPage::new(lines, NavLabels::default())
    }

    /// Dialog shown if the operation returns an error
    #[must_use]
    pub fn failure(&self) -> DialogPage {
        let lines: &[&str] = match self {
            SystemOp::Reboot => &["Reboot failed"],
            SystemOp::PowerOff => &["Shutdown failed"],
            SystemOp::SwitchMode { .. } => &["Mode switch", "failed"],
        };
        DialogPage::new(lines, NavLabels::back_only("Back"))
    }

    /// Run the operation. On success the system is going down and the
    /// caller should not expect to do much more.
    ///
    /// # Errors
    /// Returns error if any of the commands fails or times out.
    pub fn perform<S: Shell + ?Sized>(&self, shell: &S) -> Result<(), CommandError> {
        match self {
            SystemOp::Reboot => shell.run("systemctl", &["reboot"]).map(drop),
            SystemOp::PowerOff => shell.run("systemctl", &["poweroff"]).map(drop),
            SystemOp::SwitchMode { switcher, arg } => {
                shell.run(&switcher.to_string_lossy(), &[*arg])?;
                shell.run("systemctl", &["reboot"]).map(drop)
            }
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    Show(Content),
    Mutate(SystemOp),
}

/// Resolve an action to its outcome, gathering facts as needed.
pub fn dispatch<S: Shell + ?Sized>(action: ActionId, shell: &S, paths: &Paths) -> Outcome {
    let content = match action {
        ActionId::Interfaces => list_table("--Interfaces--", facts::interface_lines(shell)),
        ActionId::WlanInterfaces => {
            Content::Paged(PagedTable::new("WLAN", facts::wlan_pages(shell)))
        }
        ActionId::UsbDevices => list_table("--USB Interfaces--", facts::usb_lines(shell)),
        ActionId::FirewallPorts => {
            if shell.exists(&paths.ufw) {
                Content::Paged(PagedTable::from_lines(
                    "UFW Ports",
                    facts::firewall_lines(shell, &paths.ufw),
                ))
            } else {
                Content::Dialog(DialogPage::new(
                    &["UFW not", "installed"],
                    NavLabels::back_only("Back"),
                ))
            }
        }
        ActionId::Summary => Content::Table(ScrollTable::new(
            None,
            facts::summary_lines(shell, &paths.thermal_zone),
        )),
        ActionId::DateTime => Content::Clock(clock_page(&Local::now())),
        ActionId::Version => Content::Table(ScrollTable::new(
            None,
            facts::version_lines(shell, &paths.image_version),
        )),
        ActionId::Reboot => return Outcome::Mutate(SystemOp::Reboot),
        ActionId::Shutdown => return Outcome::Mutate(SystemOp::PowerOff),
        ActionId::EnterMode(target) => return switch_mode(target, "on", shell, paths),
        ActionId::LeaveMode(current) => return switch_mode(current, "off", shell, paths),
        ActionId::Cancel => {
            log::warn!("Cancel dispatched as an action");
            Content::Dialog(DialogPage::new(&[], NavLabels::back_only("Back")))
        }
    };
    Outcome::Show(content)
}

/// A titled list, or the bare error line when the list couldn't be gathered.
fn list_table(title: &str, lines: Result<Vec<String>, &'static str>) -> Content {
    match lines {
        Ok(lines) => Content::Table(ScrollTable::new(Some(title), lines)),
        Err(placeholder) => {
            Content::Table(ScrollTable::new(None, vec![placeholder.to_string()]))
        }
    }
}

fn switch_mode<S: Shell + ?Sized>(
    mode: Mode,
    arg: &'static str,
    shell: &S,
    paths: &Paths,
) -> Outcome {
    match mode.switcher(paths) {
        Some(switcher) if shell.exists(switcher) => Outcome::Mutate(SystemOp::SwitchMode {
            switcher: switcher.to_path_buf(),
            arg,
        }),
        _ => {
            log::warn!("{} switcher not installed", mode.label());
            let first = format!("{} not", mode.label());
            Outcome::Show(Content::Dialog(DialogPage::new(
                &[first.as_str(), "available"],
                NavLabels::back_only("Back"),
            )))
        }
    }
}

/// Date and time as shown on the clock page
pub fn clock_page<Tz: TimeZone>(now: &DateTime<Tz>) -> ClockPage
where
    Tz::Offset: fmt::Display,
{
    ClockPage {
        weekday: now.format("%A").to_string(),
        date: now.format("%e %b %Y").to_string().trim().to_string(),
        time: now.format("%H:%M:%S").to_string(),
        zone: now.format("%Z").to_string(),
        nav: NavLabels::back_only("Back"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::FakeShell;
    use chrono::{FixedOffset, Utc};

    #[test]
    fn mutations_are_flagged() {
        assert!(ActionId::Reboot.is_mutation());
        assert!(ActionId::EnterMode(Mode::Hotspot).is_mutation());
        assert!(!ActionId::Summary.is_mutation());
        assert!(!ActionId::Cancel.is_mutation());
    }

    #[test]
    fn reboot_is_a_mutation_outcome() {
        let shell = FakeShell::new();
        assert_eq!(
            dispatch(ActionId::Reboot, &shell, &Paths::default()),
            Outcome::Mutate(SystemOp::Reboot)
        );
        // Dispatching alone must not run anything
        assert!(shell.calls().is_empty());
    }

    #[test]
    fn missing_switcher_shows_dialog() {
        let shell = FakeShell::new();
        let outcome = dispatch(
            ActionId::EnterMode(Mode::Wconsole),
            &shell,
            &Paths::default(),
        );
        let Outcome::Show(Content::Dialog(dialog)) = outcome else {
            panic!("expected dialog");
        };
        assert_eq!(dialog.lines, ["Wconsole not", "available"]);
        assert_eq!(dialog.nav.back, Some("Back"));
    }

    #[test]
    fn leaving_a_mode_switches_it_off() {
        let paths = Paths::default();
        let shell = FakeShell::new().with_path(&paths.hotspot_switcher);
        let outcome = dispatch(ActionId::LeaveMode(Mode::Hotspot), &shell, &paths);
        let Outcome::Mutate(op) = outcome else {
            panic!("expected mutation");
        };
        op.perform(&shell).unwrap();
        assert_eq!(
            shell.calls(),
            [
                "/etc/wlanpihotspot/hotspot_switcher off".to_string(),
                "systemctl reboot".to_string()
            ]
        );
    }

    #[test]
    fn failed_switch_does_not_reboot() {
        let paths = Paths::default();
        let shell = FakeShell::new().with_failure("/etc/wconsole/wconsole_switcher on");
        let op = SystemOp::SwitchMode {
            switcher: paths.wconsole_switcher.clone(),
            arg: "on",
        };
        assert!(op.perform(&shell).is_err());
        assert_eq!(shell.calls().len(), 1);
        assert_eq!(op.failure().lines, ["Mode switch", "failed"]);
    }

    #[test]
    fn missing_ufw_shows_dialog() {
        let shell = FakeShell::new();
        let outcome = dispatch(ActionId::FirewallPorts, &shell, &Paths::default());
        assert!(matches!(outcome, Outcome::Show(Content::Dialog(_))));
        assert!(shell.calls().is_empty());
    }

    #[test]
    fn interfaces_failure_renders_single_error_line() {
        let shell = FakeShell::new().with_failure("ip addr show");
        let Outcome::Show(content) = dispatch(ActionId::Interfaces, &shell, &Paths::default())
        else {
            panic!("expected content");
        };
        let Screen::Table(table) = content.render(&mut ScrollCursor::default()) else {
            panic!("expected table");
        };
        assert_eq!(table.title, None);
        assert_eq!(table.lines, ["Err: ip addr error"]);
        assert_eq!(table.nav.back, Some("Exit"));
    }

    #[test]
    fn usb_failure_renders_untitled_error_line() {
        let shell = FakeShell::new().with_failure("lsusb");
        let Outcome::Show(content) = dispatch(ActionId::UsbDevices, &shell, &Paths::default())
        else {
            panic!("expected content");
        };
        let Screen::Table(table) = content.render(&mut ScrollCursor::default()) else {
            panic!("expected table");
        };
        assert_eq!(table.title, None);
        assert_eq!(table.lines, ["Err: lsusb error"]);

        let shell = FakeShell::new().with_output(
            "lsusb",
            "Bus 001 Device 002: ID 0bda:8812 Realtek Semiconductor Corp. RTL8812AU\n",
        );
        let Outcome::Show(content) = dispatch(ActionId::UsbDevices, &shell, &Paths::default())
        else {
            panic!("expected content");
        };
        let Screen::Table(table) = content.render(&mut ScrollCursor::default()) else {
            panic!("expected table");
        };
        assert_eq!(table.title.as_deref(), Some("--USB Interfaces--"));
    }

    #[test]
    fn down_on_fixed_pages_keeps_cursor_at_top() {
        let now = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let content = Content::Clock(clock_page(&now));
        let mut cursor = ScrollCursor::default();
        content.render(&mut cursor);
        for _ in 0..5 {
            cursor.advance();
        }
        assert_eq!(cursor.position(), 0);

        let dialog = Content::Dialog(DialogPage::new(
            &["UFW not", "installed"],
            NavLabels::back_only("Back"),
        ));
        let mut cursor = ScrollCursor::default();
        cursor.advance();
        cursor.advance();
        dialog.render(&mut cursor);
        assert_eq!(cursor.position(), 0);
    }

    #[test]
    fn clock_page_formats_fields() {
        let offset = FixedOffset::east_opt(2 * 3600).unwrap();
        let now = offset.with_ymd_and_hms(2024, 3, 5, 14, 7, 9).unwrap();
        let page = clock_page(&now);
        assert_eq!(page.weekday, "Tuesday");
        assert_eq!(page.date, "5 Mar 2024");
        assert_eq!(page.time, "14:07:09");
        assert_eq!(page.zone, "+02:00");

        let utc = Utc.with_ymd_and_hms(2024, 12, 25, 0, 0, 0).unwrap();
        assert_eq!(clock_page(&utc).zone, "UTC");
    }
}

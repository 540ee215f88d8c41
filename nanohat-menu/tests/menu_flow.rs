//! End-to-end menu behaviour, driven through `App` with fake system and
//! panel.

use nanohat_menu::actions::ActionId;
use nanohat_menu::config::Paths;
use nanohat_menu::events::{Button, ButtonPress};
use nanohat_menu::navigator::View;
use nanohat_menu::test_utils::{FakeShell, RecordingSurface};
use nanohat_menu::{App, Config, Mode, Screen};
use std::time::{Duration, Instant};

type TestApp = App<RecordingSurface, FakeShell>;

fn config(screensaver_ticks: u32) -> Config {
    Config {
        screensaver_ticks,
        dialog_pause_ms: 0,
        ..Config::default()
    }
}

fn started(shell: FakeShell, screensaver_ticks: u32) -> TestApp {
    let mut app = App::new(RecordingSurface::default(), shell, config(screensaver_ticks));
    app.start();
    app
}

fn press_all(app: &mut TestApp, buttons: &[Button]) {
    for button in buttons {
        app.handle_press(ButtonPress::now(*button));
    }
}

fn last_menu(app: &TestApp) -> &nanohat_ui::pages::MenuPage {
    match app.surface().last() {
        Some(Screen::Menu(page)) => page,
        other => panic!("expected menu, got {other:?}"),
    }
}

#[test]
fn fresh_boot_shows_home_with_eth0() {
    let app = started(FakeShell::new(), 300);
    assert_eq!(app.mode(), Mode::Classic);

    let Some(Screen::Home(home)) = app.surface().last() else {
        panic!("expected home page");
    };
    assert_eq!(home.title, "Classic");
    assert_eq!(home.interface, "eth0");
    assert_eq!(home.address, "No IP address");
}

#[test]
fn home_shows_detected_address() {
    let shell = FakeShell::new().with_output(
        "ip addr show dev eth0",
        "2: eth0: <BROADCAST,MULTICAST,UP,LOWER_UP> mtu 1500 state UP\n    inet 10.1.2.3/24 scope global eth0\n",
    );
    let app = started(shell, 300);
    let Some(Screen::Home(home)) = app.surface().last() else {
        panic!("expected home page");
    };
    assert_eq!(home.address, "10.1.2.3");
}

#[test]
fn root_menu_has_three_entries_in_order() {
    let mut app = started(FakeShell::new(), 300);
    press_all(&mut app, &[Button::Select]);

    let names: Vec<&str> = app.menu().entries.iter().map(|n| n.name.as_str()).collect();
    assert_eq!(names, ["1.Network", "2.Status", "3.Actions"]);

    let page = last_menu(&app);
    assert_eq!(page.title, "[ Classic ]");
    assert_eq!(page.rows.len(), 3);
    assert!(page.rows[0].selected);
}

#[test]
fn confirmed_reboot_shows_dialog_then_reboots_once() {
    let shell = FakeShell::new().with_output("systemctl reboot", "");
    let mut app = started(shell, 300);

    // Home -> Actions -> Reboot -> Confirm
    press_all(
        &mut app,
        &[
            Button::Select,
            Button::Down,
            Button::Down,
            Button::Select,
            Button::Down,
            Button::Down,
            Button::Select,
            Button::Down,
            Button::Select,
        ],
    );

    let Some(Screen::Dialog(dialog)) = app.surface().last() else {
        panic!("expected reboot dialog");
    };
    assert_eq!(dialog.lines, ["Rebooting..."]);
    assert_eq!(app.surface().blanks(), 1);
    assert_eq!(app.shell().count("systemctl reboot"), 1);
    assert!(app.mutation_in_progress());

    // The device is going down: nothing else runs or draws
    let shown = app.surface().shown().len();
    press_all(&mut app, &[Button::Back, Button::Select]);
    app.tick(|| false);
    assert_eq!(app.surface().shown().len(), shown);
    assert_eq!(app.shell().count("systemctl reboot"), 1);
}

#[test]
fn cancel_in_gate_returns_to_actions() {
    let mut app = started(FakeShell::new(), 300);
    press_all(
        &mut app,
        &[
            Button::Select,
            Button::Down,
            Button::Down,
            Button::Select,
            Button::Down,
            Button::Down,
            Button::Select,
            Button::Select,
        ],
    );
    assert_eq!(app.navigator().path(), [2, 0]);
    assert_eq!(last_menu(&app).title, "[ 3.Actions ]");
    assert!(!app.mutation_in_progress());
    assert_eq!(app.shell().count("systemctl reboot"), 0);
}

#[test]
fn failing_interfaces_command_shows_single_error_line() {
    let shell = FakeShell::new().with_failure("ip addr show");
    let mut app = started(shell, 300);
    press_all(&mut app, &[Button::Select, Button::Select, Button::Select]);

    let Some(Screen::Table(table)) = app.surface().last() else {
        panic!("expected table");
    };
    assert_eq!(table.title, None);
    assert_eq!(table.lines, ["Err: ip addr error"]);
    assert_eq!(table.nav.back, Some("Exit"));
}

#[test]
fn page_round_trip_restores_path() {
    let mut app = started(FakeShell::new(), 300);
    press_all(
        &mut app,
        &[Button::Select, Button::Down, Button::Select, Button::Down],
    );
    let before = app.navigator().path().to_vec();
    assert_eq!(before, [1, 1]);

    press_all(&mut app, &[Button::Select]);
    assert!(matches!(
        app.navigator().view(),
        View::Page {
            action: ActionId::DateTime,
            ..
        }
    ));
    assert!(matches!(app.surface().last(), Some(Screen::Clock(_))));

    press_all(&mut app, &[Button::Back]);
    assert_eq!(app.navigator().view(), View::Menu);
    assert_eq!(app.navigator().path(), before);
}

#[test]
fn down_wraps_and_back_at_root_goes_home() {
    let mut app = started(FakeShell::new(), 300);
    press_all(
        &mut app,
        &[Button::Select, Button::Down, Button::Down, Button::Down],
    );
    assert_eq!(app.navigator().path(), [0]);

    press_all(&mut app, &[Button::Back]);
    assert_eq!(app.navigator().view(), View::Home);
    assert_eq!(app.navigator().path().len(), 1);
    assert!(matches!(app.surface().last(), Some(Screen::Home(_))));

    // Back on home is a no-op
    let shown = app.surface().shown().len();
    press_all(&mut app, &[Button::Back]);
    assert_eq!(app.surface().shown().len(), shown);
}

#[test]
fn usb_page_scrolls_and_clamps() {
    let lsusb: String = (1..=6)
        .map(|i| format!("Bus 001 Device 00{i}: ID 0bda:000{i} Device {i}\n"))
        .collect();
    let shell = FakeShell::new().with_output("lsusb", &lsusb);
    let mut app = started(shell, 300);
    press_all(
        &mut app,
        &[Button::Select, Button::Select, Button::Down, Button::Down, Button::Select],
    );

    for _ in 0..10 {
        press_all(&mut app, &[Button::Down]);
    }
    let Some(Screen::Table(table)) = app.surface().last() else {
        panic!("expected table");
    };
    // Title takes a row, so six devices scroll through a window of three
    assert_eq!(table.title.as_deref(), Some("--USB Interfaces--"));
    assert_eq!(table.lines, ["Device 4", "Device 5", "Device 6"]);
    assert_eq!(table.nav.down, None);
    assert_eq!(table.nav.next, Some("Up"));

    press_all(&mut app, &[Button::Select]);
    let Some(Screen::Table(table)) = app.surface().last() else {
        panic!("expected table");
    };
    assert_eq!(table.lines[0], "Device 3");
}

#[test]
fn informational_page_refreshes_each_tick() {
    let shell = FakeShell::new().with_output("lsusb", "");
    let mut app = started(shell, 300);
    press_all(
        &mut app,
        &[Button::Select, Button::Select, Button::Down, Button::Down, Button::Select],
    );
    assert_eq!(app.shell().count("lsusb"), 1);

    app.tick(|| false);
    app.tick(|| false);
    assert_eq!(app.shell().count("lsusb"), 3);

    // Gathered but not drawn when a press is already queued
    let shown = app.surface().shown().len();
    app.tick(|| true);
    assert_eq!(app.shell().count("lsusb"), 4);
    assert_eq!(app.surface().shown().len(), shown);
}

#[test]
fn idle_blanks_once_and_wake_consumes_press() {
    let mut app = started(FakeShell::new(), 2);
    press_all(&mut app, &[Button::Select]);

    app.tick(|| false);
    assert!(!app.is_blanked());
    app.tick(|| false);
    assert!(app.is_blanked());
    for _ in 0..5 {
        app.tick(|| false);
    }
    assert_eq!(app.surface().blanks(), 1);

    // First press only wakes the panel
    press_all(&mut app, &[Button::Down]);
    assert!(!app.is_blanked());
    assert_eq!(app.surface().wakes(), 1);
    assert_eq!(app.navigator().path(), [0]);
    assert!(matches!(app.surface().last(), Some(Screen::Menu(_))));

    press_all(&mut app, &[Button::Down]);
    assert_eq!(app.navigator().path(), [1]);
}

#[test]
fn input_resets_idle_countdown() {
    let mut app = started(FakeShell::new(), 3);
    for _ in 0..5 {
        app.tick(|| false);
        app.tick(|| false);
        press_all(&mut app, &[Button::Down]);
    }
    assert_eq!(app.surface().blanks(), 0);
}

#[test]
fn press_made_while_busy_is_dropped() {
    // A failing reboot keeps the handler busy for the dialog pause
    let shell = FakeShell::new().with_failure("systemctl reboot");
    let config = Config {
        dialog_pause_ms: 200,
        ..Config::default()
    };
    let mut app = App::new(RecordingSurface::default(), shell, config);
    app.start();
    press_all(
        &mut app,
        &[
            Button::Select,
            Button::Down,
            Button::Down,
            Button::Select,
            Button::Down,
            Button::Down,
            Button::Select,
            Button::Down,
        ],
    );

    let before = Instant::now();
    press_all(&mut app, &[Button::Select]);
    assert!(matches!(app.surface().last(), Some(Screen::Dialog(_))));

    // Made mid-pause, delivered afterwards
    app.handle_press(ButtonPress {
        button: Button::Back,
        at: before + Duration::from_millis(100),
    });
    assert!(matches!(app.navigator().view(), View::Page { .. }));

    press_all(&mut app, &[Button::Back]);
    assert_eq!(app.navigator().view(), View::Menu);
    assert_eq!(app.navigator().path(), [2, 2, 1]);
}

#[test]
fn wconsole_mode_builds_its_own_menu() {
    let paths = Paths::default();
    let shell = FakeShell::new()
        .with_path(&paths.wconsole_marker)
        .with_path(&paths.wconsole_switcher)
        .with_output("/etc/wconsole/wconsole_switcher off", "")
        .with_output("systemctl reboot", "");
    let mut app = started(shell, 300);
    assert_eq!(app.mode(), Mode::Wconsole);

    // Actions -> Classic Mode -> Confirm
    press_all(
        &mut app,
        &[
            Button::Select,
            Button::Down,
            Button::Down,
            Button::Select,
            Button::Select,
            Button::Down,
            Button::Select,
        ],
    );
    let Some(Screen::Dialog(dialog)) = app.surface().last() else {
        panic!("expected mode switch dialog");
    };
    assert_eq!(dialog.lines, ["Booting...", "(new mode)"]);
    let calls = app.shell().calls();
    let switched = calls
        .iter()
        .position(|c| c == "/etc/wconsole/wconsole_switcher off");
    let rebooted = calls.iter().position(|c| c == "systemctl reboot");
    assert!(switched.is_some());
    assert!(switched < rebooted);
    assert_eq!(app.shell().count("systemctl reboot"), 1);
}

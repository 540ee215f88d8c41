use crossbeam_channel::RecvTimeoutError;
use nanohat_menu::events::{AppEvent, Button, ButtonPress};
use nanohat_menu::{App, Config, Screen, Surface, SystemShell};
use nanohat_oled::common::Rotation;
use nanohat_oled::{Device, DeviceConfig, Key, OledResult};
use nanohat_ui::Page;
use nanohat_ui::pages::LogoPage;

/// The real panel behind the `Surface` seam
struct OledSurface {
    device: Device,
}

impl Surface for OledSurface {
    type Error = nanohat_oled::Error;

    fn show(&mut self, mut screen: Screen) -> OledResult<()> {
        screen.show(&mut self.device.display)?;
        self.device.display.update()
    }

    fn blank(&mut self) -> OledResult<()> {
        self.device.display_sleep()
    }

    fn wake(&mut self) -> OledResult<()> {
        self.device.display_wake()
    }
}

fn device_config(config: &Config) -> DeviceConfig {
    let display = &config.display;
    DeviceConfig {
        i2c_bus_path: Some(display.i2c_bus.clone()),
        i2c_address: Some(display.i2c_address),
        gpio_chip_path: Some(display.gpio_chip.clone()),
        k1_pin: Some(display.down_pin),
        k2_pin: Some(display.select_pin),
        k3_pin: Some(display.back_pin),
        keys_active_low: display.keys_active_low,
        rotation: Some(if display.upside_down {
            Rotation::UpsideDown
        } else {
            Rotation::Normal
        }),
    }
}

fn main() -> OledResult<()> {
    env_logger::init();

    let config = Config::load();

    // Create app event channel
    let (app_tx, app_rx) = crossbeam_channel::unbounded();

    // Set up signal handler - send shutdown event directly to the event loop
    let tx_for_signal = app_tx.clone();
    if let Err(e) = ctrlc::set_handler(move || {
        log::info!("Received Ctrl+C, shutting down...");
        let _ = tx_for_signal.send(AppEvent::Shutdown);
    }) {
        log::error!("Failed to set Ctrl-C handler: {e}");
        // Continue anyway - Ctrl-C won't work but the menu can still function
    }

    let (mut device, key_events) = Device::new(device_config(&config))?;
    device.display.set_contrast(config.display.contrast)?;

    LogoPage::new().show(&mut device.display)?;
    device.display.update()?;
    std::thread::sleep(config.boot_logo());

    // K1/K2/K3 are Down/Select/Back, left to right
    let tx_keys = app_tx.clone();
    std::thread::spawn(move || {
        for press in key_events {
            let button = match press.key {
                Key::K1 => Button::Down,
                Key::K2 => Button::Select,
                Key::K3 => Button::Back,
            };
            let event = AppEvent::Button(ButtonPress {
                button,
                at: press.at,
            });
            if tx_keys.send(event).is_err() {
                break;
            }
        }
    });

    let tick = config.tick_interval();
    let shell = SystemShell::new(config.command_timeout());
    let mut app = App::new(OledSurface { device }, shell, config);
    app.start();

    loop {
        match app_rx.recv_timeout(tick) {
            Ok(AppEvent::Button(press)) => app.handle_press(press),
            Ok(AppEvent::Shutdown) => break,
            Err(RecvTimeoutError::Timeout) => app.tick(|| !app_rx.is_empty()),
            Err(RecvTimeoutError::Disconnected) => {
                log::info!("Event channel disconnected, exiting event loop");
                break;
            }
        }
    }

    log::info!("Clearing display before exit");
    app.surface_mut().device.display.clear_panel()
}

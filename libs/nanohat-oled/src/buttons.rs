use crate::error::OledResult;
use crossbeam_channel::{Receiver, Sender};
use linux_embedded_hal::gpio_cdev::{Chip, EventRequestFlags, LineEventHandle, LineRequestFlags};
use std::time::{Duration, Instant};

/// Presses on the same key closer together than this are contact bounce.
const DEBOUNCE: Duration = Duration::from_millis(150);

/// The three keys on the hat, left to right.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    K1,
    K2,
    K3,
}

impl Key {
    fn consumer(self) -> &'static str {
        match self {
            Key::K1 => "nanohat-k1",
            Key::K2 => "nanohat-k2",
            Key::K3 => "nanohat-k3",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KeyPress {
    pub key: Key,
    pub at: Instant,
}

#[derive(Clone, Copy, Debug)]
pub struct KeyPins {
    pub k1: u32,
    pub k2: u32,
    pub k3: u32,
}

/// Owns one watcher thread per key line; presses arrive on a shared channel.
pub struct Buttons {
    _watchers: Vec<std::thread::JoinHandle<()>>,
}

impl Buttons {
    pub fn new(
        chip: &mut Chip,
        pins: KeyPins,
        active_low: bool,
    ) -> OledResult<(Self, Receiver<KeyPress>)> {
        let (event_tx, event_rx) = crossbeam_channel::unbounded();
        let mut watchers = Vec::with_capacity(3);

        for (key, pin) in [(Key::K1, pins.k1), (Key::K2, pins.k2), (Key::K3, pins.k3)] {
            let (flags, edge) = if active_low {
                (
                    LineRequestFlags::INPUT | LineRequestFlags::ACTIVE_LOW,
                    EventRequestFlags::FALLING_EDGE,
                )
            } else {
                (LineRequestFlags::INPUT, EventRequestFlags::RISING_EDGE)
            };
            let events = chip.get_line(pin)?.events(flags, edge, key.consumer())?;
            log::debug!("Watching {key:?} on GPIO line {pin}");
            watchers.push(spawn_watcher(key, events, event_tx.clone()));
        }

        Ok((
            Self {
                _watchers: watchers,
            },
            event_rx,
        ))
    }
}

fn spawn_watcher(
    key: Key,
    events: LineEventHandle,
    event_tx: Sender<KeyPress>,
) -> std::thread::JoinHandle<()> {
    std::thread::spawn(move || {
        let mut last_press: Option<Instant> = None;
        for event in events {
            if let Err(e) = event {
                log::error!("Error reading {key:?} edge event: {e}");
                continue;
            }
            let now = Instant::now();
            if last_press.is_some_and(|last| now.duration_since(last) < DEBOUNCE) {
                log::trace!("{key:?} bounce ignored");
                continue;
            }
            last_press = Some(now);
            if event_tx.send(KeyPress { key, at: now }).is_err() {
                log::debug!("Key channel closed, {key:?} watcher exiting");
                return;
            }
        }
    })
}

//! The menu application
//!
//! `App` owns all mutable state and is driven from a single thread by two
//! entry points: `handle_press` for each key press taken off the event
//! channel, and `tick` when the channel stays quiet for a tick interval.
//! Neither can run while the other is running, so no locking is needed.

use crate::actions::{self, ActionId, Outcome, SystemOp};
use crate::config::Config;
use crate::events::ButtonPress;
use crate::facts;
use crate::idle::IdleCountdown;
use crate::input::InputGate;
use crate::menu::Menu;
use crate::mode::Mode;
use crate::navigator::{Effect, Navigator, View};
use crate::pager::ScrollCursor;
use crate::screen::{Screen, Surface};
use crate::shell::Shell;
use nanohat_ui::NavLabels;
use nanohat_ui::pages::HomePage;
use std::time::Instant;

pub struct App<S: Surface, H: Shell> {
    surface: S,
    shell: H,
    config: Config,
    mode: Mode,
    menu: Menu,
    nav: Navigator,
    idle: IdleCountdown,
    gate: InputGate,
    blanked: bool,
    /// Set once a reboot/poweroff/mode switch is under way
    mutating: bool,
    /// Screen of a page that must not be re-gathered on refresh
    held: Option<Screen>,
}

impl<S: Surface, H: Shell> App<S, H> {
    /// Detect the mode and build its menu. Nothing is drawn until `start`.
    pub fn new(surface: S, shell: H, config: Config) -> Self {
        let mode = Mode::detect(&shell, &config.paths);
        let menu = Menu::for_mode(mode);
        let idle = IdleCountdown::new(config.screensaver_ticks);

        Self {
            surface,
            shell,
            config,
            mode,
            menu,
            nav: Navigator::new(),
            idle,
            gate: InputGate::new(),
            blanked: false,
            mutating: false,
            held: None,
        }
    }

    /// Draw the home view.
    pub fn start(&mut self) {
        log::info!("Starting menu in {} mode", self.mode.label());
        self.render();
    }

    pub fn handle_press(&mut self, press: ButtonPress) {
        if self.mutating {
            log::debug!("System operation in progress, ignoring {:?}", press.button);
            return;
        }
        if !self.gate.admit(press.at) {
            log::debug!("Dropping {:?} pressed while busy", press.button);
            return;
        }

        let started = Instant::now();
        self.idle.reset();

        if self.blanked {
            // The press that wakes the panel does nothing else
            log::info!("Screensaver off");
            self.wake();
        } else {
            match self.nav.handle(&self.menu, press.button) {
                Effect::Render => self.render(),
                Effect::Run(action) => self.run(action),
                Effect::Ignored => {}
            }
        }

        self.gate.record(started, Instant::now());
    }

    /// One quiet tick of the event loop: refresh the current view and count
    /// down to the screensaver.
    ///
    /// `input_pending` is asked after the facts are gathered; if a press is
    /// queued by then the refreshed screen is discarded, since that press is
    /// about to change the view.
    pub fn tick(&mut self, input_pending: impl Fn() -> bool) {
        if self.mutating || self.blanked {
            return;
        }

        if self.held.is_none() {
            let screen = self.compose();
            if input_pending() {
                log::debug!("Input pending, discarding refresh");
            } else {
                self.show(screen);
            }
        }

        if self.idle.tick() {
            log::info!("Screensaver on");
            self.blank();
        }
    }

    #[must_use]
    pub fn mode(&self) -> Mode {
        self.mode
    }

    #[must_use]
    pub fn menu(&self) -> &Menu {
        &self.menu
    }

    #[must_use]
    pub fn navigator(&self) -> &Navigator {
        &self.nav
    }

    #[must_use]
    pub fn is_blanked(&self) -> bool {
        self.blanked
    }

    #[must_use]
    pub fn mutation_in_progress(&self) -> bool {
        self.mutating
    }

    #[must_use]
    pub fn surface(&self) -> &S {
        &self.surface
    }

    #[must_use]
    pub fn shell(&self) -> &H {
        &self.shell
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// Redraw after navigation.
    fn render(&mut self) {
        if !matches!(self.nav.view(), View::Page { .. }) {
            self.held = None;
        }
        let screen = match &self.held {
            Some(held) => held.clone(),
            None => self.compose(),
        };
        self.show(screen);
    }

    /// Gather and build the screen for the current view.
    fn compose(&mut self) -> Screen {
        match self.nav.view() {
            View::Home => Screen::Home(self.home_page()),
            View::Menu => Screen::Menu(self.nav.menu_page(&self.menu)),
            View::Page { action, .. } => {
                match actions::dispatch(action, &self.shell, &self.config.paths) {
                    Outcome::Show(content) => {
                        let mut fallback = ScrollCursor::default();
                        let cursor = self.nav.cursor_mut().unwrap_or(&mut fallback);
                        content.render(cursor)
                    }
                    // Mutations are held after their first run and never
                    // get here; show the menu rather than run one twice
                    Outcome::Mutate(op) => {
                        log::error!("Refusing to repeat {op}");
                        Screen::Menu(self.nav.menu_page(&self.menu))
                    }
                }
            }
        }
    }

    /// First run of a freshly selected leaf.
    fn run(&mut self, action: ActionId) {
        log::debug!("Running {action:?}");
        self.held = None;

        match actions::dispatch(action, &self.shell, &self.config.paths) {
            Outcome::Show(content) => {
                let mut fallback = ScrollCursor::default();
                let cursor = self.nav.cursor_mut().unwrap_or(&mut fallback);
                let screen = content.render(cursor);
                if action.is_mutation() {
                    self.held = Some(screen.clone());
                }
                self.show(screen);
            }
            Outcome::Mutate(op) => self.mutate(&op),
        }
    }

    fn mutate(&mut self, op: &SystemOp) {
        log::info!("Starting {op}");
        self.mutating = true;

        self.show(Screen::Dialog(op.notice()));
        std::thread::sleep(self.config.dialog_pause());
        self.blank();

        match op.perform(&self.shell) {
            Ok(()) => log::info!("{op} under way, waiting for the system to go down"),
            Err(e) => {
                log::error!("{op} failed: {e}");
                self.mutating = false;
                self.wake_panel();
                let failure = Screen::Dialog(op.failure());
                self.held = Some(failure.clone());
                self.show(failure);
            }
        }
    }

    fn home_page(&self) -> HomePage {
        let interface = self.mode.home_interface();
        HomePage {
            title: self.mode.label().to_string(),
            hostname: facts::hostname(&self.shell),
            interface: interface.to_string(),
            address: facts::interface_address(&self.shell, interface)
                .unwrap_or_else(|| facts::NO_ADDRESS.to_string()),
            nav: NavLabels {
                next: Some("Menu"),
                ..NavLabels::default()
            },
        }
    }

    fn show(&mut self, screen: Screen) {
        if let Err(e) = self.surface.show(screen) {
            log::error!("Failed to draw: {e}");
        }
    }

    fn blank(&mut self) {
        if let Err(e) = self.surface.blank() {
            log::error!("Failed to blank display: {e}");
        }
        self.blanked = true;
    }

    fn wake_panel(&mut self) {
        if let Err(e) = self.surface.wake() {
            log::error!("Failed to wake display: {e}");
        }
        self.blanked = false;
    }

    fn wake(&mut self) {
        self.wake_panel();
        self.render();
    }
}

//! In-memory stand-ins for the system and the panel, for driving `App`
//! without hardware.

use crate::screen::{Screen, Surface};
use crate::shell::{CommandError, Shell};
use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::convert::Infallible;
use std::io;
use std::path::{Path, PathBuf};

/// Shell with canned command output and files.
///
/// Commands are keyed by their full command line ("ip addr show"). Anything
/// not configured fails as if the program were not installed.
#[derive(Debug, Default)]
pub struct FakeShell {
    outputs: HashMap<String, Result<String, String>>,
    files: HashMap<PathBuf, String>,
    paths: HashSet<PathBuf>,
    calls: RefCell<Vec<String>>,
}

impl FakeShell {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_output(mut self, command: &str, stdout: &str) -> Self {
        self.outputs
            .insert(command.to_string(), Ok(stdout.to_string()));
        self
    }

    /// Make `command` exit non-zero.
    #[must_use]
    pub fn with_failure(mut self, command: &str) -> Self {
        self.outputs
            .insert(command.to_string(), Err(format!("{command}: failed")));
        self
    }

    #[must_use]
    pub fn with_file(mut self, path: impl AsRef<Path>, content: &str) -> Self {
        self.files
            .insert(path.as_ref().to_path_buf(), content.to_string());
        self
    }

    /// Make `path` exist without content (markers, scripts).
    #[must_use]
    pub fn with_path(mut self, path: impl AsRef<Path>) -> Self {
        self.paths.insert(path.as_ref().to_path_buf());
        self
    }

    /// Every command line run so far, in order
    #[must_use]
    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    #[must_use]
    pub fn count(&self, command: &str) -> usize {
        self.calls.borrow().iter().filter(|c| *c == command).count()
    }
}

impl Shell for FakeShell {
    fn run(&self, program: &str, args: &[&str]) -> Result<String, CommandError> {
        let command = std::iter::once(program)
            .chain(args.iter().copied())
            .collect::<Vec<_>>()
            .join(" ");
        self.calls.borrow_mut().push(command.clone());

        match self.outputs.get(&command) {
            Some(Ok(stdout)) => Ok(stdout.clone()),
            Some(Err(stderr)) => Err(CommandError::Failed {
                program: program.to_string(),
                stderr: stderr.clone(),
            }),
            None => Err(CommandError::Spawn {
                program: program.to_string(),
                source: io::Error::from(io::ErrorKind::NotFound),
            }),
        }
    }

    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        self.files
            .get(path)
            .cloned()
            .ok_or_else(|| io::Error::from(io::ErrorKind::NotFound))
    }

    fn exists(&self, path: &Path) -> bool {
        self.paths.contains(path) || self.files.contains_key(path)
    }
}

/// Surface that keeps every screen it is asked to show.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    shown: Vec<Screen>,
    blanks: usize,
    wakes: usize,
    off: bool,
}

impl RecordingSurface {
    #[must_use]
    pub fn shown(&self) -> &[Screen] {
        &self.shown
    }

    #[must_use]
    pub fn last(&self) -> Option<&Screen> {
        self.shown.last()
    }

    #[must_use]
    pub fn blanks(&self) -> usize {
        self.blanks
    }

    #[must_use]
    pub fn wakes(&self) -> usize {
        self.wakes
    }

    /// Whether the panel is currently off
    #[must_use]
    pub fn is_off(&self) -> bool {
        self.off
    }
}

impl Surface for RecordingSurface {
    type Error = Infallible;

    fn show(&mut self, screen: Screen) -> Result<(), Self::Error> {
        self.shown.push(screen);
        Ok(())
    }

    fn blank(&mut self) -> Result<(), Self::Error> {
        self.blanks += 1;
        self.off = true;
        Ok(())
    }

    fn wake(&mut self) -> Result<(), Self::Error> {
        self.wakes += 1;
        self.off = false;
        Ok(())
    }
}

//! External command and filesystem access
//!
//! Every fact the menu shows comes from a command, a file under `/proc` or
//! `/sys`, or the presence of a marker file. All of it goes through the
//! `Shell` trait so the pages can be exercised without a device.

use crossbeam_channel::Receiver;
use std::io::{self, Read};
use std::os::unix::process::CommandExt;
use std::path::Path;
use std::process::{Child, Command, Output, Stdio};
use std::time::{Duration, Instant};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CommandError {
    #[error("Failed to run {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },
    #[error("{program} failed: {stderr}")]
    Failed { program: String, stderr: String },
    #[error("{program} timed out after {}s", .timeout.as_secs())]
    TimedOut { program: String, timeout: Duration },
}

pub trait Shell {
    /// Run a command to completion and return its stdout.
    ///
    /// # Errors
    /// Returns error if the command can't be started, exits non-zero, or
    /// doesn't finish in time.
    fn run(&self, program: &str, args: &[&str]) -> Result<String, CommandError>;

    /// # Errors
    /// Returns error if the file can't be read.
    fn read_to_string(&self, path: &Path) -> io::Result<String>;

    fn exists(&self, path: &Path) -> bool;
}

/// The real system, with a timeout on every command.
pub struct SystemShell {
    timeout: Duration,
}

impl SystemShell {
    #[must_use]
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }
}

impl Shell for SystemShell {
    fn run(&self, program: &str, args: &[&str]) -> Result<String, CommandError> {
        let output = run_with_timeout(program, args, self.timeout)?;

        if !output.status.success() {
            return Err(CommandError::Failed {
                program: program.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        std::fs::read_to_string(path)
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }
}

const POLL_INTERVAL: Duration = Duration::from_millis(10);
/// How long output is still collected after the command exits. Anything it
/// left running in the background may hold the pipes open indefinitely.
const DRAIN_GRACE: Duration = Duration::from_millis(50);

/// Run a command, killing it and its process group if it outlives `timeout`.
///
/// Completion is decided by the command's own exit, not by its pipes
/// closing.
fn run_with_timeout(
    program: &str,
    args: &[&str],
    timeout: Duration,
) -> Result<Output, CommandError> {
    let spawn_error = |source| CommandError::Spawn {
        program: program.to_string(),
        source,
    };
    let mut child = Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .process_group(0)
        .spawn()
        .map_err(spawn_error)?;
    let stdout = child.stdout.take().map(forward_pipe);
    let stderr = child.stderr.take().map(forward_pipe);

    let deadline = Instant::now() + timeout;
    let status = loop {
        if let Some(status) = child.try_wait().map_err(spawn_error)? {
            break status;
        }
        if Instant::now() >= deadline {
            log::warn!("{program} still running after {timeout:?}, killing it");
            kill_group(&mut child);
            return Err(CommandError::TimedOut {
                program: program.to_string(),
                timeout,
            });
        }
        std::thread::sleep(POLL_INTERVAL);
    };

    Ok(Output {
        status,
        stdout: drain(stdout),
        stderr: drain(stderr),
    })
}

/// Kill a running child and everything in its process group, then reap it.
fn kill_group(child: &mut Child) {
    // SAFETY: the child has not been reaped yet, so its pid, which is also
    // its process group id, still names it and cannot have been reused.
    let rc = unsafe { libc::killpg(child.id().cast_signed(), libc::SIGKILL) };
    if rc != 0 {
        log::warn!("killpg failed: {}", io::Error::last_os_error());
        if let Err(e) = child.kill() {
            log::warn!("kill failed: {e}");
        }
    }
    if let Err(e) = child.wait() {
        log::warn!("Failed to reap killed child: {e}");
    }
}

/// Read a pipe on its own thread, forwarding chunks as they arrive.
fn forward_pipe(mut pipe: impl Read + Send + 'static) -> Receiver<Vec<u8>> {
    let (tx, rx) = crossbeam_channel::unbounded();
    std::thread::spawn(move || {
        let mut buf = [0u8; 4096];
        loop {
            match pipe.read(&mut buf) {
                Ok(0) | Err(_) => break,
                Ok(n) => {
                    if tx.send(buf[..n].to_vec()).is_err() {
                        break;
                    }
                }
            }
        }
    });
    rx
}

/// Collect forwarded output until the pipe closes or the grace period ends.
fn drain(chunks: Option<Receiver<Vec<u8>>>) -> Vec<u8> {
    let mut out = Vec::new();
    let Some(chunks) = chunks else {
        return out;
    };
    let deadline = Instant::now() + DRAIN_GRACE;
    while let Ok(chunk) = chunks.recv_deadline(deadline) {
        out.extend_from_slice(&chunk);
    }
    out
}

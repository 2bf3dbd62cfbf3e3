use std::env;
use std::fmt;

use crate::error::ShellError;

/// Outcome of the most recently completed foreground command. Exactly one
/// of the two variants applies; a command either exited or was signaled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LastStatus {
    Exited(i32),
    Signaled(i32),
}

impl fmt::Display for LastStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LastStatus::Exited(code) => write!(f, "exit value {}", code),
            LastStatus::Signaled(signal) => write!(f, "terminated by signal {}", signal),
        }
    }
}

/// Process-wide shell state, threaded by reference into every component
/// that needs it. Only the main loop mutates it; the signal handler side
/// keeps to its own atomics (see `process::signal`).
pub struct ShellState {
    /// Logical working directory. The shell never changes its own OS cwd;
    /// this value is handed to children at spawn time.
    pub current_dir: String,
    /// Unset until the first foreground command completes.
    pub last_status: Option<LastStatus>,
    /// Live background pids in spawn order. Never contains a pid that has
    /// already been reaped and reported.
    pub background: Vec<i32>,
    /// While set, the `&` marker on commands is ignored.
    pub foreground_only: bool,
    /// Concurrently running children, guarded by the fork ceiling.
    pub active_children: usize,
    /// Set by the exit builtin; the loop stops after the iteration.
    pub exit_requested: bool,
}

impl ShellState {
    pub fn new() -> Result<Self, ShellError> {
        let current_dir = env::current_dir()?.to_string_lossy().to_string();
        Ok(ShellState {
            current_dir,
            last_status: None,
            background: Vec::new(),
            foreground_only: false,
            active_children: 0,
            exit_requested: false,
        })
    }
}

use super::{Builtin, CommandError};
use crate::command::Command;
use crate::core::state::ShellState;

/// `exit`. Sends SIGTERM to every tracked background process and tells the
/// loop to stop after this iteration. Does not wait for the children to
/// actually die; the shell process is about to go away with them.
pub struct ExitCommand;

impl Default for ExitCommand {
    fn default() -> Self {
        Self::new()
    }
}

impl ExitCommand {
    pub fn new() -> Self {
        Self
    }
}

impl Builtin for ExitCommand {
    fn run(&self, _cmd: &Command, state: &mut ShellState) -> Result<i32, CommandError> {
        state.exit_requested = true;

        for &pid in &state.background {
            let result = unsafe { libc::kill(pid, libc::SIGTERM) };
            if result < 0 {
                return Err(CommandError::ExecutionError(format!(
                    "exit: failed to signal background pid {}",
                    pid
                )));
            }
        }
        Ok(0)
    }
}

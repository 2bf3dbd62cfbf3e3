use super::{Builtin, CommandError};
use crate::command::Command;
use crate::core::state::ShellState;

/// `status`. Reports the exit value or terminating signal of the most
/// recent foreground command. Prints nothing before the first one.
pub struct StatusCommand;

impl Default for StatusCommand {
    fn default() -> Self {
        Self::new()
    }
}

impl StatusCommand {
    pub fn new() -> Self {
        Self
    }
}

impl Builtin for StatusCommand {
    fn run(&self, _cmd: &Command, state: &mut ShellState) -> Result<i32, CommandError> {
        if let Some(status) = &state.last_status {
            println!("{}", status);
        }
        Ok(0)
    }
}

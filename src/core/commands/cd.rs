use std::path::{Path, PathBuf};

use super::{Builtin, CommandError};
use crate::command::Command;
use crate::core::state::ShellState;

/// `cd [path]`. Updates the shell's logical working directory only; the
/// OS-level cwd of the shell process is never touched. Children pick the
/// logical directory up at spawn time.
pub struct CdCommand;

impl Default for CdCommand {
    fn default() -> Self {
        Self::new()
    }
}

impl CdCommand {
    pub fn new() -> Self {
        Self
    }
}

impl Builtin for CdCommand {
    fn run(&self, cmd: &Command, state: &mut ShellState) -> Result<i32, CommandError> {
        let Some(arg) = cmd.args.get(1) else {
            let home = dirs::home_dir().ok_or(CommandError::HomeDirNotFound)?;
            state.current_dir = home.to_string_lossy().to_string();
            return Ok(0);
        };

        let absolute = arg.starts_with('/');
        let candidate: PathBuf = if absolute {
            PathBuf::from(arg)
        } else {
            Path::new(&state.current_dir).join(arg)
        };

        if !candidate.is_dir() {
            return Err(CommandError::ExecutionError(format!(
                "cd: {}: no such directory",
                arg
            )));
        }

        if absolute {
            state.current_dir = arg.clone();
        } else {
            state.current_dir = format!("{}/{}", state.current_dir, arg);
        }
        Ok(0)
    }
}

use std::collections::BTreeMap;

mod cd;
mod exit;
mod status;

pub use cd::CdCommand;
pub use exit::ExitCommand;
pub use status::StatusCommand;

use crate::command::Command;
use crate::core::state::{LastStatus, ShellState};

/// Commands implemented inside the shell rather than by spawning a child.
pub const BUILTIN_NAMES: [&str; 3] = ["exit", "cd", "status"];

pub fn is_builtin(name: &str) -> bool {
    BUILTIN_NAMES.contains(&name)
}

#[derive(Debug)]
pub enum CommandError {
    InvalidArguments(String),
    ExecutionError(String),
    HomeDirNotFound,
    IoError(std::io::Error),
}

impl std::fmt::Display for CommandError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CommandError::InvalidArguments(msg) => write!(f, "invalid arguments: {}", msg),
            CommandError::ExecutionError(msg) => write!(f, "{}", msg),
            CommandError::HomeDirNotFound => write!(f, "cd: home directory not found"),
            CommandError::IoError(err) => write!(f, "IO error: {}", err),
        }
    }
}

impl From<std::io::Error> for CommandError {
    fn from(err: std::io::Error) -> Self {
        CommandError::IoError(err)
    }
}

pub trait Builtin {
    fn run(&self, cmd: &Command, state: &mut ShellState) -> Result<i32, CommandError>;
}

enum BuiltinKind {
    Cd(CdCommand),
    Exit(ExitCommand),
    Status(StatusCommand),
}

impl Builtin for BuiltinKind {
    fn run(&self, cmd: &Command, state: &mut ShellState) -> Result<i32, CommandError> {
        match self {
            BuiltinKind::Cd(builtin) => builtin.run(cmd, state),
            BuiltinKind::Exit(builtin) => builtin.run(cmd, state),
            BuiltinKind::Status(builtin) => builtin.run(cmd, state),
        }
    }
}

pub struct BuiltinDispatcher {
    commands: BTreeMap<&'static str, BuiltinKind>,
}

impl Default for BuiltinDispatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl BuiltinDispatcher {
    pub fn new() -> Self {
        let mut commands = BTreeMap::new();
        commands.insert("cd", BuiltinKind::Cd(CdCommand::new()));
        commands.insert("exit", BuiltinKind::Exit(ExitCommand::new()));
        commands.insert("status", BuiltinKind::Status(StatusCommand::new()));
        BuiltinDispatcher { commands }
    }

    /// Runs the builtin named by the command. Every builtin records its own
    /// exit code (never a signal) into the last status, except `status`
    /// itself, which reports without mutating. Failures cost one stderr
    /// line and an exit code of 1; the loop continues either way.
    pub fn dispatch(&self, cmd: &Command, state: &mut ShellState) {
        let Some(builtin) = self.commands.get(cmd.name.as_str()) else {
            return;
        };

        let code = match builtin.run(cmd, state) {
            Ok(code) => code,
            Err(err) => {
                eprintln!("{}", err);
                1
            }
        };

        if cmd.name != "status" {
            state.last_status = Some(LastStatus::Exited(code));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> ShellState {
        ShellState::new().expect("state should initialize")
    }

    fn command(line: &str) -> Command {
        Command::parse(line, std::process::id()).expect("command should parse")
    }

    #[test]
    fn test_builtin_name_set() {
        assert!(is_builtin("exit"));
        assert!(is_builtin("cd"));
        assert!(is_builtin("status"));
        assert!(!is_builtin("ls"));
        assert!(!is_builtin(""));
    }

    #[test]
    fn test_dispatch_records_exit_code() {
        let mut state = state();
        BuiltinDispatcher::new().dispatch(&command("cd /tmp"), &mut state);
        assert_eq!(state.last_status, Some(LastStatus::Exited(0)));
    }

    #[test]
    fn test_dispatch_failure_records_one() {
        let mut state = state();
        let dispatcher = BuiltinDispatcher::new();
        dispatcher.dispatch(&command("cd /no/such/directory/anywhere"), &mut state);
        assert_eq!(state.last_status, Some(LastStatus::Exited(1)));
    }

    #[test]
    fn test_status_does_not_mutate() {
        let mut state = state();
        state.last_status = Some(LastStatus::Signaled(11));
        BuiltinDispatcher::new().dispatch(&command("status"), &mut state);
        assert_eq!(state.last_status, Some(LastStatus::Signaled(11)));
    }

    #[test]
    fn test_repeated_status_after_builtin_reports_zero() {
        let mut state = state();
        let dispatcher = BuiltinDispatcher::new();
        dispatcher.dispatch(&command("cd /tmp"), &mut state);
        dispatcher.dispatch(&command("status"), &mut state);
        dispatcher.dispatch(&command("status"), &mut state);
        assert_eq!(state.last_status, Some(LastStatus::Exited(0)));
    }
}

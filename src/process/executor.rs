use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::os::unix::fs::OpenOptionsExt;
use std::os::unix::process::{CommandExt, ExitStatusExt};
use std::process::{Command as ChildCommand, Stdio};

use super::ProcessError;
use crate::command::Command;
use crate::core::state::{LastStatus, ShellState};

/// Hard cap on concurrently running children. Exceeding it means runaway
/// forking, and the only safe response is to take the whole shell down.
const FORK_CEILING: usize = 50;

const NULL_DEVICE: &str = "/dev/null";

/// Spawns non-builtin commands as child processes, wiring up redirection
/// and the foreground/background wait discipline.
pub struct ProcessExecutor;

impl Default for ProcessExecutor {
    fn default() -> Self {
        Self::new()
    }
}

impl ProcessExecutor {
    pub fn new() -> Self {
        Self
    }

    /// Runs one external command. User-level failures (bad redirect target,
    /// unknown command) cost a stderr line and a recorded exit value of 1;
    /// only wait/flush failures on our own side bubble up as errors.
    pub fn execute(&self, cmd: &Command, state: &mut ShellState) -> Result<(), ProcessError> {
        if state.active_children > FORK_CEILING {
            eprintln!("venule: concurrent process limit exceeded, aborting");
            std::process::abort();
        }

        let mut child = ChildCommand::new(&cmd.name);
        child.args(&cmd.args[1..]).current_dir(&state.current_dir);

        if !self.wire_redirection(&mut child, cmd, state) {
            return Ok(());
        }

        if !cmd.background {
            // The shell ignores SIGINT and background children inherit that
            // across exec; foreground children get the default back so they
            // can be interrupted from the terminal.
            unsafe {
                child.pre_exec(restore_default_sigint);
            }
        }

        state.active_children += 1;
        let mut running = match child.spawn() {
            Ok(running) => running,
            Err(err) => {
                state.active_children -= 1;
                eprintln!("{}: {}", cmd.name, err);
                if !cmd.background {
                    state.last_status = Some(LastStatus::Exited(1));
                }
                return Ok(());
            }
        };

        if cmd.background {
            let pid = running.id() as i32;
            println!("background pid is {}", pid);
            state.background.push(pid);
            return Ok(());
        }

        io::stdout().flush()?;
        let status = running
            .wait()
            .map_err(|e| ProcessError::WaitError(e.to_string()))?;
        state.active_children -= 1;

        if let Some(signal) = status.signal() {
            let outcome = LastStatus::Signaled(signal);
            if cmd.name != "kill" {
                println!("{}", outcome);
            }
            state.last_status = Some(outcome);
        } else {
            state.last_status = Some(LastStatus::Exited(status.code().unwrap_or(1)));
        }
        Ok(())
    }

    /// Applies input/output redirection to the child being built. Explicit
    /// targets win; background commands fall back to the null device on
    /// either side. Returns false when a target cannot be opened, after
    /// reporting it and recording the failed status for foreground runs.
    fn wire_redirection(
        &self,
        child: &mut ChildCommand,
        cmd: &Command,
        state: &mut ShellState,
    ) -> bool {
        let stdin = if let Some(path) = &cmd.input_file {
            match File::open(path) {
                Ok(file) => Some(Stdio::from(file)),
                Err(err) => {
                    return self.setup_failed(cmd, state, path, err);
                }
            }
        } else if cmd.background {
            match File::open(NULL_DEVICE) {
                Ok(file) => Some(Stdio::from(file)),
                Err(err) => {
                    return self.setup_failed(cmd, state, NULL_DEVICE, err);
                }
            }
        } else {
            None
        };
        if let Some(stdio) = stdin {
            child.stdin(stdio);
        }

        let stdout = if let Some(path) = &cmd.output_file {
            match open_for_output(path) {
                Ok(file) => Some(Stdio::from(file)),
                Err(err) => {
                    return self.setup_failed(cmd, state, path, err);
                }
            }
        } else if cmd.background {
            match open_for_output(NULL_DEVICE) {
                Ok(file) => Some(Stdio::from(file)),
                Err(err) => {
                    return self.setup_failed(cmd, state, NULL_DEVICE, err);
                }
            }
        } else {
            None
        };
        if let Some(stdio) = stdout {
            child.stdout(stdio);
        }

        true
    }

    fn setup_failed(
        &self,
        cmd: &Command,
        state: &mut ShellState,
        path: &str,
        err: io::Error,
    ) -> bool {
        eprintln!("venule: cannot open {}: {}", path, err);
        if !cmd.background {
            state.last_status = Some(LastStatus::Exited(1));
        }
        false
    }
}

fn restore_default_sigint() -> io::Result<()> {
    unsafe {
        libc::signal(libc::SIGINT, libc::SIG_DFL);
    }
    Ok(())
}

/// Truncates or creates the target with owner read-write permissions.
fn open_for_output(path: &str) -> io::Result<File> {
    OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .mode(0o600)
        .open(path)
}

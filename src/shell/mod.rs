use std::io::{self, Write};

use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

use crate::command::Command;
use crate::core::commands::BuiltinDispatcher;
use crate::core::state::ShellState;
use crate::error::ShellError;
use crate::flags::Flags;
use crate::highlight::PromptStyler;
use crate::process::{reaper, ProcessExecutor, SignalCoordinator};

pub struct Shell {
    editor: DefaultEditor,
    state: ShellState,
    dispatcher: BuiltinDispatcher,
    executor: ProcessExecutor,
    signals: SignalCoordinator,
    styler: PromptStyler,
    flags: Flags,
}

impl Shell {
    pub fn new(flags: Flags) -> Result<Self, ShellError> {
        let editor = DefaultEditor::new()?;
        let state = ShellState::new()?;
        let signals = SignalCoordinator::install()?;

        Ok(Shell {
            editor,
            state,
            dispatcher: BuiltinDispatcher::new(),
            executor: ProcessExecutor::new(),
            signals,
            styler: PromptStyler::new(),
            flags,
        })
    }

    /// The interpreter loop: read a line, parse and dispatch it, then run
    /// one bounded reap sweep. An empty line is a no-op iteration but still
    /// reaches the sweep, so finished background work is reported on a bare
    /// prompt cycle too.
    pub fn run(&mut self) -> Result<(), ShellError> {
        let pid = std::process::id();
        let prompt = self.styler.prompt();

        loop {
            io::stdout().flush()?;
            match self.editor.readline(&prompt) {
                Ok(line) => {
                    if !line.trim().is_empty() {
                        if let Err(e) = self.editor.add_history_entry(line.as_str()) {
                            if !self.flags.is_set("quiet") {
                                eprintln!("Warning: Couldn't add to history: {}", e);
                            }
                        }
                    }

                    if let Err(e) = self.interpret(&line, pid) {
                        eprintln!("{}", self.styler.error(&e.to_string()));
                    }
                }
                // interrupted read: go around and read again
                Err(ReadlineError::Interrupted) => {}
                Err(ReadlineError::Eof) => break,
                Err(e) => {
                    if !self.flags.is_set("quiet") {
                        eprintln!("{}", self.styler.error(&e.to_string()));
                    }
                }
            }

            reaper::reap_finished(&mut self.state);

            if self.state.exit_requested {
                break;
            }
        }
        Ok(())
    }

    /// Parses one line and dispatches it. The stop-signal phase is sampled
    /// here, before dispatch, so a pending foreground-only transition takes
    /// effect for this very command.
    fn interpret(&mut self, line: &str, pid: u32) -> Result<(), ShellError> {
        let Some(mut cmd) = Command::parse(line, pid) else {
            return Ok(());
        };

        self.signals.apply(&mut self.state.foreground_only);
        if self.state.foreground_only && cmd.background {
            cmd.background = false;
        }

        if cmd.comment {
            return Ok(());
        }

        if cmd.builtin {
            self.dispatcher.dispatch(&cmd, &mut self.state);
        } else {
            self.executor.execute(&cmd, &mut self.state)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::command::Command;
    use crate::core::state::ShellState;
    use crate::process::signal::StopToggle;
    use crate::process::ProcessExecutor;

    // the override applied by interpret(), exercised without a terminal
    fn apply_override(state: &ShellState, cmd: &mut Command) {
        if state.foreground_only && cmd.background {
            cmd.background = false;
        }
    }

    #[test]
    fn test_foreground_only_overrides_background_marker() {
        let mut state = ShellState::new().expect("state should initialize");
        let toggle = StopToggle::new();

        toggle.on_signal();
        toggle.apply(&mut state.foreground_only);
        assert!(state.foreground_only);

        let mut cmd =
            Command::parse("true &", std::process::id()).expect("command should parse");
        assert!(cmd.background);
        apply_override(&state, &mut cmd);
        assert!(!cmd.background);

        // an overridden command runs in the foreground: it is waited for,
        // records a status, and is never tracked as background
        ProcessExecutor::new()
            .execute(&cmd, &mut state)
            .expect("execute should succeed");
        assert!(state.background.is_empty());
        assert!(state.last_status.is_some());
    }

    #[test]
    fn test_background_marker_respected_outside_the_mode() {
        let state = ShellState::new().expect("state should initialize");
        let mut cmd =
            Command::parse("sleep 30 &", std::process::id()).expect("command should parse");
        apply_override(&state, &mut cmd);
        assert!(cmd.background);
    }
}

mod builder;
mod tokenizer;

pub use tokenizer::{expand_pid, tokenize};

/// The parsed form of one input line. Built fresh per line, immutable
/// afterwards; the owned argument storage is released wholesale on drop.
#[derive(Debug, Default, Clone)]
pub struct Command {
    /// First token after PID substitution. Empty iff the line is a comment.
    pub name: String,
    /// Full argument vector, command name at index 0.
    pub args: Vec<String>,
    pub input_file: Option<String>,
    pub output_file: Option<String>,
    pub background: bool,
    pub comment: bool,
    pub builtin: bool,
}

impl Command {
    /// Parses one raw input line. Returns `None` when the line produces no
    /// tokens at all; the caller treats that as a no-op iteration.
    pub fn parse(line: &str, pid: u32) -> Option<Command> {
        if line.starts_with('#') {
            return Some(Command {
                comment: true,
                ..Command::default()
            });
        }

        let tokens = tokenizer::tokenize(line, pid);
        if tokens.is_empty() {
            return None;
        }
        Some(builder::build(tokens))
    }
}

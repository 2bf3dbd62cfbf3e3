use super::Command;
use crate::core::commands;

const BACKGROUND_MARKER: &str = "&";
const INPUT_REDIRECT: &str = "<";
const OUTPUT_REDIRECT: &str = ">";

/// Classifies an already-substituted token sequence into a `Command`.
/// Redirects are detected positionally from the end of the line, not by
/// scanning for the markers anywhere; that matches the shell's documented
/// behavior for lines carrying one or both redirects.
pub(super) fn build(tokens: Vec<String>) -> Command {
    let background = is_background(&tokens);
    let input_file = redirect_target(&tokens, INPUT_REDIRECT, background);
    let output_file = redirect_target(&tokens, OUTPUT_REDIRECT, background);

    let mut arg_stop = tokens.len();
    if background {
        arg_stop -= 1;
    }
    if input_file.is_some() {
        arg_stop -= 2;
    }
    if output_file.is_some() {
        arg_stop -= 2;
    }

    let name = tokens[0].clone();
    let builtin = commands::is_builtin(&name);
    let args = tokens[..arg_stop].to_vec();

    Command {
        name,
        args,
        input_file,
        output_file,
        background,
        comment: false,
        builtin,
    }
}

/// A command runs in the background iff it has at least two tokens and the
/// last one is exactly `&`. A lone `&` is just a command name.
fn is_background(tokens: &[String]) -> bool {
    tokens.len() >= 2 && tokens[tokens.len() - 1] == BACKGROUND_MARKER
}

/// Looks for a redirect marker at the two fixed positions it can occupy:
/// two from the end, or four from the end when the other redirect sits
/// closer. Background commands shift both checks left by one to skip the
/// trailing `&`. Returns the token following the marker.
fn redirect_target(tokens: &[String], marker: &str, background: bool) -> Option<String> {
    let offset = usize::from(background);
    let count = tokens.len();

    if count < 3 + offset {
        return None;
    }
    if tokens[count - 2 - offset] == marker {
        return Some(tokens[count - 1 - offset].clone());
    }
    if count < 5 + offset {
        return None;
    }
    if tokens[count - 4 - offset] == marker {
        return Some(tokens[count - 3 - offset].clone());
    }
    None
}

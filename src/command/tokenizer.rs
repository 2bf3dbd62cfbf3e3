const PID_MARKER: &str = "$$";

/// Expands every occurrence of `$$` in a token into the given process id,
/// left to right, non-overlapping. Tokens without the marker pass through
/// unchanged.
pub fn expand_pid(token: &str, pid: u32) -> String {
    if token == PID_MARKER {
        pid.to_string()
    } else if token.contains(PID_MARKER) {
        token.replace(PID_MARKER, &pid.to_string())
    } else {
        token.to_string()
    }
}

/// Splits an input line into whitespace-delimited tokens, stripping one
/// trailing newline and running PID substitution on each token. Runs of
/// spaces count as a single delimiter.
pub fn tokenize(line: &str, pid: u32) -> Vec<String> {
    line.strip_suffix('\n')
        .unwrap_or(line)
        .split(' ')
        .filter(|t| !t.is_empty())
        .map(|t| expand_pid(t, pid))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_strips_trailing_newline() {
        let tokens = tokenize("echo a b c\n", 7777);
        assert_eq!(tokens, vec!["echo", "a", "b", "c"]);
    }

    #[test]
    fn test_tokenize_collapses_space_runs() {
        let tokens = tokenize("ls   -la    /tmp", 7777);
        assert_eq!(tokens, vec!["ls", "-la", "/tmp"]);
    }

    #[test]
    fn test_tokenize_without_newline() {
        // rustyline hands back lines with the newline already removed
        let tokens = tokenize("cat < in.txt", 7777);
        assert_eq!(tokens, vec!["cat", "<", "in.txt"]);
    }

    #[test]
    fn test_expand_pid_whole_token() {
        assert_eq!(expand_pid("$$", 7777), "7777");
    }

    #[test]
    fn test_expand_pid_embedded() {
        assert_eq!(expand_pid("pid$$end", 7777), "pid7777end");
    }

    #[test]
    fn test_expand_pid_multiple_occurrences() {
        assert_eq!(expand_pid("$$x$$", 42), "42x42");
    }

    #[test]
    fn test_expand_pid_no_marker() {
        assert_eq!(expand_pid("plain", 7777), "plain");
        // a single dollar is not a marker
        assert_eq!(expand_pid("a$b", 7777), "a$b");
    }

    #[test]
    fn test_tokenize_expands_every_token() {
        let tokens = tokenize("echo $$ file$$.log\n", 1234);
        assert_eq!(tokens, vec!["echo", "1234", "file1234.log"]);
    }
}

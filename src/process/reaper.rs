use crate::core::state::{LastStatus, ShellState};

/// Upper bound on completions handled per sweep, so a burst of finishing
/// children cannot stall the prompt.
const MAX_REAP_PER_SWEEP: usize = 10;

/// Non-blocking sweep over the tracked background pids, run by the loop
/// once per iteration between commands. Each finished child is removed
/// from the tracking list and reported; children still running are left
/// alone. A sweep that finds nothing changes nothing and prints nothing.
pub fn reap_finished(state: &mut ShellState) {
    let mut reaped = 0;
    let mut index = 0;

    while index < state.background.len() && reaped < MAX_REAP_PER_SWEEP {
        let pid = state.background[index];
        let mut raw_status: libc::c_int = 0;
        let result = unsafe { libc::waitpid(pid, &mut raw_status, libc::WNOHANG) };

        if result == 0 {
            // still running
            index += 1;
            continue;
        }

        state.background.remove(index);
        state.active_children = state.active_children.saturating_sub(1);

        if result < 0 {
            // not a child of ours anymore; drop it without a report
            continue;
        }

        reaped += 1;
        if libc::WIFEXITED(raw_status) {
            let outcome = LastStatus::Exited(libc::WEXITSTATUS(raw_status));
            println!("background pid {} is done: {}", pid, outcome);
        } else if libc::WIFSIGNALED(raw_status) {
            let outcome = LastStatus::Signaled(libc::WTERMSIG(raw_status));
            println!("background pid {} is done: {}", pid, outcome);
        }
    }
}

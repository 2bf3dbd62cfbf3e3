use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;

use signal_hook::consts::SIGTSTP;
use signal_hook::SigId;

use super::ProcessError;

pub const ENTER_NOTICE: &[u8] = b"\nEntering foreground-only mode (& is now ignored)\n";
pub const EXIT_NOTICE: &[u8] = b"\nExiting foreground-only mode\n";

const PHASE_IDLE: u8 = 0;
const PHASE_ENTERING: u8 = 1;
const PHASE_EXITING: u8 = 2;

/// Debounced two-phase foreground-only toggle. The signal handler side
/// (`on_signal`) cycles an atomic phase and writes the fixed notice; the
/// loop side (`apply`) is where the user-visible mode actually flips, once
/// per iteration. Splitting the two keeps the handler down to work that is
/// safe at any interruption point.
#[derive(Clone)]
pub struct StopToggle {
    phase: Arc<AtomicU8>,
}

impl Default for StopToggle {
    fn default() -> Self {
        Self::new()
    }
}

impl StopToggle {
    pub fn new() -> Self {
        StopToggle {
            phase: Arc::new(AtomicU8::new(PHASE_IDLE)),
        }
    }

    /// Handler-side transition. Async-signal-safe: one atomic store and one
    /// raw write to stdout.
    pub fn on_signal(&self) {
        if self.phase.load(Ordering::SeqCst) != PHASE_ENTERING {
            write_notice(ENTER_NOTICE);
            self.phase.store(PHASE_ENTERING, Ordering::SeqCst);
        } else {
            write_notice(EXIT_NOTICE);
            self.phase.store(PHASE_EXITING, Ordering::SeqCst);
        }
    }

    /// Loop-side consumption. Latches the mode on the first observed
    /// entering phase; an exiting phase clears the mode and rearms the
    /// cycle. Repeated samples of the same phase are no-ops.
    pub fn apply(&self, foreground_only: &mut bool) {
        match self.phase.load(Ordering::SeqCst) {
            PHASE_ENTERING if !*foreground_only => *foreground_only = true,
            PHASE_EXITING if *foreground_only => {
                *foreground_only = false;
                self.phase.store(PHASE_IDLE, Ordering::SeqCst);
            }
            _ => {}
        }
    }
}

fn write_notice(notice: &[u8]) {
    unsafe {
        libc::write(libc::STDOUT_FILENO, notice.as_ptr().cast(), notice.len());
    }
}

/// Owns the shell's signal dispositions: the SIGTSTP toggle handler and
/// the process-wide SIGINT ignore. The ignore disposition survives exec,
/// so background children inherit it; foreground children restore the
/// default at spawn time (see `executor`).
pub struct SignalCoordinator {
    toggle: StopToggle,
    sigtstp: SigId,
}

impl SignalCoordinator {
    pub fn install() -> Result<Self, ProcessError> {
        let toggle = StopToggle::new();
        let handler = toggle.clone();
        let sigtstp = unsafe { signal_hook::low_level::register(SIGTSTP, move || handler.on_signal()) }
            .map_err(|e| ProcessError::SignalError(e.to_string()))?;

        unsafe {
            libc::signal(libc::SIGINT, libc::SIG_IGN);
        }

        Ok(SignalCoordinator { toggle, sigtstp })
    }

    /// Samples the stop phase and updates the mode flag. Called once per
    /// loop iteration, before the command is dispatched.
    pub fn apply(&self, foreground_only: &mut bool) {
        self.toggle.apply(foreground_only);
    }
}

impl Drop for SignalCoordinator {
    fn drop(&mut self) {
        signal_hook::low_level::unregister(self.sigtstp);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_cycle() {
        let toggle = StopToggle::new();
        let mut foreground_only = false;

        // idle: sampling does nothing
        toggle.apply(&mut foreground_only);
        assert!(!foreground_only);

        // first signal enters the mode
        toggle.on_signal();
        toggle.apply(&mut foreground_only);
        assert!(foreground_only);

        // resampling the same phase is debounced
        toggle.apply(&mut foreground_only);
        assert!(foreground_only);

        // second signal leaves the mode and rearms the cycle
        toggle.on_signal();
        toggle.apply(&mut foreground_only);
        assert!(!foreground_only);

        // third signal enters again
        toggle.on_signal();
        toggle.apply(&mut foreground_only);
        assert!(foreground_only);
    }

    #[test]
    fn test_double_signal_between_samples() {
        let toggle = StopToggle::new();
        let mut foreground_only = false;

        // two deliveries before the loop gets to sample: the exiting phase
        // is observed while the mode was never entered, so nothing flips
        toggle.on_signal();
        toggle.on_signal();
        toggle.apply(&mut foreground_only);
        assert!(!foreground_only);

        // the next delivery starts a fresh entering phase
        toggle.on_signal();
        toggle.apply(&mut foreground_only);
        assert!(foreground_only);
    }

    #[test]
    fn test_sigtstp_delivery_drives_toggle() {
        let coordinator = SignalCoordinator::install().expect("handler should install");
        let mut foreground_only = false;

        signal_hook::low_level::raise(SIGTSTP).expect("raise should succeed");
        coordinator.apply(&mut foreground_only);
        assert!(foreground_only);

        signal_hook::low_level::raise(SIGTSTP).expect("raise should succeed");
        coordinator.apply(&mut foreground_only);
        assert!(!foreground_only);
    }
}

use std::fmt;

pub mod executor;
pub mod reaper;
pub mod signal;

pub use executor::ProcessExecutor;
pub use signal::SignalCoordinator;

#[derive(Debug)]
pub enum ProcessError {
    SignalError(String),
    WaitError(String),
    Io(std::io::Error),
}

impl From<std::io::Error> for ProcessError {
    fn from(e: std::io::Error) -> Self {
        ProcessError::Io(e)
    }
}

impl fmt::Display for ProcessError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProcessError::SignalError(msg) => write!(f, "Signal error: {}", msg),
            ProcessError::WaitError(msg) => write!(f, "Wait error: {}", msg),
            ProcessError::Io(e) => write!(f, "IO error: {}", e),
        }
    }
}

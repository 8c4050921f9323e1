//! Cooperative cancellation.
//!
//! Termination signals never preempt the timer. The signal handler only
//! flips a flag; the timer loop checks it once per tick.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tracing::debug;

use crate::error::PomodoroError;

/// A shared flag that is set once the run should stop.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    /// Create a token that is not cancelled.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation.
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    /// Check whether cancellation was requested.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }

    /// Route SIGINT and SIGTERM to this token.
    ///
    /// Can be called once per process.
    ///
    /// # Errors
    ///
    /// Returns `PomodoroError::Signal` if a handler is already installed or
    /// the OS refuses the registration.
    pub fn install_signal_handler(&self) -> Result<(), PomodoroError> {
        let token = self.clone();
        ctrlc::set_handler(move || {
            debug!("termination signal received");
            token.cancel();
        })
        .map_err(|e| PomodoroError::Signal(format!("Failed to install signal handler: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_token_is_not_cancelled() {
        assert!(!CancelToken::new().is_cancelled());
    }

    #[test]
    fn test_cancel_is_visible_through_clones() {
        let token = CancelToken::new();
        let other = token.clone();

        other.cancel();

        assert!(token.is_cancelled());
        assert!(other.is_cancelled());
    }
}

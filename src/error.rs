//! Error types for pomodoro.

use thiserror::Error;

/// Errors that abort a pomodoro run.
///
/// None of these are recoverable: the command prints the message and exits
/// non-zero.
#[derive(Debug, Error)]
pub enum PomodoroError {
    /// The config file or command-line options are invalid.
    #[error("configuration error: {0}")]
    Config(String),

    /// Writing to the terminal failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The completion log could not be located or written.
    #[error("completion log error: {0}")]
    Log(String),

    /// Keyboard input is no longer available.
    #[error("input error: {0}")]
    Input(String),

    /// The terminal mode could not be changed.
    #[error("terminal error: {0}")]
    Terminal(String),

    /// The termination signal handler could not be installed.
    #[error("signal error: {0}")]
    Signal(String),
}

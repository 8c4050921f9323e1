//! Scoped no-echo, byte-at-a-time terminal mode.
//!
//! The equivalent of `stty cbreak -echo min 1`. Signal generation is left
//! enabled so Ctrl-C still reaches the cancellation handler.

use std::io;

use crossterm::tty::IsTty;
use tracing::{debug, warn};

use crate::error::PomodoroError;

/// Holds the terminal in no-echo mode until dropped.
pub struct TerminalMode {
    #[cfg(unix)]
    original: Option<libc::termios>,
}

impl TerminalMode {
    /// Put stdin into no-echo, byte-at-a-time mode.
    ///
    /// Does nothing when stdin is not a terminal.
    ///
    /// # Errors
    ///
    /// Returns `PomodoroError::Terminal` if the terminal attributes cannot be
    /// read or written.
    pub fn acquire() -> Result<Self, PomodoroError> {
        if !io::stdin().is_tty() {
            debug!("stdin is not a terminal, leaving mode untouched");
            return Ok(Self::inactive());
        }

        Self::enable()
    }

    #[cfg(unix)]
    const fn inactive() -> Self {
        Self { original: None }
    }

    #[cfg(not(unix))]
    const fn inactive() -> Self {
        Self {}
    }

    /// Whether the terminal mode was actually changed.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        #[cfg(unix)]
        {
            self.original.is_some()
        }
        #[cfg(not(unix))]
        {
            false
        }
    }

    #[cfg(unix)]
    #[allow(unsafe_code)]
    fn enable() -> Result<Self, PomodoroError> {
        use std::os::unix::io::AsRawFd;

        let fd = io::stdin().as_raw_fd();

        // SAFETY: `termios` is plain old data and `fd` is a valid descriptor
        // for the lifetime of the process.
        let original = unsafe {
            let mut termios: libc::termios = std::mem::zeroed();
            if libc::tcgetattr(fd, &mut termios) != 0 {
                return Err(PomodoroError::Terminal(format!(
                    "Failed to read terminal attributes: {}",
                    io::Error::last_os_error()
                )));
            }
            termios
        };

        let mut cbreak = original;
        cbreak.c_lflag &= !(libc::ICANON | libc::ECHO);
        cbreak.c_cc[libc::VMIN] = 1;
        cbreak.c_cc[libc::VTIME] = 0;

        // SAFETY: see above.
        if unsafe { libc::tcsetattr(fd, libc::TCSANOW, &cbreak) } != 0 {
            return Err(PomodoroError::Terminal(format!(
                "Failed to set terminal attributes: {}",
                io::Error::last_os_error()
            )));
        }

        debug!("terminal switched to no-echo mode");
        Ok(Self {
            original: Some(original),
        })
    }

    #[cfg(not(unix))]
    fn enable() -> Result<Self, PomodoroError> {
        Ok(Self::inactive())
    }

    #[cfg(unix)]
    #[allow(unsafe_code)]
    fn release(&mut self) {
        use std::os::unix::io::AsRawFd;

        let Some(original) = self.original.take() else {
            return;
        };

        let fd = io::stdin().as_raw_fd();
        // SAFETY: `original` came from `tcgetattr` on the same descriptor.
        if unsafe { libc::tcsetattr(fd, libc::TCSANOW, &original) } == 0 {
            debug!("terminal mode restored");
        } else {
            warn!(
                "failed to restore terminal mode: {}",
                io::Error::last_os_error()
            );
        }
    }

    #[cfg(not(unix))]
    fn release(&mut self) {}
}

impl Drop for TerminalMode {
    fn drop(&mut self) {
        self.release();
    }
}

//! Path resolution for pomodoro configuration and data files.
//!
//! - `~/.pomodoro/config.yaml` - Optional configuration file
//! - `~/pomodoros.csv` - Default completion log

use std::path::{Path, PathBuf};

use crate::error::PomodoroError;

/// Per-user file locations.
#[derive(Debug, Clone)]
pub struct Paths {
    /// Configuration directory: `~/.pomodoro/`
    pub root: PathBuf,
    /// Config file: `~/.pomodoro/config.yaml`
    pub config_file: PathBuf,
    /// Completion log: `~/pomodoros.csv`
    pub log_file: PathBuf,
}

impl Paths {
    /// Create paths based on the user's home directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined.
    pub fn new() -> Result<Self, PomodoroError> {
        let home = std::env::var_os("HOME")
            .filter(|h| !h.is_empty())
            .ok_or_else(|| PomodoroError::Config("Could not determine home directory".to_string()))?;

        Ok(Self::with_home(Path::new(&home)))
    }

    /// Create paths under a custom home directory (useful for testing).
    #[must_use]
    pub fn with_home(home: &Path) -> Self {
        let root = home.join(".pomodoro");

        Self {
            config_file: root.join("config.yaml"),
            log_file: home.join("pomodoros.csv"),
            root,
        }
    }
}

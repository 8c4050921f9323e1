//! Configuration settings for pomodoro.
//!
//! Settings are loaded from `~/.pomodoro/config.yaml`. Every field is
//! optional; command-line options override whatever the file sets.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::PomodoroError;

/// Main configuration structure.
#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    /// Interval lengths and round count.
    pub timer: TimerConfig,
    /// Completion log settings.
    pub log: LogConfig,
}

/// Timer defaults.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct TimerConfig {
    /// Work interval length in minutes. 0 counts up until interrupted.
    #[serde(default = "default_work_minutes")]
    pub work_minutes: u32,
    /// Break length in minutes.
    #[serde(default = "default_break_minutes")]
    pub break_minutes: u32,
    /// Number of work intervals.
    #[serde(default = "default_rounds")]
    pub rounds: u32,
}

/// Completion log settings.
#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct LogConfig {
    /// Log file path. `~` is expanded. Defaults to `~/pomodoros.csv`.
    pub file: Option<String>,
}

// Default value functions for serde
const fn default_work_minutes() -> u32 {
    25
}

const fn default_break_minutes() -> u32 {
    5
}

const fn default_rounds() -> u32 {
    4
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            work_minutes: default_work_minutes(),
            break_minutes: default_break_minutes(),
            rounds: default_rounds(),
        }
    }
}

impl LogConfig {
    /// The configured log path with `~` expanded.
    #[must_use]
    pub fn file_path(&self) -> Option<PathBuf> {
        self.file
            .as_deref()
            .map(|f| PathBuf::from(shellexpand::tilde(f).into_owned()))
    }
}

impl Config {
    /// Load configuration from a specific path.
    ///
    /// If the config file doesn't exist, returns default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed.
    pub fn load_from_path(path: &Path) -> Result<Self, PomodoroError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path).map_err(|e| {
            PomodoroError::Config(format!(
                "Failed to read config file {}: {e}",
                path.display()
            ))
        })?;

        serde_yaml::from_str(&contents).map_err(|e| {
            PomodoroError::Config(format!(
                "Failed to parse config file {}: {e}",
                path.display()
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert_eq!(config.timer.work_minutes, 25);
        assert_eq!(config.timer.break_minutes, 5);
        assert_eq!(config.timer.rounds, 4);
        assert_eq!(config.log.file, None);
    }

    #[test]
    fn test_load_missing_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.yaml");

        let config = Config::load_from_path(&config_path).unwrap();

        // Should return defaults when file doesn't exist
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_partial_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.yaml");

        let partial_yaml = r"
timer:
  work_minutes: 45
";
        std::fs::write(&config_path, partial_yaml).unwrap();

        let config = Config::load_from_path(&config_path).unwrap();

        assert_eq!(config.timer.work_minutes, 45);
        // Defaults should be used for missing fields
        assert_eq!(config.timer.break_minutes, 5);
        assert_eq!(config.timer.rounds, 4);
        assert_eq!(config.log.file, None);
    }

    #[test]
    fn test_full_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.yaml");

        let yaml = r"
timer:
  work_minutes: 50
  break_minutes: 10
  rounds: 2
log:
  file: /var/tmp/work.csv
";
        std::fs::write(&config_path, yaml).unwrap();

        let config = Config::load_from_path(&config_path).unwrap();

        assert_eq!(config.timer.work_minutes, 50);
        assert_eq!(config.timer.break_minutes, 10);
        assert_eq!(config.timer.rounds, 2);
        assert_eq!(config.log.file_path(), Some(PathBuf::from("/var/tmp/work.csv")));
    }

    #[test]
    fn test_invalid_config_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.yaml");
        std::fs::write(&config_path, "timer:\n  rounds: many\n").unwrap();

        let result = Config::load_from_path(&config_path);

        assert!(matches!(result, Err(PomodoroError::Config(_))));
    }

    #[test]
    fn test_log_file_tilde_is_expanded() {
        let log = LogConfig {
            file: Some("~/pomodoros.csv".to_string()),
        };

        let path = log.file_path().unwrap();

        assert!(path.ends_with("pomodoros.csv"));
        if std::env::var_os("HOME").is_some() {
            assert!(!path.starts_with("~"));
        }
    }
}

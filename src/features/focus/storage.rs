//! Completion log storage.
//!
//! Finished and canceled work intervals are appended to a CSV file
//! (`~/pomodoros.csv` by default). The file is opened, appended to, synced
//! and closed for every record; nothing keeps a handle open between writes.

use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use tracing::info;

use crate::error::PomodoroError;

/// Header row, written once when the file is created.
pub const HEADER: [&str; 4] = ["task", "timeStart", "timeEnd", "length"];

/// Local timestamp format, e.g. `Jan 2 15:04:05`.
pub const TIMESTAMP_FORMAT: &str = "%b %-d %H:%M:%S";

/// One finished or canceled work interval.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionRecord {
    /// Task label.
    pub label: String,
    /// When the interval started.
    pub start: DateTime<Local>,
    /// When the interval ended.
    pub end: DateTime<Local>,
    /// Minutes worked.
    pub minutes: u64,
}

impl CompletionRecord {
    /// Fields in log column order.
    #[must_use]
    pub fn to_row(&self) -> [String; 4] {
        [
            self.label.clone(),
            self.start.format(TIMESTAMP_FORMAT).to_string(),
            self.end.format(TIMESTAMP_FORMAT).to_string(),
            self.minutes.to_string(),
        ]
    }
}

/// Destination for completion records.
#[cfg_attr(test, mockall::automock)]
pub trait CompletionSink {
    /// Persist one record.
    ///
    /// # Errors
    ///
    /// Returns `PomodoroError::Log` if the record cannot be written.
    fn append(&mut self, record: &CompletionRecord) -> Result<(), PomodoroError>;
}

/// Append-only CSV log file.
#[derive(Debug, Clone)]
pub struct CompletionLog {
    path: PathBuf,
}

impl CompletionLog {
    /// Create a log writing to `path`. Nothing is touched until the first append.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the log file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn open(&self) -> Result<File, PomodoroError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| {
                PomodoroError::Log(format!(
                    "Failed to create directory {}: {e}",
                    parent.display()
                ))
            })?;
        }

        let mut options = OpenOptions::new();
        options.create(true).append(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(0o600);
        }

        options.open(&self.path).map_err(|e| {
            PomodoroError::Log(format!("Failed to open {}: {e}", self.path.display()))
        })
    }
}

impl CompletionSink for CompletionLog {
    fn append(&mut self, record: &CompletionRecord) -> Result<(), PomodoroError> {
        let created = !self.path.exists();
        let file = self.open()?;

        let write_err =
            |e: csv::Error| PomodoroError::Log(format!("Failed to write {}: {e}", self.path.display()));

        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .terminator(csv::Terminator::Any(b'\n'))
            .from_writer(file);

        if created {
            writer.write_record(HEADER).map_err(write_err)?;
        }
        writer.write_record(record.to_row()).map_err(write_err)?;

        let file = writer.into_inner().map_err(|e| {
            PomodoroError::Log(format!(
                "Failed to flush {}: {}",
                self.path.display(),
                e.error()
            ))
        })?;
        file.sync_all().map_err(|e| {
            PomodoroError::Log(format!("Failed to sync {}: {e}", self.path.display()))
        })?;

        info!(
            path = %self.path.display(),
            label = %record.label,
            minutes = record.minutes,
            "completion recorded"
        );
        Ok(())
    }
}

//! Single-line status display.
//!
//! Every render returns the cursor to column 0, blanks the line and writes
//! the new text, so successive ticks overwrite one another in place.

use std::io::{self, Write};
use std::time::Duration;

/// Width of the blanking pass. Must cover the longest status line.
pub const CLEAR_WIDTH: usize = 50;

/// Format a duration as `HH:MM:SS`, or `MM:SS` when under an hour.
///
/// Sub-second remainders are truncated.
#[must_use]
pub fn format_clock(d: Duration) -> String {
    let total = d.as_secs();
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let seconds = total % 60;

    if hours > 0 {
        format!("{hours:02}:{minutes:02}:{seconds:02}")
    } else {
        format!("{minutes:02}:{seconds:02}")
    }
}

/// Format a duration as a human-readable string, e.g. `1 hour, 30 minutes`.
#[must_use]
pub fn format_duration(d: Duration) -> String {
    let total_minutes = d.as_secs() / 60;

    if total_minutes < 1 {
        let seconds = d.as_secs();
        return format!("{} second{}", seconds, plural(seconds));
    }

    let hours = total_minutes / 60;
    let minutes = total_minutes % 60;

    match (hours, minutes) {
        (0, m) => format!("{m} minute{}", plural(m)),
        (h, 0) => format!("{h} hour{}", plural(h)),
        (h, m) => format!("{h} hour{}, {m} minute{}", plural(h), plural(m)),
    }
}

const fn plural(n: u64) -> &'static str {
    if n == 1 {
        ""
    } else {
        "s"
    }
}

/// Blank the current line and leave the cursor at its start.
///
/// # Errors
///
/// Returns an error if writing to `out` fails.
pub fn clear_line(out: &mut dyn Write) -> io::Result<()> {
    write!(out, "\r{:width$}\r", "", width = CLEAR_WIDTH)?;
    out.flush()
}

/// Replace the current line with `text`.
///
/// # Errors
///
/// Returns an error if writing to `out` fails.
pub fn render_line(out: &mut dyn Write, text: &str) -> io::Result<()> {
    write!(out, "\r{:width$}\r{text}", "", width = CLEAR_WIDTH)?;
    out.flush()
}

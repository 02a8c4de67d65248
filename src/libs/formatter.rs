//! String forms of entries and elapsed time for tables and messages.
//!
//! Logged hours always render through
//! [`format_for_display`](crate::libs::duration::format_for_display) as
//! `H:MM`. Running timers additionally show seconds, so they render as
//! `H:MM:SS` via [`format_elapsed`].

use crate::libs::duration::format_for_display;
use crate::libs::entry::TimeEntry;
use chrono::Duration;
use serde::{Deserialize, Serialize};

/// A time entry with every field pre-formatted for display.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormattedEntry {
    pub id: i64,
    pub date: String,
    pub project: String,
    pub task: String,
    /// `H:MM`
    pub duration: String,
    /// Stored decimal hours with two places, e.g. `"2.50"`.
    pub hours: String,
    pub notes: String,
}

impl From<&TimeEntry> for FormattedEntry {
    fn from(entry: &TimeEntry) -> Self {
        FormattedEntry {
            id: entry.id.unwrap_or(0),
            date: entry.date.format("%a %Y-%m-%d").to_string(),
            project: entry.project.clone(),
            task: entry.task.clone().unwrap_or_default(),
            duration: format_for_display(entry.hours),
            hours: format_decimal(entry.hours),
            notes: entry.notes.clone().unwrap_or_default(),
        }
    }
}

/// Decimal hours with exactly two places.
pub fn format_decimal(hours: f64) -> String {
    format!("{:.2}", hours)
}

/// Formats a running duration as `H:MM:SS`. Negative durations show as zero.
pub fn format_elapsed(duration: &Duration) -> String {
    let secs = duration.num_seconds().max(0);
    format!("{}:{:02}:{:02}", secs / 3600, (secs % 3600) / 60, secs % 60)
}

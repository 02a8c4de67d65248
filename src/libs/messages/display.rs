//! Display implementation for timecard application messages.
//!
//! All user-facing text lives here, in one `match`. Commands never build
//! sentences inline; they pick a [`Message`] variant and hand it to one of the
//! `msg_*!` macros.
//!
//! The two duration messages are the ones every input path shows when typed
//! time is rejected:
//!
//! ```rust
//! use timecard::libs::messages::Message;
//!
//! let help = Message::DurationFormatHelp("2h".to_string()).to_string();
//! assert!(help.contains("2:30"));
//!
//! let max = Message::DurationExceedsMax("25".to_string()).to_string();
//! assert!(max.contains("24:00"));
//! ```

use super::types::Message;
use std::fmt::{Display, Formatter, Result};

impl Display for Message {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        let text = match self {
            // === DURATION MESSAGES ===
            Message::DurationFormatHelp(input) => format!(
                "'{}' is not a valid duration. Use hours and minutes (2:30) or decimal hours (2.5), between 0:00 and 24:00",
                input
            ),
            Message::DurationExceedsMax(input) => format!("'{}' is out of range. The maximum for a single entry is 24:00", input),
            Message::DurationEmpty => "No duration entered".to_string(),

            // === ENTRY MESSAGES ===
            Message::EntryCreated { project, date, hours } => format!("Logged {} on {} for {}", hours, project, date),
            Message::EntryUpdated { project, date, hours } => format!("Updated {} on {} to {}", project, date, hours),
            Message::EntryCleared { project, date } => format!("Cleared {} on {}", project, date),
            Message::EntryUnchanged => "Nothing to change".to_string(),
            Message::EntryDeleted(id) => format!("Entry {} deleted", id),
            Message::EntryNotFound(id) => format!("Entry with ID {} not found", id),
            Message::EntriesHeader(week) => format!("Entries for {}", week),
            Message::NoEntriesForWeek(week) => format!("No entries for {}", week),
            Message::ConfirmDeleteEntry(id) => format!("Delete entry {}?", id),

            // === WEEK MESSAGES ===
            Message::WeekHeader(week) => format!("Timesheet for {}", week),
            Message::WeekLocked { week, status } => {
                format!("Timesheet for {} is {}. Reopen it before changing entries", week, status)
            }

            // === ROW MESSAGES ===
            Message::RowAdded(row) => format!("Row '{}' added", row),
            Message::RowRemoved(row) => format!("Row '{}' removed", row),
            Message::RowsCleared(week) => format!("Manual rows cleared for {}", week),
            Message::NoManualRows(week) => format!("No manual rows for {}", week),

            // === TIMER MESSAGES ===
            Message::TimerStarted(row) => format!("Timer started for {}", row),
            Message::TimerPaused(elapsed) => format!("Timer paused at {}", elapsed),
            Message::TimerResumed(row) => format!("Timer resumed for {}", row),
            Message::TimerStopped { row, hours } => format!("Timer stopped: {} logged on {}", hours, row),
            Message::TimerNotRunning => "No timer is running".to_string(),
            Message::TimerAlreadyRunning(row) => format!("A timer is already running for {}", row),
            Message::TimerAlreadyPaused => "Timer is already paused".to_string(),
            Message::TimerNotPaused => "Timer is not paused".to_string(),
            Message::TimerTooShort => "Timer ran too briefly to record, nothing logged".to_string(),
            Message::TimerCapped { row, dropped } => {
                format!("{} already reaches 24:00 today, {} of timer time was not logged", row, dropped)
            }
            Message::TimerCellFull(row) => format!("{} already holds 24:00 today, the timer keeps running", row),
            Message::TimerStatus { row, elapsed, running } => format!(
                "{} on {} ({})",
                elapsed,
                row,
                if *running { "running" } else { "paused" }
            ),

            // === TIMESHEET MESSAGES ===
            Message::TimesheetSubmitted(week) => format!("Timesheet for {} submitted for approval", week),
            Message::TimesheetApproved(week) => format!("Timesheet for {} approved", week),
            Message::TimesheetRejected(week) => format!("Timesheet for {} rejected", week),
            Message::TimesheetReopened(week) => format!("Timesheet for {} reopened", week),
            Message::TimesheetStatus { week, status, comment } => match comment {
                Some(comment) => format!("Timesheet for {}: {} ({})", week, status, comment),
                None => format!("Timesheet for {}: {}", week, status),
            },
            Message::TimesheetInvalidTransition { from, action } => format!("Cannot {} a timesheet that is {}", action, from),
            Message::TimesheetEmptyWeek(week) => format!("No hours logged for {}, nothing to submit", week),

            // === SYNC MESSAGES ===
            Message::SyncStarted(count) => format!("Sending {} entries to the server...", count),
            Message::SyncCompleted(count) => format!("{} entries synced", count),
            Message::SyncEntryFailed(id, error) => format!("Failed to sync entry {}: {}", id, error),
            Message::SyncRemoteIdNotSaved { id, remote_id, error } => format!(
                "Entry {} was created on the server as {} but the id could not be saved: {}. Delete {} on the server before the next sync",
                id, remote_id, error, remote_id
            ),
            Message::SyncRemoteAlreadyGone(remote_id) => format!("Entry {} was already deleted on the server", remote_id),
            Message::ServerConfigNotFound => "Server is not configured. Run 'timecard init' first".to_string(),

            // === CONFIGURATION MESSAGES ===
            Message::ConfigSaved => "Configuration saved successfully".to_string(),
            Message::ConfigDeleted => "Configuration removed".to_string(),
            Message::ConfigModuleUser => "User settings".to_string(),
            Message::ConfigModuleServer => "Time entry server".to_string(),

            // === DATE MESSAGES ===
            Message::InvalidDate(input) => format!("Invalid date '{}'. Use YYYY-MM-DD or 'today'", input),

            // === PROMPTS ===
            Message::PromptSelectModules => "Select modules to configure".to_string(),
            Message::PromptUserId => "Enter your user ID".to_string(),
            Message::PromptWeekStart => "First day of the week (monday or sunday)".to_string(),
            Message::PromptServerApiUrl => "Enter the time entry API URL".to_string(),
            Message::PromptServerAuthToken => "Enter the API token".to_string(),

            // === MIGRATION MESSAGES ===
            Message::MigrationsFound(count) => format!("Found {} pending migration(s)", count),
            Message::RunningMigration(version, name) => format!("Running migration v{}: {}", version, name),
            Message::MigrationCompleted(version) => format!("Migration v{} completed", version),
            Message::MigrationFailed(version, error) => format!("Migration v{} failed: {}", version, error),
            Message::AllMigrationsCompleted => "All migrations completed".to_string(),

            // === GENERAL MESSAGES ===
            Message::OperationCancelled => "Operation cancelled".to_string(),
        };
        write!(f, "{}", text)
    }
}

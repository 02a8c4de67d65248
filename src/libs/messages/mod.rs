pub mod display;
pub mod macros;
pub mod types;

use crate::api::sync::SyncFailure;
use crate::libs::duration::DurationError;
use crate::libs::timer::TimerError;
use crate::libs::timesheet::TimesheetError;
pub use types::Message;

impl From<&DurationError> for Message {
    /// Picks the user-facing text for a rejected duration.
    fn from(error: &DurationError) -> Self {
        match error {
            DurationError::Empty => Message::DurationEmpty,
            DurationError::SyntaxInvalid(input) => Message::DurationFormatHelp(input.clone()),
            DurationError::RangeInvalid(input) => Message::DurationExceedsMax(input.clone()),
        }
    }
}

impl From<&TimerError> for Message {
    fn from(error: &TimerError) -> Self {
        match error {
            TimerError::AlreadyPaused => Message::TimerAlreadyPaused,
            TimerError::NotPaused => Message::TimerNotPaused,
            TimerError::TooShort => Message::TimerTooShort,
        }
    }
}

impl From<&SyncFailure> for Message {
    fn from(failure: &SyncFailure) -> Self {
        match &failure.orphaned_remote_id {
            Some(remote_id) => Message::SyncRemoteIdNotSaved {
                id: failure.entry_id,
                remote_id: remote_id.clone(),
                error: failure.error.clone(),
            },
            None => Message::SyncEntryFailed(failure.entry_id, failure.error.clone()),
        }
    }
}

impl Message {
    /// Text for a refused timesheet transition. `week` names the week for
    /// the empty-week case.
    pub fn from_timesheet_error(error: &TimesheetError, week: &str) -> Self {
        match error {
            TimesheetError::InvalidTransition { from, action } => Message::TimesheetInvalidTransition {
                from: from.to_string(),
                action: action.to_string(),
            },
            TimesheetError::EmptyWeek => Message::TimesheetEmptyWeek(week.to_string()),
        }
    }
}

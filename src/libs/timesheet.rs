//! Submit/approve workflow for a user's week.
//!
//! ```text
//! Draft ──submit──▶ Submitted ──approve──▶ Approved
//!   ▲                   │                     │
//!   │                 reject                reopen
//!   │                   ▼                     │
//!   └──reopen──── Rejected ◀──────────────────┘ (to Draft)
//!                   │
//!                 submit ──▶ Submitted
//! ```
//!
//! Submitted and approved weeks are locked: their entries cannot change.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TimesheetStatus {
    #[default]
    Draft,
    Submitted,
    Approved,
    Rejected,
}

impl TimesheetStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TimesheetStatus::Draft => "draft",
            TimesheetStatus::Submitted => "submitted",
            TimesheetStatus::Approved => "approved",
            TimesheetStatus::Rejected => "rejected",
        }
    }

    pub fn is_locked(&self) -> bool {
        matches!(self, TimesheetStatus::Submitted | TimesheetStatus::Approved)
    }
}

impl fmt::Display for TimesheetStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for TimesheetStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(TimesheetStatus::Draft),
            "submitted" => Ok(TimesheetStatus::Submitted),
            "approved" => Ok(TimesheetStatus::Approved),
            "rejected" => Ok(TimesheetStatus::Rejected),
            other => Err(format!("unknown timesheet status '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimesheetAction {
    Submit,
    Approve,
    Reject,
    Reopen,
}

impl fmt::Display for TimesheetAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TimesheetAction::Submit => "submit",
            TimesheetAction::Approve => "approve",
            TimesheetAction::Reject => "reject",
            TimesheetAction::Reopen => "reopen",
        };
        write!(f, "{}", name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimesheetError {
    #[error("cannot {action} a timesheet that is {from}")]
    InvalidTransition { from: TimesheetStatus, action: TimesheetAction },
    #[error("no hours logged for the week")]
    EmptyWeek,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Timesheet {
    pub user_id: String,
    pub week_start: NaiveDate,
    pub status: TimesheetStatus,
    /// Reviewer comment, set on rejection and cleared on the next transition.
    pub comment: Option<String>,
}

impl Timesheet {
    pub fn new(user_id: &str, week_start: NaiveDate) -> Self {
        Timesheet {
            user_id: user_id.to_string(),
            week_start,
            status: TimesheetStatus::Draft,
            comment: None,
        }
    }

    /// Applies `action`. `total_hours` is the week's logged total and is
    /// only consulted on submit.
    pub fn apply(&mut self, action: TimesheetAction, total_hours: f64, comment: Option<&str>) -> Result<(), TimesheetError> {
        use TimesheetAction::*;
        use TimesheetStatus::*;

        let next = match (self.status, action) {
            (Draft | Rejected, Submit) => {
                if total_hours <= 0.0 {
                    return Err(TimesheetError::EmptyWeek);
                }
                Submitted
            }
            (Submitted, Approve) => Approved,
            (Submitted, Reject) => Rejected,
            (Rejected | Approved, Reopen) => Draft,
            (from, action) => return Err(TimesheetError::InvalidTransition { from, action }),
        };

        self.status = next;
        self.comment = comment.map(|c| c.to_string());
        Ok(())
    }

    pub fn is_locked(&self) -> bool {
        self.status.is_locked()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sheet() -> Timesheet {
        Timesheet::new("alice", NaiveDate::from_ymd_opt(2025, 6, 2).unwrap())
    }

    #[test]
    fn test_happy_path() {
        let mut sheet = sheet();
        assert!(!sheet.is_locked());
        sheet.apply(TimesheetAction::Submit, 40.0, None).unwrap();
        assert_eq!(sheet.status, TimesheetStatus::Submitted);
        assert!(sheet.is_locked());
        sheet.apply(TimesheetAction::Approve, 40.0, None).unwrap();
        assert_eq!(sheet.status, TimesheetStatus::Approved);
        assert!(sheet.is_locked());
    }

    #[test]
    fn test_reject_and_resubmit() {
        let mut sheet = sheet();
        sheet.apply(TimesheetAction::Submit, 8.0, None).unwrap();
        sheet.apply(TimesheetAction::Reject, 8.0, Some("missing Friday")).unwrap();
        assert_eq!(sheet.status, TimesheetStatus::Rejected);
        assert_eq!(sheet.comment.as_deref(), Some("missing Friday"));
        assert!(!sheet.is_locked());
        sheet.apply(TimesheetAction::Submit, 16.0, None).unwrap();
        assert_eq!(sheet.comment, None);
        sheet.apply(TimesheetAction::Approve, 16.0, None).unwrap();
        assert_eq!(sheet.status, TimesheetStatus::Approved);
    }

    #[test]
    fn test_invalid_transitions() {
        let mut sheet = sheet();
        assert_eq!(
            sheet.apply(TimesheetAction::Approve, 8.0, None),
            Err(TimesheetError::InvalidTransition {
                from: TimesheetStatus::Draft,
                action: TimesheetAction::Approve
            })
        );
        assert!(sheet.apply(TimesheetAction::Reopen, 8.0, None).is_err());
        sheet.apply(TimesheetAction::Submit, 8.0, None).unwrap();
        assert!(sheet.apply(TimesheetAction::Submit, 8.0, None).is_err());
    }

    #[test]
    fn test_empty_week_cannot_be_submitted() {
        let mut sheet = sheet();
        assert_eq!(sheet.apply(TimesheetAction::Submit, 0.0, None), Err(TimesheetError::EmptyWeek));
        assert_eq!(sheet.status, TimesheetStatus::Draft);
    }

    #[test]
    fn test_reopen_approved() {
        let mut sheet = sheet();
        sheet.apply(TimesheetAction::Submit, 8.0, None).unwrap();
        sheet.apply(TimesheetAction::Approve, 8.0, None).unwrap();
        sheet.apply(TimesheetAction::Reopen, 8.0, None).unwrap();
        assert_eq!(sheet.status, TimesheetStatus::Draft);
    }

    #[test]
    fn test_status_round_trip_str() {
        for status in [
            TimesheetStatus::Draft,
            TimesheetStatus::Submitted,
            TimesheetStatus::Approved,
            TimesheetStatus::Rejected,
        ] {
            assert_eq!(status.as_str().parse::<TimesheetStatus>().unwrap(), status);
        }
    }
}

//! Time entries and the rules for changing them from typed input.
//!
//! A time entry is one amount of hours for one user, project (and optional
//! task) on one date. The weekly grid addresses entries by that cell; the
//! store addresses them by id.
//!
//! ## Zero Means Delete
//!
//! When a cell is cleared, or a duration that rounds to `0.00` is typed, the
//! existing entry is deleted rather than stored with zero hours. Typing zero
//! into an empty cell does nothing. [`plan_change`] encodes these rules and
//! [`apply_change`] carries out the plan against any [`EntryStore`].

use crate::libs::duration::{round_for_storage, to_decimal_hours, DurationError, MAX_HOURS};
use anyhow::{anyhow, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq)]
pub struct TimeEntry {
    pub id: Option<i64>,
    pub user_id: String,
    pub project: String,
    pub task: Option<String>,
    pub date: NaiveDate,
    /// Always rounded with [`round_for_storage`].
    pub hours: f64,
    pub notes: Option<String>,
}

impl TimeEntry {
    pub fn new(user_id: &str, project: &str, task: Option<&str>, date: NaiveDate, hours: f64) -> Self {
        TimeEntry {
            id: None,
            user_id: user_id.to_string(),
            project: project.to_string(),
            task: task.map(|t| t.to_string()),
            date,
            hours: round_for_storage(hours),
            notes: None,
        }
    }

    pub fn with_notes(mut self, notes: Option<&str>) -> Self {
        self.notes = notes.map(|n| n.to_string());
        self
    }

    pub fn payload(&self) -> EntryPayload {
        EntryPayload {
            user_id: self.user_id.clone(),
            project: self.project.clone(),
            task: self.task.clone(),
            date: self.date,
            hours: round_for_storage(self.hours),
            notes: self.notes.clone(),
        }
    }
}

/// Grid position of an entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryKey {
    pub user_id: String,
    pub project: String,
    pub task: Option<String>,
    pub date: NaiveDate,
}

impl EntryKey {
    pub fn new(user_id: &str, project: &str, task: Option<&str>, date: NaiveDate) -> Self {
        EntryKey {
            user_id: user_id.to_string(),
            project: project.to_string(),
            task: task.map(|t| t.to_string()),
            date,
        }
    }
}

/// JSON body sent to the time-entry API.
///
/// `hours` is a plain number with at most two decimals, never a string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntryPayload {
    pub user_id: String,
    pub project: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub task: Option<String>,
    pub date: NaiveDate,
    pub hours: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// What a typed value does to a cell.
#[derive(Debug, Clone, PartialEq)]
pub enum EntryChange {
    Create { hours: f64 },
    Update { id: i64, hours: f64 },
    Delete { id: i64 },
    Unchanged,
}

/// Decides how `raw` changes the cell currently holding `existing`.
///
/// # Errors
///
/// Syntax and range errors from the normalizer are returned unchanged.
/// Empty input is never an error here: it clears the cell.
pub fn plan_change(existing: Option<&TimeEntry>, raw: &str) -> Result<EntryChange, DurationError> {
    let hours = match to_decimal_hours(raw) {
        Ok(hours) => round_for_storage(hours),
        Err(DurationError::Empty) => 0.0,
        Err(e) => return Err(e),
    };

    let change = match (existing.and_then(|e| e.id.map(|id| (id, e.hours))), hours == 0.0) {
        (Some((id, _)), true) => EntryChange::Delete { id },
        (None, true) => EntryChange::Unchanged,
        (Some((_, current)), false) if current == hours => EntryChange::Unchanged,
        (Some((id, _)), false) => EntryChange::Update { id, hours },
        (None, false) => EntryChange::Create { hours },
    };
    Ok(change)
}

/// Persistence for time entries, keyed by entry id.
pub trait EntryStore {
    /// Inserts `entry` and returns it with its new id.
    fn create(&mut self, entry: &TimeEntry) -> Result<TimeEntry>;
    /// Sets the hours of an entry. Returns `false` if no such entry exists.
    fn update_hours(&mut self, id: i64, hours: f64) -> Result<bool>;
    /// Returns `false` if no such entry exists.
    fn delete(&mut self, id: i64) -> Result<bool>;
    fn get(&mut self, id: i64) -> Result<Option<TimeEntry>>;
    fn find_by_key(&mut self, key: &EntryKey) -> Result<Option<TimeEntry>>;
    /// Entries of `user_id` dated within `from..=to`, ordered by date.
    fn list_range(&mut self, user_id: &str, from: NaiveDate, to: NaiveDate) -> Result<Vec<TimeEntry>>;
}

/// Carries out `change` for the cell at `key`.
///
/// Returns the entry as stored afterwards, or `None` when the cell is empty.
pub fn apply_change<S: EntryStore + ?Sized>(
    store: &mut S,
    key: &EntryKey,
    change: &EntryChange,
    notes: Option<&str>,
) -> Result<Option<TimeEntry>> {
    match change {
        EntryChange::Create { hours } => {
            let entry = TimeEntry::new(&key.user_id, &key.project, key.task.as_deref(), key.date, *hours).with_notes(notes);
            Ok(Some(store.create(&entry)?))
        }
        EntryChange::Update { id, hours } => {
            store.update_hours(*id, round_for_storage(*hours))?;
            store.get(*id)
        }
        EntryChange::Delete { id } => {
            store.delete(*id)?;
            Ok(None)
        }
        EntryChange::Unchanged => store.find_by_key(key),
    }
}

/// Outcome of [`add_hours`].
#[derive(Debug, Clone, PartialEq)]
pub struct AddedHours {
    /// The cell as stored afterwards.
    pub entry: TimeEntry,
    /// Hours that actually went into the cell.
    pub added: f64,
    /// Hours cut off by the 24:00 ceiling.
    pub dropped: f64,
}

/// Adds `hours` on top of whatever the cell at `key` already holds, never
/// letting the cell exceed 24:00.
///
/// Returns `None` and writes nothing when the cell is already full.
pub fn add_hours<S: EntryStore + ?Sized>(store: &mut S, key: &EntryKey, hours: f64) -> Result<Option<AddedHours>> {
    let hours = round_for_storage(hours);
    let existing = store.find_by_key(key)?;
    let current = existing.as_ref().map_or(0.0, |e| e.hours);

    let total = round_for_storage((current + hours).min(MAX_HOURS as f64));
    let added = round_for_storage(total - current);
    if added == 0.0 {
        return Ok(None);
    }

    let change = match existing {
        Some(entry) => {
            let id = entry.id.ok_or_else(|| anyhow!("stored entry for {} on {} has no id", key.project, key.date))?;
            EntryChange::Update { id, hours: total }
        }
        None => EntryChange::Create { hours: total },
    };
    let entry = apply_change(store, key, &change, None)?
        .ok_or_else(|| anyhow!("entry for {} on {} vanished while saving", key.project, key.date))?;

    Ok(Some(AddedHours {
        entry,
        added,
        dropped: round_for_storage(hours - added),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    /// Store backed by a map, enough to exercise `apply_change`.
    #[derive(Default)]
    struct MemoryStore {
        next_id: i64,
        entries: BTreeMap<i64, TimeEntry>,
    }

    impl EntryStore for MemoryStore {
        fn create(&mut self, entry: &TimeEntry) -> Result<TimeEntry> {
            self.next_id += 1;
            let mut stored = entry.clone();
            stored.id = Some(self.next_id);
            self.entries.insert(self.next_id, stored.clone());
            Ok(stored)
        }

        fn update_hours(&mut self, id: i64, hours: f64) -> Result<bool> {
            Ok(match self.entries.get_mut(&id) {
                Some(entry) => {
                    entry.hours = hours;
                    true
                }
                None => false,
            })
        }

        fn delete(&mut self, id: i64) -> Result<bool> {
            Ok(self.entries.remove(&id).is_some())
        }

        fn get(&mut self, id: i64) -> Result<Option<TimeEntry>> {
            Ok(self.entries.get(&id).cloned())
        }

        fn find_by_key(&mut self, key: &EntryKey) -> Result<Option<TimeEntry>> {
            Ok(self
                .entries
                .values()
                .find(|e| e.user_id == key.user_id && e.project == key.project && e.task == key.task && e.date == key.date)
                .cloned())
        }

        fn list_range(&mut self, user_id: &str, from: NaiveDate, to: NaiveDate) -> Result<Vec<TimeEntry>> {
            Ok(self
                .entries
                .values()
                .filter(|e| e.user_id == user_id && e.date >= from && e.date <= to)
                .cloned()
                .collect())
        }
    }

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 2).unwrap()
    }

    fn stored(hours: f64) -> TimeEntry {
        let mut entry = TimeEntry::new("alice", "Apollo", None, day(), hours);
        entry.id = Some(7);
        entry
    }

    #[test]
    fn test_plan_create() {
        assert_eq!(plan_change(None, "2:3").unwrap(), EntryChange::Create { hours: 2.5 });
        assert_eq!(plan_change(None, "8.75").unwrap(), EntryChange::Create { hours: 8.75 });
        assert_eq!(plan_change(None, "0:20").unwrap(), EntryChange::Create { hours: 0.33 });
    }

    #[test]
    fn test_plan_zero_and_empty() {
        assert_eq!(plan_change(None, "0").unwrap(), EntryChange::Unchanged);
        assert_eq!(plan_change(None, "").unwrap(), EntryChange::Unchanged);
        assert_eq!(plan_change(Some(&stored(2.0)), "").unwrap(), EntryChange::Delete { id: 7 });
        assert_eq!(plan_change(Some(&stored(2.0)), "0:00").unwrap(), EntryChange::Delete { id: 7 });
        assert_eq!(plan_change(Some(&stored(2.0)), "   ").unwrap(), EntryChange::Delete { id: 7 });
    }

    #[test]
    fn test_plan_below_storage_precision_deletes() {
        // 0.001h rounds to 0.00 on storage
        assert_eq!(plan_change(Some(&stored(1.0)), "0.001").unwrap(), EntryChange::Delete { id: 7 });
        assert_eq!(plan_change(None, "0.001").unwrap(), EntryChange::Unchanged);
    }

    #[test]
    fn test_plan_update_and_unchanged() {
        assert_eq!(plan_change(Some(&stored(2.5)), "2:30").unwrap(), EntryChange::Unchanged);
        assert_eq!(plan_change(Some(&stored(2.5)), "3").unwrap(), EntryChange::Update { id: 7, hours: 3.0 });
    }

    #[test]
    fn test_plan_errors_propagate() {
        assert!(matches!(plan_change(None, "abc"), Err(DurationError::SyntaxInvalid(_))));
        assert!(matches!(plan_change(Some(&stored(1.0)), "25"), Err(DurationError::RangeInvalid(_))));
    }

    #[test]
    fn test_apply_change_lifecycle() {
        let mut store = MemoryStore::default();
        let key = EntryKey::new("alice", "Apollo", None, day());

        let change = plan_change(None, "2:3").unwrap();
        let created = apply_change(&mut store, &key, &change, Some("kickoff")).unwrap().unwrap();
        assert_eq!(created.hours, 2.5);
        assert_eq!(created.notes.as_deref(), Some("kickoff"));

        let change = plan_change(Some(&created), "1:45").unwrap();
        let updated = apply_change(&mut store, &key, &change, None).unwrap().unwrap();
        assert_eq!(updated.hours, 1.75);
        assert_eq!(updated.id, created.id);

        let change = plan_change(Some(&updated), "").unwrap();
        assert!(apply_change(&mut store, &key, &change, None).unwrap().is_none());
        assert!(store.entries.is_empty());
    }

    #[test]
    fn test_payload_hours_is_number() {
        let entry = TimeEntry::new("alice", "Apollo", Some("Design"), day(), 8.756);
        let json = serde_json::to_value(entry.payload()).unwrap();
        assert_eq!(json["hours"], serde_json::json!(8.76));
        assert!(json["hours"].is_number());
        assert_eq!(json["date"], "2025-06-02");
        assert!(json.get("notes").is_none());
    }

    #[test]
    fn test_add_hours_to_empty_and_filled_cell() {
        let mut store = MemoryStore::default();
        let key = EntryKey::new("alice", "Apollo", None, day());

        let first = add_hours(&mut store, &key, 1.5).unwrap().unwrap();
        assert_eq!((first.entry.hours, first.added, first.dropped), (1.5, 1.5, 0.0));

        let second = add_hours(&mut store, &key, 0.75).unwrap().unwrap();
        assert_eq!((second.entry.hours, second.added, second.dropped), (2.25, 0.75, 0.0));
        assert_eq!(second.entry.id, first.entry.id);
    }

    #[test]
    fn test_add_hours_reports_what_the_cap_cut() {
        let mut store = MemoryStore::default();
        let key = EntryKey::new("alice", "Apollo", None, day());
        add_hours(&mut store, &key, 23.0).unwrap();

        let capped = add_hours(&mut store, &key, 3.0).unwrap().unwrap();
        assert_eq!(capped.entry.hours, 24.0);
        assert_eq!(capped.added, 1.0);
        assert_eq!(capped.dropped, 2.0);

        // A full cell takes nothing and stays untouched
        assert!(add_hours(&mut store, &key, 0.5).unwrap().is_none());
        assert_eq!(store.find_by_key(&key).unwrap().unwrap().hours, 24.0);
    }
}

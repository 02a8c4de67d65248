use super::db::Db;
use crate::libs::duration::round_for_storage;
use crate::libs::entry::{EntryKey, EntryStore, TimeEntry};
use anyhow::Result;
use chrono::NaiveDate;
use rusqlite::{params, Connection, OptionalExtension, Row};

const ENTRY_COLUMNS: &str = "id, user_id, project, task, date, hours, notes";
const INSERT_ENTRY: &str = "INSERT INTO entries (user_id, project, task, date, hours, notes) VALUES (?1, ?2, ?3, ?4, ?5, ?6)";
const UPDATE_HOURS: &str = "UPDATE entries SET hours = ?1, updated_at = CURRENT_TIMESTAMP WHERE id = ?2 AND deleted_at IS NULL";
const SOFT_DELETE: &str = "UPDATE entries SET deleted_at = CURRENT_TIMESTAMP WHERE id = ?1 AND deleted_at IS NULL";
const HARD_DELETE: &str = "DELETE FROM entries WHERE id = ?1";
const SELECT_REMOTE_ID: &str = "SELECT remote_id FROM entries WHERE id = ?1 AND deleted_at IS NULL";
const SET_REMOTE_ID: &str = "UPDATE entries SET remote_id = ?1 WHERE id = ?2";
const WHERE_LIVE: &str = "deleted_at IS NULL";

/// An entry paired with its id on the remote server, if it was synced.
#[derive(Debug, Clone, PartialEq)]
pub struct SyncRecord {
    pub entry: TimeEntry,
    pub remote_id: Option<String>,
}

/// SQLite-backed [`EntryStore`].
///
/// Entries that were already synced are soft-deleted so the next sync can
/// remove them remotely; unsynced entries are deleted outright.
pub struct Entries {
    pub conn: Connection,
}

impl Entries {
    pub fn new() -> Result<Entries> {
        Ok(Self::with_db(Db::new()?))
    }

    pub fn with_db(db: Db) -> Entries {
        Entries { conn: db.conn }
    }

    fn entry_from_row(row: &Row) -> rusqlite::Result<TimeEntry> {
        Ok(TimeEntry {
            id: row.get(0)?,
            user_id: row.get(1)?,
            project: row.get(2)?,
            task: row.get(3)?,
            date: row.get(4)?,
            hours: row.get(5)?,
            notes: row.get(6)?,
        })
    }

    /// Live entries in range together with their remote ids.
    pub fn sync_records(&mut self, user_id: &str, from: NaiveDate, to: NaiveDate) -> Result<Vec<SyncRecord>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {}, remote_id FROM entries WHERE user_id = ?1 AND date BETWEEN ?2 AND ?3 AND {} ORDER BY date, id",
            ENTRY_COLUMNS, WHERE_LIVE
        ))?;
        let records = stmt
            .query_map(params![user_id, from, to], |row| {
                Ok(SyncRecord {
                    entry: Self::entry_from_row(row)?,
                    remote_id: row.get(7)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(records)
    }

    /// Soft-deleted entries whose removal has not reached the server yet.
    pub fn pending_remote_deletes(&mut self, user_id: &str) -> Result<Vec<(i64, String)>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, remote_id FROM entries WHERE user_id = ?1 AND deleted_at IS NOT NULL AND remote_id IS NOT NULL")?;
        let pending = stmt
            .query_map([user_id], |row| Ok((row.get(0)?, row.get(1)?)))?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(pending)
    }

    pub fn set_remote_id(&mut self, id: i64, remote_id: &str) -> Result<()> {
        self.conn.execute(SET_REMOTE_ID, params![remote_id, id])?;
        Ok(())
    }

    /// Drops a soft-deleted row once the server has forgotten it too.
    pub fn purge(&mut self, id: i64) -> Result<()> {
        self.conn.execute(HARD_DELETE, [id])?;
        Ok(())
    }
}

impl EntryStore for Entries {
    fn create(&mut self, entry: &TimeEntry) -> Result<TimeEntry> {
        self.conn.execute(
            INSERT_ENTRY,
            params![
                entry.user_id,
                entry.project,
                entry.task,
                entry.date,
                round_for_storage(entry.hours),
                entry.notes
            ],
        )?;
        let mut stored = entry.clone();
        stored.id = Some(self.conn.last_insert_rowid());
        stored.hours = round_for_storage(entry.hours);
        Ok(stored)
    }

    fn update_hours(&mut self, id: i64, hours: f64) -> Result<bool> {
        let updated = self.conn.execute(UPDATE_HOURS, params![round_for_storage(hours), id])?;
        Ok(updated > 0)
    }

    fn delete(&mut self, id: i64) -> Result<bool> {
        let remote_id: Option<Option<String>> = self.conn.query_row(SELECT_REMOTE_ID, [id], |row| row.get(0)).optional()?;
        let affected = match remote_id {
            None => 0,
            Some(Some(_)) => self.conn.execute(SOFT_DELETE, [id])?,
            Some(None) => self.conn.execute(HARD_DELETE, [id])?,
        };
        Ok(affected > 0)
    }

    fn get(&mut self, id: i64) -> Result<Option<TimeEntry>> {
        let entry = self
            .conn
            .query_row(
                &format!("SELECT {} FROM entries WHERE id = ?1 AND {}", ENTRY_COLUMNS, WHERE_LIVE),
                [id],
                Self::entry_from_row,
            )
            .optional()?;
        Ok(entry)
    }

    fn find_by_key(&mut self, key: &EntryKey) -> Result<Option<TimeEntry>> {
        let entry = self
            .conn
            .query_row(
                &format!(
                    "SELECT {} FROM entries WHERE user_id = ?1 AND project = ?2 AND task IS ?3 AND date = ?4 AND {} ORDER BY id LIMIT 1",
                    ENTRY_COLUMNS, WHERE_LIVE
                ),
                params![key.user_id, key.project, key.task, key.date],
                Self::entry_from_row,
            )
            .optional()?;
        Ok(entry)
    }

    fn list_range(&mut self, user_id: &str, from: NaiveDate, to: NaiveDate) -> Result<Vec<TimeEntry>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {} FROM entries WHERE user_id = ?1 AND date BETWEEN ?2 AND ?3 AND {} ORDER BY date, id",
            ENTRY_COLUMNS, WHERE_LIVE
        ))?;
        let entries = stmt
            .query_map(params![user_id, from, to], Self::entry_from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(entries)
    }
}

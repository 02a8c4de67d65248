//! Manually added and removed grid rows, cached per user and week.
//!
//! The value is the JSON form of [`WeekRows`]. Saving an empty value removes
//! the cache row instead of keeping an empty document around.

use super::db::Db;
use crate::libs::week::{WeekRow, WeekRows};
use anyhow::Result;
use chrono::NaiveDate;
use rusqlite::{params, Connection, OptionalExtension};

const SELECT: &str = "SELECT rows FROM week_rows WHERE user_id = ?1 AND week_start = ?2";
const UPSERT: &str = "INSERT INTO week_rows (user_id, week_start, rows) VALUES (?1, ?2, ?3)
    ON CONFLICT(user_id, week_start) DO UPDATE SET rows = excluded.rows";
const DELETE: &str = "DELETE FROM week_rows WHERE user_id = ?1 AND week_start = ?2";

pub struct WeekRowsStore {
    pub conn: Connection,
}

impl WeekRowsStore {
    pub fn new() -> Result<WeekRowsStore> {
        Ok(Self::with_db(Db::new()?))
    }

    pub fn with_db(db: Db) -> WeekRowsStore {
        WeekRowsStore { conn: db.conn }
    }

    pub fn get(&mut self, user_id: &str, week_start: NaiveDate) -> Result<WeekRows> {
        let json: Option<String> = self.conn.query_row(SELECT, params![user_id, week_start], |row| row.get(0)).optional()?;
        match json {
            Some(json) => Ok(serde_json::from_str(&json)?),
            None => Ok(WeekRows::default()),
        }
    }

    pub fn set(&mut self, user_id: &str, week_start: NaiveDate, rows: &WeekRows) -> Result<()> {
        if rows.is_empty() {
            return self.clear(user_id, week_start);
        }
        let json = serde_json::to_string(rows)?;
        self.conn.execute(UPSERT, params![user_id, week_start, json])?;
        Ok(())
    }

    pub fn clear(&mut self, user_id: &str, week_start: NaiveDate) -> Result<()> {
        self.conn.execute(DELETE, params![user_id, week_start])?;
        Ok(())
    }

    pub fn add_row(&mut self, user_id: &str, week_start: NaiveDate, row: WeekRow) -> Result<WeekRows> {
        let mut rows = self.get(user_id, week_start)?;
        rows.add(row);
        self.set(user_id, week_start, &rows)?;
        Ok(rows)
    }

    pub fn remove_row(&mut self, user_id: &str, week_start: NaiveDate, row: WeekRow) -> Result<WeekRows> {
        let mut rows = self.get(user_id, week_start)?;
        rows.remove(row);
        self.set(user_id, week_start, &rows)?;
        Ok(rows)
    }
}

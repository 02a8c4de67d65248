use super::db::Db;
use crate::libs::timesheet::{Timesheet, TimesheetStatus};
use anyhow::Result;
use chrono::NaiveDate;
use rusqlite::{params, Connection, OptionalExtension};

const SELECT: &str = "SELECT status, comment FROM timesheets WHERE user_id = ?1 AND week_start = ?2";
const UPSERT: &str = "INSERT INTO timesheets (user_id, week_start, status, comment) VALUES (?1, ?2, ?3, ?4)
    ON CONFLICT(user_id, week_start) DO UPDATE SET
        status = excluded.status,
        comment = excluded.comment,
        updated_at = CURRENT_TIMESTAMP";

pub struct Timesheets {
    pub conn: Connection,
}

impl Timesheets {
    pub fn new() -> Result<Timesheets> {
        Ok(Self::with_db(Db::new()?))
    }

    pub fn with_db(db: Db) -> Timesheets {
        Timesheets { conn: db.conn }
    }

    /// Weeks that were never submitted are drafts.
    pub fn get(&mut self, user_id: &str, week_start: NaiveDate) -> Result<Timesheet> {
        let stored: Option<(String, Option<String>)> = self
            .conn
            .query_row(SELECT, params![user_id, week_start], |row| Ok((row.get(0)?, row.get(1)?)))
            .optional()?;

        let mut timesheet = Timesheet::new(user_id, week_start);
        if let Some((status, comment)) = stored {
            timesheet.status = status.parse::<TimesheetStatus>().map_err(anyhow::Error::msg)?;
            timesheet.comment = comment;
        }
        Ok(timesheet)
    }

    pub fn save(&mut self, timesheet: &Timesheet) -> Result<()> {
        self.conn.execute(
            UPSERT,
            params![
                timesheet.user_id,
                timesheet.week_start,
                timesheet.status.as_str(),
                timesheet.comment
            ],
        )?;
        Ok(())
    }
}

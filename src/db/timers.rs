use super::db::Db;
use crate::libs::timer::Timer;
use crate::libs::week::WeekRow;
use anyhow::Result;
use rusqlite::{params, Connection, OptionalExtension};

const SELECT: &str = "SELECT user_id, project, task, started_at, accumulated_secs, running FROM timers WHERE user_id = ?1";
const UPSERT: &str = "INSERT INTO timers (user_id, project, task, started_at, accumulated_secs, running)
    VALUES (?1, ?2, ?3, ?4, ?5, ?6)
    ON CONFLICT(user_id) DO UPDATE SET
        project = excluded.project,
        task = excluded.task,
        started_at = excluded.started_at,
        accumulated_secs = excluded.accumulated_secs,
        running = excluded.running";
const DELETE: &str = "DELETE FROM timers WHERE user_id = ?1";

/// At most one timer per user.
pub struct Timers {
    pub conn: Connection,
}

impl Timers {
    pub fn new() -> Result<Timers> {
        Ok(Self::with_db(Db::new()?))
    }

    pub fn with_db(db: Db) -> Timers {
        Timers { conn: db.conn }
    }

    pub fn get(&mut self, user_id: &str) -> Result<Option<Timer>> {
        let timer = self
            .conn
            .query_row(SELECT, [user_id], |row| {
                Ok(Timer {
                    user_id: row.get(0)?,
                    row: WeekRow {
                        project: row.get(1)?,
                        task: row.get(2)?,
                    },
                    started_at: row.get(3)?,
                    accumulated_secs: row.get(4)?,
                    running: row.get(5)?,
                })
            })
            .optional()?;
        Ok(timer)
    }

    pub fn save(&mut self, timer: &Timer) -> Result<()> {
        self.conn.execute(
            UPSERT,
            params![
                timer.user_id,
                timer.row.project,
                timer.row.task,
                timer.started_at,
                timer.accumulated_secs,
                timer.running
            ],
        )?;
        Ok(())
    }

    /// Returns `false` when the user had no timer.
    pub fn remove(&mut self, user_id: &str) -> Result<bool> {
        Ok(self.conn.execute(DELETE, [user_id])? > 0)
    }
}

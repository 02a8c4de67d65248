//! Versioned schema migrations.
//!
//! Every table is created here rather than by the individual stores, so the
//! schema version in the `migrations` table always describes the whole file.
//! Pending migrations run in one transaction when a [`Db`](super::db::Db) is
//! opened.
//!
//! ```rust
//! use timecard::db::migrations::{get_db_version, init_with_migrations};
//! use rusqlite::Connection;
//!
//! let mut conn = Connection::open_in_memory()?;
//! init_with_migrations(&mut conn)?;
//! assert!(get_db_version(&conn)? > 0);
//! # Ok::<(), anyhow::Error>(())
//! ```

use crate::libs::messages::Message;
use crate::{msg_debug, msg_error, msg_info};
use anyhow::Result;
use rusqlite::{params, Connection, OptionalExtension, Transaction};

const MIGRATIONS_TABLE: &str = "
CREATE TABLE IF NOT EXISTS migrations (
    id INTEGER PRIMARY KEY,
    version INTEGER NOT NULL UNIQUE,
    name TEXT NOT NULL,
    applied_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
)";

#[derive(Debug, Clone)]
struct Migration {
    version: u32,
    name: &'static str,
    up: fn(&Transaction) -> Result<()>,
}

/// Registry of all migrations, in version order.
pub struct MigrationManager {
    migrations: Vec<Migration>,
}

impl MigrationManager {
    pub fn new() -> Self {
        let mut manager = Self { migrations: Vec::new() };
        manager.register_migrations();
        manager
    }

    fn register_migrations(&mut self) {
        // Version 1: time entries, one row per logged amount
        self.add_migration(1, "create_entries", |tx| {
            tx.execute(
                "CREATE TABLE IF NOT EXISTS entries (
                    id INTEGER PRIMARY KEY,
                    user_id TEXT NOT NULL,
                    project TEXT NOT NULL,
                    task TEXT,
                    date DATE NOT NULL,
                    hours REAL NOT NULL,
                    notes TEXT,
                    created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP,
                    updated_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
                )",
                [],
            )?;
            tx.execute("CREATE INDEX IF NOT EXISTS idx_entries_user_date ON entries(user_id, date)", [])?;
            Ok(())
        });

        // Version 2: manual rows per user and week
        self.add_migration(2, "create_week_rows", |tx| {
            tx.execute(
                "CREATE TABLE IF NOT EXISTS week_rows (
                    user_id TEXT NOT NULL,
                    week_start DATE NOT NULL,
                    rows TEXT NOT NULL,
                    PRIMARY KEY (user_id, week_start)
                )",
                [],
            )?;
            Ok(())
        });

        // Version 3: one running or paused timer per user
        self.add_migration(3, "create_timers", |tx| {
            tx.execute(
                "CREATE TABLE IF NOT EXISTS timers (
                    user_id TEXT NOT NULL PRIMARY KEY,
                    project TEXT NOT NULL,
                    task TEXT,
                    started_at TIMESTAMP NOT NULL,
                    accumulated_secs INTEGER NOT NULL DEFAULT 0,
                    running BOOLEAN NOT NULL DEFAULT TRUE
                )",
                [],
            )?;
            Ok(())
        });

        // Version 4: approval status per user and week
        self.add_migration(4, "create_timesheets", |tx| {
            tx.execute(
                "CREATE TABLE IF NOT EXISTS timesheets (
                    user_id TEXT NOT NULL,
                    week_start DATE NOT NULL,
                    status TEXT NOT NULL DEFAULT 'draft',
                    comment TEXT,
                    updated_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP,
                    PRIMARY KEY (user_id, week_start)
                )",
                [],
            )?;
            Ok(())
        });

        // Version 5: remote ids and soft delete for server sync
        self.add_migration(5, "add_entry_sync_columns", |tx| {
            tx.execute("ALTER TABLE entries ADD COLUMN remote_id TEXT", [])?;
            tx.execute("ALTER TABLE entries ADD COLUMN deleted_at TIMESTAMP", [])?;
            tx.execute("CREATE INDEX idx_entries_deleted_at ON entries(deleted_at)", [])?;
            Ok(())
        });
    }

    fn add_migration(&mut self, version: u32, name: &'static str, up: fn(&Transaction) -> Result<()>) {
        self.migrations.push(Migration { version, name, up });
    }

    pub fn latest_version(&self) -> u32 {
        self.migrations.last().map(|m| m.version).unwrap_or(0)
    }

    pub fn run_migrations(&self, conn: &mut Connection) -> Result<()> {
        conn.execute(MIGRATIONS_TABLE, [])?;

        let current_version = self.get_current_version(conn)?;
        let pending: Vec<&Migration> = self.migrations.iter().filter(|m| m.version > current_version).collect();

        if pending.is_empty() {
            msg_debug!("Database is up to date");
            return Ok(());
        }

        msg_debug!(Message::MigrationsFound(pending.len()));

        let tx = conn.transaction()?;
        for migration in pending {
            msg_debug!(Message::RunningMigration(migration.version, migration.name.to_string()));

            match (migration.up)(&tx) {
                Ok(()) => {
                    tx.execute(
                        "INSERT INTO migrations (version, name) VALUES (?1, ?2)",
                        params![migration.version, migration.name],
                    )?;
                    msg_debug!(Message::MigrationCompleted(migration.version));
                }
                Err(e) => {
                    msg_error!(Message::MigrationFailed(migration.version, e.to_string()));
                    return Err(e);
                }
            }
        }
        tx.commit()?;

        // A brand-new database is not news; an upgraded one is.
        if current_version > 0 {
            msg_info!(Message::AllMigrationsCompleted);
        }

        Ok(())
    }

    fn get_current_version(&self, conn: &Connection) -> Result<u32> {
        let version: Option<u32> = conn
            .query_row("SELECT MAX(version) FROM migrations", [], |row| row.get::<_, Option<u32>>(0))
            .optional()?
            .flatten();

        Ok(version.unwrap_or(0))
    }

    pub fn get_migration_history(&self, conn: &Connection) -> Result<Vec<(u32, String)>> {
        let mut stmt = conn.prepare("SELECT version, name FROM migrations ORDER BY version")?;

        let history = stmt
            .query_map([], |row| Ok((row.get::<_, u32>(0)?, row.get::<_, String>(1)?)))?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(history)
    }
}

impl Default for MigrationManager {
    fn default() -> Self {
        Self::new()
    }
}

pub fn init_with_migrations(conn: &mut Connection) -> Result<()> {
    MigrationManager::new().run_migrations(conn)
}

pub fn get_db_version(conn: &Connection) -> Result<u32> {
    MigrationManager::new().get_current_version(conn)
}

pub fn needs_migration(conn: &Connection) -> Result<bool> {
    let manager = MigrationManager::new();
    Ok(manager.get_current_version(conn)? < manager.latest_version())
}

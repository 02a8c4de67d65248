//! Database layer for the timecard application.
//!
//! Everything is stored in one SQLite file inside the application data
//! directory. Each store owns its own connection, opened through [`db::Db`]
//! so migrations have run before the first query.
//!
//! ## Usage
//!
//! ```rust
//! use timecard::db::{db::Db, entries::Entries};
//! use timecard::libs::entry::{EntryStore, TimeEntry};
//! use chrono::NaiveDate;
//!
//! let mut entries = Entries::with_db(Db::open_in_memory()?);
//! let date = NaiveDate::from_ymd_opt(2025, 6, 2).unwrap();
//! let stored = entries.create(&TimeEntry::new("alice", "Apollo", None, date, 2.5))?;
//! assert!(stored.id.is_some());
//! # Ok::<(), anyhow::Error>(())
//! ```

/// Connection management.
pub mod db;

/// Versioned schema migrations.
pub mod migrations;

/// Time entries, including remote ids for server sync.
pub mod entries;

/// One timer per user.
pub mod timers;

/// Approval status per user and week.
pub mod timesheets;

/// Manually added and removed grid rows.
pub mod week_rows;

//! Core library modules for the timecard application.
//!
//! ## Features
//!
//! - **Duration Input**: Parsing of typed hours (`2:30`, `2.5`) into canonical form
//! - **Time Entries**: Entry model, zero-is-delete change planning, store trait
//! - **Weekly Grid**: Week boundaries, manual rows, per-day and per-row totals
//! - **Timers**: Pause-aware elapsed time
//! - **Editing**: Optimistic per-cell save state
//! - **Approval**: Submit/approve workflow for weeks
//! - **Infrastructure**: Configuration, data storage, messaging, console rendering
//!
//! ## Usage
//!
//! ```rust
//! use timecard::libs::duration::{normalize, round_for_storage, to_decimal_hours};
//!
//! let shown = normalize("8.75")?.to_string();
//! let stored = round_for_storage(to_decimal_hours(&shown)?);
//! assert_eq!((shown.as_str(), stored), ("8:45", 8.75));
//! # Ok::<(), timecard::libs::duration::DurationError>(())
//! ```

pub mod cell;
pub mod config;
pub mod data_storage;
pub mod duration;
pub mod entry;
pub mod formatter;
pub mod messages;
pub mod timer;
pub mod timesheet;
pub mod view;
pub mod week;

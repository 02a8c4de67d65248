//! # Timecard - weekly timesheets from the command line
//!
//! Log hours per project and day, review them as a weekly grid, track time
//! with a stopwatch, submit weeks for approval and sync entries to a
//! time-entry server.
//!
//! ## Features
//!
//! - **Forgiving input**: `2:30`, `2:3`, `2.5` and `.75` all parse; everything
//!   is shown as `H:MM` and stored as decimal hours with two places
//! - **Weekly grid**: Per-day and per-row totals, manually added rows
//! - **Timer**: Start, pause, resume and stop into today's cell
//! - **Approval**: Submitted and approved weeks are locked
//! - **Sync**: Push entries to a REST API
//!
//! ## Usage
//!
//! ```rust,no_run
//! use timecard::commands::Cli;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     Cli::menu().await
//! }
//! ```

pub mod api;
pub mod commands;
pub mod db;
pub mod libs;

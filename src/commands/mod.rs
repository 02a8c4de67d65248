//! Command-line interface for timecard.
//!
//! Each subcommand lives in its own module with an `Args` struct and a `cmd`
//! function. Commands that touch entries refuse to change a week whose
//! timesheet is submitted or approved.

pub mod delete;
pub mod entries;
pub mod init;
pub mod log;
pub mod parse;
pub mod rows;
pub mod sync;
pub mod timer;
pub mod timesheet;
pub mod week;

use crate::db::timesheets::Timesheets;
use crate::libs::config::UserConfig;
use crate::libs::messages::Message;
use crate::libs::week::{week_label, week_start};
use crate::{msg_bail_anyhow, msg_error_anyhow};
use anyhow::Result;
use chrono::{Duration, Local, NaiveDate};
use clap::{Parser, Subcommand};

#[derive(Debug, Subcommand)]
enum Commands {
    #[command(about = "Configuration initialization")]
    Init(init::InitArgs),
    #[command(about = "Show how a typed duration is read and stored")]
    Parse(parse::ParseArgs),
    #[command(about = "Set the hours of a project on a day (0 or \"\" clears)")]
    Log(log::LogArgs),
    #[command(about = "List the entries of a week")]
    Entries(entries::EntriesArgs),
    #[command(about = "Delete an entry by id")]
    Delete(delete::DeleteArgs),
    #[command(about = "Show the weekly grid with totals")]
    Week(week::WeekArgs),
    #[command(about = "Add or remove grid rows without hours")]
    Rows(rows::RowsArgs),
    #[command(about = "Track time with a stopwatch")]
    Timer(timer::TimerArgs),
    #[command(about = "Submit and approve weekly timesheets")]
    Timesheet(timesheet::TimesheetArgs),
    #[command(about = "Send a week's entries to the server")]
    Sync(sync::SyncArgs),
}

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
#[command(arg_required_else_help(true))]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub async fn menu() -> Result<()> {
        let cli = Self::parse();
        match cli.command {
            Commands::Init(args) => init::cmd(args),
            Commands::Parse(args) => parse::cmd(args),
            Commands::Log(args) => log::cmd(args),
            Commands::Entries(args) => entries::cmd(args),
            Commands::Delete(args) => delete::cmd(args),
            Commands::Week(args) => week::cmd(args),
            Commands::Rows(args) => rows::cmd(args),
            Commands::Timer(args) => timer::cmd(args),
            Commands::Timesheet(args) => timesheet::cmd(args),
            Commands::Sync(args) => sync::cmd(args).await,
        }
    }
}

/// Reads a `--date` value: `today`, `yesterday` or `YYYY-MM-DD`. No value
/// means today.
pub fn parse_date(input: Option<&str>) -> Result<NaiveDate> {
    let today = Local::now().date_naive();
    match input.map(str::trim) {
        None | Some("") | Some("today") => Ok(today),
        Some("yesterday") => Ok(today - Duration::days(1)),
        Some(s) => NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|_| msg_error_anyhow!(Message::InvalidDate(s.to_string()))),
    }
}

/// Fails when the week containing `date` is submitted or approved.
pub fn ensure_unlocked(user: &UserConfig, date: NaiveDate) -> Result<()> {
    let start = week_start(date, user.week_start);
    let timesheet = Timesheets::new()?.get(&user.user_id, start)?;
    if timesheet.is_locked() {
        msg_bail_anyhow!(Message::WeekLocked {
            week: week_label(start),
            status: timesheet.status.to_string(),
        });
    }
    Ok(())
}

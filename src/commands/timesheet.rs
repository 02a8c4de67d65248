use super::parse_date;
use crate::{
    db::{entries::Entries, timesheets::Timesheets},
    libs::{
        config::Config,
        duration::round_for_storage,
        entry::EntryStore,
        messages::Message,
        timesheet::TimesheetAction,
        week::{week_end, week_label, week_start},
    },
    msg_bail_anyhow, msg_info, msg_success,
};
use anyhow::Result;
use clap::{Args, Subcommand};

#[derive(Debug, Args)]
pub struct TimesheetArgs {
    #[command(subcommand)]
    command: TimesheetCommand,
}

#[derive(Debug, Subcommand)]
enum TimesheetCommand {
    /// Lock the week and send it for approval
    Submit {
        #[arg(short, long)]
        date: Option<String>,
    },
    Approve {
        #[arg(short, long)]
        date: Option<String>,
    },
    Reject {
        #[arg(short, long)]
        date: Option<String>,
        #[arg(short, long)]
        comment: Option<String>,
    },
    /// Unlock a rejected or approved week for editing
    Reopen {
        #[arg(short, long)]
        date: Option<String>,
    },
    Status {
        #[arg(short, long)]
        date: Option<String>,
    },
}

pub fn cmd(args: TimesheetArgs) -> Result<()> {
    let (action, date, comment) = match args.command {
        TimesheetCommand::Submit { date } => (TimesheetAction::Submit, date, None),
        TimesheetCommand::Approve { date } => (TimesheetAction::Approve, date, None),
        TimesheetCommand::Reject { date, comment } => (TimesheetAction::Reject, date, comment),
        TimesheetCommand::Reopen { date } => (TimesheetAction::Reopen, date, None),
        TimesheetCommand::Status { date } => return status(date),
    };

    let config = Config::read()?;
    let user_id = &config.user.user_id;
    let start = week_start(parse_date(date.as_deref())?, config.user.week_start);
    let label = week_label(start);

    let entries = Entries::new()?.list_range(user_id, start, week_end(start))?;
    let total = round_for_storage(entries.iter().map(|e| e.hours).sum());

    let mut timesheets = Timesheets::new()?;
    let mut timesheet = timesheets.get(user_id, start)?;
    if let Err(e) = timesheet.apply(action, total, comment.as_deref()) {
        msg_bail_anyhow!(Message::from_timesheet_error(&e, &label));
    }
    timesheets.save(&timesheet)?;

    match action {
        TimesheetAction::Submit => msg_success!(Message::TimesheetSubmitted(label)),
        TimesheetAction::Approve => msg_success!(Message::TimesheetApproved(label)),
        TimesheetAction::Reject => msg_success!(Message::TimesheetRejected(label)),
        TimesheetAction::Reopen => msg_success!(Message::TimesheetReopened(label)),
    }

    Ok(())
}

fn status(date: Option<String>) -> Result<()> {
    let config = Config::read()?;
    let start = week_start(parse_date(date.as_deref())?, config.user.week_start);
    let timesheet = Timesheets::new()?.get(&config.user.user_id, start)?;

    msg_info!(Message::TimesheetStatus {
        week: week_label(start),
        status: timesheet.status.to_string(),
        comment: timesheet.comment,
    });
    Ok(())
}

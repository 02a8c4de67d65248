use super::parse_date;
use crate::{
    db::{entries::Entries, timesheets::Timesheets, week_rows::WeekRowsStore},
    libs::{
        config::Config,
        entry::EntryStore,
        messages::Message,
        timesheet::TimesheetStatus,
        view::View,
        week::{week_end, week_label, week_start, WeekGrid},
    },
    msg_info, msg_print,
};
use anyhow::Result;
use clap::Args;

#[derive(Debug, Args)]
pub struct WeekArgs {
    /// Any day of the week to show
    #[arg(short, long)]
    date: Option<String>,
}

pub fn cmd(args: WeekArgs) -> Result<()> {
    let config = Config::read()?;
    let user_id = &config.user.user_id;
    let start = week_start(parse_date(args.date.as_deref())?, config.user.week_start);

    let entries = Entries::new()?.list_range(user_id, start, week_end(start))?;
    let manual = WeekRowsStore::new()?.get(user_id, start)?;
    let grid = WeekGrid::build(start, &entries, &manual);

    msg_print!(Message::WeekHeader(week_label(start)), true);
    View::week(&grid)?;

    let timesheet = Timesheets::new()?.get(user_id, start)?;
    if timesheet.status != TimesheetStatus::Draft {
        msg_info!(Message::TimesheetStatus {
            week: week_label(start),
            status: timesheet.status.to_string(),
            comment: timesheet.comment,
        });
    }

    Ok(())
}

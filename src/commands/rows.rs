use super::parse_date;
use crate::{
    db::week_rows::WeekRowsStore,
    libs::{
        config::Config,
        messages::Message,
        week::{week_label, week_start, WeekRow},
    },
    msg_info, msg_print, msg_success,
};
use anyhow::Result;
use clap::{Args, Subcommand};

#[derive(Debug, Args)]
pub struct RowsArgs {
    #[command(subcommand)]
    command: RowsCommand,
}

#[derive(Debug, Subcommand)]
enum RowsCommand {
    /// Show a row in the week even without hours
    Add {
        project: String,
        #[arg(short, long)]
        task: Option<String>,
        #[arg(short, long)]
        date: Option<String>,
    },
    /// Hide a row from the week unless it has hours
    Remove {
        project: String,
        #[arg(short, long)]
        task: Option<String>,
        #[arg(short, long)]
        date: Option<String>,
    },
    List {
        #[arg(short, long)]
        date: Option<String>,
    },
    /// Forget all added and removed rows of the week
    Clear {
        #[arg(short, long)]
        date: Option<String>,
    },
}

pub fn cmd(args: RowsArgs) -> Result<()> {
    let config = Config::read()?;
    let user_id = config.user.user_id.as_str();
    let first_day = config.user.week_start;
    let mut store = WeekRowsStore::new()?;

    match args.command {
        RowsCommand::Add { project, task, date } => {
            let start = week_start(parse_date(date.as_deref())?, first_day);
            let row = WeekRow::new(&project, task.as_deref());
            store.add_row(user_id, start, row.clone())?;
            msg_success!(Message::RowAdded(row.to_string()));
        }
        RowsCommand::Remove { project, task, date } => {
            let start = week_start(parse_date(date.as_deref())?, first_day);
            let row = WeekRow::new(&project, task.as_deref());
            store.remove_row(user_id, start, row.clone())?;
            msg_success!(Message::RowRemoved(row.to_string()));
        }
        RowsCommand::List { date } => {
            let start = week_start(parse_date(date.as_deref())?, first_day);
            let rows = store.get(user_id, start)?;
            if rows.added.is_empty() {
                msg_info!(Message::NoManualRows(week_label(start)));
            }
            for row in &rows.added {
                msg_print!(format!("+ {}", row));
            }
            for row in &rows.deleted {
                msg_print!(format!("- {}", row));
            }
        }
        RowsCommand::Clear { date } => {
            let start = week_start(parse_date(date.as_deref())?, first_day);
            store.clear(user_id, start)?;
            msg_success!(Message::RowsCleared(week_label(start)));
        }
    }

    Ok(())
}

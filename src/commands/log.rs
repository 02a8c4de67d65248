use super::{ensure_unlocked, parse_date};
use crate::{
    db::entries::Entries,
    libs::{
        cell::{CellEdit, CellOutcome},
        config::Config,
        duration::format_for_display,
        entry::{apply_change, plan_change, EntryChange, EntryKey, EntryStore},
        messages::Message,
        week::WeekRow,
    },
    msg_bail_anyhow, msg_debug, msg_info, msg_success,
};
use anyhow::Result;
use clap::Args;

#[derive(Debug, Args)]
pub struct LogArgs {
    project: String,
    /// Hours as 2:30, 2.5 or .75; 0 or an empty string clears the cell
    #[arg(allow_hyphen_values = true)]
    duration: String,
    #[arg(short, long)]
    task: Option<String>,
    /// today, yesterday or YYYY-MM-DD
    #[arg(short, long)]
    date: Option<String>,
    #[arg(short, long)]
    notes: Option<String>,
}

pub fn cmd(args: LogArgs) -> Result<()> {
    let config = Config::read()?;
    let date = parse_date(args.date.as_deref())?;
    ensure_unlocked(&config.user, date)?;

    let mut entries = Entries::new()?;
    let key = EntryKey::new(&config.user.user_id, &args.project, args.task.as_deref(), date);
    let existing = entries.find_by_key(&key)?;

    let change = match plan_change(existing.as_ref(), &args.duration) {
        Ok(change) => change,
        Err(e) => msg_bail_anyhow!(Message::from(&e)),
    };
    msg_debug!(format!("{:?}", change));

    let pending = match &change {
        EntryChange::Create { hours } | EntryChange::Update { hours, .. } => Some(*hours),
        EntryChange::Delete { .. } => None,
        EntryChange::Unchanged => {
            msg_info!(Message::EntryUnchanged);
            return Ok(());
        }
    };

    let mut cell = CellEdit::new(existing.as_ref().map(|e| e.hours));
    cell.begin_save(pending)?;

    let saved = apply_change(&mut entries, &key, &change, args.notes.as_deref());
    let failure = saved.as_ref().err().map(|e| e.to_string());

    let row = WeekRow::new(&args.project, args.task.as_deref()).to_string();
    let day = date.format("%a %Y-%m-%d").to_string();
    match cell.complete(saved.map(|entry| entry.map(|e| e.hours)))? {
        CellOutcome::Saved(Some(hours)) if existing.is_some() => msg_success!(Message::EntryUpdated {
            project: row,
            date: day,
            hours: format_for_display(hours),
        }),
        CellOutcome::Saved(Some(hours)) => msg_success!(Message::EntryCreated {
            project: row,
            date: day,
            hours: format_for_display(hours),
        }),
        CellOutcome::Saved(None) => msg_success!(Message::EntryCleared { project: row, date: day }),
        CellOutcome::RolledBack(_) => anyhow::bail!(failure.unwrap_or_default()),
    }

    Ok(())
}

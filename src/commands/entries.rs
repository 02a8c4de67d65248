use super::parse_date;
use crate::{
    db::entries::Entries,
    libs::{
        config::Config,
        entry::EntryStore,
        messages::Message,
        view::View,
        week::{week_end, week_label, week_start},
    },
    msg_info, msg_print,
};
use anyhow::Result;
use clap::Args;

#[derive(Debug, Args)]
pub struct EntriesArgs {
    /// Any day of the week to list
    #[arg(short, long)]
    date: Option<String>,
}

pub fn cmd(args: EntriesArgs) -> Result<()> {
    let config = Config::read()?;
    let start = week_start(parse_date(args.date.as_deref())?, config.user.week_start);

    let entries = Entries::new()?.list_range(&config.user.user_id, start, week_end(start))?;
    if entries.is_empty() {
        msg_info!(Message::NoEntriesForWeek(week_label(start)));
        return Ok(());
    }

    msg_print!(Message::EntriesHeader(week_label(start)), true);
    View::entries(&entries)
}

use super::ensure_unlocked;
use crate::{
    db::entries::Entries,
    libs::{config::Config, entry::EntryStore, messages::Message},
    msg_error, msg_info, msg_success,
};
use anyhow::Result;
use clap::Args;
use dialoguer::{theme::ColorfulTheme, Confirm};

#[derive(Debug, Args)]
pub struct DeleteArgs {
    id: i64,
    /// Skip the confirmation prompt
    #[arg(short, long)]
    yes: bool,
}

pub fn cmd(args: DeleteArgs) -> Result<()> {
    let config = Config::read()?;
    let mut entries = Entries::new()?;

    let entry = match entries.get(args.id)? {
        Some(entry) if entry.user_id == config.user.user_id => entry,
        _ => {
            msg_error!(Message::EntryNotFound(args.id));
            return Ok(());
        }
    };
    ensure_unlocked(&config.user, entry.date)?;

    let confirmed = args.yes
        || Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::ConfirmDeleteEntry(args.id).to_string())
            .default(false)
            .interact()?;

    if !confirmed {
        msg_info!(Message::OperationCancelled);
        return Ok(());
    }

    entries.delete(args.id)?;
    msg_success!(Message::EntryDeleted(args.id));
    Ok(())
}

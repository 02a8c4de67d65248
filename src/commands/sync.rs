use super::parse_date;
use crate::{
    api::{ServerClient, SyncPlan},
    db::entries::Entries,
    libs::{
        config::Config,
        messages::Message,
        week::{week_end, week_start},
    },
    msg_bail_anyhow, msg_error, msg_info, msg_success,
};
use anyhow::Result;
use clap::Args;

#[derive(Debug, Args)]
pub struct SyncArgs {
    /// Any day of the week to send
    #[arg(short, long)]
    date: Option<String>,
}

/// Pushes the week's entries and any pending deletions. A failed entry is
/// reported and skipped; it is retried on the next sync.
pub async fn cmd(args: SyncArgs) -> Result<()> {
    let config = Config::read()?;
    let Some(server) = config.server else {
        msg_bail_anyhow!(Message::ServerConfigNotFound);
    };
    let user_id = &config.user.user_id;
    let start = week_start(parse_date(args.date.as_deref())?, config.user.week_start);

    let mut entries = Entries::new()?;
    let plan = SyncPlan::load(&mut entries, user_id, start, week_end(start))?;
    if plan.is_empty() {
        msg_info!(Message::SyncCompleted(0));
        return Ok(());
    }
    msg_info!(Message::SyncStarted(plan.len()));

    let report = plan.push(&ServerClient::new(&server), &mut entries).await?;
    for failure in &report.failures {
        msg_error!(Message::from(failure));
    }

    msg_success!(Message::SyncCompleted(report.synced));
    Ok(())
}

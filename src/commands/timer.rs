use super::ensure_unlocked;
use crate::{
    db::{entries::Entries, timers::Timers},
    libs::{
        config::Config,
        duration::format_for_display,
        entry::{add_hours, EntryKey},
        formatter::format_elapsed,
        messages::Message,
        timer::Timer,
        week::WeekRow,
    },
    msg_bail_anyhow, msg_error_anyhow, msg_info, msg_success, msg_warning,
};
use anyhow::Result;
use chrono::{Local, NaiveDateTime};
use clap::{Args, Subcommand};

#[derive(Debug, Args)]
pub struct TimerArgs {
    #[command(subcommand)]
    command: TimerCommand,
}

#[derive(Debug, Subcommand)]
enum TimerCommand {
    Start {
        project: String,
        #[arg(short, long)]
        task: Option<String>,
    },
    Pause,
    Resume,
    /// Stop the timer and add its time to today's cell
    Stop,
    Status,
}

pub fn cmd(args: TimerArgs) -> Result<()> {
    let user_id = Config::read()?.user.user_id;
    let mut timers = Timers::new()?;
    let now = Local::now().naive_local();

    let current = timers.get(&user_id)?;

    match args.command {
        TimerCommand::Start { project, task } => {
            if let Some(running) = current {
                msg_bail_anyhow!(Message::TimerAlreadyRunning(running.row.to_string()));
            }
            let timer = Timer::start(&user_id, WeekRow::new(&project, task.as_deref()), now);
            timers.save(&timer)?;
            msg_success!(Message::TimerStarted(timer.row.to_string()));
        }
        TimerCommand::Pause => {
            let mut timer = require(current)?;
            if let Err(e) = timer.pause(now) {
                msg_bail_anyhow!(Message::from(&e));
            }
            timers.save(&timer)?;
            msg_success!(Message::TimerPaused(format_elapsed(&timer.elapsed(now))));
        }
        TimerCommand::Resume => {
            let mut timer = require(current)?;
            if let Err(e) = timer.resume(now) {
                msg_bail_anyhow!(Message::from(&e));
            }
            timers.save(&timer)?;
            msg_success!(Message::TimerResumed(timer.row.to_string()));
        }
        TimerCommand::Stop => stop(&mut timers, &require(current)?, now)?,
        TimerCommand::Status => {
            let timer = require(current)?;
            msg_info!(Message::TimerStatus {
                row: timer.row.to_string(),
                elapsed: format_elapsed(&timer.elapsed(now)),
                running: timer.running,
            });
        }
    }

    Ok(())
}

fn require(current: Option<Timer>) -> Result<Timer> {
    current.ok_or_else(|| msg_error_anyhow!(Message::TimerNotRunning))
}

/// Adds the timer's hours to today's cell for its row, capped at 24:00.
/// When the cell is already full the timer keeps running.
fn stop(timers: &mut Timers, timer: &Timer, now: NaiveDateTime) -> Result<()> {
    let hours = match timer.stop(now) {
        Ok(hours) => hours,
        Err(e) => {
            timers.remove(&timer.user_id)?;
            msg_warning!(Message::from(&e));
            return Ok(());
        }
    };

    let config = Config::read()?;
    let date = now.date();
    ensure_unlocked(&config.user, date)?;

    let mut entries = Entries::new()?;
    let key = EntryKey::new(&timer.user_id, &timer.row.project, timer.row.task.as_deref(), date);
    let Some(result) = add_hours(&mut entries, &key, hours)? else {
        msg_bail_anyhow!(Message::TimerCellFull(timer.row.to_string()));
    };
    timers.remove(&timer.user_id)?;

    if result.dropped > 0.0 {
        msg_warning!(Message::TimerCapped {
            row: timer.row.to_string(),
            dropped: format_for_display(result.dropped),
        });
    }
    msg_success!(Message::TimerStopped {
        row: timer.row.to_string(),
        hours: format_for_display(result.added),
    });
    Ok(())
}

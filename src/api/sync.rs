//! Reconciles local entries with the remote API.
//!
//! Entries without a remote id are created and the returned id is stored;
//! entries that have one are updated. Synced entries deleted locally are
//! deleted remotely and then purged. A failure on one entry is recorded and
//! the rest carry on; the failed entry is retried on the next sync.

use super::server::EntryApi;
use crate::db::entries::{Entries, SyncRecord};
use crate::libs::messages::Message;
use crate::msg_debug;
use anyhow::Result;
use chrono::NaiveDate;

#[derive(Debug, Clone, PartialEq)]
pub struct SyncFailure {
    pub entry_id: i64,
    pub error: String,
    /// Set when the server created the entry but its id could not be saved
    /// locally. The next sync will create the entry again.
    pub orphaned_remote_id: Option<String>,
}

#[derive(Debug, Default)]
pub struct SyncReport {
    pub synced: usize,
    pub failures: Vec<SyncFailure>,
}

impl SyncReport {
    fn fail(&mut self, entry_id: i64, error: anyhow::Error, orphaned_remote_id: Option<String>) {
        self.failures.push(SyncFailure {
            entry_id,
            error: error.to_string(),
            orphaned_remote_id,
        });
    }
}

/// Everything one sync run has to send.
pub struct SyncPlan {
    records: Vec<SyncRecord>,
    deletions: Vec<(i64, String)>,
}

impl SyncPlan {
    /// Live entries of `user_id` in `from..=to` plus every pending remote delete.
    pub fn load(entries: &mut Entries, user_id: &str, from: NaiveDate, to: NaiveDate) -> Result<Self> {
        Ok(Self {
            records: entries.sync_records(user_id, from, to)?,
            deletions: entries.pending_remote_deletes(user_id)?,
        })
    }

    pub fn len(&self) -> usize {
        self.records.len() + self.deletions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Sends the plan through `api`. Only local database errors abort the run.
    pub async fn push<A: EntryApi>(self, api: &A, entries: &mut Entries) -> Result<SyncReport> {
        let mut report = SyncReport::default();

        for record in self.records {
            let Some(id) = record.entry.id else {
                continue;
            };
            match record.remote_id {
                Some(remote_id) => match api.update(&remote_id, record.entry.hours).await {
                    Ok(()) => report.synced += 1,
                    Err(e) => report.fail(id, e, None),
                },
                None => match api.create(&record.entry.payload()).await {
                    Ok(remote_id) => match entries.set_remote_id(id, &remote_id) {
                        Ok(()) => report.synced += 1,
                        Err(e) => report.fail(id, e, Some(remote_id)),
                    },
                    Err(e) => report.fail(id, e, None),
                },
            }
        }

        for (id, remote_id) in self.deletions {
            match api.delete(&remote_id).await {
                Ok(found) => {
                    if !found {
                        msg_debug!(Message::SyncRemoteAlreadyGone(remote_id));
                    }
                    entries.purge(id)?;
                    report.synced += 1;
                }
                Err(e) => report.fail(id, e, None),
            }
        }

        Ok(report)
    }
}

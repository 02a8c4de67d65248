//! Client for the remote time-entry API.
//!
//! Endpoints, relative to the configured base URL:
//!
//! - `POST   /time-entries`       create, responds with `{ "id": ... }`
//! - `PATCH  /time-entries/{id}`  update hours
//! - `DELETE /time-entries/{id}`  delete
//!
//! Requests carry the configured token as `Authorization: Bearer`. Hours are
//! always sent as a JSON number rounded to two decimals.

use crate::libs::config::ServerConfig;
use crate::libs::duration::round_for_storage;
use crate::libs::entry::EntryPayload;
use anyhow::{anyhow, Result};
use reqwest::{header, Client, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::Value;

const ENTRIES_PATH: &str = "time-entries";

#[derive(Debug, Serialize, PartialEq)]
pub struct HoursUpdate {
    pub hours: f64,
}

#[derive(Debug, Deserialize)]
struct CreatedEntry {
    id: Value,
}

/// The remote operations sync needs, so the reconciliation loop can run
/// against something other than a live server.
#[allow(async_fn_in_trait)]
pub trait EntryApi {
    /// Creates an entry and returns its remote id.
    async fn create(&self, payload: &EntryPayload) -> Result<String>;
    async fn update(&self, remote_id: &str, hours: f64) -> Result<()>;
    /// Returns `false` when the server no longer had the entry.
    async fn delete(&self, remote_id: &str) -> Result<bool>;
}

pub struct ServerClient {
    client: Client,
    config: ServerConfig,
}

impl ServerClient {
    pub fn new(config: &ServerConfig) -> Self {
        Self {
            client: Client::new(),
            config: config.clone(),
        }
    }

    /// Collection URL; `remote_id` selects a single entry.
    pub fn entries_url(&self, remote_id: Option<&str>) -> String {
        let base = self.config.api_url.trim_end_matches('/');
        match remote_id {
            Some(id) => format!("{}/{}/{}", base, ENTRIES_PATH, id),
            None => format!("{}/{}", base, ENTRIES_PATH),
        }
    }

    /// Request body for a create, with hours rounded for storage.
    pub fn create_body(payload: &EntryPayload) -> EntryPayload {
        EntryPayload {
            hours: round_for_storage(payload.hours),
            ..payload.clone()
        }
    }

    pub fn update_body(hours: f64) -> HoursUpdate {
        HoursUpdate {
            hours: round_for_storage(hours),
        }
    }

    /// Servers answer with either numeric or string ids.
    fn remote_id(id: &Value) -> Result<String> {
        match id {
            Value::String(s) if !s.is_empty() => Ok(s.clone()),
            Value::Number(n) => Ok(n.to_string()),
            other => Err(anyhow!("unexpected entry id in server response: {}", other)),
        }
    }

    /// An entry that is already gone on the server counts as deleted.
    fn delete_outcome(status: StatusCode, remote_id: &str) -> Result<bool> {
        match status {
            StatusCode::NOT_FOUND => Ok(false),
            s if s.is_success() => Ok(true),
            s => Err(anyhow!("server answered {} deleting entry {}", s, remote_id)),
        }
    }
}

impl EntryApi for ServerClient {
    async fn create(&self, payload: &EntryPayload) -> Result<String> {
        let res = self
            .client
            .post(self.entries_url(None))
            .bearer_auth(&self.config.auth_token)
            .json(&Self::create_body(payload))
            .send()
            .await?
            .error_for_status()?;

        let created = res.json::<CreatedEntry>().await?;
        Self::remote_id(&created.id)
    }

    async fn update(&self, remote_id: &str, hours: f64) -> Result<()> {
        self.client
            .patch(self.entries_url(Some(remote_id)))
            .bearer_auth(&self.config.auth_token)
            .json(&Self::update_body(hours))
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }

    async fn delete(&self, remote_id: &str) -> Result<bool> {
        let res = self
            .client
            .delete(self.entries_url(Some(remote_id)))
            .bearer_auth(&self.config.auth_token)
            .header(header::ACCEPT, "application/json")
            .send()
            .await?;

        Self::delete_outcome(res.status(), remote_id)
    }
}

//! Configuration management for the timecard application.
//!
//! Settings live in `config.json` inside the application data directory
//! (see [`DataStorage`]). A missing file is not an error: [`Config::read`]
//! falls back to defaults so the tool works before `timecard init` is run.
//!
//! ## Sections
//!
//! - **user**: whose entries are being logged and which weekday starts a week
//! - **server**: optional time-entry API used by `timecard sync`
//!
//! ```rust,no_run
//! use timecard::libs::config::Config;
//!
//! let config = Config::read()?;
//! println!("Logging time as {}", config.user.user_id);
//! # Ok::<(), anyhow::Error>(())
//! ```

use super::data_storage::DataStorage;
use crate::libs::messages::Message;
use crate::libs::week::WeekStart;
use crate::msg_print;
use anyhow::Result;
use dialoguer::{theme::ColorfulTheme, Input, MultiSelect};
use serde::{Deserialize, Serialize};
use std::fs::{self, File};

pub const CONFIG_FILE_NAME: &str = "config.json";

/// A configurable section, listed in the interactive setup.
#[derive(Debug, Clone)]
pub struct ConfigModule {
    pub key: String,
    pub name: String,
}

/// Identity and calendar settings for the local user.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct UserConfig {
    /// Identifier stored on every entry and used as the week-rows cache key.
    pub user_id: String,

    /// Weekday a timesheet week starts on.
    #[serde(default)]
    pub week_start: WeekStart,
}

/// Time-entry API that receives synced entries.
///
/// Entries are sent as JSON with `hours` as a number rounded to two decimals.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ServerConfig {
    /// Base URL, without the `/time-entries` suffix.
    pub api_url: String,

    /// Sent as a bearer token.
    pub auth_token: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub user: UserConfig,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub server: Option<ServerConfig>,
}

impl Default for UserConfig {
    /// Uses the login name of the current OS user, or `"me"`.
    fn default() -> Self {
        let user_id = std::env::var("USER")
            .or_else(|_| std::env::var("USERNAME"))
            .unwrap_or_else(|_| "me".to_string());
        UserConfig {
            user_id,
            week_start: WeekStart::default(),
        }
    }
}

impl UserConfig {
    pub fn module() -> ConfigModule {
        ConfigModule {
            key: "user".to_string(),
            name: "User".to_string(),
        }
    }

    pub fn init(config: &UserConfig) -> Result<Self> {
        msg_print!(Message::ConfigModuleUser);
        Ok(Self {
            user_id: Input::with_theme(&ColorfulTheme::default())
                .with_prompt(Message::PromptUserId.to_string())
                .default(config.user_id.clone())
                .interact_text()?,
            week_start: Input::with_theme(&ColorfulTheme::default())
                .with_prompt(Message::PromptWeekStart.to_string())
                .default(config.week_start)
                .interact_text()?,
        })
    }
}

impl ServerConfig {
    pub fn module() -> ConfigModule {
        ConfigModule {
            key: "server".to_string(),
            name: "Server".to_string(),
        }
    }

    pub fn init(config: &Option<ServerConfig>) -> Result<Self> {
        let config = config.clone().unwrap_or(Self {
            api_url: "".to_string(),
            auth_token: "".to_string(),
        });

        msg_print!(Message::ConfigModuleServer);
        Ok(Self {
            api_url: Input::with_theme(&ColorfulTheme::default())
                .with_prompt(Message::PromptServerApiUrl.to_string())
                .default(config.api_url)
                .interact_text()?,
            auth_token: Input::with_theme(&ColorfulTheme::default())
                .with_prompt(Message::PromptServerAuthToken.to_string())
                .default(config.auth_token)
                .interact_text()?,
        })
    }
}

impl Config {
    /// Reads the configuration from the default data directory.
    pub fn read() -> Result<Config> {
        Self::read_from(&DataStorage::new())
    }

    /// Reads the configuration from `storage`, or returns defaults when no
    /// file exists yet.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn read_from(storage: &DataStorage) -> Result<Config> {
        let config_file_path = storage.get_path(CONFIG_FILE_NAME)?;
        if !config_file_path.exists() {
            return Ok(Config::default());
        }

        let config_str = fs::read_to_string(config_file_path)?;
        let config: Config = serde_json::from_str(&config_str)?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&DataStorage::new())
    }

    /// Writes pretty-printed JSON, replacing any existing file.
    pub fn save_to(&self, storage: &DataStorage) -> Result<()> {
        let config_file_path = storage.get_path(CONFIG_FILE_NAME)?;
        let config_file = File::create(config_file_path)?;
        serde_json::to_writer_pretty(&config_file, &self)?;
        Ok(())
    }

    /// Removes the configuration file. Missing files are ignored.
    pub fn delete_from(storage: &DataStorage) -> Result<()> {
        let config_file_path = storage.get_path(CONFIG_FILE_NAME)?;
        if config_file_path.exists() {
            fs::remove_file(config_file_path)?;
        }
        Ok(())
    }

    /// Runs the interactive setup wizard, starting from the saved values.
    pub fn init() -> Result<Self> {
        let mut config = Self::read().unwrap_or_default();

        let modules = vec![UserConfig::module(), ServerConfig::module()];
        let selected = MultiSelect::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::PromptSelectModules.to_string())
            .items(&modules.iter().map(|module| &module.name).collect::<Vec<_>>())
            .interact()?;

        for &selection in &selected {
            match modules[selection].key.as_str() {
                "user" => config.user = UserConfig::init(&config.user)?,
                "server" => config.server = Some(ServerConfig::init(&config.server)?),
                _ => {}
            }
        }

        Ok(config)
    }
}

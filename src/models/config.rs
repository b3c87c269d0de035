//! Application configuration structures.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{AppError, Result};

/// Root application configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// HTTP client behavior settings
    #[serde(default)]
    pub http: HttpConfig,

    /// Keyword and location matching rules
    #[serde(default)]
    pub filters: FiltersConfig,

    /// Telegram delivery settings
    #[serde(default)]
    pub notify: NotifyConfig,

    /// Data file locations
    #[serde(default)]
    pub paths: PathsConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            AppError::config(format!("cannot read config file {}: {}", path.display(), e))
        })?;
        Ok(toml::from_str(&content)?)
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        if self.http.user_agent.trim().is_empty() {
            return Err(AppError::config("http.user_agent is empty"));
        }
        if self.http.timeout_secs == 0 {
            return Err(AppError::config("http.timeout_secs must be > 0"));
        }
        if Url::parse(&self.notify.api_base).is_err() {
            return Err(AppError::config(format!(
                "notify.api_base is not a valid URL: {}",
                self.notify.api_base
            )));
        }
        Ok(())
    }
}

/// HTTP client behavior settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// User-Agent header for outbound requests
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,

    /// Request timeout in seconds
    #[serde(default = "defaults::timeout")]
    pub timeout_secs: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            user_agent: defaults::user_agent(),
            timeout_secs: defaults::timeout(),
        }
    }
}

/// Keyword and location matching rules.
///
/// Empty `include` or `locations_include` lists mean "no constraint",
/// not "match nothing".
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct FiltersConfig {
    /// At least one must appear in title, team, or location
    #[serde(default)]
    pub include: Vec<String>,

    /// Any occurrence in title, team, or location drops the job
    #[serde(default)]
    pub exclude: Vec<String>,

    /// At least one must appear in the location field
    #[serde(default)]
    pub locations_include: Vec<String>,
}

/// Telegram delivery settings.
///
/// The bot token and chat id are deliberately not part of the file;
/// they come from the environment (see [`telegram_credentials`]).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotifyConfig {
    /// Telegram API base URL
    #[serde(default = "defaults::api_base")]
    pub api_base: String,

    /// Suppress link previews in digest messages
    #[serde(default = "defaults::disable_link_previews")]
    pub disable_link_previews: bool,
}

impl Default for NotifyConfig {
    fn default() -> Self {
        Self {
            api_base: defaults::api_base(),
            disable_link_previews: defaults::disable_link_previews(),
        }
    }
}

/// Data file locations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Tracked board list (TOML, rewritten by the bot)
    #[serde(default = "defaults::boards_file")]
    pub boards_file: PathBuf,

    /// Seen-state file (JSON)
    #[serde(default = "defaults::state_file")]
    pub state_file: PathBuf,

    /// Telegram update offset file (JSON)
    #[serde(default = "defaults::offset_file")]
    pub offset_file: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            boards_file: defaults::boards_file(),
            state_file: defaults::state_file(),
            offset_file: defaults::offset_file(),
        }
    }
}

/// Read the Telegram bot token and authorized chat id from the environment.
pub fn telegram_credentials() -> Result<(String, String)> {
    let token = env::var("TELEGRAM_BOT_TOKEN").unwrap_or_default();
    let chat_id = env::var("TELEGRAM_CHAT_ID").unwrap_or_default();
    let token = token.trim().to_string();
    let chat_id = chat_id.trim().to_string();

    if token.is_empty() || chat_id.is_empty() {
        return Err(AppError::config(
            "TELEGRAM_BOT_TOKEN and TELEGRAM_CHAT_ID environment variables are required",
        ));
    }
    Ok((token, chat_id))
}

mod defaults {
    use std::path::PathBuf;

    pub fn user_agent() -> String {
        "Mozilla/5.0 (compatible; scout/0.1)".to_string()
    }

    pub fn timeout() -> u64 {
        20
    }

    pub fn api_base() -> String {
        "https://api.telegram.org".to_string()
    }

    pub fn disable_link_previews() -> bool {
        true
    }

    pub fn boards_file() -> PathBuf {
        PathBuf::from("data/boards.toml")
    }

    pub fn state_file() -> PathBuf {
        PathBuf::from("data/seen_jobs.json")
    }

    pub fn offset_file() -> PathBuf {
        PathBuf::from("data/telegram_offset.json")
    }
}

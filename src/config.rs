use std::{fmt, path::PathBuf};

use compact_str::CompactString;
use directories::BaseDirs;
use serde::{Deserialize, Serialize};

use crate::{
    client::config::{DEFAULT_ENDPOINT, DEFAULT_TELEGRAM_API_URL},
    result::{BotError, Result},
};

pub const PRACTICUM_TOKEN_VAR: &str = "PRACTICUM_TOKEN";
pub const TELEGRAM_TOKEN_VAR: &str = "TOKEN";
pub const TELEGRAM_CHAT_ID_VAR: &str = "CHAT_ID";

/// Non-secret settings, stored as TOML
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BotConfig {
    pub endpoint: CompactString,
    pub telegram_api_url: CompactString,
    pub retry_period_secs: u64,
    pub request_timeout_secs: u64,
    pub log_level: CompactString,
    pub log_dir: Option<PathBuf>,
    pub json_logs: bool,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.into(),
            telegram_api_url: DEFAULT_TELEGRAM_API_URL.into(),
            retry_period_secs: 600,
            request_timeout_secs: 30,
            log_level: "info".into(),
            log_dir: None,
            json_logs: false,
        }
    }
}

pub fn default_config_path() -> PathBuf {
    if let Some(dirs) = BaseDirs::new() {
        dirs.config_dir().join("homework-bot.toml")
    } else {
        PathBuf::from("homework-bot.toml")
    }
}

/// Load settings, writing the defaults if the file does not exist yet
pub fn load_config(config_file: &PathBuf) -> Result<BotConfig> {
    confy::load_path(config_file).map_err(|e| BotError::config_load(config_file.clone(), e))
}

/// Secrets read from the environment at startup
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    pub practicum_token: CompactString,
    pub telegram_token: CompactString,
    pub telegram_chat_id: CompactString,
}

impl Credentials {
    pub fn new(
        practicum_token: impl Into<CompactString>,
        telegram_token: impl Into<CompactString>,
        telegram_chat_id: impl Into<CompactString>,
    ) -> Self {
        Self {
            practicum_token: practicum_token.into(),
            telegram_token: telegram_token.into(),
            telegram_chat_id: telegram_chat_id.into(),
        }
    }

    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read each variable through `lookup`; absent ones become empty strings
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let read = |key: &str| -> CompactString { lookup(key).unwrap_or_default().trim().into() };

        Self {
            practicum_token: read(PRACTICUM_TOKEN_VAR),
            telegram_token: read(TELEGRAM_TOKEN_VAR),
            telegram_chat_id: read(TELEGRAM_CHAT_ID_VAR),
        }
    }

    /// True only if all three secrets are present
    pub fn check_tokens(&self) -> bool {
        self.missing().is_empty()
    }

    /// Names of the environment variables that were absent or empty
    pub fn missing(&self) -> Vec<&'static str> {
        [
            (PRACTICUM_TOKEN_VAR, &self.practicum_token),
            (TELEGRAM_TOKEN_VAR, &self.telegram_token),
            (TELEGRAM_CHAT_ID_VAR, &self.telegram_chat_id),
        ]
        .into_iter()
        .filter(|(_, value)| value.is_empty())
        .map(|(name, _)| name)
        .collect()
    }

    pub fn require(self) -> Result<Self> {
        if self.check_tokens() {
            Ok(self)
        } else {
            Err(BotError::MissingCredentials(self.missing()))
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let redact = |value: &CompactString| if value.is_empty() { "<missing>" } else { "<redacted>" };

        f.debug_struct("Credentials")
            .field("practicum_token", &redact(&self.practicum_token))
            .field("telegram_token", &redact(&self.telegram_token))
            .field("telegram_chat_id", &self.telegram_chat_id)
            .finish()
    }
}

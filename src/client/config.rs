//! Configuration for the homework API client and Telegram notifier

use std::time::Duration;

use compact_str::CompactString;

use crate::{
    config::{BotConfig, Credentials},
    result::{BotError, Result},
};

pub const DEFAULT_ENDPOINT: &str = "https://practicum.yandex.ru/api/user_api/homework_statuses/";
pub const DEFAULT_TELEGRAM_API_URL: &str = "https://api.telegram.org";

/// Main configuration for the API client and notifier
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Homework statuses endpoint
    pub endpoint: CompactString,
    /// Telegram Bot API base URL
    pub telegram_api_url: CompactString,
    pub credentials: Credentials,
    pub polling: PollingConfig,
    pub request: RequestConfig,
}

/// Polling cadence
#[derive(Debug, Clone)]
pub struct PollingConfig {
    /// Sleep between two poll cycles
    pub interval: Duration,
}

/// HTTP request configuration
#[derive(Debug, Clone)]
pub struct RequestConfig {
    /// Request timeout
    pub timeout: Duration,
}

impl Default for PollingConfig {
    fn default() -> Self {
        Self { interval: Duration::from_secs(600) }
    }
}

impl Default for RequestConfig {
    fn default() -> Self {
        Self { timeout: Duration::from_secs(30) }
    }
}

impl ClientConfig {
    /// Create a client configuration with default endpoints and timings
    pub fn new(credentials: Credentials) -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.into(),
            telegram_api_url: DEFAULT_TELEGRAM_API_URL.into(),
            credentials,
            polling: PollingConfig::default(),
            request: RequestConfig::default(),
        }
    }

    /// Build from the loaded settings file and environment credentials
    pub fn from_settings(config: &BotConfig, credentials: Credentials) -> Self {
        Self::new(credentials)
            .with_endpoint(config.endpoint.clone())
            .with_telegram_api_url(config.telegram_api_url.clone())
            .with_polling(PollingConfig {
                interval: Duration::from_secs(config.retry_period_secs),
            })
            .with_request(RequestConfig {
                timeout: Duration::from_secs(config.request_timeout_secs),
            })
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        validate_url("endpoint", &self.endpoint)?;
        validate_url("telegram_api_url", &self.telegram_api_url)?;

        if self.polling.interval.is_zero() {
            return Err(BotError::config_validation(
                "retry_period_secs",
                "Polling interval must be greater than zero",
            ));
        }

        if self.request.timeout.is_zero() {
            return Err(BotError::config_validation(
                "request_timeout_secs",
                "Timeout must be greater than zero",
            ));
        }

        Ok(())
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<CompactString>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn with_telegram_api_url(mut self, url: impl Into<CompactString>) -> Self {
        self.telegram_api_url = url.into();
        self
    }

    /// Set polling configuration
    pub fn with_polling(mut self, polling: PollingConfig) -> Self {
        self.polling = polling;
        self
    }

    /// Set request configuration
    pub fn with_request(mut self, request: RequestConfig) -> Self {
        self.request = request;
        self
    }
}

fn validate_url(field: &'static str, value: &str) -> Result<()> {
    let url = url::Url::parse(value)
        .map_err(|e| BotError::config_validation(field, format!("not a valid URL: {e}")))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(BotError::config_validation(
            field,
            "URL must start with http:// or https://",
        ));
    }

    Ok(())
}

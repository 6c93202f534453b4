use std::path::PathBuf;

use compact_str::{CompactString, ToCompactString};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, BotError>;

/// Poll-cycle variants are sent to the chat as is, so their texts are Russian.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BotError {
    #[error("В ответе API нет ключа `{field}`.")]
    MissingField { field: &'static str },

    #[error("Неверный тип данных в {what}: ожидается {expected}.")]
    TypeMismatch { what: &'static str, expected: &'static str },

    #[error("Неизвестный статус проверки работы: {0}")]
    UnrecognizedStatus(CompactString),

    #[error("Не удалось отправить сообщение в Telegram: {0}")]
    DeliveryFailure(CompactString),

    #[error("API сервис недоступен: {0}")]
    Transport(CompactString),

    #[error("Страница API недоступна (HTTP {status}).")]
    EndpointUnavailable { status: u16 },

    #[error("API вернул ответ не в формате JSON: {0}")]
    MalformedBody(CompactString),

    #[error("Required environment variables are missing: {}", .0.join(", "))]
    MissingCredentials(Vec<&'static str>),

    #[error("Failed to load configuration from: {path}")]
    ConfigLoad { path: PathBuf, message: String },

    #[error("Invalid configuration: {field}: {message}")]
    ConfigValidation { field: &'static str, message: String },

    #[error("Failed to initialize logging: {0}")]
    Logging(CompactString),
}

impl BotError {
    pub fn missing_field(field: &'static str) -> Self {
        Self::MissingField { field }
    }

    pub fn type_mismatch(what: &'static str, expected: &'static str) -> Self {
        Self::TypeMismatch { what, expected }
    }

    /// Create a configuration load error
    pub fn config_load(path: PathBuf, source: impl std::fmt::Display) -> Self {
        Self::ConfigLoad { path, message: source.to_string() }
    }

    /// Create a configuration validation error
    pub fn config_validation(field: &'static str, message: impl Into<String>) -> Self {
        Self::ConfigValidation { field, message: message.into() }
    }

    /// True for failures of the outbound notification itself
    pub fn is_delivery_failure(&self) -> bool {
        matches!(self, Self::DeliveryFailure(_))
    }
}

impl From<reqwest::Error> for BotError {
    fn from(e: reqwest::Error) -> Self {
        BotError::Transport(e.to_compact_string())
    }
}

//! Tracing subscriber setup

use std::path::PathBuf;

use compact_str::{CompactString, ToCompactString};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::{
    config::BotConfig,
    result::{BotError, Result},
};

const LOG_FILE_PREFIX: &str = "homework-bot.log";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    /// Default filter directive, overridden by `RUST_LOG`
    pub level: CompactString,
    /// Directory for daily rolling log files
    pub log_dir: Option<PathBuf>,
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: "info".into(), log_dir: None, json: false }
    }
}

impl LoggingConfig {
    pub fn from_settings(config: &BotConfig, debug: bool) -> Self {
        let level = if debug { "debug".into() } else { config.log_level.clone() };

        Self { level, log_dir: config.log_dir.clone(), json: config.json_logs }
    }
}

/// Install the global subscriber.
///
/// Lines carry timestamp, target, level, message and source line. The returned
/// guard flushes the file writer and must live as long as the process.
pub fn init_logging(config: &LoggingConfig) -> Result<Option<WorkerGuard>> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.level.as_str()))
        .map_err(|e| BotError::Logging(e.to_compact_string()))?;

    let stdout_layer = if config.json {
        fmt::layer()
            .json()
            .with_target(true)
            .with_line_number(true)
            .boxed()
    } else {
        fmt::layer()
            .with_target(true)
            .with_line_number(true)
            .boxed()
    };

    let (file_layer, guard) = match &config.log_dir {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, LOG_FILE_PREFIX);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_target(true)
                .with_line_number(true)
                .boxed();
            (Some(layer), Some(guard))
        },
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(stdout_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| BotError::Logging(e.to_compact_string()))?;

    Ok(guard)
}

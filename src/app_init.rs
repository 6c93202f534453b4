use std::path::PathBuf;

use tracing::{error, info};
use tracing_appender::non_blocking::WorkerGuard;

use crate::{
    client::{ClientConfig, HomeworkApi, HomeworkPoller},
    config::{BotConfig, Credentials, load_config},
    logging::{LoggingConfig, init_logging},
    notifier::TelegramNotifier,
    result::Result,
};

pub struct AppComponents {
    pub poller: HomeworkPoller<TelegramNotifier>,
    pub _log_guard: Option<WorkerGuard>,
}

/// Load settings, start logging, check credentials and build the poller.
///
/// Missing credentials are logged at critical severity before the error is
/// returned, so the caller only has to exit.
pub fn initialize_app(config_path: PathBuf, debug: bool) -> Result<AppComponents> {
    let config = load_config(&config_path)?;

    let log_guard = init_logging(&LoggingConfig::from_settings(&config, debug))?;
    info!(
        version = env!("CARGO_PKG_VERSION"),
        config = %config_path.display(),
        "homework-bot starting up"
    );

    let credentials = Credentials::from_env().require().inspect_err(|e| {
        error!(severity = "CRITICAL", error = %e, "Environment is missing required tokens");
    })?;

    let poller = create_poller(&config, credentials)?;

    Ok(AppComponents { poller, _log_guard: log_guard })
}

pub fn create_poller(
    config: &BotConfig,
    credentials: Credentials,
) -> Result<HomeworkPoller<TelegramNotifier>> {
    let client_config = ClientConfig::from_settings(config, credentials);
    client_config.validate()?;

    let api = HomeworkApi::new(&client_config)?;
    let notifier = TelegramNotifier::new(&client_config)?;

    Ok(HomeworkPoller::new(api, notifier, client_config.polling.clone()))
}

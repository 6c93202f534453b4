//! Polling loop for the tracked homework

use chrono::Utc;
use compact_str::{CompactString, ToCompactString};
use tokio::{sync::broadcast, time::sleep};
use tracing::{debug, error, info, instrument};

use super::{api::HomeworkApi, config::PollingConfig};
use crate::{
    domain::{check_response, current_date, parse_status},
    notifier::Notifier,
    result::{BotError, Result},
};

/// Last delivered texts, used to suppress duplicate notifications
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SessionState {
    pub last_sent_message: CompactString,
    pub last_sent_error: CompactString,
}

/// What a single poll cycle ended up doing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleOutcome {
    /// A new status message was delivered
    StatusSent,
    /// The status message equals the last one sent
    StatusUnchanged,
    /// The API reported no homework updates
    NoUpdates,
    /// A new error was delivered to the user
    ErrorSent,
    /// The error equals the last one reported
    ErrorSuppressed,
    /// A notification could not be delivered; only logged
    DeliveryFailed,
}

struct Answer {
    message: Option<CompactString>,
    current_date: Option<i64>,
}

/// Polls the homework API and relays status changes through a [`Notifier`]
#[derive(Debug)]
pub struct HomeworkPoller<N> {
    api: HomeworkApi,
    notifier: N,
    config: PollingConfig,
    state: SessionState,
    timestamp: i64,
    shutdown_tx: broadcast::Sender<()>,
    shutdown_rx: broadcast::Receiver<()>,
}

impl<N: Notifier> HomeworkPoller<N> {
    /// Create a poller that asks for updates since now
    pub fn new(api: HomeworkApi, notifier: N, config: PollingConfig) -> Self {
        let (shutdown_tx, shutdown_rx) = broadcast::channel(1);

        Self {
            api,
            notifier,
            config,
            state: SessionState::default(),
            timestamp: Utc::now().timestamp(),
            shutdown_tx,
            shutdown_rx,
        }
    }

    /// Start polling from an explicit unix timestamp
    pub fn with_timestamp(mut self, timestamp: i64) -> Self {
        self.timestamp = timestamp;
        self
    }

    /// Poll until a shutdown signal arrives.
    ///
    /// Every cycle is followed by the configured sleep, whatever its outcome.
    #[instrument(skip(self), fields(interval = ?self.config.interval))]
    pub async fn run(mut self) {
        info!(timestamp = self.timestamp, "Starting homework poller");
        let interval = self.config.interval;

        loop {
            let outcome = self.poll_once().await;
            debug!(?outcome, timestamp = self.timestamp, "Poll cycle finished");

            tokio::select! {
                _ = sleep(interval) => {},
                _ = self.shutdown_rx.recv() => {
                    info!("Shutting down homework poller");
                    break;
                }
            }
        }
    }

    /// Run a single fetch-validate-parse-notify cycle
    pub async fn poll_once(&mut self) -> CycleOutcome {
        let answer = match self.fetch_answer().await {
            Ok(answer) => answer,
            Err(e) => return self.report_error(e).await,
        };

        let outcome = match answer.message {
            None => {
                debug!("No homework updates since last poll");
                CycleOutcome::NoUpdates
            },
            Some(message) if message == self.state.last_sent_message => {
                debug!("Homework status unchanged");
                CycleOutcome::StatusUnchanged
            },
            Some(message) => match self.notifier.send_message(&message).await {
                Ok(()) => {
                    info!(message = %message, "Status message sent");
                    self.state.last_sent_message = message;
                    CycleOutcome::StatusSent
                },
                // Keep the timestamp so the same status is fetched again
                Err(e) => return self.report_error(e).await,
            },
        };

        if let Some(date) = answer.current_date {
            self.timestamp = date;
        }

        outcome
    }

    async fn fetch_answer(&self) -> Result<Answer> {
        let response = self.api.get_api_answer(self.timestamp).await?;
        let homeworks = check_response(&response)?;

        let message = match homeworks.first() {
            Some(homework) => Some(parse_status(homework)?),
            None => None,
        };

        Ok(Answer { message, current_date: current_date(&response) })
    }

    async fn report_error(&mut self, error: BotError) -> CycleOutcome {
        error!(error = %error, details = ?error, "Poll cycle failed");

        if error.is_delivery_failure() {
            return CycleOutcome::DeliveryFailed;
        }

        let text = error.to_compact_string();
        if text == self.state.last_sent_error {
            debug!("Error already reported, not sending it again");
            return CycleOutcome::ErrorSuppressed;
        }
        self.state.last_sent_error = text.clone();

        match self.notifier.send_message(&text).await {
            Ok(()) => {
                info!(error = %text, "Error message sent");
                CycleOutcome::ErrorSent
            },
            Err(e) => {
                error!(error = %e, details = ?e, "Could not deliver the error message");
                CycleOutcome::DeliveryFailed
            },
        }
    }

    /// Send shutdown signal to stop polling
    pub fn shutdown(&self) {
        debug!("Sending shutdown signal to homework poller");
        let _ = self.shutdown_tx.send(());
    }

    /// Get a shutdown sender for external shutdown control
    pub fn shutdown_sender(&self) -> broadcast::Sender<()> {
        self.shutdown_tx.clone()
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Unix timestamp sent as `from_date` on the next poll
    pub fn timestamp(&self) -> i64 {
        self.timestamp
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }
}

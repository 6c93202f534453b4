#![allow(dead_code)]

use std::{cell::RefCell, rc::Rc};

use homework_bot::{
    client::{ClientConfig, HomeworkApi, HomeworkPoller},
    config::Credentials,
    notifier::Notifier,
    result::{BotError, Result},
};
use serde_json::{Value, json};
use wiremock::MockServer;

pub const STATUSES_PATH: &str = "/api/user_api/homework_statuses/";
pub const PRACTICUM_TOKEN: &str = "practicum-token";
pub const BOT_TOKEN: &str = "bot-token";
pub const CHAT_ID: &str = "42";

/// Notifier double that records every delivered text.
///
/// Clones share the record, so a test can keep one after handing the other to `run`.
#[derive(Debug, Default, Clone)]
pub struct RecordingNotifier {
    sent: Rc<RefCell<Vec<String>>>,
    fail: bool,
}

impl RecordingNotifier {
    pub fn failing() -> Self {
        Self { sent: Rc::default(), fail: true }
    }

    pub fn sent(&self) -> Vec<String> {
        self.sent.borrow().clone()
    }
}

impl Notifier for RecordingNotifier {
    async fn send_message(&self, text: &str) -> Result<()> {
        if self.fail {
            return Err(BotError::DeliveryFailure("chat unreachable".into()));
        }
        self.sent.borrow_mut().push(text.to_string());
        Ok(())
    }
}

pub fn credentials() -> Credentials {
    Credentials::new(PRACTICUM_TOKEN, BOT_TOKEN, CHAT_ID)
}

pub fn client_config(server_uri: &str) -> ClientConfig {
    ClientConfig::new(credentials())
        .with_endpoint(format!("{server_uri}{STATUSES_PATH}"))
        .with_telegram_api_url(server_uri)
}

pub fn recording_poller(server: &MockServer) -> HomeworkPoller<RecordingNotifier> {
    poller_with(server, RecordingNotifier::default())
}

pub fn poller_with(
    server: &MockServer,
    notifier: RecordingNotifier,
) -> HomeworkPoller<RecordingNotifier> {
    let config = client_config(&server.uri());
    let api = HomeworkApi::new(&config).unwrap();
    HomeworkPoller::new(api, notifier, config.polling).with_timestamp(100)
}

/// API answer whose latest homework has the given status
pub fn answer(name: &str, status: &str, current_date: i64) -> Value {
    json!({
        "homeworks": [
            {"homework_name": name, "status": status, "reviewer_comment": "ok"},
            {"homework_name": "older.zip", "status": "approved"}
        ],
        "current_date": current_date
    })
}

/// Address on which nothing is listening
pub fn closed_address() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}")
}

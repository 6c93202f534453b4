use std::{fmt, future::Future};

use compact_str::{CompactString, ToCompactString, format_compact};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::{
    client::ClientConfig,
    result::{BotError, Result},
};

/// Delivers text messages to the tracked user
pub trait Notifier {
    /// Send one message; transport or API failures become [`BotError::DeliveryFailure`]
    fn send_message(&self, text: &str) -> impl Future<Output = Result<()>>;
}

/// Telegram Bot API `sendMessage` client bound to a single chat
pub struct TelegramNotifier {
    client: Client,
    send_url: CompactString,
    chat_id: CompactString,
}

#[derive(Debug, Serialize)]
struct SendMessageRequest<'a> {
    chat_id: &'a str,
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct TelegramReply {
    ok: bool,
    description: Option<CompactString>,
}

impl fmt::Debug for TelegramNotifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TelegramNotifier")
            .field("chat_id", &self.chat_id)
            .finish_non_exhaustive()
    }
}

impl TelegramNotifier {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.request.timeout)
            .build()?;

        Ok(Self {
            client,
            send_url: format_compact!(
                "{}/bot{}/sendMessage",
                config.telegram_api_url.trim_end_matches('/'),
                config.credentials.telegram_token
            ),
            chat_id: config.credentials.telegram_chat_id.clone(),
        })
    }
}

impl Notifier for TelegramNotifier {
    #[instrument(skip(self, text), fields(chat_id = %self.chat_id))]
    async fn send_message(&self, text: &str) -> Result<()> {
        let request = SendMessageRequest { chat_id: &self.chat_id, text };

        // The URL embeds the bot token, so only the error kind is kept
        let response = self
            .client
            .post(self.send_url.as_str())
            .json(&request)
            .send()
            .await
            .map_err(|e| BotError::DeliveryFailure(describe_transport_error(e)))?;

        let status = response.status();
        let reply = response.json::<TelegramReply>().await.ok();

        match reply {
            Some(TelegramReply { ok: true, .. }) if status.is_success() => {
                debug!("Message delivered");
                Ok(())
            },
            Some(TelegramReply { description: Some(description), .. }) => Err(
                BotError::DeliveryFailure(format_compact!("HTTP {}: {}", status.as_u16(), description)),
            ),
            _ => Err(BotError::DeliveryFailure(format_compact!("HTTP {}", status.as_u16()))),
        }
    }
}

fn describe_transport_error(e: reqwest::Error) -> CompactString {
    if e.is_timeout() {
        "request timed out".into()
    } else if e.is_connect() {
        "connection failed".into()
    } else {
        e.without_url().to_compact_string()
    }
}

//! HTTP client for the homework statuses API

use std::fmt;

use compact_str::{CompactString, ToCompactString, format_compact};
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde_json::Value;
use tracing::{debug, instrument};

use super::config::ClientConfig;
use crate::result::{BotError, Result};

/// Pure HTTP client for the homework API
pub struct HomeworkApi {
    client: Client,
    endpoint: CompactString,
    token: CompactString,
}

impl fmt::Debug for HomeworkApi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HomeworkApi")
            .field("endpoint", &self.endpoint)
            .finish_non_exhaustive()
    }
}

impl HomeworkApi {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.request.timeout)
            .build()?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            token: config.credentials.practicum_token.clone(),
        })
    }

    /// Fetch homework statuses changed since `timestamp` (unix seconds).
    ///
    /// Transport failures surface as [`BotError::Transport`], any status other
    /// than 200 as [`BotError::EndpointUnavailable`].
    #[instrument(skip(self))]
    pub async fn get_api_answer(&self, timestamp: i64) -> Result<Value> {
        let response = self
            .authenticated_request()
            .query(&[("from_date", timestamp)])
            .send()
            .await
            .map_err(|e| {
                BotError::Transport(format_compact!("{} ({})", self.endpoint, e.without_url()))
            })?;

        self.handle_response(response).await
    }

    /// Create authenticated request builder
    fn authenticated_request(&self) -> RequestBuilder {
        self.client
            .get(self.endpoint.as_str())
            .header("Authorization", format!("OAuth {}", self.token))
    }

    async fn handle_response(&self, response: Response) -> Result<Value> {
        let status = response.status();
        if status != StatusCode::OK {
            debug!(status = status.as_u16(), "Homework API answered with a non-OK status");
            return Err(BotError::EndpointUnavailable { status: status.as_u16() });
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| BotError::MalformedBody(e.to_compact_string()))
    }
}

//! HttpChatBackend -- concrete [`ChatBackend`] over the widget's JSON API.
//!
//! Talks to `POST {base_url}/api/chat` and `GET {base_url}/api/health`.
//! Every request is bounded by the configured timeout. Server error bodies
//! (`{"error": "..."}`) are logged at debug level and never surfaced to the
//! user; the controller turns any failure into its fallback message.

use std::time::Duration;

use serde::de::DeserializeOwned;

use chatpane_core::backend::ChatBackend;
use chatpane_types::chat::{ChatReply, ChatRequest, ErrorBody, HealthStatus};
use chatpane_types::config::WidgetConfig;
use chatpane_types::error::TransportError;

/// Chat backend speaking JSON over HTTP.
pub struct HttpChatBackend {
    client: reqwest::Client,
    base_url: String,
    timeout: Duration,
}

impl HttpChatBackend {
    /// Create a backend for `base_url` with a per-request timeout.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .expect("failed to create reqwest client");

        let base_url = base_url.into().trim_end_matches('/').to_string();

        Self {
            client,
            base_url,
            timeout,
        }
    }

    pub fn from_config(config: &WidgetConfig) -> Self {
        Self::new(config.base_url.clone(), config.request_timeout())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Check the status, then parse the body as `T`.
    async fn read_json<T: DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, TransportError> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            match serde_json::from_str::<ErrorBody>(&body) {
                Ok(err) => tracing::debug!(status = status.as_u16(), error = %err.error, "Chat server returned an error"),
                Err(_) => tracing::debug!(status = status.as_u16(), body = %body, "Chat server returned an error"),
            }
            return Err(TransportError::BadStatus(status.as_u16()));
        }

        let body = response.text().await.map_err(map_reqwest_error)?;
        serde_json::from_str(&body)
            .map_err(|e| TransportError::MalformedResponse(format!("failed to parse response: {e}")))
    }
}

fn map_reqwest_error(err: reqwest::Error) -> TransportError {
    if err.is_timeout() {
        TransportError::Timeout
    } else {
        TransportError::NetworkUnavailable(err.to_string())
    }
}

impl ChatBackend for HttpChatBackend {
    async fn chat(&self, request: &ChatRequest) -> Result<ChatReply, TransportError> {
        let response = self
            .client
            .post(self.url("/api/chat"))
            .json(request)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        Self::read_json(response).await
    }

    async fn health(&self) -> Result<HealthStatus, TransportError> {
        let response = self
            .client
            .get(self.url("/api/health"))
            .send()
            .await
            .map_err(map_reqwest_error)?;

        Self::read_json(response).await
    }
}

//! Client for the remote completion webhook.
//!
//! The webhook receives `{ projectId, apiKey, prompt }` as JSON and answers
//! with `{ response }`, where `response` is markdown.

use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use serde::{Deserialize, Serialize};

#[derive(Debug, thiserror::Error)]
pub enum CompletionError {
    #[error("Network error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Webhook returned HTTP {status}: {body}")]
    Status { status: u16, body: String },
    #[error("Invalid webhook response: {0}")]
    Decode(#[from] serde_json::Error),
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletionRequest<'a> {
    pub project_id: &'a str,
    pub api_key: &'a str,
    pub prompt: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct CompletionResponse {
    pub response: String,
}

/// Turns a prompt into markdown text.
#[async_trait]
pub trait CompletionService: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<String, CompletionError>;
}

/// [`CompletionService`] backed by an HTTP webhook.
pub struct WebhookClient {
    client: Client,
    endpoint: String,
    project_id: String,
    api_key: String,
}

impl WebhookClient {
    pub fn new(
        endpoint: impl Into<String>,
        project_id: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Result<Self, CompletionError> {
        Self::with_timeout(endpoint, project_id, api_key, Duration::from_secs(120))
    }

    pub fn with_timeout(
        endpoint: impl Into<String>,
        project_id: impl Into<String>,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, CompletionError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("securechat/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
            project_id: project_id.into(),
            api_key: api_key.into(),
        })
    }
}

#[async_trait]
impl CompletionService for WebhookClient {
    async fn complete(&self, prompt: &str) -> Result<String, CompletionError> {
        let request = CompletionRequest {
            project_id: &self.project_id,
            api_key: &self.api_key,
            prompt,
        };
        debug!("posting {} byte prompt to {}", prompt.len(), self.endpoint);

        let response = self
            .client
            .post(self.endpoint.as_str())
            .json(&request)
            .send()
            .await?;
        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(CompletionError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let decoded: CompletionResponse = serde_json::from_str(&body)?;
        Ok(decoded.response)
    }
}

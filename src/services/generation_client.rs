//! Client for the remote website generation endpoint.
//!
//! The endpoint takes `POST {"description": "..."}` and answers with a JSON
//! object whose `html`, `css` and `js` fields are all optional.

use std::time::Duration;

use async_trait::async_trait;

use crate::types::errors::GenerationError;
use crate::types::generation::{GeneratedCode, GenerationRequest};
use crate::types::settings::GenerationSettings;

/// Anything that can turn a description into generated website code.
#[async_trait]
pub trait GenerationClient: Send + Sync {
    async fn generate(&self, description: &str) -> Result<GeneratedCode, GenerationError>;
}

/// [`GenerationClient`] talking JSON over HTTP.
pub struct HttpGenerationClient {
    http: reqwest::Client,
    endpoint: String,
    timeout: Duration,
}

impl HttpGenerationClient {
    /// Builds a client for `endpoint`; every request is bounded by `timeout`.
    pub fn new(endpoint: &str, timeout: Duration) -> Result<Self, GenerationError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| GenerationError::Network(e.to_string()))?;
        Ok(Self {
            http,
            endpoint: endpoint.to_string(),
            timeout,
        })
    }

    pub fn from_settings(settings: &GenerationSettings) -> Result<Self, GenerationError> {
        Self::new(&settings.endpoint, Duration::from_secs(settings.timeout_secs))
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl GenerationClient for HttpGenerationClient {
    async fn generate(&self, description: &str) -> Result<GeneratedCode, GenerationError> {
        let body = GenerationRequest {
            description: description.to_string(),
        };

        tracing::info!(endpoint = %self.endpoint, "requesting website generation");
        let response = self
            .http
            .post(&self.endpoint)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    GenerationError::Timeout(self.timeout)
                } else {
                    GenerationError::Network(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(GenerationError::Status(status.as_u16()));
        }

        let text = response.text().await.map_err(|e| {
            if e.is_timeout() {
                GenerationError::Timeout(self.timeout)
            } else {
                GenerationError::Network(e.to_string())
            }
        })?;

        serde_json::from_str::<GeneratedCode>(&text)
            .map_err(|e| GenerationError::MalformedPayload(e.to_string()))
    }
}

/// Runs `client.generate` and turns an overrun of `timeout` into [`GenerationError::Timeout`].
pub async fn generate_with_timeout(
    client: &dyn GenerationClient,
    description: &str,
    timeout: Duration,
) -> Result<GeneratedCode, GenerationError> {
    match tokio::time::timeout(timeout, client.generate(description)).await {
        Ok(result) => result,
        Err(_) => Err(GenerationError::Timeout(timeout)),
    }
}

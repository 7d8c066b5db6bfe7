use crate::core::request::{ChatRequest, ChatResponse};
use crate::domain::ports::{ConfigProvider, VisionModel};
use crate::utils::error::{AuditError, Result};
use async_trait::async_trait;
use reqwest::Client;

/// `VisionModel` backed by an OpenAI-compatible chat completion endpoint.
/// Built once at startup from the supplied credential and reused read-only;
/// sends exactly one POST per call, no retries of its own.
#[derive(Debug)]
pub struct OpenAiVisionClient {
    client: Client,
    endpoint: String,
    api_key: String,
}

impl OpenAiVisionClient {
    pub fn new<C: ConfigProvider>(config: &C) -> Result<Self> {
        let api_key = config
            .api_key()
            .ok_or_else(|| AuditError::MissingConfigError {
                field: "api_key".to_string(),
            })?
            .to_string();

        Ok(Self {
            client: Client::new(),
            endpoint: config.api_endpoint().to_string(),
            api_key,
        })
    }
}

#[async_trait]
impl VisionModel for OpenAiVisionClient {
    async fn complete(&self, request: &ChatRequest) -> Result<String> {
        tracing::debug!("POST {}", self.endpoint);

        let response = self
            .client
            .post(&self.endpoint)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(request)
            .send()
            .await?;

        let status = response.status();
        tracing::debug!("API response status: {}", status);

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AuditError::RemoteRejectedError {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: ChatResponse =
            response
                .json()
                .await
                .map_err(|e| AuditError::MalformedResponseError {
                    message: e.to_string(),
                })?;

        parsed
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| AuditError::MalformedResponseError {
                message: "response contained no choices".to_string(),
            })
    }
}

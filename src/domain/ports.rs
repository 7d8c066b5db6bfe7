use crate::core::request::ChatRequest;
use crate::utils::error::Result;
use async_trait::async_trait;

/// Read side of the hosting environment's file surface (table file, image).
pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
}

/// Deployment-time configuration for the remote model client.
pub trait ConfigProvider: Send + Sync {
    fn api_endpoint(&self) -> &str;
    fn model(&self) -> &str;
    fn api_key(&self) -> Option<&str>;
}

/// The remote chat/vision model. Initialized once at startup with a valid
/// credential and injected into the session, so tests can substitute a
/// scripted fake.
#[async_trait]
pub trait VisionModel: Send + Sync {
    /// Sends exactly one completion request and returns the model's text.
    async fn complete(&self, request: &ChatRequest) -> Result<String>;
}

use async_trait::async_trait;

/// Single non-streaming exchange with the local language model.
#[async_trait]
pub trait LlmClient: Send + Sync {
    async fn complete(&self, system: &str, prompt: &str) -> Result<String, LlmClientError>;
}

#[derive(Debug, thiserror::Error)]
pub enum LlmClientError {
    #[error("model service unavailable: {0}")]
    ServiceUnavailable(String),
    #[error("invalid model response: {0}")]
    InvalidResponse(String),
}

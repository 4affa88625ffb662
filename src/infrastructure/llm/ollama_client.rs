use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::application::ports::{LlmClient, LlmClientError};

/// Non-streaming client for an Ollama-compatible `/api/chat` endpoint.
/// Built once per process; the underlying connection pool is reused across
/// requests. The timeout bounds the whole exchange, inference included.
pub struct OllamaClient {
    client: Client,
    base_url: String,
    model: String,
}

impl OllamaClient {
    pub fn new(base_url: &str, model: &str, timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .expect("reqwest client build never fails with valid TLS config");
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
        }
    }
}

#[derive(Deserialize)]
struct ChatResponse {
    message: ChatMessage,
}

#[derive(Deserialize)]
struct ChatMessage {
    content: Option<String>,
}

#[async_trait]
impl LlmClient for OllamaClient {
    #[tracing::instrument(skip(self, system, prompt), fields(model = %self.model))]
    async fn complete(&self, system: &str, prompt: &str) -> Result<String, LlmClientError> {
        let body = serde_json::json!({
            "model": self.model,
            "messages": [
                { "role": "system", "content": system },
                { "role": "user", "content": prompt }
            ],
            "stream": false
        });

        let url = format!("{}/api/chat", self.base_url);

        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| LlmClientError::ServiceUnavailable(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(LlmClientError::ServiceUnavailable(format!(
                "model endpoint returned {status}: {text}"
            )));
        }

        let completion: ChatResponse = response
            .json()
            .await
            .map_err(|e| LlmClientError::InvalidResponse(e.to_string()))?;

        let content = completion.message.content.unwrap_or_default();
        tracing::debug!(chars = content.chars().count(), "Model reply received");

        Ok(content.trim().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn given_unreachable_endpoint_when_completing_then_service_unavailable() {
        // Nothing listens on this port; connect fails immediately.
        let client = OllamaClient::new("http://127.0.0.1:1", "llama3", Duration::from_secs(2));

        let result = client.complete("system", "prompt").await;

        assert!(matches!(
            result,
            Err(LlmClientError::ServiceUnavailable(_))
        ));
    }
}

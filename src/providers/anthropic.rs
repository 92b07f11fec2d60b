use crate::config::ProviderConfig;
use crate::error::ImportError;
use crate::providers::{build_client, read_json_response, transport_error, LlmProvider};
use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use serde_json::json;

const DEFAULT_BASE_URL: &str = "https://api.anthropic.com";
const DEFAULT_MODEL: &str = "claude-sonnet-4-20250514";
const API_VERSION: &str = "2023-06-01";

pub struct AnthropicProvider {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
    temperature: f32,
}

impl AnthropicProvider {
    /// Create a new Anthropic provider from configuration
    pub fn new(config: &ProviderConfig) -> Result<Self, ImportError> {
        // Try config first, then fall back to environment variable
        let api_key = config
            .api_key
            .clone()
            .filter(|key| !key.trim().is_empty())
            .or_else(|| std::env::var("ANTHROPIC_API_KEY").ok())
            .ok_or_else(|| {
                ImportError::ProviderNotConfigured(
                    "ANTHROPIC_API_KEY not found in config or environment".to_string(),
                )
            })?;

        Ok(AnthropicProvider {
            client: build_client(config.timeout_secs)?,
            api_key,
            base_url: config
                .base_url
                .clone()
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            model: config
                .model
                .clone()
                .unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            temperature: config.temperature,
        })
    }

    #[doc(hidden)]
    pub fn with_base_url(api_key: String, base_url: String, model: String) -> Self {
        AnthropicProvider {
            client: Client::new(),
            api_key,
            base_url,
            model,
            temperature: 0.0,
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl LlmProvider for AnthropicProvider {
    fn provider_name(&self) -> &str {
        "anthropic"
    }

    async fn complete(&self, prompt: &str, max_tokens: u32) -> Result<String, ImportError> {
        let response = self
            .client
            .post(format!("{}/v1/messages", self.base_url.trim_end_matches('/')))
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", API_VERSION)
            .json(&json!({
                "model": self.model,
                "max_tokens": max_tokens,
                "temperature": self.temperature,
                "messages": [
                    {
                        "role": "user",
                        "content": prompt
                    }
                ]
            }))
            .send()
            .await
            .map_err(|e| transport_error("anthropic", e))?;

        let response_body = read_json_response("anthropic", response).await?;
        debug!("{:?}", response_body);

        let text = response_body["content"][0]["text"]
            .as_str()
            .ok_or_else(|| {
                ImportError::Provider(
                    "Failed to extract content from Anthropic response".to_string(),
                )
            })?
            .to_string();

        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use mockito::{Matcher, Server};

    fn provider(server: &Server) -> AnthropicProvider {
        AnthropicProvider::with_base_url(
            "test-key".to_string(),
            server.url(),
            "claude-test".to_string(),
        )
    }

    #[tokio::test]
    async fn test_complete() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/v1/messages")
            .match_header("x-api-key", "test-key")
            .match_header("anthropic-version", API_VERSION)
            .match_body(Matcher::PartialJson(json!({
                "model": "claude-test",
                "max_tokens": 4096,
                "messages": [{"role": "user", "content": "hello"}]
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"content": [{"type": "text", "text": "{\"title\": \"Soup\"}"}]}"#)
            .create_async()
            .await;

        let result = provider(&server).complete("hello", 4096).await.unwrap();
        assert_eq!(result, r#"{"title": "Soup"}"#);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_rate_limited() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/v1/messages")
            .with_status(429)
            .with_header("content-type", "application/json")
            .with_body(r#"{"type": "error", "error": {"type": "rate_limit_error", "message": "slow down"}}"#)
            .create_async()
            .await;

        let err = provider(&server).complete("hello", 10).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ProviderRateLimited);
        assert!(err.to_string().contains("slow down"));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_unauthorized_is_not_configured() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/v1/messages")
            .with_status(401)
            .with_body(r#"{"error": {"message": "invalid x-api-key"}}"#)
            .create_async()
            .await;

        let err = provider(&server).complete("hello", 10).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ProviderNotConfigured);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_server_error() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/v1/messages")
            .with_status(529)
            .with_body("overloaded")
            .create_async()
            .await;

        let err = provider(&server).complete("hello", 10).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ProviderError);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_unexpected_body() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/v1/messages")
            .with_status(200)
            .with_body(r#"{"content": []}"#)
            .create_async()
            .await;

        let err = provider(&server).complete("hello", 10).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ProviderError);
        mock.assert_async().await;
    }

    #[test]
    fn test_new_uses_config_and_defaults() {
        let config = ProviderConfig {
            api_key: Some("test-key".to_string()),
            ..Default::default()
        };

        let provider = AnthropicProvider::new(&config).unwrap();
        assert_eq!(provider.provider_name(), "anthropic");
        assert_eq!(provider.model(), DEFAULT_MODEL);
        assert_eq!(provider.base_url, DEFAULT_BASE_URL);
    }
}

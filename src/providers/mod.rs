mod anthropic;
mod factory;
mod open_ai;
mod prompt;

pub use anthropic::AnthropicProvider;
pub use factory::ProviderFactory;
pub use open_ai::OpenAIProvider;
pub use prompt::{build_cookbook_prompt, build_recipe_prompt, COOKBOOK_PROMPT, RECIPE_PROMPT};

use crate::error::ImportError;
use async_trait::async_trait;
use log::debug;
use reqwest::{Client, Response, StatusCode};
use serde_json::Value;
use std::time::Duration;

/// Unified trait for all LLM providers
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Get the provider name (e.g., "openai", "anthropic")
    fn provider_name(&self) -> &str;

    /// Send a single user prompt and return the model's text reply.
    async fn complete(&self, prompt: &str, max_tokens: u32) -> Result<String, ImportError>;
}

pub(crate) fn build_client(timeout_secs: Option<u64>) -> Result<Client, ImportError> {
    let mut builder = Client::builder();
    if let Some(secs) = timeout_secs {
        builder = builder.timeout(Duration::from_secs(secs));
    }
    builder
        .build()
        .map_err(|e| ImportError::Provider(format!("failed to create HTTP client: {e}")))
}

pub(crate) fn transport_error(provider: &str, err: reqwest::Error) -> ImportError {
    if err.is_timeout() {
        ImportError::Provider(format!("{provider} request timed out"))
    } else {
        ImportError::Provider(format!("{provider} request failed: {err}"))
    }
}

/// Read a provider response as JSON, mapping error statuses onto [`ImportError`].
///
/// 401/403 mean the credentials are unusable and surface as not-configured;
/// 429 is rate limiting; everything else carries the provider's own message.
pub(crate) async fn read_json_response(
    provider: &str,
    response: Response,
) -> Result<Value, ImportError> {
    let status = response.status();
    if status.is_success() {
        return response.json::<Value>().await.map_err(|e| {
            ImportError::Provider(format!("{provider} returned an unreadable body: {e}"))
        });
    }

    let body = response.text().await.unwrap_or_default();
    debug!("{provider} error response ({status}): {body}");
    let message = error_message(&body).unwrap_or_else(|| status.to_string());

    Err(match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => ImportError::ProviderNotConfigured(
            format!("{provider} authentication failed: {message}"),
        ),
        StatusCode::TOO_MANY_REQUESTS => {
            ImportError::ProviderRateLimited(format!("{provider}: {message}"))
        }
        _ => ImportError::Provider(format!("{provider} returned {status}: {message}")),
    })
}

/// Both Anthropic and OpenAI wrap failures as `{"error": {"message": ...}}`.
fn error_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    let error = value.get("error")?;
    error
        .get("message")
        .and_then(Value::as_str)
        .or_else(|| error.as_str())
        .map(str::to_string)
}

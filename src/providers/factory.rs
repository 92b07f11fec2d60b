use crate::config::{ImportConfig, ProviderConfig};
use crate::error::ImportError;
use crate::providers::{AnthropicProvider, LlmProvider, OpenAIProvider};

pub struct ProviderFactory;

impl ProviderFactory {
    /// Create a provider instance from configuration
    pub fn create(
        provider_name: &str,
        config: &ProviderConfig,
    ) -> Result<Box<dyn LlmProvider>, ImportError> {
        if !config.enabled {
            return Err(ImportError::ProviderNotConfigured(format!(
                "Provider '{}' is not enabled in configuration",
                provider_name
            )));
        }

        match provider_name {
            "anthropic" => Ok(Box::new(AnthropicProvider::new(config)?)),
            "openai" => Ok(Box::new(OpenAIProvider::new(config)?)),
            _ => Err(ImportError::ProviderNotConfigured(format!(
                "Unknown provider: {}",
                provider_name
            ))),
        }
    }

    /// Create the configured default provider.
    ///
    /// A provider without its own section still works when its API key is in the environment.
    pub fn get_default_provider(config: &ImportConfig) -> Result<Box<dyn LlmProvider>, ImportError> {
        Self::create(&config.default_provider, &config.default_provider_config())
    }

    /// List all available provider names
    pub fn available_providers() -> Vec<&'static str> {
        vec!["anthropic", "openai"]
    }
}

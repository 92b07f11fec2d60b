use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;

/// Top-level import configuration
#[derive(Debug, Deserialize, Clone)]
pub struct ImportConfig {
    /// Source page fetching
    #[serde(default)]
    pub fetch: FetchConfig,
    /// Generative extraction budgets
    #[serde(default)]
    pub extraction: ExtractionConfig,
    /// Provider used for generative extraction
    #[serde(default = "default_provider")]
    pub default_provider: String,
    /// Map of provider name to provider configuration
    #[serde(default)]
    pub providers: HashMap<String, ProviderConfig>,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            fetch: FetchConfig::default(),
            extraction: ExtractionConfig::default(),
            default_provider: default_provider(),
            providers: HashMap::new(),
        }
    }
}

/// Configuration for fetching source pages
#[derive(Debug, Deserialize, Clone)]
pub struct FetchConfig {
    /// Hard cap on the whole request, in seconds
    #[serde(default = "default_fetch_timeout")]
    pub timeout_secs: u64,
    /// User-Agent sent with every page request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// Maximum number of redirects followed
    #[serde(default = "default_max_redirects")]
    pub max_redirects: usize,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_fetch_timeout(),
            user_agent: default_user_agent(),
            max_redirects: default_max_redirects(),
        }
    }
}

impl FetchConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Budgets for generative extraction
#[derive(Debug, Deserialize, Clone)]
pub struct ExtractionConfig {
    /// Characters of HTML sent to the model before truncation
    #[serde(default = "default_html_char_budget")]
    pub html_char_budget: usize,
    /// Characters of PDF text sent to the model before truncation
    #[serde(default = "default_pdf_char_budget")]
    pub pdf_char_budget: usize,
    /// Completion token budget for single-recipe extraction
    #[serde(default = "default_html_max_tokens")]
    pub html_max_tokens: u32,
    /// Completion token budget for cookbook extraction
    #[serde(default = "default_pdf_max_tokens")]
    pub pdf_max_tokens: u32,
    /// PDFs with less text than this are treated as having no text layer
    #[serde(default = "default_min_pdf_text_chars")]
    pub min_pdf_text_chars: usize,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            html_char_budget: default_html_char_budget(),
            pdf_char_budget: default_pdf_char_budget(),
            html_max_tokens: default_html_max_tokens(),
            pdf_max_tokens: default_pdf_max_tokens(),
            min_pdf_text_chars: default_min_pdf_text_chars(),
        }
    }
}

/// Configuration for a specific AI provider
#[derive(Debug, Deserialize, Clone)]
pub struct ProviderConfig {
    /// Whether this provider is enabled
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// Model identifier; each provider has its own default
    pub model: Option<String>,
    /// Temperature for generation (0.0-1.0)
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    /// API key (can also be set via the provider's environment variable)
    pub api_key: Option<String>,
    /// Base URL for API endpoint (for custom or proxy endpoints)
    pub base_url: Option<String>,
    /// Request timeout in seconds; unset means the HTTP client default
    pub timeout_secs: Option<u64>,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            model: None,
            temperature: default_temperature(),
            api_key: None,
            base_url: None,
            timeout_secs: None,
        }
    }
}

// Default value functions
fn default_provider() -> String {
    "anthropic".to_string()
}

fn default_fetch_timeout() -> u64 {
    10
}

fn default_user_agent() -> String {
    "Mozilla/5.0 (compatible; RecipeImport/1.0)".to_string()
}

fn default_max_redirects() -> usize {
    10
}

fn default_html_char_budget() -> usize {
    100_000
}

fn default_pdf_char_budget() -> usize {
    150_000
}

fn default_html_max_tokens() -> u32 {
    4096
}

fn default_pdf_max_tokens() -> u32 {
    8192
}

fn default_min_pdf_text_chars() -> usize {
    50
}

fn default_enabled() -> bool {
    true
}

fn default_temperature() -> f32 {
    0.0
}

impl ImportConfig {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded with the following priority (highest to lowest):
    /// 1. Environment variables with RECIPE_IMPORT__ prefix
    /// 2. recipe-import.toml file in current directory
    /// 3. Default values
    ///
    /// Environment variable format: RECIPE_IMPORT__PROVIDERS__ANTHROPIC__API_KEY
    pub fn load() -> Result<Self, ConfigError> {
        load_config()
    }

    /// Configuration of the default provider, or an empty one if the map has no entry.
    pub fn default_provider_config(&self) -> ProviderConfig {
        self.providers
            .get(&self.default_provider)
            .cloned()
            .unwrap_or_default()
    }
}

/// Load configuration from file and environment variables. See [`ImportConfig::load`].
pub fn load_config() -> Result<ImportConfig, ConfigError> {
    let settings = Config::builder()
        .add_source(File::with_name("recipe-import").required(false))
        .add_source(
            Environment::with_prefix("RECIPE_IMPORT")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    settings.try_deserialize()
}

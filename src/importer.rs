use std::sync::Arc;
use std::time::Duration;

use log::warn;

use crate::config::ImportConfig;
use crate::error::ImportError;
use crate::extractors::AiExtractor;
use crate::fetchers::RequestFetcher;
use crate::model::{ImportResult, RecipeData};
use crate::pipelines;
use crate::providers::{LlmProvider, ProviderFactory};

/// Built-in generative providers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderKind {
    Anthropic,
    OpenAI,
}

impl ProviderKind {
    /// Provider name string used by the factory and in configuration
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderKind::Anthropic => "anthropic",
            ProviderKind::OpenAI => "openai",
        }
    }
}

/// Entry point for recipe imports.
///
/// An importer is cheap to clone and holds no per-import state, so one instance
/// can serve concurrent imports.
///
/// # Example
/// ```no_run
/// use recipe_import::RecipeImporter;
///
/// # async fn run() -> Result<(), recipe_import::ImportError> {
/// let importer = RecipeImporter::builder().build()?;
/// let result = importer.import_from_url("https://example.com/recipe").await?;
/// println!("{} ({})", result.recipe.title, result.source);
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct RecipeImporter {
    fetcher: RequestFetcher,
    ai: Option<AiExtractor>,
    min_pdf_text_chars: usize,
}

impl RecipeImporter {
    pub fn builder() -> RecipeImporterBuilder {
        RecipeImporterBuilder::default()
    }

    pub fn from_config(config: &ImportConfig) -> Result<Self, ImportError> {
        Self::builder().config(config.clone()).build()
    }

    /// Whether a generative provider is available for fallback extraction.
    pub fn has_ai_provider(&self) -> bool {
        self.ai.is_some()
    }

    /// Import one recipe from a web page, preferring schema.org data over AI extraction.
    pub async fn import_from_url(&self, url: &str) -> Result<ImportResult, ImportError> {
        pipelines::url::process(url, &self.fetcher, self.ai.as_ref()).await
    }

    /// Import every complete recipe in a PDF cookbook.
    pub async fn import_from_pdf(
        &self,
        pdf_bytes: impl Into<Vec<u8>>,
    ) -> Result<Vec<RecipeData>, ImportError> {
        pipelines::pdf::process(pdf_bytes.into(), self.ai.as_ref(), self.min_pdf_text_chars).await
    }

    /// Like [`import_from_pdf`](Self::import_from_pdf) for text that was already
    /// extracted from a PDF.
    pub async fn import_from_pdf_text(&self, text: &str) -> Result<Vec<RecipeData>, ImportError> {
        pipelines::pdf::process_text(text, self.ai.as_ref(), self.min_pdf_text_chars).await
    }
}

/// Builder for [`RecipeImporter`]
///
/// Starts from [`ImportConfig::default`]; explicit builder settings override the
/// configuration.
#[derive(Default)]
pub struct RecipeImporterBuilder {
    config: ImportConfig,
    provider: Option<ProviderKind>,
    api_key: Option<String>,
    model: Option<String>,
    base_url: Option<String>,
    llm_provider: Option<Arc<dyn LlmProvider>>,
}

impl RecipeImporterBuilder {
    /// Use a loaded configuration as the base
    pub fn config(mut self, config: ImportConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the page fetch timeout (whole seconds, minimum one)
    ///
    /// # Example
    /// ```
    /// use recipe_import::RecipeImporter;
    /// use std::time::Duration;
    ///
    /// let importer = RecipeImporter::builder()
    ///     .timeout(Duration::from_secs(5))
    ///     .build()
    ///     .unwrap();
    /// ```
    pub fn timeout(mut self, duration: Duration) -> Self {
        self.config.fetch.timeout_secs = duration.as_secs().max(1);
        self
    }

    /// Set the User-Agent sent when fetching pages
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.config.fetch.user_agent = user_agent.into();
        self
    }

    /// Choose one of the built-in providers instead of the configured default
    pub fn provider(mut self, provider: ProviderKind) -> Self {
        self.provider = Some(provider);
        self
    }

    /// Set the API key for the provider
    ///
    /// This allows passing the API key directly instead of relying on
    /// environment variables or config files.
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Set the model name for the provider
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Point the provider at a different endpoint (proxy or compatible server)
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Use a caller-supplied provider; overrides every other provider setting
    pub fn llm_provider(mut self, provider: Arc<dyn LlmProvider>) -> Self {
        self.llm_provider = Some(provider);
        self
    }

    /// Build the importer.
    ///
    /// A provider that cannot be created (missing key, disabled, unknown name) is
    /// not an error here: schema.org imports still work and the generative
    /// fallback reports [`ImportError::ProviderNotConfigured`] when it is needed.
    pub fn build(self) -> Result<RecipeImporter, ImportError> {
        let fetcher = RequestFetcher::new(&self.config.fetch)?;

        let provider = match self.llm_provider {
            Some(provider) => Some(provider),
            None => {
                let name = self
                    .provider
                    .map(|kind| kind.as_str().to_string())
                    .unwrap_or_else(|| self.config.default_provider.clone());

                let mut provider_config = self
                    .config
                    .providers
                    .get(&name)
                    .cloned()
                    .unwrap_or_default();
                if let Some(key) = self.api_key {
                    provider_config.api_key = Some(key);
                }
                if let Some(model) = self.model {
                    provider_config.model = Some(model);
                }
                if let Some(base_url) = self.base_url {
                    provider_config.base_url = Some(base_url);
                }

                match ProviderFactory::create(&name, &provider_config) {
                    Ok(provider) => Some(Arc::from(provider)),
                    Err(e) => {
                        warn!("AI fallback disabled: {e}");
                        None
                    }
                }
            }
        };

        Ok(RecipeImporter {
            fetcher,
            ai: provider.map(|p| AiExtractor::new(p, self.config.extraction.clone())),
            min_pdf_text_chars: self.config.extraction.min_pdf_text_chars,
        })
    }
}

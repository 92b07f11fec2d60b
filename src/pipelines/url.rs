use super::require_ai;
use crate::error::ImportError;
use crate::extractors::{extract_structured, AiExtractor};
use crate::fetchers::RequestFetcher;
use crate::model::{ImportResult, Source};
use log::{debug, info};
use reqwest::Url;

/// Import a single recipe from a web page.
///
/// This pipeline:
/// 1. Validates the URL (absolute, http or https) before any network I/O
/// 2. Fetches the page with the fetcher's timeout
/// 3. Returns the schema.org recipe if the page carries a complete one
/// 4. Otherwise asks the generative extractor
///
/// The fetched HTML is attached to the recipe as `raw_html` on both paths.
pub async fn process(
    url: &str,
    fetcher: &RequestFetcher,
    ai: Option<&AiExtractor>,
) -> Result<ImportResult, ImportError> {
    let url = validate_url(url)?;

    let html = fetcher.fetch(url.as_str()).await?;
    debug!("Fetched {} bytes from {url}", html.len());

    if let Some(mut recipe) = extract_structured(&html, url.as_str()) {
        info!("Imported '{}' from schema.org data at {url}", recipe.title);
        recipe.raw_html = Some(html);
        return Ok(ImportResult {
            recipe,
            source: Source::SchemaOrg,
        });
    }

    let ai = require_ai(ai)?;
    info!(
        "No structured recipe at {url}, falling back to {}",
        ai.provider_name()
    );
    let mut recipe = ai.extract_recipe(&html).await?;
    info!("Imported '{}' via AI extraction from {url}", recipe.title);
    recipe.raw_html = Some(html);

    Ok(ImportResult {
        recipe,
        source: Source::AiExtraction,
    })
}

/// Parse `url`, accepting only absolute http and https URLs.
pub fn validate_url(url: &str) -> Result<Url, ImportError> {
    let parsed = Url::parse(url.trim())
        .map_err(|e| ImportError::InvalidUrl(format!("{url:?}: {e}")))?;

    match parsed.scheme() {
        "http" | "https" => Ok(parsed),
        scheme => Err(ImportError::InvalidUrl(format!(
            "{url:?}: unsupported scheme {scheme:?}"
        ))),
    }
}

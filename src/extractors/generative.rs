use crate::config::ExtractionConfig;
use crate::error::ImportError;
use crate::model::RecipeData;
use crate::providers::{build_cookbook_prompt, build_recipe_prompt, LlmProvider};
use log::{debug, warn};
use regex::Regex;
use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeSet;
use std::sync::{Arc, LazyLock};

static CODE_FENCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"```(?:json)?\s*(\{[\s\S]*\})\s*```").expect("Invalid code fence regex")
});

/// Recipe extraction backed by a generative model.
///
/// Model output is untrusted: every reply goes through [`parse_recipe_response`]
/// or [`parse_cookbook_response`] before anything reaches the caller.
#[derive(Clone)]
pub struct AiExtractor {
    provider: Arc<dyn LlmProvider>,
    settings: ExtractionConfig,
}

impl AiExtractor {
    pub fn new(provider: Arc<dyn LlmProvider>, settings: ExtractionConfig) -> Self {
        Self { provider, settings }
    }

    pub fn provider_name(&self) -> &str {
        self.provider.provider_name()
    }

    /// Extract a single recipe from page HTML.
    pub async fn extract_recipe(&self, html: &str) -> Result<RecipeData, ImportError> {
        let prompt = build_recipe_prompt(html, self.settings.html_char_budget);
        debug!(
            "Sending {} chars of HTML to {}",
            html.len(),
            self.provider.provider_name()
        );

        let reply = self
            .provider
            .complete(&prompt, self.settings.html_max_tokens)
            .await?;
        debug!("Model reply: {reply}");

        parse_recipe_response(&reply)
    }

    /// Extract every recipe in cookbook text. Incomplete entries are dropped, so
    /// the result may be empty.
    pub async fn extract_all(&self, pdf_text: &str) -> Result<Vec<RecipeData>, ImportError> {
        let prompt = build_cookbook_prompt(pdf_text, self.settings.pdf_char_budget);
        debug!(
            "Sending {} chars of PDF text to {}",
            pdf_text.len(),
            self.provider.provider_name()
        );

        let reply = self
            .provider
            .complete(&prompt, self.settings.pdf_max_tokens)
            .await?;
        debug!("Model reply: {reply}");

        parse_cookbook_response(&reply)
    }
}

/// Validate a single-recipe reply.
///
/// Unparsable JSON and incomplete recipes are both [`ImportError::NoRecipeFound`].
pub fn parse_recipe_response(reply: &str) -> Result<RecipeData, ImportError> {
    let parsed: AiRecipe = serde_json::from_str(strip_code_fence(reply)).map_err(|e| {
        ImportError::NoRecipeFound(format!("model reply is not recipe JSON: {e}"))
    })?;

    let recipe = parsed.into_recipe_data();
    if !recipe.is_complete() {
        return Err(ImportError::NoRecipeFound(
            "Could not extract complete recipe data from the page".to_string(),
        ));
    }
    Ok(recipe)
}

/// Validate a cookbook reply, keeping only complete recipes. Image URLs are
/// always dropped.
pub fn parse_cookbook_response(reply: &str) -> Result<Vec<RecipeData>, ImportError> {
    let parsed: AiCookbook = serde_json::from_str(strip_code_fence(reply)).map_err(|e| {
        ImportError::NoRecipeFound(format!("model reply is not cookbook JSON: {e}"))
    })?;

    let total = parsed.recipes.len();
    let recipes: Vec<RecipeData> = parsed
        .recipes
        .into_iter()
        .enumerate()
        .filter_map(|(index, entry)| match AiRecipe::deserialize(entry) {
            // PDF text carries no images; any URL here was made up by the model
            Ok(recipe) => Some((
                index,
                RecipeData {
                    image_url: None,
                    ..recipe.into_recipe_data()
                },
            )),
            Err(e) => {
                warn!("Dropping malformed recipe entry {index}: {e}");
                None
            }
        })
        .filter_map(|(index, recipe)| {
            if recipe.is_complete() {
                Some(recipe)
            } else {
                warn!("Dropping incomplete recipe entry {index} ({:?})", recipe.title);
                None
            }
        })
        .collect();

    debug!("Kept {} of {} extracted recipes", recipes.len(), total);
    Ok(recipes)
}

/// Strip a markdown code fence around a JSON object, if present.
fn strip_code_fence(reply: &str) -> &str {
    let trimmed = reply.trim();
    CODE_FENCE
        .captures(trimmed)
        .and_then(|captures| captures.get(1))
        .map_or(trimmed, |json| json.as_str())
}

#[derive(Debug, Deserialize)]
struct AiCookbook {
    recipes: Vec<Value>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AiRecipe {
    #[serde(default)]
    title: Option<Value>,
    #[serde(default)]
    ingredients: Option<TextOrLines>,
    #[serde(default)]
    instructions: Option<TextOrLines>,
    #[serde(default)]
    image_url: Option<Value>,
    #[serde(default)]
    tags: Option<TextOrLines>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum TextOrLines {
    Text(String),
    Lines(Vec<Value>),
    Other(Value),
}

impl TextOrLines {
    fn lines(&self) -> Vec<&str> {
        match self {
            TextOrLines::Text(text) => vec![text.as_str()],
            TextOrLines::Lines(lines) => lines
                .iter()
                .filter_map(Value::as_str)
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .collect(),
            TextOrLines::Other(_) => Vec::new(),
        }
    }
}

impl AiRecipe {
    fn into_recipe_data(self) -> RecipeData {
        let title = self
            .title
            .as_ref()
            .and_then(Value::as_str)
            .map(str::trim)
            .unwrap_or_default()
            .to_string();

        let ingredients = self
            .ingredients
            .as_ref()
            .map(|i| i.lines().join("\n"))
            .unwrap_or_default();

        let instructions = self
            .instructions
            .as_ref()
            .map(|i| i.lines().join("\n"))
            .unwrap_or_default();

        // only absolute http(s) URLs; models answer "null" or "" for missing images
        let image_url = self
            .image_url
            .as_ref()
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|url| url.starts_with("http://") || url.starts_with("https://"))
            .map(str::to_string);

        let tags: BTreeSet<String> = match &self.tags {
            Some(TextOrLines::Text(text)) => text
                .split(',')
                .map(str::trim)
                .filter(|tag| !tag.is_empty())
                .map(str::to_string)
                .collect(),
            Some(tags) => tags.lines().into_iter().map(str::to_string).collect(),
            None => BTreeSet::new(),
        };

        RecipeData {
            title,
            ingredients,
            instructions,
            image_url,
            tags,
            raw_html: None,
        }
    }
}

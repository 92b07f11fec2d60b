use crate::model::RecipeData;
use html_escape::decode_html_entities;
use log::debug;
use reqwest::Url;
use scraper::{Html, Selector};
use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeSet;
use std::sync::LazyLock;

static JSON_LD_SELECTOR: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse("script[type='application/ld+json']").expect("Invalid JSON-LD selector")
});

/// Extract a recipe from the schema.org JSON-LD blocks embedded in `html`.
///
/// Returns `None` when no block holds a Recipe (or a HowTo carrying
/// `recipeIngredient`) with a non-empty title, ingredient list and instructions.
/// Blocks that are not valid JSON are skipped. Relative image URLs are resolved
/// against `base_url`.
pub fn extract_structured(html: &str, base_url: &str) -> Option<RecipeData> {
    let document = Html::parse_document(html);
    let scripts: Vec<_> = document.select(&JSON_LD_SELECTOR).collect();
    debug!("JsonLd: found {} JSON-LD script tags", scripts.len());

    for (index, script) in scripts.iter().enumerate() {
        // text(), not inner_html(): the latter re-escapes `&`
        let raw_json: String = script.text().collect();
        let json_ld = match serde_json::from_str::<Value>(&sanitize_json(&raw_json)) {
            Ok(value) => value,
            Err(e) => {
                debug!("JsonLd: script {index} is not valid JSON: {e}");
                continue;
            }
        };

        let Some(recipe_json) = find_recipe(&json_ld) else {
            debug!("JsonLd: no Recipe object in script {index}");
            continue;
        };

        let json_ld_recipe = match JsonLdRecipe::deserialize(recipe_json) {
            Ok(recipe) => recipe,
            Err(e) => {
                debug!("JsonLd: failed to read Recipe in script {index}: {e}");
                continue;
            }
        };

        let recipe = json_ld_recipe.into_recipe_data(base_url);
        if recipe.is_complete() {
            debug!("JsonLd: extracted '{}' from script {index}", recipe.title);
            return Some(recipe);
        }
        debug!("JsonLd: incomplete recipe data in script {index}");
    }

    None
}

/// Depth-first search through arrays and `@graph` collections for the first recipe object.
fn find_recipe(value: &Value) -> Option<&Value> {
    match value {
        Value::Array(items) => items.iter().find_map(find_recipe),
        Value::Object(map) => {
            if has_type(value, "Recipe")
                || (has_type(value, "HowTo") && map.contains_key("recipeIngredient"))
            {
                return Some(value);
            }
            map.get("@graph").and_then(find_recipe)
        }
        _ => None,
    }
}

/// Whether `@type` (or bare `type`) names `expected`, either directly or within an array.
fn has_type(value: &Value, expected: &str) -> bool {
    let matches = |candidate: &Value| {
        candidate
            .as_str()
            .is_some_and(|t| t.eq_ignore_ascii_case(expected))
    };

    match value.get("@type").or_else(|| value.get("type")) {
        Some(Value::Array(types)) => types.iter().any(matches),
        Some(other) => matches(other),
        None => false,
    }
}

#[derive(Debug, Deserialize)]
struct JsonLdRecipe {
    name: Option<Value>,
    headline: Option<Value>,
    image: Option<ImageType>,
    #[serde(rename = "recipeIngredient")]
    recipe_ingredient: Option<StringOrList>,
    #[serde(rename = "recipeInstructions")]
    recipe_instructions: Option<Value>,
    #[serde(rename = "recipeCategory")]
    recipe_category: Option<StringOrList>,
    #[serde(rename = "recipeCuisine")]
    recipe_cuisine: Option<StringOrList>,
    keywords: Option<StringOrList>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum StringOrList {
    Single(String),
    Multiple(Vec<Value>),
    Other(Value),
}

impl StringOrList {
    fn strings(&self) -> Vec<&str> {
        match self {
            StringOrList::Single(s) => vec![s.as_str()],
            StringOrList::Multiple(items) => items.iter().filter_map(Value::as_str).collect(),
            StringOrList::Other(_) => Vec::new(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ImageObject {
    url: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ImageType {
    Url(String),
    Multiple(Vec<ImageType>),
    Object(ImageObject),
    Other(Value),
}

impl ImageType {
    fn url(&self) -> Option<&str> {
        match self {
            ImageType::Url(url) => Some(url.as_str()),
            ImageType::Object(obj) => obj.url.as_deref(),
            // only the first entry is considered
            ImageType::Multiple(images) => images.first().and_then(|first| match first {
                ImageType::Url(url) => Some(url.as_str()),
                ImageType::Object(obj) => obj.url.as_deref(),
                _ => None,
            }),
            ImageType::Other(_) => None,
        }
    }
}

impl JsonLdRecipe {
    fn into_recipe_data(self, base_url: &str) -> RecipeData {
        let title = [&self.name, &self.headline]
            .into_iter()
            .flatten()
            .filter_map(Value::as_str)
            .map(|t| decode_html_symbols(t.trim()))
            .find(|t| !t.is_empty())
            .unwrap_or_default();

        let ingredients = match &self.recipe_ingredient {
            Some(StringOrList::Single(text)) => decode_html_symbols(text.trim()),
            Some(list) => list
                .strings()
                .into_iter()
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .map(decode_html_symbols)
                .collect::<Vec<_>>()
                .join("\n"),
            None => String::new(),
        };

        let instructions = self
            .recipe_instructions
            .as_ref()
            .map(|value| decode_html_symbols(flatten_instructions(value).trim()))
            .unwrap_or_default();

        let image_url = self
            .image
            .as_ref()
            .and_then(ImageType::url)
            .and_then(|url| resolve_image_url(&decode_html_symbols(url), base_url));

        RecipeData {
            title,
            ingredients,
            instructions,
            image_url,
            tags: self.tags(),
            raw_html: None,
        }
    }

    /// Union of categories, cuisines and keywords. Keyword strings are comma-separated.
    fn tags(&self) -> BTreeSet<String> {
        let mut tags = BTreeSet::new();

        for field in [&self.recipe_category, &self.recipe_cuisine].into_iter().flatten() {
            tags.extend(field.strings().into_iter().map(str::trim).map(decode_html_symbols));
        }

        match &self.keywords {
            Some(StringOrList::Single(keywords)) => {
                tags.extend(keywords.split(',').map(str::trim).map(decode_html_symbols));
            }
            Some(keywords) => {
                tags.extend(keywords.strings().into_iter().map(str::trim).map(decode_html_symbols));
            }
            None => {}
        }

        tags.retain(|tag| !tag.is_empty());
        tags
    }
}

/// Flatten `recipeInstructions` into text.
///
/// Step objects inside an array are prefixed with their 1-based position; sections
/// contribute a `Name:` header followed by their own flattened steps.
fn flatten_instructions(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Array(items) => {
            let mut steps = Vec::new();
            for (index, item) in items.iter().enumerate() {
                if let Some(text) = item.as_str() {
                    if !text.trim().is_empty() {
                        steps.push(text.to_string());
                    }
                } else if has_type(item, "HowToSection") {
                    if let Some(name) = item.get("name").and_then(Value::as_str) {
                        steps.push(format!("\n{name}:"));
                    }
                    if let Some(nested) = item.get("itemListElement") {
                        let section_steps = flatten_instructions(nested);
                        if !section_steps.is_empty() {
                            steps.push(section_steps);
                        }
                    }
                } else if is_step(item) {
                    if let Some(text) = step_text(item) {
                        steps.push(format!("{}. {}", index + 1, text));
                    }
                }
            }
            steps.join("\n\n")
        }
        Value::Object(_) if is_step(value) => step_text(value).unwrap_or_default(),
        _ => String::new(),
    }
}

fn is_step(value: &Value) -> bool {
    has_type(value, "HowToStep")
        || (value.get("@type").is_none() && value.get("text").is_some_and(Value::is_string))
}

/// Step text, preferring `text`, then `itemListElement.text`, then `name`.
fn step_text(step: &Value) -> Option<String> {
    [
        step.get("text"),
        step.get("itemListElement").and_then(|e| e.get("text")),
        step.get("name"),
    ]
    .into_iter()
    .flatten()
    .filter_map(Value::as_str)
    .map(str::trim)
    .find(|text| !text.is_empty())
    .map(str::to_string)
}

/// Absolute URLs pass through; relative ones are joined onto `base_url`.
/// Anything that cannot be resolved is dropped.
fn resolve_image_url(url: &str, base_url: &str) -> Option<String> {
    let url = url.trim();
    if url.is_empty() {
        return None;
    }
    if url.starts_with("http://") || url.starts_with("https://") {
        return Some(url.to_string());
    }
    match Url::parse(base_url).and_then(|base| base.join(url)) {
        Ok(resolved) => Some(resolved.to_string()),
        Err(e) => {
            debug!("JsonLd: dropping unresolvable image URL {url:?}: {e}");
            None
        }
    }
}

fn decode_html_symbols(text: &str) -> String {
    // some sites double-encode entities
    decode_html_entities(&decode_html_entities(text)).into_owned()
}

/// Escape raw control characters inside JSON strings. Publishers regularly emit
/// literal newlines and tabs in JSON-LD text fields, which strict parsers reject.
fn sanitize_json(json: &str) -> String {
    let mut result = String::with_capacity(json.len());
    let mut in_string = false;
    let mut escaped = false;

    for c in json.chars() {
        if in_string {
            if escaped {
                escaped = false;
                result.push(c);
                continue;
            }
            match c {
                '\\' => {
                    escaped = true;
                    result.push(c);
                }
                '"' => {
                    in_string = false;
                    result.push(c);
                }
                '\n' => result.push_str("\\n"),
                '\r' => result.push_str("\\r"),
                '\t' => result.push_str("\\t"),
                c if c.is_control() => {}
                c => result.push(c),
            }
        } else {
            if c == '"' {
                in_string = true;
            }
            result.push(c);
        }
    }

    result
}

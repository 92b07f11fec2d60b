use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// A recipe produced by the import pipeline.
///
/// `ingredients` is a newline-delimited blob rather than a structured list so
/// that free-form recipe text survives untouched. Use [`RecipeData::ingredient_lines`]
/// to iterate over the individual lines.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeData {
    pub title: String,
    pub ingredients: String,
    pub instructions: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default)]
    pub tags: BTreeSet<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_html: Option<String>,
}

impl RecipeData {
    /// A recipe is persistable only when title, ingredients and instructions
    /// all carry non-whitespace text.
    pub fn is_complete(&self) -> bool {
        !self.title.trim().is_empty()
            && !self.ingredients.trim().is_empty()
            && !self.instructions.trim().is_empty()
    }

    /// Non-blank, trimmed ingredient lines.
    pub fn ingredient_lines(&self) -> impl Iterator<Item = &str> {
        split_ingredient_lines(&self.ingredients)
    }
}

pub(crate) fn split_ingredient_lines(text: &str) -> impl Iterator<Item = &str> {
    text.lines().map(str::trim).filter(|line| !line.is_empty())
}

/// Provenance of an imported recipe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Source {
    /// Structured schema.org markup embedded in the page.
    #[serde(rename = "schema.org")]
    SchemaOrg,
    /// Inferred by a generative model.
    #[serde(rename = "ai-extraction")]
    AiExtraction,
}

impl Source {
    pub fn as_str(&self) -> &'static str {
        match self {
            Source::SchemaOrg => "schema.org",
            Source::AiExtraction => "ai-extraction",
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportResult {
    pub recipe: RecipeData,
    pub source: Source,
}

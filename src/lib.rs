//! Recipe import pipeline.
//!
//! Turns a recipe web page or a PDF cookbook into [`RecipeData`]. Pages carrying
//! schema.org JSON-LD are parsed directly; everything else goes to a generative
//! model. The [`ingredients`] module has the shopping-list helpers built on top of
//! imported ingredient lines.
//!
//! ```no_run
//! # async fn run() -> Result<(), recipe_import::ImportError> {
//! let result = recipe_import::import_from_url("https://example.com/recipe").await?;
//! println!("{}", result.recipe.ingredients);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod extractors;
pub mod fetchers;
pub mod importer;
pub mod ingredients;
pub mod model;
pub mod pdf_to_text;
pub mod pipelines;
pub mod providers;

pub use config::ImportConfig;
pub use error::{ErrorKind, FetchFailure, ImportError};
pub use importer::{ProviderKind, RecipeImporter, RecipeImporterBuilder};
pub use ingredients::{categorize, normalize, sort_key, GroceryCategory, GroceryList};
pub use model::{ImportResult, RecipeData, Source};
pub use providers::LlmProvider;

use log::warn;

fn importer_from_environment() -> Result<RecipeImporter, ImportError> {
    let config = ImportConfig::load().unwrap_or_else(|e| {
        warn!("Ignoring invalid configuration, using defaults: {e}");
        ImportConfig::default()
    });
    RecipeImporter::from_config(&config)
}

/// Import one recipe from `url` using configuration from the environment.
pub async fn import_from_url(url: &str) -> Result<ImportResult, ImportError> {
    importer_from_environment()?.import_from_url(url).await
}

/// Import every recipe in a PDF using configuration from the environment.
pub async fn import_from_pdf(pdf_bytes: impl Into<Vec<u8>>) -> Result<Vec<RecipeData>, ImportError> {
    importer_from_environment()?.import_from_pdf(pdf_bytes).await
}

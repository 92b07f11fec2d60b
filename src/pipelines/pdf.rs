use super::require_ai;
use crate::error::ImportError;
use crate::extractors::AiExtractor;
use crate::model::RecipeData;
use crate::pdf_to_text;
use log::info;

/// Import every recipe in a PDF cookbook.
///
/// Decoding runs on a blocking thread. A decoder panic on a hostile file is
/// reported as an invalid PDF.
pub async fn process(
    pdf_bytes: Vec<u8>,
    ai: Option<&AiExtractor>,
    min_text_chars: usize,
) -> Result<Vec<RecipeData>, ImportError> {
    let text = tokio::task::spawn_blocking(move || pdf_to_text::extract_text(&pdf_bytes))
        .await
        .map_err(|e| ImportError::InvalidPdf(format!("PDF decoder failed: {e}")))??;

    process_text(&text, ai, min_text_chars).await
}

/// Import every recipe in already-decoded cookbook text.
///
/// Text shorter than `min_text_chars` (after trimming) is treated as a scanned
/// document without a text layer. An empty result after dropping incomplete
/// recipes is [`ImportError::NoRecipeFound`].
pub async fn process_text(
    text: &str,
    ai: Option<&AiExtractor>,
    min_text_chars: usize,
) -> Result<Vec<RecipeData>, ImportError> {
    let text_chars = text.trim().chars().count();
    if text_chars < min_text_chars {
        return Err(ImportError::NoRecipeFound(format!(
            "PDF contains only {text_chars} characters of text; scanned or image-only PDFs are not supported"
        )));
    }

    let ai = require_ai(ai)?;
    let recipes = ai.extract_all(text).await?;
    if recipes.is_empty() {
        return Err(ImportError::NoRecipeFound(
            "No complete recipes found in the PDF".to_string(),
        ));
    }

    info!("Imported {} recipes from PDF", recipes.len());
    Ok(recipes)
}

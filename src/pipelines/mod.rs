//! Import pipelines. Each takes its collaborators as arguments and holds no state
//! between calls.

pub mod pdf;
pub mod url;

use crate::error::ImportError;
use crate::extractors::AiExtractor;

fn require_ai(ai: Option<&AiExtractor>) -> Result<&AiExtractor, ImportError> {
    ai.ok_or_else(|| {
        ImportError::ProviderNotConfigured(
            "no AI provider available for generative extraction".to_string(),
        )
    })
}

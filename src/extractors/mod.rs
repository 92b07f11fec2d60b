//! Recipe extraction strategies: structured schema.org data first, a generative
//! model as the fallback.

mod generative;
mod json_ld;

pub use generative::{parse_cookbook_response, parse_recipe_response, AiExtractor};
pub use json_ld::extract_structured;

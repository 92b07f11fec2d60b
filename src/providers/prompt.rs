/// Single-recipe extraction prompt, followed directly by the page HTML.
///
/// Loaded from `recipe_prompt.txt` at compile time so the wording can be edited
/// without dealing with Rust string syntax.
pub const RECIPE_PROMPT: &str = include_str!("recipe_prompt.txt");

/// Multi-recipe prompt for cookbook text, answered with a `{"recipes": [...]}` wrapper.
pub const COOKBOOK_PROMPT: &str = include_str!("cookbook_prompt.txt");

const HTML_TRUNCATION_MARKER: &str = "\n\n[HTML content truncated for processing...]";
const PDF_TRUNCATION_MARKER: &str = "\n\n[PDF content truncated...]";

/// Build the HTML-mode prompt, cutting the page to at most `char_budget` characters.
pub fn build_recipe_prompt(html: &str, char_budget: usize) -> String {
    format!(
        "{RECIPE_PROMPT}{}",
        truncate_with_marker(html, char_budget, HTML_TRUNCATION_MARKER)
    )
}

/// Build the cookbook prompt, cutting the text to at most `char_budget` characters.
pub fn build_cookbook_prompt(pdf_text: &str, char_budget: usize) -> String {
    format!(
        "{COOKBOOK_PROMPT}{}",
        truncate_with_marker(pdf_text, char_budget, PDF_TRUNCATION_MARKER)
    )
}

fn truncate_with_marker(text: &str, char_budget: usize, marker: &str) -> String {
    match text.char_indices().nth(char_budget) {
        Some((cut, _)) => format!("{}{marker}", &text[..cut]),
        None => text.to_string(),
    }
}

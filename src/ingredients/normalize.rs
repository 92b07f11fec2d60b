use regex::Regex;
use std::sync::LazyLock;

/// Measurement units and common preparation descriptors, matched as whole words
const UNITS: &[&str] = &[
    // Volume
    "cup", "cups", "tablespoon", "tablespoons", "tbsp", "teaspoon", "teaspoons", "tsp",
    "fluid ounce", "fluid ounces", "fl oz", "pint", "pints", "quart", "quarts", "gallon",
    "gallons", "liter", "liters", "l", "milliliter", "milliliters", "ml",
    // Weight
    "pound", "pounds", "lb", "lbs", "ounce", "ounces", "oz", "gram", "grams", "g",
    "kilogram", "kilograms", "kg",
    // Count
    "piece", "pieces", "whole", "clove", "cloves", "head", "heads", "bunch", "bunches",
    "stalk", "stalks", "sprig", "sprigs", "can", "cans", "jar", "jars", "package",
    "packages", "box", "boxes", "slice", "slices", "sheet", "sheets",
    // Descriptors
    "large", "medium", "small", "fresh", "dried", "frozen", "canned", "chopped", "diced",
    "sliced", "minced", "crushed", "ground", "finely", "coarsely", "roughly", "optional",
    "to taste", "as needed",
];

const STOP_WORDS: &[&str] = &["of", "the", "a", "an", "for", "or", "and"];

static PARENTHESIZED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\([^)]*\)").expect("Invalid parenthesized regex"));

// Integers, decimals, fractions and ranges: "2", "2.5", "1/2", "1-2"
static NUMBERS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+([/.\-]\d+)?").expect("Invalid number regex"));

static UNIT_WORDS: LazyLock<Regex> = LazyLock::new(|| whole_words(UNITS));

static STOP_WORD_WORDS: LazyLock<Regex> = LazyLock::new(|| whole_words(STOP_WORDS));

static WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("Invalid whitespace regex"));

fn whole_words(words: &[&str]) -> Regex {
    let alternation = words
        .iter()
        .map(|word| regex::escape(word))
        .collect::<Vec<_>>()
        .join("|");
    Regex::new(&format!(r"(?i)\b({alternation})\b")).expect("Invalid word list regex")
}

/// Reduce an ingredient line to its core name, e.g. `"2 cloves garlic, minced"` → `"garlic"`.
///
/// Strips parenthesized asides, numbers, stop words, then unit and descriptor words,
/// collapses whitespace and trims commas and hyphens from both ends. Applying it
/// twice gives the same result as applying it once.
/// May return an empty string; see [`sort_key`] for a key that never is.
pub fn normalize(ingredient_line: &str) -> String {
    let lowered = ingredient_line.to_lowercase();

    let stripped = PARENTHESIZED.replace_all(&lowered, "");
    let stripped = NUMBERS.replace_all(&stripped, "");
    let stripped = STOP_WORD_WORDS.replace_all(&stripped, "");
    let mut collapsed = WHITESPACE.replace_all(&stripped, " ").into_owned();

    // dropping a unit can join the halves of a multi-word unit ("to cup taste")
    loop {
        let without_units = UNIT_WORDS.replace_all(&collapsed, "");
        let next = WHITESPACE.replace_all(&without_units, " ").into_owned();
        if next == collapsed {
            break;
        }
        collapsed = next;
    }

    collapsed
        .trim_matches(|c: char| c == ',' || c == '-' || c.is_whitespace())
        .to_string()
}

/// Grouping key for an ingredient line.
///
/// Falls back to the lower-cased original when normalization removes everything,
/// so the key is empty only for empty input.
pub fn sort_key(ingredient_line: &str) -> String {
    let normalized = normalize(ingredient_line);
    if normalized.is_empty() {
        ingredient_line.to_lowercase()
    } else {
        normalized
    }
}

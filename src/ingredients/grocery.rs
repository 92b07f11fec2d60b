use super::{categorize, sort_key, GroceryCategory};
use crate::model::{split_ingredient_lines, RecipeData};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GroceryItem {
    pub ingredient_text: String,
    pub category: GroceryCategory,
    pub checked: bool,
}

impl GroceryItem {
    pub fn new(ingredient_text: impl Into<String>) -> Self {
        let ingredient_text = ingredient_text.into();
        let category = categorize(&ingredient_text);
        Self {
            ingredient_text,
            category,
            checked: false,
        }
    }
}

/// Items of one category, sorted by grouping key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GrocerySection {
    pub category: GroceryCategory,
    pub items: Vec<GroceryItem>,
}

/// A shopping list grouped by store section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GroceryList {
    items: Vec<GroceryItem>,
}

impl GroceryList {
    /// Build a list from ingredient blobs; each non-blank line becomes one item.
    pub fn from_ingredient_texts<'a, I>(texts: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let items = texts
            .into_iter()
            .flat_map(split_ingredient_lines)
            .map(GroceryItem::new)
            .collect();
        Self { items }
    }

    pub fn from_recipes(recipes: &[RecipeData]) -> Self {
        Self::from_ingredient_texts(recipes.iter().map(|r| r.ingredients.as_str()))
    }

    pub fn items(&self) -> &[GroceryItem] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn push(&mut self, item: GroceryItem) {
        self.items.push(item);
    }

    /// Mark every item whose text matches `ingredient_text` as checked. Returns how many changed.
    pub fn check(&mut self, ingredient_text: &str) -> usize {
        let mut changed = 0;
        for item in self.items.iter_mut().filter(|i| i.ingredient_text == ingredient_text) {
            if !item.checked {
                item.checked = true;
                changed += 1;
            }
        }
        changed
    }

    /// Non-empty sections in display order, items sorted by [`sort_key`].
    ///
    /// Lines sharing a grouping key ("2 cloves garlic", "1 clove garlic") end up adjacent.
    pub fn sections(&self) -> Vec<GrocerySection> {
        GroceryCategory::ALL
            .into_iter()
            .filter_map(|category| {
                let mut keyed: Vec<(String, &GroceryItem)> = self
                    .items
                    .iter()
                    .filter(|item| item.category == category)
                    .map(|item| (sort_key(&item.ingredient_text), item))
                    .collect();
                if keyed.is_empty() {
                    return None;
                }
                // stable sort keeps insertion order within a key
                keyed.sort_by(|(a, _), (b, _)| a.cmp(b));
                Some(GrocerySection {
                    category,
                    items: keyed.into_iter().map(|(_, item)| item.clone()).collect(),
                })
            })
            .collect()
    }

    /// Plain-text checklist suitable for pasting into a notes app.
    pub fn to_checklist_text(&self) -> String {
        let mut output = String::from("Shopping List\n\n");
        for section in self.sections() {
            output.push_str(section.category.display_name());
            output.push('\n');
            for item in &section.items {
                let checkbox = if item.checked { "- [x]" } else { "- [ ]" };
                output.push_str(&format!("{checkbox} {}\n", item.ingredient_text));
            }
            output.push('\n');
        }
        output
    }
}

use serde::{Deserialize, Serialize};
use std::fmt;

/// Grocery store sections an ingredient line can be filed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum GroceryCategory {
    #[serde(rename = "Produce")]
    Produce,
    #[serde(rename = "Meat & Seafood")]
    MeatSeafood,
    #[serde(rename = "Dairy & Eggs")]
    Dairy,
    #[serde(rename = "Bakery")]
    Bakery,
    #[serde(rename = "Pantry/Dry Goods")]
    Pantry,
    #[serde(rename = "Frozen")]
    Frozen,
    #[serde(rename = "Other")]
    Other,
}

impl GroceryCategory {
    /// Every category in display (and matching) order.
    pub const ALL: [GroceryCategory; 7] = [
        GroceryCategory::Produce,
        GroceryCategory::MeatSeafood,
        GroceryCategory::Dairy,
        GroceryCategory::Bakery,
        GroceryCategory::Pantry,
        GroceryCategory::Frozen,
        GroceryCategory::Other,
    ];

    pub fn display_name(&self) -> &'static str {
        match self {
            GroceryCategory::Produce => "Produce",
            GroceryCategory::MeatSeafood => "Meat & Seafood",
            GroceryCategory::Dairy => "Dairy & Eggs",
            GroceryCategory::Bakery => "Bakery",
            GroceryCategory::Pantry => "Pantry/Dry Goods",
            GroceryCategory::Frozen => "Frozen",
            GroceryCategory::Other => "Other",
        }
    }

    /// Keywords that file a line under this category. `Other` has none.
    pub fn keywords(&self) -> &'static [&'static str] {
        match self {
            GroceryCategory::Produce => PRODUCE,
            GroceryCategory::MeatSeafood => MEAT_SEAFOOD,
            GroceryCategory::Dairy => DAIRY,
            GroceryCategory::Bakery => BAKERY,
            GroceryCategory::Pantry => PANTRY,
            GroceryCategory::Frozen => FROZEN,
            GroceryCategory::Other => &[],
        }
    }
}

impl fmt::Display for GroceryCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

const PRODUCE: &[&str] = &[
    "tomato", "lettuce", "onion", "garlic", "carrot", "potato", "celery", "pepper",
    "cucumber", "spinach", "broccoli", "cauliflower", "zucchini", "apple", "banana",
    "orange", "lemon", "lime", "avocado", "mushroom", "corn", "bean", "pea", "herb",
    "parsley", "cilantro", "basil", "thyme", "rosemary", "oregano", "mint", "dill", "sage",
    "vegetable", "fruit", "berry", "strawberry", "blueberry", "raspberry", "grape", "melon",
    "kale", "chard", "arugula", "cabbage", "squash", "eggplant",
];

const MEAT_SEAFOOD: &[&str] = &[
    "chicken", "beef", "pork", "lamb", "turkey", "duck", "bacon", "sausage", "ham", "steak",
    "ground beef", "ground turkey", "fish", "salmon", "tuna", "shrimp", "crab", "lobster",
    "scallop", "mussel", "oyster", "tilapia", "cod", "halibut", "sardine", "anchovy", "meat",
    "seafood", "fillet", "breast", "thigh", "wing", "rib",
];

const DAIRY: &[&str] = &[
    "milk", "cheese", "cheddar", "mozzarella", "parmesan", "yogurt", "butter", "cream",
    "sour cream", "whipped cream", "half and half", "cottage cheese", "ricotta", "feta",
    "brie", "goat cheese", "egg", "heavy cream", "light cream", "buttermilk",
];

const BAKERY: &[&str] = &[
    "bread", "baguette", "roll", "bun", "bagel", "croissant", "muffin", "donut", "danish",
    "scone", "tortilla", "pita", "naan", "ciabatta", "sourdough", "rye", "wheat bread",
    "white bread",
];

const PANTRY: &[&str] = &[
    "flour", "sugar", "salt", "pepper", "rice", "pasta", "spaghetti", "penne", "macaroni",
    "oil", "olive oil", "vegetable oil", "coconut oil", "vinegar", "soy sauce", "sauce",
    "broth", "stock", "bouillon", "canned", "can", "jar", "tomato paste", "tomato sauce",
    "honey", "syrup", "maple syrup", "jam", "jelly", "peanut butter", "almond butter", "oat",
    "cereal", "granola", "nut", "almond", "walnut", "pecan", "cashew", "dried", "raisin",
    "date", "fig", "spice", "cumin", "paprika", "cinnamon", "nutmeg", "ginger", "turmeric",
    "curry", "chili powder", "baking powder", "baking soda", "yeast", "cornstarch", "vanilla",
    "extract", "chocolate chip", "cocoa", "bean", "lentil", "chickpea", "kidney bean",
    "black bean", "quinoa", "couscous", "barley",
];

const FROZEN: &[&str] = &[
    "frozen", "ice cream", "sorbet", "frozen yogurt", "popsicle", "frozen vegetable",
    "frozen fruit", "frozen pizza", "frozen dinner", "frozen meal", "frozen french fries",
    "frozen chicken",
];

/// File an ingredient line under a grocery category.
///
/// Categories are tried in [`GroceryCategory::ALL`] order and the first one with a
/// keyword contained anywhere in the lower-cased line wins. Matching is plain
/// substring containment, so "rib" also matches "ribbon". Lines matching nothing
/// are [`GroceryCategory::Other`].
pub fn categorize(ingredient_line: &str) -> GroceryCategory {
    let lowered = ingredient_line.to_lowercase();

    GroceryCategory::ALL
        .into_iter()
        .find(|category| {
            category
                .keywords()
                .iter()
                .any(|keyword| lowered.contains(keyword))
        })
        .unwrap_or(GroceryCategory::Other)
}

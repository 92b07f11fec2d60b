//! Helpers for turning free-form ingredient lines into shopping-list data.
//!
//! Nothing here touches the network; every function is pure and infallible.

mod categorize;
mod grocery;
mod normalize;

pub use categorize::{categorize, GroceryCategory};
pub use grocery::{GroceryItem, GroceryList, GrocerySection};
pub use normalize::{normalize, sort_key};

//! Drink catalog layer
//!
//! This module handles everything that is not UI:
//! - Catalog loading (cocktails and shots)
//! - Ingredient name normalization
//! - Stock counts and their persistence
//! - List search and theme filtering

pub mod filter;
pub mod ingredients;
pub mod load;
pub mod stock;

pub use filter::{theme_from_option, theme_options, DrinkFilter};
pub use load::Catalog;
pub use stock::Stock;

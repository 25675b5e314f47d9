//! Data models
//!
//! Rust structs representing database entities.

mod ingredient;
mod nutrition;
mod recipe;

pub use ingredient::Ingredient;
pub use nutrition::Nutrition;
pub use recipe::{
    recalculate_recipe_nutrition, Recipe, RecipeCreate, RecipeError, RecipeResult,
};

//! Recipe entity.

pub mod model;

pub use model::{Ingredient, Recipe, RecipeMetadata, RecipeStep};

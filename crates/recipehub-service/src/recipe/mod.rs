//! Recipe CRUD.

pub mod service;

pub use service::{RecipeDraft, RecipeService};

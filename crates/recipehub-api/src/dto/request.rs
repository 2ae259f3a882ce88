//! Request DTOs with validation.

use serde::{Deserialize, Serialize};
use validator::Validate;

use recipehub_entity::recipe::{Ingredient, RecipeMetadata, RecipeStep};

/// Registration request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterRequest {
    /// Username.
    #[validate(length(min = 3, max = 100, message = "Username must be 3-100 characters"))]
    pub username: String,
    /// Email.
    pub email: Option<String>,
    /// Password.
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,
}

/// Login request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    /// Username.
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,
    /// Password.
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Create or replace a recipe.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RecipeRequest {
    /// Recipe title.
    #[validate(length(min = 1, max = 255, message = "Title must be 1-255 characters"))]
    pub title: String,
    /// Longer description.
    pub description: Option<String>,
    /// Number of servings.
    pub servings: Option<i32>,
    /// Ingredient list.
    #[serde(default)]
    pub ingredients: Vec<Ingredient>,
    /// Preparation steps.
    #[serde(default)]
    pub steps: Vec<RecipeStep>,
    /// Descriptive metadata.
    pub metadata: Option<RecipeMetadata>,
}

/// Set the favorite flag on a recipe.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FavoriteRequest {
    /// New favorite state.
    pub favorite: bool,
}

/// Share a recipe with another user.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ShareRecipeRequest {
    /// Recipient username.
    #[validate(length(min = 1, message = "Recipient username is required"))]
    pub to_username: String,
    /// Optional message to the recipient.
    #[validate(length(max = 2000, message = "Message must be at most 2000 characters"))]
    pub message: Option<String>,
}

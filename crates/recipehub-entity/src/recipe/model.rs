//! Recipe entity model and the deep-copy used when a share is accepted.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single ingredient line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ingredient {
    /// Quantity (None for "to taste" style entries).
    pub amount: Option<f64>,
    /// Measurement unit.
    pub unit: Option<String>,
    /// The ingredient itself.
    pub item: String,
    /// Free-form notes.
    pub notes: Option<String>,
    /// Section heading this ingredient belongs to (e.g. "Sauce").
    pub section: Option<String>,
}

/// One numbered preparation step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeStep {
    /// Step number, 1-based.
    pub step: i32,
    /// The instruction text.
    pub instruction: String,
    /// Free-form notes.
    pub notes: Option<String>,
}

/// Descriptive metadata attached to a recipe.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecipeMetadata {
    /// Where the recipe was imported from.
    pub source_url: Option<String>,
    /// Original author.
    pub author: Option<String>,
    /// Language of the recipe text.
    pub language: Option<String>,
    /// Category tags.
    #[serde(default)]
    pub categories: Vec<String>,
    /// Cover image URL.
    pub image_url: Option<String>,
}

/// A recipe owned by a single user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    /// Unique recipe identifier.
    pub id: Uuid,
    /// Owning user.
    pub owner_id: Uuid,
    /// Recipe title.
    pub title: String,
    /// Longer description.
    pub description: Option<String>,
    /// Number of servings the quantities are for.
    pub servings: Option<i32>,
    /// Ingredient list.
    pub ingredients: Vec<Ingredient>,
    /// Preparation steps.
    pub steps: Vec<RecipeStep>,
    /// Descriptive metadata.
    pub metadata: Option<RecipeMetadata>,
    /// If this recipe was imported via a share: the sender's user id.
    pub shared_from_user_id: Option<Uuid>,
    /// Snapshot of the sender's username at accept time.
    pub shared_from_username: Option<String>,
    /// If imported via a share: the sender's original recipe id.
    pub shared_original_recipe_id: Option<Uuid>,
    /// Whether the owner marked this recipe as a favorite.
    pub favorite: bool,
    /// When the recipe was created.
    pub created_at: DateTime<Utc>,
    /// When the recipe was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Recipe {
    /// Build the recipient's independent copy of this recipe.
    ///
    /// Content fields (title, description, servings, ingredients, steps,
    /// metadata) are duplicated; per-owner bookkeeping (favorite flag,
    /// timestamps) starts fresh. The copy records where it came from so the
    /// recipient's UI can show "shared by ...". After this call the copy and
    /// the original share no mutable state: mutating one never affects the
    /// other.
    pub fn copy_for_recipient(
        &self,
        recipient_id: Uuid,
        sender_id: Uuid,
        sender_username: Option<String>,
        now: DateTime<Utc>,
    ) -> Recipe {
        Recipe {
            id: Uuid::new_v4(),
            owner_id: recipient_id,
            title: self.title.clone(),
            description: self.description.clone(),
            servings: self.servings,
            ingredients: self.ingredients.clone(),
            steps: self.steps.clone(),
            metadata: self.metadata.clone(),
            shared_from_user_id: Some(sender_id),
            shared_from_username: sender_username,
            shared_original_recipe_id: Some(self.id),
            favorite: false,
            created_at: now,
            updated_at: now,
        }
    }
}

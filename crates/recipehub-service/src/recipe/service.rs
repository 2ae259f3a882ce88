//! Recipe CRUD service.
//!
//! Thin plumbing over [`RecipeStore`]: every call is scoped to the
//! caller's own collection, except the admin read views. Admin accounts
//! are read-only and never mutate anyone's recipes.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use recipehub_core::error::AppError;
use recipehub_core::result::AppResult;
use recipehub_core::traits::Clock;
use recipehub_database::RecipeStore;
use recipehub_entity::recipe::{Ingredient, Recipe, RecipeMetadata, RecipeStep};
use recipehub_entity::user::UserRole;

/// Content fields for creating or replacing a recipe.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct RecipeDraft {
    /// Recipe title.
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

/// Manages per-owner recipe CRUD and the admin read views.
pub struct RecipeService {
    recipes: Arc<dyn RecipeStore>,
    clock: Arc<dyn Clock>,
}

impl RecipeService {
    /// Creates a new recipe service.
    pub fn new(recipes: Arc<dyn RecipeStore>, clock: Arc<dyn Clock>) -> Self {
        Self { recipes, clock }
    }

    fn reject_admin_mutation(role: UserRole) -> AppResult<()> {
        if role.is_admin() {
            return Err(AppError::authorization("Admin accounts are read-only"));
        }
        Ok(())
    }

    /// Lists recipes: the caller's own, or all of them for admins.
    pub async fn list(&self, user_id: Uuid, role: UserRole) -> AppResult<Vec<Recipe>> {
        if role.is_admin() {
            self.recipes.list_all().await
        } else {
            self.recipes.list_for_owner(user_id).await
        }
    }

    /// Gets one recipe: the caller's own, or any recipe for admins.
    pub async fn get(&self, user_id: Uuid, role: UserRole, recipe_id: Uuid) -> AppResult<Recipe> {
        let recipe = if role.is_admin() {
            self.recipes.find_any(recipe_id).await?
        } else {
            self.recipes.find_by_owner(user_id, recipe_id).await?
        };
        recipe.ok_or_else(|| AppError::not_found("Recipe not found"))
    }

    /// Creates a new recipe in the caller's collection.
    pub async fn create(
        &self,
        user_id: Uuid,
        role: UserRole,
        draft: RecipeDraft,
    ) -> AppResult<Recipe> {
        Self::reject_admin_mutation(role)?;

        let now = self.clock.now();
        let recipe = Recipe {
            id: Uuid::new_v4(),
            owner_id: user_id,
            title: draft.title,
            description: draft.description,
            servings: draft.servings,
            ingredients: draft.ingredients,
            steps: draft.steps,
            metadata: draft.metadata,
            shared_from_user_id: None,
            shared_from_username: None,
            shared_original_recipe_id: None,
            favorite: false,
            created_at: now,
            updated_at: now,
        };
        let saved = self.recipes.save_for_owner(user_id, &recipe).await?;
        info!(user_id = %user_id, recipe_id = %saved.id, "Recipe created");
        Ok(saved)
    }

    /// Replaces the content of an existing recipe in the caller's
    /// collection. Provenance and bookkeeping fields are preserved.
    pub async fn update(
        &self,
        user_id: Uuid,
        role: UserRole,
        recipe_id: Uuid,
        draft: RecipeDraft,
    ) -> AppResult<Recipe> {
        Self::reject_admin_mutation(role)?;

        let mut recipe = self
            .recipes
            .find_by_owner(user_id, recipe_id)
            .await?
            .ok_or_else(|| AppError::not_found("Recipe not found"))?;

        recipe.title = draft.title;
        recipe.description = draft.description;
        recipe.servings = draft.servings;
        recipe.ingredients = draft.ingredients;
        recipe.steps = draft.steps;
        recipe.metadata = draft.metadata;
        recipe.updated_at = self.clock.now();

        self.recipes.save_for_owner(user_id, &recipe).await
    }

    /// Sets the favorite flag on a recipe in the caller's collection.
    pub async fn set_favorite(
        &self,
        user_id: Uuid,
        role: UserRole,
        recipe_id: Uuid,
        favorite: bool,
    ) -> AppResult<Recipe> {
        Self::reject_admin_mutation(role)?;

        let mut recipe = self
            .recipes
            .find_by_owner(user_id, recipe_id)
            .await?
            .ok_or_else(|| AppError::not_found("Recipe not found"))?;

        recipe.favorite = favorite;
        recipe.updated_at = self.clock.now();
        self.recipes.save_for_owner(user_id, &recipe).await
    }

    /// Deletes a recipe from the caller's collection.
    pub async fn delete(&self, user_id: Uuid, role: UserRole, recipe_id: Uuid) -> AppResult<bool> {
        Self::reject_admin_mutation(role)?;

        let deleted = self.recipes.delete_for_owner(user_id, recipe_id).await?;
        if deleted {
            info!(user_id = %user_id, recipe_id = %recipe_id, "Recipe deleted");
        }
        Ok(deleted)
    }
}

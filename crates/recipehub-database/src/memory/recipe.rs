//! In-memory recipe store.

use async_trait::async_trait;
use dashmap::DashMap;
use uuid::Uuid;

use recipehub_core::error::AppError;
use recipehub_core::result::AppResult;
use recipehub_entity::recipe::Recipe;

use crate::store::RecipeStore;

/// DashMap-backed recipe store, keyed by recipe id.
#[derive(Debug, Default)]
pub struct InMemoryRecipeStore {
    recipes: DashMap<Uuid, Recipe>,
}

impl InMemoryRecipeStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn sorted_newest_first(mut recipes: Vec<Recipe>) -> Vec<Recipe> {
        recipes.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        recipes
    }
}

#[async_trait]
impl RecipeStore for InMemoryRecipeStore {
    async fn find_by_owner(&self, owner_id: Uuid, recipe_id: Uuid) -> AppResult<Option<Recipe>> {
        Ok(self
            .recipes
            .get(&recipe_id)
            .filter(|r| r.owner_id == owner_id)
            .map(|r| r.clone()))
    }

    async fn list_for_owner(&self, owner_id: Uuid) -> AppResult<Vec<Recipe>> {
        let recipes = self
            .recipes
            .iter()
            .filter(|entry| entry.owner_id == owner_id)
            .map(|entry| entry.clone())
            .collect();
        Ok(Self::sorted_newest_first(recipes))
    }

    async fn find_any(&self, recipe_id: Uuid) -> AppResult<Option<Recipe>> {
        Ok(self.recipes.get(&recipe_id).map(|r| r.clone()))
    }

    async fn list_all(&self) -> AppResult<Vec<Recipe>> {
        let recipes = self.recipes.iter().map(|entry| entry.clone()).collect();
        Ok(Self::sorted_newest_first(recipes))
    }

    async fn save_for_owner(&self, owner_id: Uuid, recipe: &Recipe) -> AppResult<Recipe> {
        if let Some(existing) = self.recipes.get(&recipe.id) {
            if existing.owner_id != owner_id {
                return Err(AppError::conflict(
                    "Recipe id exists under a different owner",
                ));
            }
        }
        let mut stored = recipe.clone();
        stored.owner_id = owner_id;
        self.recipes.insert(stored.id, stored.clone());
        Ok(stored)
    }

    async fn delete_for_owner(&self, owner_id: Uuid, recipe_id: Uuid) -> AppResult<bool> {
        Ok(self
            .recipes
            .remove_if(&recipe_id, |_, r| r.owner_id == owner_id)
            .is_some())
    }
}

//! Per-owner recipe persistence seam.

use async_trait::async_trait;
use uuid::Uuid;

use recipehub_core::result::AppResult;
use recipehub_entity::recipe::Recipe;

/// Owner-scoped recipe storage.
///
/// All reads and writes are keyed by `(owner_id, recipe_id)`; a recipe is
/// only visible to its owner through this trait, except for the explicit
/// admin read views.
#[async_trait]
pub trait RecipeStore: Send + Sync {
    /// Find a recipe in the given owner's collection.
    async fn find_by_owner(&self, owner_id: Uuid, recipe_id: Uuid) -> AppResult<Option<Recipe>>;

    /// List the owner's recipes, newest first.
    async fn list_for_owner(&self, owner_id: Uuid) -> AppResult<Vec<Recipe>>;

    /// Admin read view: find a recipe regardless of owner.
    async fn find_any(&self, recipe_id: Uuid) -> AppResult<Option<Recipe>>;

    /// Admin read view: list every recipe, newest first.
    async fn list_all(&self) -> AppResult<Vec<Recipe>>;

    /// Insert or update a recipe under the given owner.
    ///
    /// An update never crosses owners: if the id exists under a different
    /// owner the write is rejected.
    async fn save_for_owner(&self, owner_id: Uuid, recipe: &Recipe) -> AppResult<Recipe>;

    /// Delete a recipe from the owner's collection. Returns `true` if a
    /// recipe was removed.
    async fn delete_for_owner(&self, owner_id: Uuid, recipe_id: Uuid) -> AppResult<bool>;
}

//! Recipe repository implementation.
//!
//! Nested recipe content (ingredients, steps, metadata) is stored as JSONB
//! columns; the row type below does the `Json<T>` unwrapping.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::types::Json;
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use recipehub_core::error::{AppError, ErrorKind};
use recipehub_core::result::AppResult;
use recipehub_entity::recipe::{Ingredient, Recipe, RecipeMetadata, RecipeStep};

use crate::store::RecipeStore;

/// PostgreSQL-backed recipe store.
#[derive(Debug, Clone)]
pub struct RecipeRepository {
    pool: PgPool,
}

impl RecipeRepository {
    /// Create a new recipe repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Database row shape for the `recipes` table.
#[derive(sqlx::FromRow)]
struct RecipeRow {
    id: Uuid,
    owner_id: Uuid,
    title: String,
    description: Option<String>,
    servings: Option<i32>,
    ingredients: Json<Vec<Ingredient>>,
    steps: Json<Vec<RecipeStep>>,
    metadata: Option<Json<RecipeMetadata>>,
    shared_from_user_id: Option<Uuid>,
    shared_from_username: Option<String>,
    shared_original_recipe_id: Option<Uuid>,
    favorite: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<RecipeRow> for Recipe {
    fn from(row: RecipeRow) -> Self {
        Recipe {
            id: row.id,
            owner_id: row.owner_id,
            title: row.title,
            description: row.description,
            servings: row.servings,
            ingredients: row.ingredients.0,
            steps: row.steps.0,
            metadata: row.metadata.map(|m| m.0),
            shared_from_user_id: row.shared_from_user_id,
            shared_from_username: row.shared_from_username,
            shared_original_recipe_id: row.shared_original_recipe_id,
            favorite: row.favorite,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Insert a recipe row on an existing connection.
///
/// Used both by [`RecipeRepository::save_for_owner`] and by the share
/// accept transaction, which must persist the recipient's copy inside the
/// same transaction that flips the share record.
pub(crate) async fn insert_recipe(conn: &mut PgConnection, recipe: &Recipe) -> AppResult<()> {
    sqlx::query(
        "INSERT INTO recipes (id, owner_id, title, description, servings, ingredients, steps, \
         metadata, shared_from_user_id, shared_from_username, shared_original_recipe_id, \
         favorite, created_at, updated_at) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)",
    )
    .bind(recipe.id)
    .bind(recipe.owner_id)
    .bind(&recipe.title)
    .bind(&recipe.description)
    .bind(recipe.servings)
    .bind(Json(&recipe.ingredients))
    .bind(Json(&recipe.steps))
    .bind(recipe.metadata.as_ref().map(Json))
    .bind(recipe.shared_from_user_id)
    .bind(&recipe.shared_from_username)
    .bind(recipe.shared_original_recipe_id)
    .bind(recipe.favorite)
    .bind(recipe.created_at)
    .bind(recipe.updated_at)
    .execute(conn)
    .await
    .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to insert recipe", e))?;
    Ok(())
}

#[async_trait]
impl RecipeStore for RecipeRepository {
    async fn find_by_owner(&self, owner_id: Uuid, recipe_id: Uuid) -> AppResult<Option<Recipe>> {
        sqlx::query_as::<_, RecipeRow>("SELECT * FROM recipes WHERE id = $1 AND owner_id = $2")
            .bind(recipe_id)
            .bind(owner_id)
            .fetch_optional(&self.pool)
            .await
            .map(|row| row.map(Recipe::from))
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find recipe", e))
    }

    async fn list_for_owner(&self, owner_id: Uuid) -> AppResult<Vec<Recipe>> {
        sqlx::query_as::<_, RecipeRow>(
            "SELECT * FROM recipes WHERE owner_id = $1 ORDER BY created_at DESC",
        )
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await
        .map(|rows| rows.into_iter().map(Recipe::from).collect())
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list recipes", e))
    }

    async fn find_any(&self, recipe_id: Uuid) -> AppResult<Option<Recipe>> {
        sqlx::query_as::<_, RecipeRow>("SELECT * FROM recipes WHERE id = $1")
            .bind(recipe_id)
            .fetch_optional(&self.pool)
            .await
            .map(|row| row.map(Recipe::from))
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find recipe", e))
    }

    async fn list_all(&self) -> AppResult<Vec<Recipe>> {
        sqlx::query_as::<_, RecipeRow>("SELECT * FROM recipes ORDER BY created_at DESC")
            .fetch_all(&self.pool)
            .await
            .map(|rows| rows.into_iter().map(Recipe::from).collect())
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list recipes", e))
    }

    async fn save_for_owner(&self, owner_id: Uuid, recipe: &Recipe) -> AppResult<Recipe> {
        let mut stored = recipe.clone();
        stored.owner_id = owner_id;

        // Upsert; the WHERE clause refuses to update a row that belongs to
        // a different owner.
        let result = sqlx::query(
            "INSERT INTO recipes (id, owner_id, title, description, servings, ingredients, \
             steps, metadata, shared_from_user_id, shared_from_username, \
             shared_original_recipe_id, favorite, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14) \
             ON CONFLICT (id) DO UPDATE SET \
             title = EXCLUDED.title, description = EXCLUDED.description, \
             servings = EXCLUDED.servings, ingredients = EXCLUDED.ingredients, \
             steps = EXCLUDED.steps, metadata = EXCLUDED.metadata, \
             favorite = EXCLUDED.favorite, updated_at = EXCLUDED.updated_at \
             WHERE recipes.owner_id = EXCLUDED.owner_id",
        )
        .bind(stored.id)
        .bind(stored.owner_id)
        .bind(&stored.title)
        .bind(&stored.description)
        .bind(stored.servings)
        .bind(Json(&stored.ingredients))
        .bind(Json(&stored.steps))
        .bind(stored.metadata.as_ref().map(Json))
        .bind(stored.shared_from_user_id)
        .bind(&stored.shared_from_username)
        .bind(stored.shared_original_recipe_id)
        .bind(stored.favorite)
        .bind(stored.created_at)
        .bind(stored.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to save recipe", e))?;

        if result.rows_affected() == 0 {
            return Err(AppError::conflict(
                "Recipe id exists under a different owner",
            ));
        }
        Ok(stored)
    }

    async fn delete_for_owner(&self, owner_id: Uuid, recipe_id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM recipes WHERE id = $1 AND owner_id = $2")
            .bind(recipe_id)
            .bind(owner_id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete recipe", e))?;
        Ok(result.rows_affected() > 0)
    }
}

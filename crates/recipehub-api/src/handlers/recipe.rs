//! Recipe CRUD handlers.

use axum::Json;
use axum::extract::{Path, State};
use uuid::Uuid;
use validator::Validate;

use recipehub_core::error::AppError;
use recipehub_entity::recipe::Recipe;
use recipehub_service::recipe::service::RecipeDraft;

use crate::dto::request::{FavoriteRequest, RecipeRequest};
use crate::dto::response::{ApiResponse, MessageResponse};
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

fn draft_from(req: RecipeRequest) -> RecipeDraft {
    RecipeDraft {
        title: req.title,
        description: req.description,
        servings: req.servings,
        ingredients: req.ingredients,
        steps: req.steps,
        metadata: req.metadata,
    }
}

/// GET /api/recipes
pub async fn list_recipes(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<Vec<Recipe>>>, ApiError> {
    let recipes = state.recipe_service.list(auth.user_id, auth.role).await?;
    Ok(Json(ApiResponse::ok(recipes)))
}

/// GET /api/recipes/{id}
pub async fn get_recipe(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Recipe>>, ApiError> {
    let recipe = state
        .recipe_service
        .get(auth.user_id, auth.role, id)
        .await?;
    Ok(Json(ApiResponse::ok(recipe)))
}

/// POST /api/recipes
pub async fn create_recipe(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<RecipeRequest>,
) -> Result<Json<ApiResponse<Recipe>>, ApiError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let recipe = state
        .recipe_service
        .create(auth.user_id, auth.role, draft_from(req))
        .await?;
    Ok(Json(ApiResponse::ok(recipe)))
}

/// PUT /api/recipes/{id}
pub async fn update_recipe(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(req): Json<RecipeRequest>,
) -> Result<Json<ApiResponse<Recipe>>, ApiError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let recipe = state
        .recipe_service
        .update(auth.user_id, auth.role, id, draft_from(req))
        .await?;
    Ok(Json(ApiResponse::ok(recipe)))
}

/// PUT /api/recipes/{id}/favorite
pub async fn set_favorite(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(req): Json<FavoriteRequest>,
) -> Result<Json<ApiResponse<Recipe>>, ApiError> {
    let recipe = state
        .recipe_service
        .set_favorite(auth.user_id, auth.role, id, req.favorite)
        .await?;
    Ok(Json(ApiResponse::ok(recipe)))
}

/// DELETE /api/recipes/{id}
pub async fn delete_recipe(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    let deleted = state
        .recipe_service
        .delete(auth.user_id, auth.role, id)
        .await?;
    if !deleted {
        return Err(AppError::not_found("Recipe not found").into());
    }
    Ok(Json(ApiResponse::ok(MessageResponse {
        message: "Recipe deleted".to_string(),
    })))
}

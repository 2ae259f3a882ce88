//! Share lifecycle handlers — create, inbox, accept, decline.

use axum::Json;
use axum::extract::{Path, State};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use recipehub_core::error::AppError;
use recipehub_entity::recipe::Recipe;
use recipehub_service::share::service::InboxItem;

use crate::dto::request::ShareRecipeRequest;
use crate::dto::response::{ApiResponse, InboxCountResponse};
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// Response body for a newly issued share.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShareCreatedResponse {
    /// The new share's id.
    pub share_id: Uuid,
}

/// POST /api/recipes/{id}/share
pub async fn share_recipe(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(recipe_id): Path<Uuid>,
    Json(req): Json<ShareRecipeRequest>,
) -> Result<Json<ApiResponse<ShareCreatedResponse>>, ApiError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let share_id = state
        .share_service
        .create_share(auth.user_id, recipe_id, &req.to_username, req.message)
        .await?;

    Ok(Json(ApiResponse::ok(ShareCreatedResponse { share_id })))
}

/// GET /api/shares/inbox
pub async fn inbox(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<Vec<InboxItem>>>, ApiError> {
    let items = state.share_service.inbox(auth.user_id).await?;
    Ok(Json(ApiResponse::ok(items)))
}

/// GET /api/shares/inbox/count
pub async fn inbox_count(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<InboxCountResponse>>, ApiError> {
    let count = state.share_service.inbox_count(auth.user_id).await?;
    Ok(Json(ApiResponse::ok(InboxCountResponse { count })))
}

/// POST /api/shares/{id}/accept
pub async fn accept_share(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(share_id): Path<Uuid>,
) -> Result<Json<ApiResponse<Recipe>>, ApiError> {
    let copy = state.share_service.accept(share_id, auth.user_id).await?;
    Ok(Json(ApiResponse::ok(copy)))
}

/// POST /api/shares/{id}/decline
pub async fn decline_share(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(share_id): Path<Uuid>,
) -> Result<Json<ApiResponse<crate::dto::response::MessageResponse>>, ApiError> {
    state.share_service.decline(share_id, auth.user_id).await?;
    Ok(Json(ApiResponse::ok(
        crate::dto::response::MessageResponse {
            message: "Share declined".to_string(),
        },
    )))
}

//! Application state shared across all handlers.

use std::sync::Arc;

use recipehub_auth::jwt::decoder::JwtDecoder;
use recipehub_core::config::AppConfig;
use recipehub_service::auth::service::AuthService;
use recipehub_service::recipe::service::RecipeService;
use recipehub_service::share::service::ShareService;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// JWT token decoder and validator
    pub jwt_decoder: Arc<JwtDecoder>,
    /// Account registration and login
    pub auth_service: Arc<AuthService>,
    /// Recipe CRUD
    pub recipe_service: Arc<RecipeService>,
    /// Recipe sharing lifecycle
    pub share_service: Arc<ShareService>,
}

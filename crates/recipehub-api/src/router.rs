//! Route definitions for the RecipeHub HTTP API.
//!
//! All routes are organized by domain and mounted under `/api`.
//! The router receives `AppState` and passes it to all handlers via Axum's
//! `State` extractor.

use std::time::Duration;

use axum::{
    Router,
    routing::{delete, get, post, put},
};
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

/// Build the complete Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .merge(auth_routes())
        .merge(recipe_routes())
        .merge(share_routes())
        .merge(health_routes());

    let cors = build_cors_layer(&state);
    let timeout = TimeoutLayer::new(Duration::from_secs(
        state.config.server.request_timeout_seconds,
    ));

    Router::new()
        .nest("/api", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(timeout)
        .layer(cors)
        .with_state(state)
}

/// Auth endpoints: register, login, me
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(handlers::auth::register))
        .route("/auth/login", post(handlers::auth::login))
        .route("/auth/me", get(handlers::auth::me))
}

/// Recipe CRUD and sharing
fn recipe_routes() -> Router<AppState> {
    Router::new()
        .route("/recipes", get(handlers::recipe::list_recipes))
        .route("/recipes", post(handlers::recipe::create_recipe))
        .route("/recipes/{id}", get(handlers::recipe::get_recipe))
        .route("/recipes/{id}", put(handlers::recipe::update_recipe))
        .route("/recipes/{id}", delete(handlers::recipe::delete_recipe))
        .route("/recipes/{id}/favorite", put(handlers::recipe::set_favorite))
        .route("/recipes/{id}/share", post(handlers::share::share_recipe))
}

/// Share inbox and lifecycle
fn share_routes() -> Router<AppState> {
    Router::new()
        .route("/shares/inbox", get(handlers::share::inbox))
        .route("/shares/inbox/count", get(handlers::share::inbox_count))
        .route("/shares/{id}/accept", post(handlers::share::accept_share))
        .route("/shares/{id}/decline", post(handlers::share::decline_share))
}

/// Health check endpoints (no auth required)
fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health))
}

/// Build CORS layer from configuration
fn build_cors_layer(state: &AppState) -> CorsLayer {
    use http::Method;
    use tower_http::cors::Any;

    let cors_config = &state.config.server.cors;

    let mut cors = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers(Any);

    if cors_config.allowed_origins.contains(&"*".to_string()) {
        cors = cors.allow_origin(Any);
    } else {
        let origins: Vec<http::HeaderValue> = cors_config
            .allowed_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        cors = cors.allow_origin(origins);
    }

    cors.max_age(std::time::Duration::from_secs(cors_config.max_age_seconds))
}

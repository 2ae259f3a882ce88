//! Shared test helpers for integration tests.
//!
//! The test app runs the real router and services against the in-memory
//! stores, so no database is needed.

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use http::{Request, StatusCode};
use serde_json::Value;
use tower::ServiceExt;
use uuid::Uuid;

use recipehub_auth::jwt::decoder::JwtDecoder;
use recipehub_auth::jwt::encoder::JwtEncoder;
use recipehub_auth::password::hasher::PasswordHasher;
use recipehub_core::config::AppConfig;
use recipehub_core::config::auth::AuthConfig;
use recipehub_core::traits::{Clock, SystemClock};
use recipehub_database::memory::{InMemoryRecipeStore, InMemoryShareStore, InMemoryUserDirectory};
use recipehub_database::{RecipeStore, ShareStore, UserDirectory};
use recipehub_service::auth::service::AuthService;
use recipehub_service::recipe::service::RecipeService;
use recipehub_service::share::service::ShareService;

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
}

impl TestApp {
    /// Create a new test application backed by in-memory stores
    pub fn new() -> Self {
        let auth_config = AuthConfig {
            jwt_secret: "integration-test-secret".to_string(),
            ..Default::default()
        };
        let config = AppConfig {
            server: Default::default(),
            database: recipehub_core::config::DatabaseConfig {
                url: "postgres://unused".to_string(),
                max_connections: 1,
                min_connections: 1,
                connect_timeout_seconds: 1,
                idle_timeout_seconds: 1,
            },
            auth: auth_config.clone(),
            worker: Default::default(),
            logging: Default::default(),
        };

        let users: Arc<dyn UserDirectory> = Arc::new(InMemoryUserDirectory::new());
        let recipes_store = Arc::new(InMemoryRecipeStore::new());
        let recipes: Arc<dyn RecipeStore> = recipes_store.clone();
        let shares: Arc<dyn ShareStore> = Arc::new(InMemoryShareStore::new(recipes_store));

        let password_hasher = Arc::new(PasswordHasher::new());
        let jwt_encoder = Arc::new(JwtEncoder::new(&auth_config));
        let jwt_decoder = Arc::new(JwtDecoder::new(&auth_config));
        let clock: Arc<dyn Clock> = Arc::new(SystemClock);

        let auth_service = Arc::new(AuthService::new(
            Arc::clone(&users),
            Arc::clone(&password_hasher),
            jwt_encoder,
            auth_config.password_min_length,
        ));
        let recipe_service = Arc::new(RecipeService::new(Arc::clone(&recipes), Arc::clone(&clock)));
        let share_service = Arc::new(ShareService::new(
            shares,
            recipes,
            users,
            clock,
        ));

        let state = recipehub_api::state::AppState {
            config: Arc::new(config),
            jwt_decoder,
            auth_service,
            recipe_service,
            share_service,
        };

        Self {
            router: recipehub_api::build_router(state),
        }
    }

    /// Register a user and return their id
    pub async fn register(&self, username: &str, password: &str) -> Uuid {
        let response = self
            .request(
                "POST",
                "/api/auth/register",
                Some(serde_json::json!({
                    "username": username,
                    "password": password,
                })),
                None,
            )
            .await;
        assert_eq!(
            response.status,
            StatusCode::OK,
            "Registration failed: {:?}",
            response.body
        );
        response.body["data"]["id"]
            .as_str()
            .and_then(|s| s.parse().ok())
            .expect("No user id in registration response")
    }

    /// Login and return the JWT access token
    pub async fn login(&self, username: &str, password: &str) -> String {
        let response = self
            .request(
                "POST",
                "/api/auth/login",
                Some(serde_json::json!({
                    "username": username,
                    "password": password,
                })),
                None,
            )
            .await;
        assert_eq!(
            response.status,
            StatusCode::OK,
            "Login failed: {:?}",
            response.body
        );
        response.body["data"]["access_token"]
            .as_str()
            .expect("No access_token in login response")
            .to_string()
    }

    /// Register + login in one call
    pub async fn signup(&self, username: &str) -> String {
        self.register(username, "password123").await;
        self.login(username, "password123").await
    }

    /// Create a recipe for the given token, returning its id
    pub async fn create_recipe(&self, token: &str, title: &str) -> Uuid {
        let response = self
            .request(
                "POST",
                "/api/recipes",
                Some(serde_json::json!({
                    "title": title,
                    "servings": 2,
                    "ingredients": [
                        {"amount": 2.0, "unit": "pcs", "item": "eggs"}
                    ],
                    "steps": [
                        {"step": 1, "instruction": "Mix everything"}
                    ],
                })),
                Some(token),
            )
            .await;
        assert_eq!(
            response.status,
            StatusCode::OK,
            "Recipe creation failed: {:?}",
            response.body
        );
        response.body["data"]["id"]
            .as_str()
            .and_then(|s| s.parse().ok())
            .expect("No recipe id in response")
    }

    /// Share a recipe with another user, returning the share id
    pub async fn share_recipe(
        &self,
        token: &str,
        recipe_id: Uuid,
        to_username: &str,
        message: Option<&str>,
    ) -> Uuid {
        let response = self
            .request(
                "POST",
                &format!("/api/recipes/{}/share", recipe_id),
                Some(serde_json::json!({
                    "to_username": to_username,
                    "message": message,
                })),
                Some(token),
            )
            .await;
        assert_eq!(
            response.status,
            StatusCode::OK,
            "Share creation failed: {:?}",
            response.body
        );
        response.body["data"]["share_id"]
            .as_str()
            .and_then(|s| s.parse().ok())
            .expect("No share_id in response")
    }

    /// Make an HTTP request to the test app
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();

        let mut req = Request::builder()
            .method(method)
            .uri(path)
            .header("Content-Type", "application/json");

        if let Some(token) = token {
            req = req.header("Authorization", format!("Bearer {}", token));
        }

        let req = req
            .body(Body::from(body_str))
            .expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");

        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse { status, body }
    }
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Parsed JSON body
    pub body: Value,
}

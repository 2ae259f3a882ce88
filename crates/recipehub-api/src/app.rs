//! Application builder — wires repositories, services, and the worker
//! into a running Axum server.

use std::sync::Arc;

use sqlx::PgPool;

use recipehub_auth::jwt::decoder::JwtDecoder;
use recipehub_auth::jwt::encoder::JwtEncoder;
use recipehub_auth::password::hasher::PasswordHasher;
use recipehub_core::config::AppConfig;
use recipehub_core::error::AppError;
use recipehub_core::result::AppResult;
use recipehub_core::traits::{Clock, SystemClock};
use recipehub_database::repositories::recipe::RecipeRepository;
use recipehub_database::repositories::share::ShareRepository;
use recipehub_database::repositories::user::UserRepository;
use recipehub_database::{RecipeStore, ShareStore, UserDirectory};
use recipehub_service::auth::service::AuthService;
use recipehub_service::recipe::service::RecipeService;
use recipehub_service::share::service::ShareService;
use recipehub_worker::jobs::share_cleanup::ShareCleanupJob;
use recipehub_worker::scheduler::CronScheduler;

use crate::router::build_router;
use crate::state::AppState;

/// Runs the RecipeHub server with the given configuration and database pool.
pub async fn run_server(config: AppConfig, db_pool: PgPool) -> AppResult<()> {
    tracing::info!("Starting RecipeHub server...");

    // ── Repositories ─────────────────────────────────────────────
    let user_repo: Arc<dyn UserDirectory> = Arc::new(UserRepository::new(db_pool.clone()));
    let recipe_repo: Arc<dyn RecipeStore> = Arc::new(RecipeRepository::new(db_pool.clone()));
    let share_repo: Arc<dyn ShareStore> = Arc::new(ShareRepository::new(db_pool.clone()));

    // ── Auth ─────────────────────────────────────────────────────
    let password_hasher = Arc::new(PasswordHasher::new());
    let jwt_encoder = Arc::new(JwtEncoder::new(&config.auth));
    let jwt_decoder = Arc::new(JwtDecoder::new(&config.auth));

    // ── Services ─────────────────────────────────────────────────
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let auth_service = Arc::new(AuthService::new(
        Arc::clone(&user_repo),
        Arc::clone(&password_hasher),
        Arc::clone(&jwt_encoder),
        config.auth.password_min_length,
    ));
    let recipe_service = Arc::new(RecipeService::new(
        Arc::clone(&recipe_repo),
        Arc::clone(&clock),
    ));
    let share_service = Arc::new(ShareService::new(
        Arc::clone(&share_repo),
        Arc::clone(&recipe_repo),
        Arc::clone(&user_repo),
        Arc::clone(&clock),
    ));

    // ── Worker ───────────────────────────────────────────────────
    let mut scheduler = None;
    if config.worker.enabled {
        let cleanup = Arc::new(ShareCleanupJob::new(
            Arc::clone(&share_repo),
            Arc::clone(&clock),
            config.worker.share_retention_days,
        ));
        let cron = CronScheduler::new(config.worker.clone()).await?;
        cron.register_default_tasks(cleanup).await?;
        cron.start().await?;
        scheduler = Some(cron);
    }

    // ── HTTP server ──────────────────────────────────────────────
    let app_state = AppState {
        config: Arc::new(config.clone()),
        jwt_decoder,
        auth_service,
        recipe_service,
        share_service,
    };

    let app = build_router(app_state);
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {}: {}", addr, e)))?;

    tracing::info!("RecipeHub server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::internal(format!("Server error: {}", e)))?;

    if let Some(mut cron) = scheduler.take() {
        cron.shutdown().await?;
    }

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to install Ctrl+C handler: {}", e);
    }
}

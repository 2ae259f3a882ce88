//! Cron scheduler for periodic maintenance tasks.

use std::sync::Arc;

use tokio_cron_scheduler::{Job as CronJob, JobScheduler};
use tracing;

use recipehub_core::config::worker::WorkerConfig;
use recipehub_core::error::AppError;
use recipehub_core::result::AppResult;

use crate::jobs::share_cleanup::ShareCleanupJob;

/// Cron-based scheduler for periodic background tasks
pub struct CronScheduler {
    /// The underlying job scheduler
    scheduler: JobScheduler,
    /// Worker configuration
    config: WorkerConfig,
}

impl std::fmt::Debug for CronScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CronScheduler")
            .field("config", &self.config)
            .finish()
    }
}

impl CronScheduler {
    /// Create a new cron scheduler
    pub async fn new(config: WorkerConfig) -> AppResult<Self> {
        let scheduler = JobScheduler::new()
            .await
            .map_err(|e| AppError::internal(format!("Failed to create scheduler: {}", e)))?;

        Ok(Self { scheduler, config })
    }

    /// Register all scheduled tasks
    pub async fn register_default_tasks(&self, cleanup: Arc<ShareCleanupJob>) -> AppResult<()> {
        self.register_share_cleanup(cleanup).await?;

        tracing::info!("All scheduled tasks registered");
        Ok(())
    }

    /// Start the scheduler
    pub async fn start(&self) -> AppResult<()> {
        self.scheduler
            .start()
            .await
            .map_err(|e| AppError::internal(format!("Failed to start scheduler: {}", e)))?;

        tracing::info!("Cron scheduler started");
        Ok(())
    }

    /// Shutdown the scheduler
    pub async fn shutdown(&mut self) -> AppResult<()> {
        self.scheduler
            .shutdown()
            .await
            .map_err(|e| AppError::internal(format!("Failed to shutdown scheduler: {}", e)))?;

        tracing::info!("Cron scheduler shut down");
        Ok(())
    }

    /// Share retention sweep. Failures are logged and retried at the next
    /// trigger; the schedule itself stays alive.
    async fn register_share_cleanup(&self, cleanup: Arc<ShareCleanupJob>) -> AppResult<()> {
        let schedule = self.config.share_cleanup_cron.clone();
        let job = CronJob::new_async(schedule.as_str(), move |_uuid, _lock| {
            let cleanup = Arc::clone(&cleanup);
            Box::pin(async move {
                tracing::debug!("Running share cleanup sweep");
                if let Err(e) = cleanup.run().await {
                    tracing::error!("Share cleanup sweep failed: {}", e);
                }
            })
        })
        .map_err(|e| {
            AppError::internal(format!("Failed to create share_cleanup schedule: {}", e))
        })?;

        self.scheduler.add(job).await.map_err(|e| {
            AppError::internal(format!("Failed to add share_cleanup schedule: {}", e))
        })?;

        tracing::info!(schedule = %schedule, "Registered: share_cleanup");
        Ok(())
    }
}

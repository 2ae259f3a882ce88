//! Retention sweep for handled share records.

use std::sync::Arc;

use chrono::Duration;
use tracing;

use recipehub_core::result::AppResult;
use recipehub_core::traits::Clock;
use recipehub_database::ShareStore;

/// Deletes accepted and declined share records older than the retention
/// window. Pending shares are never touched; imported recipes are
/// independent rows and survive the sweep.
pub struct ShareCleanupJob {
    shares: Arc<dyn ShareStore>,
    clock: Arc<dyn Clock>,
    retention_days: i64,
}

impl std::fmt::Debug for ShareCleanupJob {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShareCleanupJob")
            .field("retention_days", &self.retention_days)
            .finish()
    }
}

impl ShareCleanupJob {
    /// Create a new cleanup job with the given retention window.
    pub fn new(shares: Arc<dyn ShareStore>, clock: Arc<dyn Clock>, retention_days: i64) -> Self {
        Self {
            shares,
            clock,
            retention_days,
        }
    }

    /// Run one sweep, returning the number of records removed.
    pub async fn run(&self) -> AppResult<u64> {
        let cutoff = self.clock.now() - Duration::days(self.retention_days);
        let removed = self.shares.delete_handled_before(cutoff).await?;
        tracing::info!(
            removed,
            retention_days = self.retention_days,
            "Share cleanup sweep finished"
        );
        Ok(removed)
    }
}

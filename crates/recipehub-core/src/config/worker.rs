//! Background worker configuration.

use serde::{Deserialize, Serialize};

/// Background job worker configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkerConfig {
    /// Whether the worker is enabled.
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Cron expression for the nightly share cleanup sweep.
    #[serde(default = "default_share_cleanup_cron")]
    pub share_cleanup_cron: String,
    /// Days a handled (accepted/declined) share is retained before deletion.
    #[serde(default = "default_share_retention_days")]
    pub share_retention_days: i64,
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            share_cleanup_cron: default_share_cleanup_cron(),
            share_retention_days: default_share_retention_days(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_share_cleanup_cron() -> String {
    // Every night at 03:15.
    "0 15 3 * * *".to_string()
}

fn default_share_retention_days() -> i64 {
    30
}

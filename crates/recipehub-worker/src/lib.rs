//! Scheduled maintenance tasks for RecipeHub.
//!
//! This crate provides:
//! - A cron scheduler for periodic maintenance tasks
//! - The share cleanup job that sweeps old handled share records

pub mod jobs;
pub mod scheduler;

pub use jobs::share_cleanup::ShareCleanupJob;
pub use scheduler::CronScheduler;

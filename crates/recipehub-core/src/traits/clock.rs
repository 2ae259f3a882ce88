//! Time source abstraction.
//!
//! Workflow code never calls `Utc::now()` directly; it goes through
//! [`Clock`] so that retention cutoffs and `handled_at` timestamps can be
//! pinned in tests.

use chrono::{DateTime, Utc};

/// A source of the current time.
pub trait Clock: Send + Sync {
    /// Return the current instant.
    fn now(&self) -> DateTime<Utc>;
}

/// The real system clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

//! Built-in maintenance jobs.

pub mod share_cleanup;

//! Recipe sharing workflows.

pub mod service;

pub use service::{InboxItem, ShareService};

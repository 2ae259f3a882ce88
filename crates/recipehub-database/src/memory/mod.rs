//! In-memory store implementations.
//!
//! Used by tests and by single-process development setups without a
//! PostgreSQL instance. Semantics mirror the repository implementations,
//! including the per-record serialization of share transitions.

pub mod recipe;
pub mod share;
pub mod user;

pub use recipe::InMemoryRecipeStore;
pub use share::InMemoryShareStore;
pub use user::InMemoryUserDirectory;

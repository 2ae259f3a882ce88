//! # recipehub-database
//!
//! Store traits for RecipeHub's persistence seams plus their two
//! implementations: PostgreSQL (sqlx) repositories and in-memory stores.
//! Also owns connection pool management and migrations.

pub mod connection;
pub mod memory;
pub mod migration;
pub mod repositories;
pub mod store;

pub use store::{RecipeStore, ShareStore, ShareTransition, UserDirectory};

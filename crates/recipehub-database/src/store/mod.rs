//! Persistence seams consumed by the service layer.
//!
//! Every store has a PostgreSQL implementation in [`crate::repositories`]
//! and an in-memory implementation in [`crate::memory`].

pub mod recipe;
pub mod share;
pub mod user;

pub use recipe::RecipeStore;
pub use share::{ShareStore, ShareTransition};
pub use user::UserDirectory;

//! # recipehub-service
//!
//! Business logic for RecipeHub: account registration and login, recipe
//! CRUD with admin read views, and the recipe sharing workflows
//! (issue, inbox, accept, decline).
//!
//! Services receive explicit caller identity on every call; nothing in
//! this crate reads ambient request state.

pub mod auth;
pub mod recipe;
pub mod share;

pub use auth::AuthService;
pub use recipe::RecipeService;
pub use share::ShareService;

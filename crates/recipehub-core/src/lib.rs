//! # recipehub-core
//!
//! Core crate for RecipeHub. Contains configuration schemas, the unified
//! error system, and the clock abstraction shared by the workflow and
//! worker crates.
//!
//! This crate has **no** internal dependencies on other RecipeHub crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;

pub use error::AppError;
pub use result::AppResult;

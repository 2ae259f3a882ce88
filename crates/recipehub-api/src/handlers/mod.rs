//! HTTP request handlers, organized by domain.

pub mod auth;
pub mod health;
pub mod recipe;
pub mod share;

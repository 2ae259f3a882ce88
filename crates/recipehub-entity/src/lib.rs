//! # recipehub-entity
//!
//! Domain entity models for RecipeHub: users, recipes, and recipe shares.
//! Pure data types with their intrinsic behavior; persistence lives in
//! `recipehub-database`.

pub mod recipe;
pub mod share;
pub mod user;

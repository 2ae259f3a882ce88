//! PostgreSQL repository implementations of the store traits.

pub mod recipe;
pub mod share;
pub mod user;

pub use recipe::RecipeRepository;
pub use share::ShareRepository;
pub use user::UserRepository;

//! Recipe share entity.

pub mod model;
pub mod status;

pub use model::RecipeShare;
pub use status::ShareStatus;

//! User lookup and registration seam.

use async_trait::async_trait;
use uuid::Uuid;

use recipehub_core::result::AppResult;
use recipehub_entity::user::{CreateUser, User};

/// Lookup and registration of user accounts.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Find a user by ID.
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>>;

    /// Find a user by their unique username.
    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>>;

    /// Create a new user. Fails with a conflict on duplicate usernames.
    async fn create(&self, data: &CreateUser) -> AppResult<User>;
}

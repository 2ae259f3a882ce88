//! In-memory user directory.

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use uuid::Uuid;

use recipehub_core::error::AppError;
use recipehub_core::result::AppResult;
use recipehub_entity::user::{CreateUser, User};

use crate::store::UserDirectory;

/// DashMap-backed user directory.
#[derive(Debug, Default)]
pub struct InMemoryUserDirectory {
    users: DashMap<Uuid, User>,
}

impl InMemoryUserDirectory {
    /// Create an empty directory.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserDirectory for InMemoryUserDirectory {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        Ok(self.users.get(&id).map(|u| u.clone()))
    }

    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>> {
        Ok(self
            .users
            .iter()
            .find(|entry| entry.username == username)
            .map(|entry| entry.clone()))
    }

    async fn create(&self, data: &CreateUser) -> AppResult<User> {
        if self.find_by_username(&data.username).await?.is_some() {
            return Err(AppError::conflict(format!(
                "Username '{}' is already taken",
                data.username
            )));
        }
        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4(),
            username: data.username.clone(),
            email: data.email.clone(),
            password_hash: data.password_hash.clone(),
            role: data.role,
            created_at: now,
            updated_at: now,
        };
        self.users.insert(user.id, user.clone());
        Ok(user)
    }
}

//! Registration and credential verification.

use std::sync::Arc;

use tracing::info;

use recipehub_auth::jwt::encoder::{IssuedToken, JwtEncoder};
use recipehub_auth::password::PasswordHasher;
use recipehub_core::error::AppError;
use recipehub_core::result::AppResult;
use recipehub_database::UserDirectory;
use recipehub_entity::user::{CreateUser, User, UserRole};

/// Result of a successful login.
#[derive(Debug, Clone)]
pub struct LoginOutcome {
    /// The authenticated user.
    pub user: User,
    /// The issued access token.
    pub token: IssuedToken,
}

/// Handles account registration and login.
pub struct AuthService {
    users: Arc<dyn UserDirectory>,
    hasher: Arc<PasswordHasher>,
    encoder: Arc<JwtEncoder>,
    password_min_length: usize,
}

impl AuthService {
    /// Creates a new auth service.
    pub fn new(
        users: Arc<dyn UserDirectory>,
        hasher: Arc<PasswordHasher>,
        encoder: Arc<JwtEncoder>,
        password_min_length: usize,
    ) -> Self {
        Self {
            users,
            hasher,
            encoder,
            password_min_length,
        }
    }

    /// Registers a new regular user account.
    pub async fn register(
        &self,
        username: &str,
        email: Option<String>,
        password: &str,
    ) -> AppResult<User> {
        let username = username.trim();
        if username.is_empty() {
            return Err(AppError::validation("Username must not be empty"));
        }
        if password.len() < self.password_min_length {
            return Err(AppError::validation(format!(
                "Password must be at least {} characters",
                self.password_min_length
            )));
        }

        let user = self
            .users
            .create(&CreateUser {
                username: username.to_string(),
                email,
                password_hash: self.hasher.hash_password(password)?,
                role: UserRole::User,
            })
            .await?;

        info!(user_id = %user.id, username = %user.username, "User registered");
        Ok(user)
    }

    /// Verifies credentials and issues an access token.
    ///
    /// Unknown usernames and wrong passwords produce the same error so the
    /// response does not leak which accounts exist.
    pub async fn login(&self, username: &str, password: &str) -> AppResult<LoginOutcome> {
        let invalid = || AppError::authentication("Invalid username or password");

        let user = self
            .users
            .find_by_username(username)
            .await?
            .ok_or_else(invalid)?;

        if !self.hasher.verify_password(password, &user.password_hash)? {
            return Err(invalid());
        }

        let token = self
            .encoder
            .generate_token(user.id, user.role, &user.username)?;

        info!(user_id = %user.id, "User logged in");
        Ok(LoginOutcome { user, token })
    }

    /// Looks up a user by id.
    pub async fn get_user(&self, user_id: uuid::Uuid) -> AppResult<User> {
        self.users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))
    }
}

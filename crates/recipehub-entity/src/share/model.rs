//! Recipe share entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::status::ShareStatus;

/// A one-way, single-recipient offer to duplicate a sender's recipe into
/// the recipient's collection.
///
/// Invariants maintained by the workflows and stores:
/// - `handled_at` is set iff `status != Pending`.
/// - `imported_recipe_id` is set iff `status == Accepted`.
/// - `from_user_id != to_user_id`.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct RecipeShare {
    /// Unique share identifier.
    pub id: Uuid,
    /// The sender's original recipe.
    pub recipe_id: Uuid,
    /// The sending user.
    pub from_user_id: Uuid,
    /// The receiving user.
    pub to_user_id: Uuid,
    /// Optional message from the sender (trimmed; blank becomes absent).
    pub message: Option<String>,
    /// Current lifecycle status.
    pub status: ShareStatus,
    /// When the share was issued.
    pub created_at: DateTime<Utc>,
    /// When the share was accepted or declined.
    pub handled_at: Option<DateTime<Utc>>,
    /// The recipient's imported copy, once accepted.
    pub imported_recipe_id: Option<Uuid>,
}

impl RecipeShare {
    /// Build a fresh pending share.
    pub fn pending(
        recipe_id: Uuid,
        from_user_id: Uuid,
        to_user_id: Uuid,
        message: Option<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            recipe_id,
            from_user_id,
            to_user_id,
            message,
            status: ShareStatus::Pending,
            created_at,
            handled_at: None,
            imported_recipe_id: None,
        }
    }
}

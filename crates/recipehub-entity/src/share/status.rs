//! Share lifecycle status.

use serde::{Deserialize, Serialize};

/// Lifecycle state of a recipe share.
///
/// Transitions are strictly monotonic: `Pending` may move to `Accepted` or
/// `Declined` exactly once; terminal states never change again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "share_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ShareStatus {
    /// Waiting in the recipient's inbox.
    Pending,
    /// The recipient imported a copy of the recipe.
    Accepted,
    /// The recipient turned the share down.
    Declined,
}

impl ShareStatus {
    /// Whether the share is still awaiting a decision.
    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending)
    }

    /// Whether the share has been handled and will never change again.
    pub fn is_terminal(&self) -> bool {
        !self.is_pending()
    }
}

impl std::fmt::Display for ShareStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pending => write!(f, "pending"),
            Self::Accepted => write!(f, "accepted"),
            Self::Declined => write!(f, "declined"),
        }
    }
}

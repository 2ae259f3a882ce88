//! The share lifecycle: issue, inbox, accept, decline.
//!
//! A share hands a recipe from one user to exactly one other user. The
//! record moves through a strict state machine (pending → accepted or
//! declined, never back), and accepting produces an independently owned
//! deep copy of the recipe in the recipient's collection. The store
//! serializes concurrent transitions per record, so duplicate taps and
//! client retries resolve to a single copy.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{error, info};
use uuid::Uuid;

use recipehub_core::error::AppError;
use recipehub_core::result::AppResult;
use recipehub_core::traits::Clock;
use recipehub_database::{RecipeStore, ShareStore, ShareTransition, UserDirectory};
use recipehub_entity::recipe::Recipe;
use recipehub_entity::share::{RecipeShare, ShareStatus};

/// Maximum length of the optional sender message.
const MAX_MESSAGE_LENGTH: usize = 2000;

/// Username shown when the sender's account no longer resolves.
const UNKNOWN_SENDER: &str = "unknown";

/// One pending share as presented in the recipient's inbox.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct InboxItem {
    /// The share id, used to accept or decline.
    pub share_id: Uuid,
    /// The sender's original recipe id.
    pub recipe_id: Uuid,
    /// The sender's username, resolved at read time.
    pub from_username: String,
    /// Optional message from the sender.
    pub message: Option<String>,
    /// When the share was issued.
    pub created_at: DateTime<Utc>,
}

/// Orchestrates the share lifecycle across the share, recipe, and user
/// stores.
pub struct ShareService {
    shares: Arc<dyn ShareStore>,
    recipes: Arc<dyn RecipeStore>,
    users: Arc<dyn UserDirectory>,
    clock: Arc<dyn Clock>,
}

impl ShareService {
    /// Creates a new share service.
    pub fn new(
        shares: Arc<dyn ShareStore>,
        recipes: Arc<dyn RecipeStore>,
        users: Arc<dyn UserDirectory>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            shares,
            recipes,
            users,
            clock,
        }
    }

    /// Issues a new pending share of `recipe_id` to `to_username`.
    ///
    /// The recipe must exist in the sender's own collection and the
    /// recipient must be a different user. Delivery is pull-based: the
    /// recipient sees the share on their next inbox poll.
    pub async fn create_share(
        &self,
        from_user_id: Uuid,
        recipe_id: Uuid,
        to_username: &str,
        message: Option<String>,
    ) -> AppResult<Uuid> {
        let original = self
            .recipes
            .find_by_owner(from_user_id, recipe_id)
            .await?
            .ok_or_else(|| AppError::not_found("Recipe not found"))?;

        let receiver = self
            .users
            .find_by_username(to_username)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))?;

        if receiver.id == from_user_id {
            return Err(AppError::validation("Cannot share a recipe with yourself"));
        }

        let share = RecipeShare::pending(
            original.id,
            from_user_id,
            receiver.id,
            normalize_message(message)?,
            self.clock.now(),
        );
        self.shares.insert(&share).await?;

        info!(
            share_id = %share.id,
            from_user_id = %from_user_id,
            to_user_id = %receiver.id,
            recipe_id = %recipe_id,
            "Share issued"
        );
        Ok(share.id)
    }

    /// Lists the recipient's pending shares, newest first, with the
    /// sender's username resolved live.
    pub async fn inbox(&self, user_id: Uuid) -> AppResult<Vec<InboxItem>> {
        let pending = self.shares.pending_for_recipient(user_id).await?;

        let mut items = Vec::with_capacity(pending.len());
        for share in pending {
            let from_username = self
                .users
                .find_by_id(share.from_user_id)
                .await?
                .map(|u| u.username)
                .unwrap_or_else(|| UNKNOWN_SENDER.to_string());
            items.push(InboxItem {
                share_id: share.id,
                recipe_id: share.recipe_id,
                from_username,
                message: share.message,
                created_at: share.created_at,
            });
        }
        Ok(items)
    }

    /// Counts the recipient's pending shares.
    pub async fn inbox_count(&self, user_id: Uuid) -> AppResult<u64> {
        self.shares.count_pending(user_id).await
    }

    /// Accepts a share, importing a deep copy of the recipe into the
    /// recipient's collection.
    ///
    /// Idempotent: accepting an already-accepted share returns the same
    /// imported copy. A declined share fails with a conflict. If the
    /// sender deleted the original, the call fails not-found and the share
    /// stays pending for later inspection.
    pub async fn accept(&self, share_id: Uuid, user_id: Uuid) -> AppResult<Recipe> {
        let share = self
            .shares
            .find_for_recipient(share_id, user_id)
            .await?
            .ok_or_else(|| AppError::not_found("Share not found"))?;

        match share.status {
            ShareStatus::Accepted => return self.imported_copy(&share, user_id).await,
            ShareStatus::Declined => return Err(AppError::conflict("Share is not pending")),
            ShareStatus::Pending => {}
        }

        // Load the original from the sender's collection. This happens
        // before the record lock is taken, so the lock is never held
        // across anything but the commit itself.
        let original = self
            .recipes
            .find_by_owner(share.from_user_id, share.recipe_id)
            .await?
            .ok_or_else(|| AppError::not_found("Original recipe not found"))?;

        let sender_username = self
            .users
            .find_by_id(share.from_user_id)
            .await?
            .map(|u| u.username);

        let copy = original.copy_for_recipient(
            user_id,
            share.from_user_id,
            sender_username,
            self.clock.now(),
        );

        match self
            .shares
            .commit_accept(share.id, user_id, self.clock.now(), &copy)
            .await?
        {
            ShareTransition::Applied => {
                info!(
                    share_id = %share.id,
                    to_user_id = %user_id,
                    imported_recipe_id = %copy.id,
                    "Share accepted"
                );
                Ok(copy)
            }
            // Lost the race: our copy was never persisted. Resolve from
            // the record the winner left behind.
            ShareTransition::AlreadyHandled(current) => match current.status {
                ShareStatus::Accepted => self.imported_copy(&current, user_id).await,
                _ => Err(AppError::conflict("Share is not pending")),
            },
        }
    }

    /// Declines a share. Idempotent: declining twice is a no-op success;
    /// declining an accepted share fails with a conflict.
    pub async fn decline(&self, share_id: Uuid, user_id: Uuid) -> AppResult<()> {
        let share = self
            .shares
            .find_for_recipient(share_id, user_id)
            .await?
            .ok_or_else(|| AppError::not_found("Share not found"))?;

        match share.status {
            ShareStatus::Declined => return Ok(()),
            ShareStatus::Accepted => return Err(AppError::conflict("Share already accepted")),
            ShareStatus::Pending => {}
        }

        match self
            .shares
            .commit_decline(share.id, user_id, self.clock.now())
            .await?
        {
            ShareTransition::Applied => {
                info!(share_id = %share.id, to_user_id = %user_id, "Share declined");
                Ok(())
            }
            ShareTransition::AlreadyHandled(current) => match current.status {
                ShareStatus::Declined => Ok(()),
                _ => Err(AppError::conflict("Share already accepted")),
            },
        }
    }

    /// Resolve the imported copy of an accepted share.
    ///
    /// An accepted record without an imported recipe id breaks a store
    /// invariant; that is reported loudly instead of being repaired.
    async fn imported_copy(&self, share: &RecipeShare, user_id: Uuid) -> AppResult<Recipe> {
        let Some(imported_id) = share.imported_recipe_id else {
            error!(
                share_id = %share.id,
                "Accepted share record has no imported recipe id"
            );
            return Err(AppError::integrity(
                "Share is accepted but its imported recipe is missing",
            ));
        };
        self.recipes
            .find_by_owner(user_id, imported_id)
            .await?
            .ok_or_else(|| AppError::not_found("Imported recipe not found"))
    }
}

/// Trim the sender message; blank collapses to absent.
fn normalize_message(message: Option<String>) -> AppResult<Option<String>> {
    let Some(message) = message else {
        return Ok(None);
    };
    let trimmed = message.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    if trimmed.len() > MAX_MESSAGE_LENGTH {
        return Err(AppError::validation(format!(
            "Message must be at most {MAX_MESSAGE_LENGTH} characters"
        )));
    }
    Ok(Some(trimmed.to_string()))
}

//! Share record persistence seam.
//!
//! The two `commit_*` operations are where the concurrency guarantee lives:
//! each implementation must serialize all writers on a single share record
//! so that exactly one caller wins the pending → terminal transition. The
//! PostgreSQL store uses a row lock (`SELECT ... FOR UPDATE`) inside one
//! transaction; the in-memory store uses a per-record mutex.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use recipehub_core::result::AppResult;
use recipehub_entity::recipe::Recipe;
use recipehub_entity::share::RecipeShare;

/// Outcome of an attempted pending → terminal transition.
#[derive(Debug, Clone)]
pub enum ShareTransition {
    /// This caller won the transition; all writes are committed.
    Applied,
    /// Another caller already moved the record out of pending. Nothing was
    /// written; the record as it stands is attached so the caller can take
    /// the idempotent or conflict path.
    AlreadyHandled(RecipeShare),
}

/// Durable storage of share lifecycle records.
#[async_trait]
pub trait ShareStore: Send + Sync {
    /// Persist a freshly issued pending share.
    async fn insert(&self, share: &RecipeShare) -> AppResult<()>;

    /// Find a share addressed to the given recipient.
    async fn find_for_recipient(
        &self,
        share_id: Uuid,
        to_user_id: Uuid,
    ) -> AppResult<Option<RecipeShare>>;

    /// All pending shares addressed to the recipient, newest first.
    async fn pending_for_recipient(&self, to_user_id: Uuid) -> AppResult<Vec<RecipeShare>>;

    /// Count of pending shares addressed to the recipient.
    async fn count_pending(&self, to_user_id: Uuid) -> AppResult<u64>;

    /// Atomically transition the share to accepted and persist the
    /// recipient's recipe copy.
    ///
    /// Commits the copy insert, `status = accepted`, `handled_at`, and
    /// `imported_recipe_id` together: a copy can never exist without its
    /// share being marked accepted, and vice versa. Only succeeds from
    /// pending; a record already out of pending is reported via
    /// [`ShareTransition::AlreadyHandled`] with no writes.
    async fn commit_accept(
        &self,
        share_id: Uuid,
        to_user_id: Uuid,
        handled_at: DateTime<Utc>,
        copy: &Recipe,
    ) -> AppResult<ShareTransition>;

    /// Atomically transition the share to declined.
    ///
    /// Same locking discipline as [`ShareStore::commit_accept`].
    async fn commit_decline(
        &self,
        share_id: Uuid,
        to_user_id: Uuid,
        handled_at: DateTime<Utc>,
    ) -> AppResult<ShareTransition>;

    /// Bulk-delete handled (accepted/declined) shares whose `handled_at` is
    /// before the cutoff. Pending records are never touched. Returns the
    /// number of deleted records; safe to re-run.
    async fn delete_handled_before(&self, cutoff: DateTime<Utc>) -> AppResult<u64>;
}

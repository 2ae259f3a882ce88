//! Share record repository implementation.
//!
//! The `commit_*` operations run inside a single transaction with a
//! `SELECT ... FOR UPDATE` row lock on the share record, so concurrent
//! transitions on the same record are fully serialized by PostgreSQL.
//! Unrelated records never contend: the lock scope is one row.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use recipehub_core::error::{AppError, ErrorKind};
use recipehub_core::result::AppResult;
use recipehub_entity::recipe::Recipe;
use recipehub_entity::share::{RecipeShare, ShareStatus};

use super::recipe::insert_recipe;
use crate::store::{ShareStore, ShareTransition};

/// PostgreSQL-backed share store.
#[derive(Debug, Clone)]
pub struct ShareRepository {
    pool: PgPool,
}

impl ShareRepository {
    /// Create a new share repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ShareStore for ShareRepository {
    async fn insert(&self, share: &RecipeShare) -> AppResult<()> {
        sqlx::query(
            "INSERT INTO recipe_shares (id, recipe_id, from_user_id, to_user_id, message, \
             status, created_at, handled_at, imported_recipe_id) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)",
        )
        .bind(share.id)
        .bind(share.recipe_id)
        .bind(share.from_user_id)
        .bind(share.to_user_id)
        .bind(&share.message)
        .bind(share.status)
        .bind(share.created_at)
        .bind(share.handled_at)
        .bind(share.imported_recipe_id)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to insert share", e))?;
        Ok(())
    }

    async fn find_for_recipient(
        &self,
        share_id: Uuid,
        to_user_id: Uuid,
    ) -> AppResult<Option<RecipeShare>> {
        sqlx::query_as::<_, RecipeShare>(
            "SELECT * FROM recipe_shares WHERE id = $1 AND to_user_id = $2",
        )
        .bind(share_id)
        .bind(to_user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find share", e))
    }

    async fn pending_for_recipient(&self, to_user_id: Uuid) -> AppResult<Vec<RecipeShare>> {
        sqlx::query_as::<_, RecipeShare>(
            "SELECT * FROM recipe_shares WHERE to_user_id = $1 AND status = 'pending' \
             ORDER BY created_at DESC",
        )
        .bind(to_user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list inbox", e))
    }

    async fn count_pending(&self, to_user_id: Uuid) -> AppResult<u64> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM recipe_shares WHERE to_user_id = $1 AND status = 'pending'",
        )
        .bind(to_user_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count inbox", e))?;
        Ok(count as u64)
    }

    async fn commit_accept(
        &self,
        share_id: Uuid,
        to_user_id: Uuid,
        handled_at: DateTime<Utc>,
        copy: &Recipe,
    ) -> AppResult<ShareTransition> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e)
        })?;

        let share = sqlx::query_as::<_, RecipeShare>(
            "SELECT * FROM recipe_shares WHERE id = $1 AND to_user_id = $2 FOR UPDATE",
        )
        .bind(share_id)
        .bind(to_user_id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to lock share", e))?
        .ok_or_else(|| AppError::not_found("Share not found"))?;

        if share.status != ShareStatus::Pending {
            // Lost the race (or the record was already terminal). No writes.
            tx.rollback().await.map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to roll back", e)
            })?;
            return Ok(ShareTransition::AlreadyHandled(share));
        }

        insert_recipe(&mut *tx, copy).await?;

        sqlx::query(
            "UPDATE recipe_shares SET status = 'accepted', handled_at = $2, \
             imported_recipe_id = $3 WHERE id = $1",
        )
        .bind(share_id)
        .bind(handled_at)
        .bind(copy.id)
        .execute(&mut *tx)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to accept share", e))?;

        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit accept", e)
        })?;

        Ok(ShareTransition::Applied)
    }

    async fn commit_decline(
        &self,
        share_id: Uuid,
        to_user_id: Uuid,
        handled_at: DateTime<Utc>,
    ) -> AppResult<ShareTransition> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e)
        })?;

        let share = sqlx::query_as::<_, RecipeShare>(
            "SELECT * FROM recipe_shares WHERE id = $1 AND to_user_id = $2 FOR UPDATE",
        )
        .bind(share_id)
        .bind(to_user_id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to lock share", e))?
        .ok_or_else(|| AppError::not_found("Share not found"))?;

        if share.status != ShareStatus::Pending {
            tx.rollback().await.map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to roll back", e)
            })?;
            return Ok(ShareTransition::AlreadyHandled(share));
        }

        sqlx::query(
            "UPDATE recipe_shares SET status = 'declined', handled_at = $2 WHERE id = $1",
        )
        .bind(share_id)
        .bind(handled_at)
        .execute(&mut *tx)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to decline share", e))?;

        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit decline", e)
        })?;

        Ok(ShareTransition::Applied)
    }

    async fn delete_handled_before(&self, cutoff: DateTime<Utc>) -> AppResult<u64> {
        let result = sqlx::query(
            "DELETE FROM recipe_shares \
             WHERE status IN ('accepted', 'declined') AND handled_at < $1",
        )
        .bind(cutoff)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to delete old shares", e)
        })?;
        Ok(result.rows_affected())
    }
}

//! In-memory share store.
//!
//! Each record lives behind its own `tokio::sync::Mutex`; the `commit_*`
//! operations take that lock for the whole check-then-act sequence, which
//! gives the same one-winner guarantee as the repository's row lock.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use tokio::sync::Mutex;
use uuid::Uuid;

use recipehub_core::error::AppError;
use recipehub_core::result::AppResult;
use recipehub_entity::recipe::Recipe;
use recipehub_entity::share::{RecipeShare, ShareStatus};

use crate::store::{RecipeStore, ShareStore, ShareTransition};

/// DashMap-backed share store with per-record locking.
pub struct InMemoryShareStore {
    shares: DashMap<Uuid, Arc<Mutex<RecipeShare>>>,
    /// Recipe store the accept transition persists copies into, standing in
    /// for the shared transaction of the database implementation.
    recipes: Arc<dyn RecipeStore>,
}

impl InMemoryShareStore {
    /// Create an empty store writing accepted copies into `recipes`.
    pub fn new(recipes: Arc<dyn RecipeStore>) -> Self {
        Self {
            shares: DashMap::new(),
            recipes,
        }
    }

    fn cell(&self, share_id: Uuid) -> Option<Arc<Mutex<RecipeShare>>> {
        self.shares.get(&share_id).map(|e| Arc::clone(e.value()))
    }
}

#[async_trait]
impl ShareStore for InMemoryShareStore {
    async fn insert(&self, share: &RecipeShare) -> AppResult<()> {
        self.shares
            .insert(share.id, Arc::new(Mutex::new(share.clone())));
        Ok(())
    }

    async fn find_for_recipient(
        &self,
        share_id: Uuid,
        to_user_id: Uuid,
    ) -> AppResult<Option<RecipeShare>> {
        let Some(cell) = self.cell(share_id) else {
            return Ok(None);
        };
        let share = cell.lock().await.clone();
        Ok((share.to_user_id == to_user_id).then_some(share))
    }

    async fn pending_for_recipient(&self, to_user_id: Uuid) -> AppResult<Vec<RecipeShare>> {
        // Snapshot the cells before awaiting any record lock; a map shard
        // guard held across an await would block concurrent inserts.
        let cells: Vec<_> = self
            .shares
            .iter()
            .map(|entry| Arc::clone(entry.value()))
            .collect();

        let mut pending = Vec::new();
        for cell in cells {
            let share = cell.lock().await.clone();
            if share.to_user_id == to_user_id && share.status == ShareStatus::Pending {
                pending.push(share);
            }
        }
        pending.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(pending)
    }

    async fn count_pending(&self, to_user_id: Uuid) -> AppResult<u64> {
        Ok(self.pending_for_recipient(to_user_id).await?.len() as u64)
    }

    async fn commit_accept(
        &self,
        share_id: Uuid,
        to_user_id: Uuid,
        handled_at: DateTime<Utc>,
        copy: &Recipe,
    ) -> AppResult<ShareTransition> {
        let cell = self
            .cell(share_id)
            .ok_or_else(|| AppError::not_found("Share not found"))?;
        let mut share = cell.lock().await;

        if share.to_user_id != to_user_id {
            return Err(AppError::not_found("Share not found"));
        }
        if share.status != ShareStatus::Pending {
            return Ok(ShareTransition::AlreadyHandled(share.clone()));
        }

        self.recipes.save_for_owner(copy.owner_id, copy).await?;
        share.status = ShareStatus::Accepted;
        share.handled_at = Some(handled_at);
        share.imported_recipe_id = Some(copy.id);
        Ok(ShareTransition::Applied)
    }

    async fn commit_decline(
        &self,
        share_id: Uuid,
        to_user_id: Uuid,
        handled_at: DateTime<Utc>,
    ) -> AppResult<ShareTransition> {
        let cell = self
            .cell(share_id)
            .ok_or_else(|| AppError::not_found("Share not found"))?;
        let mut share = cell.lock().await;

        if share.to_user_id != to_user_id {
            return Err(AppError::not_found("Share not found"));
        }
        if share.status != ShareStatus::Pending {
            return Ok(ShareTransition::AlreadyHandled(share.clone()));
        }

        share.status = ShareStatus::Declined;
        share.handled_at = Some(handled_at);
        Ok(ShareTransition::Applied)
    }

    async fn delete_handled_before(&self, cutoff: DateTime<Utc>) -> AppResult<u64> {
        let cells: Vec<_> = self
            .shares
            .iter()
            .map(|entry| Arc::clone(entry.value()))
            .collect();

        let mut expired = Vec::new();
        for cell in cells {
            let share = cell.lock().await;
            if share.status.is_terminal() && share.handled_at.is_some_and(|t| t < cutoff) {
                expired.push(share.id);
            }
        }
        let mut removed = 0u64;
        for id in expired {
            if self.shares.remove(&id).is_some() {
                removed += 1;
            }
        }
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use recipehub_entity::recipe::Recipe;

    fn recipe(owner: Uuid) -> Recipe {
        Recipe {
            id: Uuid::new_v4(),
            owner_id: owner,
            title: "Test".to_string(),
            description: None,
            servings: None,
            ingredients: vec![],
            steps: vec![],
            metadata: None,
            shared_from_user_id: None,
            shared_from_username: None,
            shared_original_recipe_id: None,
            favorite: false,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn store() -> InMemoryShareStore {
        InMemoryShareStore::new(Arc::new(crate::memory::InMemoryRecipeStore::new()))
    }

    #[tokio::test]
    async fn test_find_scoped_to_recipient() {
        let store = store();
        let to_user = Uuid::new_v4();
        let share = RecipeShare::pending(
            Uuid::new_v4(),
            Uuid::new_v4(),
            to_user,
            None,
            Utc::now(),
        );
        store.insert(&share).await.unwrap();

        assert!(store
            .find_for_recipient(share.id, to_user)
            .await
            .unwrap()
            .is_some());
        // A different user must not see the share.
        assert!(store
            .find_for_recipient(share.id, Uuid::new_v4())
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_decline_only_wins_once() {
        let store = store();
        let to_user = Uuid::new_v4();
        let share = RecipeShare::pending(
            Uuid::new_v4(),
            Uuid::new_v4(),
            to_user,
            None,
            Utc::now(),
        );
        store.insert(&share).await.unwrap();

        let first = store
            .commit_decline(share.id, to_user, Utc::now())
            .await
            .unwrap();
        assert!(matches!(first, ShareTransition::Applied));

        let second = store
            .commit_decline(share.id, to_user, Utc::now())
            .await
            .unwrap();
        match second {
            ShareTransition::AlreadyHandled(current) => {
                assert_eq!(current.status, ShareStatus::Declined);
            }
            other => panic!("expected AlreadyHandled, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_sweep_skips_pending() {
        let store = store();
        let to_user = Uuid::new_v4();
        let pending = RecipeShare::pending(
            Uuid::new_v4(),
            Uuid::new_v4(),
            to_user,
            None,
            Utc::now() - chrono::Duration::days(365),
        );
        store.insert(&pending).await.unwrap();

        let declined = RecipeShare::pending(
            Uuid::new_v4(),
            Uuid::new_v4(),
            to_user,
            None,
            Utc::now() - chrono::Duration::days(40),
        );
        store.insert(&declined).await.unwrap();
        store
            .commit_decline(
                declined.id,
                to_user,
                Utc::now() - chrono::Duration::days(35),
            )
            .await
            .unwrap();

        let removed = store
            .delete_handled_before(Utc::now() - chrono::Duration::days(30))
            .await
            .unwrap();
        assert_eq!(removed, 1);
        assert!(store
            .find_for_recipient(pending.id, to_user)
            .await
            .unwrap()
            .is_some());
    }

    #[tokio::test]
    async fn test_inbox_scan_allows_inserts_while_record_locked() {
        let store = Arc::new(store());
        let to_user = Uuid::new_v4();
        let share = RecipeShare::pending(
            Uuid::new_v4(),
            Uuid::new_v4(),
            to_user,
            None,
            Utc::now(),
        );
        store.insert(&share).await.unwrap();

        // Hold the record lock so a scan has to park on it.
        let cell = store.cell(share.id).unwrap();
        let guard = cell.lock().await;

        let scan = {
            let store = Arc::clone(&store);
            tokio::spawn(async move { store.pending_for_recipient(to_user).await })
        };
        tokio::task::yield_now().await;

        // The parked scan must not pin a map shard; inserts go through.
        let other = RecipeShare::pending(
            Uuid::new_v4(),
            Uuid::new_v4(),
            to_user,
            None,
            Utc::now(),
        );
        tokio::time::timeout(std::time::Duration::from_secs(1), store.insert(&other))
            .await
            .expect("insert blocked behind a parked scan")
            .unwrap();

        drop(guard);
        let pending = scan.await.unwrap().unwrap();
        assert_eq!(pending.len(), 1);
    }

    #[tokio::test]
    async fn test_accept_persists_copy_with_transition() {
        let recipes = Arc::new(crate::memory::InMemoryRecipeStore::new());
        let store = InMemoryShareStore::new(recipes.clone());
        let to_user = Uuid::new_v4();
        let share = RecipeShare::pending(
            Uuid::new_v4(),
            Uuid::new_v4(),
            to_user,
            None,
            Utc::now(),
        );
        store.insert(&share).await.unwrap();

        let copy = recipe(to_user);
        let outcome = store
            .commit_accept(share.id, to_user, Utc::now(), &copy)
            .await
            .unwrap();
        assert!(matches!(outcome, ShareTransition::Applied));

        let stored = store
            .find_for_recipient(share.id, to_user)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.status, ShareStatus::Accepted);
        assert_eq!(stored.imported_recipe_id, Some(copy.id));
        assert!(stored.handled_at.is_some());
        assert!(recipes
            .find_by_owner(to_user, copy.id)
            .await
            .unwrap()
            .is_some());
    }
}

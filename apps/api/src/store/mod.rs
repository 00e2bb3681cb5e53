//! Profile store: load/save boundary for the per-profile state blob.
//!
//! The whole blob is written on every committed mutation; there are no
//! partial writes. A profile with no stored blob reads as a fresh default.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::errors::AppError;
use crate::generation::scoring::ResumeScore;
use crate::generation::skills::SkillSuggestions;
use crate::models::profile::CandidateProfile;
use crate::render::TemplateKind;

pub mod memory;
pub mod redis_store;

pub use self::memory::MemoryProfileStore;
pub use self::redis_store::RedisProfileStore;

/// Everything persisted for one profile.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedState {
    #[serde(default)]
    pub data: CandidateProfile,
    #[serde(default)]
    pub generated_resume: Option<String>,
    #[serde(default)]
    pub skill_suggestions: Option<SkillSuggestions>,
    #[serde(default)]
    pub resume_score: Option<ResumeScore>,
    #[serde(default)]
    pub template: TemplateKind,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

#[async_trait]
pub trait ProfileStore: Send + Sync {
    async fn load(&self, profile_id: Uuid) -> Result<Option<PersistedState>, AppError>;

    async fn save(&self, profile_id: Uuid, state: &PersistedState) -> Result<(), AppError>;

    async fn delete(&self, profile_id: Uuid) -> Result<(), AppError>;
}

/// Front door to a `ProfileStore`: read-modify-write updates of one
/// profile are serialised so concurrent generators cannot overwrite each
/// other's results.
#[derive(Clone)]
pub struct Profiles {
    store: Arc<dyn ProfileStore>,
    locks: Arc<Mutex<HashMap<Uuid, Arc<Mutex<()>>>>>,
}

impl Profiles {
    pub fn new(store: Arc<dyn ProfileStore>) -> Self {
        Self {
            store,
            locks: Arc::default(),
        }
    }

    /// Loads a profile's state, falling back to a fresh default.
    pub async fn load(&self, profile_id: Uuid) -> Result<PersistedState, AppError> {
        Ok(self.store.load(profile_id).await?.unwrap_or_default())
    }

    /// Applies `mutate` to the current state and writes the result back in one save.
    pub async fn update<F>(&self, profile_id: Uuid, mutate: F) -> Result<PersistedState, AppError>
    where
        F: FnOnce(&mut PersistedState) + Send,
    {
        let lock = self.lock_for(profile_id).await;
        let result = {
            let _guard = lock.lock().await;
            self.load_mutate_save(profile_id, mutate).await
        };
        self.release(profile_id, lock).await;
        result
    }

    /// Deletes the stored blob; the next load yields a fresh default.
    pub async fn reset(&self, profile_id: Uuid) -> Result<(), AppError> {
        let lock = self.lock_for(profile_id).await;
        let result = {
            let _guard = lock.lock().await;
            self.store.delete(profile_id).await
        };
        self.release(profile_id, lock).await;
        result
    }

    async fn load_mutate_save<F>(
        &self,
        profile_id: Uuid,
        mutate: F,
    ) -> Result<PersistedState, AppError>
    where
        F: FnOnce(&mut PersistedState) + Send,
    {
        let mut state = self.load(profile_id).await?;
        mutate(&mut state);
        state.updated_at = Some(Utc::now());
        self.store.save(profile_id, &state).await?;
        Ok(state)
    }

    async fn lock_for(&self, profile_id: Uuid) -> Arc<Mutex<()>> {
        self.locks
            .lock()
            .await
            .entry(profile_id)
            .or_default()
            .clone()
    }

    /// Drops the per-profile lock once no other update holds or awaits it.
    async fn release(&self, profile_id: Uuid, lock: Arc<Mutex<()>>) {
        let mut locks = self.locks.lock().await;
        drop(lock);
        if locks
            .get(&profile_id)
            .is_some_and(|held| Arc::strong_count(held) == 1)
        {
            locks.remove(&profile_id);
        }
    }

    #[cfg(test)]
    async fn tracked_locks(&self) -> usize {
        self.locks.lock().await.len()
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::models::profile::fixtures::sample_profile;

    /// Memory store that yields on every call, like a network round trip.
    #[derive(Default)]
    struct SlowStore {
        inner: MemoryProfileStore,
    }

    #[async_trait]
    impl ProfileStore for SlowStore {
        async fn load(&self, profile_id: Uuid) -> Result<Option<PersistedState>, AppError> {
            tokio::time::sleep(Duration::from_millis(5)).await;
            self.inner.load(profile_id).await
        }

        async fn save(&self, profile_id: Uuid, state: &PersistedState) -> Result<(), AppError> {
            tokio::time::sleep(Duration::from_millis(5)).await;
            self.inner.save(profile_id, state).await
        }

        async fn delete(&self, profile_id: Uuid) -> Result<(), AppError> {
            self.inner.delete(profile_id).await
        }
    }

    #[tokio::test]
    async fn test_load_for_unknown_profile_is_default() {
        let profiles = Profiles::new(Arc::new(MemoryProfileStore::default()));
        let state = profiles.load(Uuid::new_v4()).await.unwrap();
        assert_eq!(state, PersistedState::default());
        assert_eq!(state.template, TemplateKind::Modern);
    }

    #[tokio::test]
    async fn test_update_persists_whole_blob() {
        let profiles = Profiles::new(Arc::new(MemoryProfileStore::default()));
        let id = Uuid::new_v4();
        profiles.update(id, |s| s.data = sample_profile()).await.unwrap();
        profiles
            .update(id, |s| s.template = TemplateKind::Classic)
            .await
            .unwrap();

        let state = profiles.load(id).await.unwrap();
        assert_eq!(state.data, sample_profile());
        assert_eq!(state.template, TemplateKind::Classic);
        assert!(state.updated_at.is_some());
    }

    #[tokio::test]
    async fn test_concurrent_updates_to_one_profile_both_land() {
        let profiles = Profiles::new(Arc::new(SlowStore::default()));
        let id = Uuid::new_v4();

        let (first, second) = tokio::join!(
            profiles.update(id, |s| s.generated_resume = Some("RESUME".to_string())),
            profiles.update(id, |s| s.template = TemplateKind::Classic),
        );
        first.unwrap();
        second.unwrap();

        let state = profiles.load(id).await.unwrap();
        assert_eq!(state.generated_resume.as_deref(), Some("RESUME"));
        assert_eq!(state.template, TemplateKind::Classic);
        assert_eq!(profiles.tracked_locks().await, 0);
    }

    #[tokio::test]
    async fn test_reset_clears_state() {
        let profiles = Profiles::new(Arc::new(MemoryProfileStore::default()));
        let id = Uuid::new_v4();
        profiles.update(id, |s| s.data = sample_profile()).await.unwrap();
        profiles.reset(id).await.unwrap();
        assert_eq!(profiles.load(id).await.unwrap(), PersistedState::default());
    }

    #[test]
    fn test_blob_tolerates_missing_fields() {
        let state: PersistedState = serde_json::from_str(r#"{"template":"classic"}"#).unwrap();
        assert_eq!(state.template, TemplateKind::Classic);
        assert!(state.resume_score.is_none());
    }
}

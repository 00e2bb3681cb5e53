use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{PersistedState, ProfileStore};
use crate::errors::AppError;

/// Process-local store. Contents are lost on restart.
#[derive(Default)]
pub struct MemoryProfileStore {
    blobs: RwLock<HashMap<Uuid, PersistedState>>,
}

#[async_trait]
impl ProfileStore for MemoryProfileStore {
    async fn load(&self, profile_id: Uuid) -> Result<Option<PersistedState>, AppError> {
        Ok(self.blobs.read().await.get(&profile_id).cloned())
    }

    async fn save(&self, profile_id: Uuid, state: &PersistedState) -> Result<(), AppError> {
        self.blobs.write().await.insert(profile_id, state.clone());
        Ok(())
    }

    async fn delete(&self, profile_id: Uuid) -> Result<(), AppError> {
        self.blobs.write().await.remove(&profile_id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_delete_then_load_is_none() {
        let store = MemoryProfileStore::default();
        let id = Uuid::new_v4();
        store.save(id, &PersistedState::default()).await.unwrap();
        assert!(store.load(id).await.unwrap().is_some());
        store.delete(id).await.unwrap();
        assert!(store.load(id).await.unwrap().is_none());
    }
}

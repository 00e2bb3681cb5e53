use async_trait::async_trait;
use redis::AsyncCommands;
use tracing::debug;
use uuid::Uuid;

use super::{PersistedState, ProfileStore};
use crate::errors::AppError;

/// Stores each profile as one JSON string at `<prefix>:<profile_id>`.
#[derive(Clone)]
pub struct RedisProfileStore {
    client: redis::Client,
    prefix: String,
}

impl RedisProfileStore {
    pub fn new(client: redis::Client, prefix: impl Into<String>) -> Self {
        Self {
            client,
            prefix: prefix.into(),
        }
    }

    fn key(&self, profile_id: Uuid) -> String {
        storage_key(&self.prefix, profile_id)
    }

    async fn connection(&self) -> Result<redis::aio::MultiplexedConnection, AppError> {
        Ok(self.client.get_multiplexed_tokio_connection().await?)
    }
}

fn storage_key(prefix: &str, profile_id: Uuid) -> String {
    format!("{prefix}:{profile_id}")
}

#[async_trait]
impl ProfileStore for RedisProfileStore {
    async fn load(&self, profile_id: Uuid) -> Result<Option<PersistedState>, AppError> {
        let mut conn = self.connection().await?;
        let raw: Option<String> = conn.get(self.key(profile_id)).await?;
        raw.map(|blob| {
            serde_json::from_str(&blob).map_err(|e| {
                AppError::Storage(format!("Corrupt state blob for profile {profile_id}: {e}"))
            })
        })
        .transpose()
    }

    async fn save(&self, profile_id: Uuid, state: &PersistedState) -> Result<(), AppError> {
        let blob = serde_json::to_string(state)
            .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to serialize state: {e}")))?;
        let mut conn = self.connection().await?;
        conn.set::<_, _, ()>(self.key(profile_id), blob).await?;
        debug!("Saved state for profile {profile_id}");
        Ok(())
    }

    async fn delete(&self, profile_id: Uuid) -> Result<(), AppError> {
        let mut conn = self.connection().await?;
        conn.del::<_, ()>(self.key(profile_id)).await?;
        debug!("Deleted state for profile {profile_id}");
        Ok(())
    }
}

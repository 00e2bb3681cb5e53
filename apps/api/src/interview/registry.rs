//! In-memory registry of live interview sessions.
//!
//! Each session sits behind its own mutex. Operations use `try_lock`, so a
//! second request arriving while a model call for the same session is
//! outstanding is refused instead of queued. Sessions left untouched for
//! longer than the idle limit are evicted whenever a new one is created.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{Mutex, OwnedMutexGuard, RwLock};
use tokio::time::Instant;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::interview::session::InterviewSession;

struct Entry {
    session: Arc<Mutex<InterviewSession>>,
    /// Milliseconds since the registry epoch.
    touched: AtomicU64,
}

#[derive(Clone)]
pub struct SessionRegistry {
    sessions: Arc<RwLock<HashMap<Uuid, Arc<Entry>>>>,
    epoch: Instant,
    idle_limit: Duration,
}

impl SessionRegistry {
    pub fn new(idle_limit: Duration) -> Self {
        Self {
            sessions: Arc::default(),
            epoch: Instant::now(),
            idle_limit,
        }
    }

    fn now_ms(&self) -> u64 {
        self.epoch.elapsed().as_millis() as u64
    }

    /// Registers a fresh `NotStarted` session and returns its id.
    pub async fn create(&self) -> Uuid {
        let id = Uuid::new_v4();
        let entry = Arc::new(Entry {
            session: Arc::new(Mutex::new(InterviewSession::new())),
            touched: AtomicU64::new(self.now_ms()),
        });

        let mut sessions = self.sessions.write().await;
        self.evict_idle(&mut sessions);
        sessions.insert(id, entry);
        id
    }

    /// Removes sessions idle past the limit. Busy sessions are never idle.
    fn evict_idle(&self, sessions: &mut HashMap<Uuid, Arc<Entry>>) {
        let now = self.now_ms();
        let limit = self.idle_limit.as_millis() as u64;
        let before = sessions.len();
        sessions.retain(|_, entry| {
            let idle = now.saturating_sub(entry.touched.load(Ordering::Relaxed));
            idle <= limit || entry.session.try_lock().is_err()
        });
        let evicted = before - sessions.len();
        if evicted > 0 {
            info!(evicted, "Evicted idle interview sessions");
        }
    }

    async fn get(&self, id: Uuid) -> Result<Arc<Entry>, AppError> {
        let entry = self
            .sessions
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("Interview {id} not found")))?;
        entry.touched.store(self.now_ms(), Ordering::Relaxed);
        Ok(entry)
    }

    /// Exclusive access to a session. Fails fast with `Conflict` if another
    /// operation on the same session is still running.
    pub async fn acquire(&self, id: Uuid) -> Result<OwnedMutexGuard<InterviewSession>, AppError> {
        self.get(id)
            .await?
            .session
            .clone()
            .try_lock_owned()
            .map_err(|_| {
                AppError::Conflict(format!(
                    "A request for interview {id} is already in progress"
                ))
            })
    }

    pub async fn remove(&self, id: Uuid) -> Result<(), AppError> {
        self.sessions
            .write()
            .await
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| AppError::NotFound(format!("Interview {id} not found")))
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }
}

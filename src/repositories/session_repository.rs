use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::{Mutex, RwLock};
use uuid::Uuid;

#[cfg(test)]
use mockall::automock;

use crate::{
    errors::{AppError, AppResult},
    services::quiz_controller::QuizController,
};

/// Exclusive access to one session's controller. Holding the lock serializes
/// transitions on that session without touching any other.
pub type SessionHandle = Arc<Mutex<QuizController>>;

/// Per-user quiz state keyed by session id. Implementations never share a
/// controller between ids.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait SessionRepository: Send + Sync {
    async fn create(&self, controller: QuizController) -> AppResult<SessionHandle>;
    async fn find_by_id(&self, id: &Uuid) -> AppResult<Option<SessionHandle>>;
    async fn delete(&self, id: &Uuid) -> AppResult<()>;
    /// Removes sessions whose last activity is before `cutoff`; returns how many.
    /// A session that is being used by a request is never removed.
    async fn purge_idle(&self, cutoff: DateTime<Utc>) -> AppResult<usize>;
}

#[derive(Default)]
pub struct InMemorySessionRepository {
    sessions: Arc<RwLock<HashMap<Uuid, SessionHandle>>>,
}

impl InMemorySessionRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionRepository for InMemorySessionRepository {
    async fn create(&self, controller: QuizController) -> AppResult<SessionHandle> {
        let mut sessions = self.sessions.write().await;
        if sessions.contains_key(&controller.id) {
            return Err(AppError::InternalError(format!(
                "Session '{}' already exists",
                controller.id
            )));
        }

        let id = controller.id;
        let handle = Arc::new(Mutex::new(controller));
        sessions.insert(id, Arc::clone(&handle));
        Ok(handle)
    }

    async fn find_by_id(&self, id: &Uuid) -> AppResult<Option<SessionHandle>> {
        let sessions = self.sessions.read().await;
        Ok(sessions.get(id).cloned())
    }

    async fn delete(&self, id: &Uuid) -> AppResult<()> {
        let mut sessions = self.sessions.write().await;
        sessions
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| AppError::NotFound(format!("Session '{}' not found", id)))
    }

    async fn purge_idle(&self, cutoff: DateTime<Utc>) -> AppResult<usize> {
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();

        // With the map write-locked nobody can pick up a new handle, so an extra
        // strong reference means a request is holding or about to lock it.
        sessions.retain(|_, handle| {
            if Arc::strong_count(handle) > 1 {
                return true;
            }
            match handle.try_lock() {
                Ok(controller) => controller.last_active() >= cutoff,
                Err(_) => true,
            }
        });

        Ok(before - sessions.len())
    }
}

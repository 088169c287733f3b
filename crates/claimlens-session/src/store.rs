use std::sync::Arc;
use std::time::Duration;

use mini_moka::sync::Cache;
use tokio::sync::Mutex;
use tracing::info;
use uuid::Uuid;

use claimlens_core::objects::{MAX_SESSIONS, SESSION_IDLE_TIMEOUT};

use crate::error::SessionError;
use crate::state::SessionState;

/// One session's state behind its own lock. Holding the lock for a whole
/// dispatch pass keeps events of one session strictly sequential.
pub type SessionSlot = Arc<Mutex<SessionState>>;

/// In-memory registry of live sessions. Sessions left idle past the timeout
/// are dropped along with their cached query results.
#[derive(Clone)]
pub struct SessionStore {
    sessions: Cache<Uuid, SessionSlot>,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionStore {
    pub fn new() -> Self {
        Self::with_limits(SESSION_IDLE_TIMEOUT, MAX_SESSIONS)
    }

    pub fn with_limits(idle_timeout: Duration, max_sessions: u64) -> Self {
        Self {
            sessions: Cache::builder()
                .time_to_idle(idle_timeout)
                .max_capacity(max_sessions)
                .build(),
        }
    }

    pub fn create(&self) -> Uuid {
        let state = SessionState::new();
        let id = state.id;
        self.sessions.insert(id, Arc::new(Mutex::new(state)));
        info!(session_id = %id, "session created");
        id
    }

    pub fn get(&self, id: Uuid) -> Result<SessionSlot, SessionError> {
        self.sessions.get(&id).ok_or(SessionError::NotFound(id))
    }

    pub fn remove(&self, id: Uuid) -> Result<(), SessionError> {
        self.get(id)?;
        self.sessions.invalidate(&id);
        info!(session_id = %id, "session closed");
        Ok(())
    }
}

//! In-Memory Session Store Adapter
//!
//! Keeps live intake sessions in a map keyed by session id. Sessions are
//! lost on restart.
//!
//! Sessions idle for longer than the TTL are dropped by
//! [`InMemorySessionStore::evict_expired`]. When the map is full, expired and
//! `Completed` sessions are evicted before a new session is refused.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Mutex, RwLock};

use crate::domain::foundation::SessionId;
use crate::domain::intake::{IntakePhase, IntakeSession};
use crate::ports::{SessionHandle, SessionStore, SessionStoreError};

/// Default idle time before a session may be evicted.
pub const DEFAULT_SESSION_TTL: Duration = Duration::from_secs(3600);

/// In-memory storage for intake sessions
#[derive(Debug, Clone)]
pub struct InMemorySessionStore {
    sessions: Arc<RwLock<HashMap<SessionId, SessionHandle>>>,
    max_sessions: usize,
    idle_ttl: Duration,
}

impl InMemorySessionStore {
    /// Create a store that holds at most `max_sessions` sessions
    pub fn new(max_sessions: usize) -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            max_sessions,
            idle_ttl: DEFAULT_SESSION_TTL,
        }
    }

    /// Set how long a session may go without a turn before eviction
    pub fn with_idle_ttl(mut self, ttl: Duration) -> Self {
        self.idle_ttl = ttl;
        self
    }

    /// Drop every session idle for longer than the TTL.
    ///
    /// Returns the number of sessions evicted.
    pub async fn evict_expired(&self) -> usize {
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, handle| !self.is_expired(handle));
        let evicted = before - sessions.len();
        if evicted > 0 {
            tracing::debug!(evicted, remaining = sessions.len(), "Evicted idle sessions");
        }
        evicted
    }

    /// Clear all sessions (useful for tests)
    pub async fn clear(&self) {
        self.sessions.write().await.clear();
    }

    // A locked session is mid-turn and never counts as expired.
    fn is_expired(&self, handle: &SessionHandle) -> bool {
        handle
            .try_lock()
            .map(|session| session.updated_at().is_older_than(self.idle_ttl))
            .unwrap_or(false)
    }

    fn is_reclaimable(&self, handle: &SessionHandle) -> bool {
        handle
            .try_lock()
            .map(|session| {
                session.phase() == IntakePhase::Completed
                    || session.updated_at().is_older_than(self.idle_ttl)
            })
            .unwrap_or(false)
    }
}

impl Default for InMemorySessionStore {
    fn default() -> Self {
        Self::new(10_000)
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn get_or_create(&self, id: SessionId) -> Result<SessionHandle, SessionStoreError> {
        if let Some(handle) = self.sessions.read().await.get(&id) {
            return Ok(Arc::clone(handle));
        }

        let mut sessions = self.sessions.write().await;
        // Another request may have created it between the two locks
        if let Some(handle) = sessions.get(&id) {
            return Ok(Arc::clone(handle));
        }
        if sessions.len() >= self.max_sessions {
            let before = sessions.len();
            sessions.retain(|_, handle| !self.is_reclaimable(handle));
            tracing::debug!(
                evicted = before - sessions.len(),
                "Session store full, evicted expired and completed sessions"
            );
        }
        if sessions.len() >= self.max_sessions {
            tracing::warn!(max_sessions = self.max_sessions, "Session store full");
            return Err(SessionStoreError::CapacityExceeded(self.max_sessions));
        }

        let handle = Arc::new(Mutex::new(IntakeSession::new(id)));
        sessions.insert(id, Arc::clone(&handle));
        tracing::debug!(session_id = %id, "Created intake session");
        Ok(handle)
    }

    async fn find(&self, id: SessionId) -> Option<SessionHandle> {
        self.sessions.read().await.get(&id).cloned()
    }

    async fn remove(&self, id: SessionId) -> Result<(), SessionStoreError> {
        self.sessions
            .write()
            .await
            .remove(&id)
            .map(|_| ())
            .ok_or(SessionStoreError::NotFound(id))
    }

    async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn get_or_create_returns_same_handle() {
        let store = InMemorySessionStore::default();
        let id = SessionId::new();

        let first = store.get_or_create(id).await.unwrap();
        first.lock().await.record_assistant("Welcome");
        let second = store.get_or_create(id).await.unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(second.lock().await.transcript().len(), 1);
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn new_session_starts_in_business_problem() {
        let store = InMemorySessionStore::default();
        let id = SessionId::new();

        let handle = store.get_or_create(id).await.unwrap();
        let session = handle.lock().await;

        assert_eq!(session.id(), id);
        assert_eq!(session.phase(), IntakePhase::BusinessProblem);
    }

    #[tokio::test]
    async fn find_does_not_create() {
        let store = InMemorySessionStore::default();
        assert!(store.find(SessionId::new()).await.is_none());
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn remove_deletes_session() {
        let store = InMemorySessionStore::default();
        let id = SessionId::new();
        store.get_or_create(id).await.unwrap();

        store.remove(id).await.unwrap();

        assert!(store.find(id).await.is_none());
        assert_eq!(
            store.remove(id).await,
            Err(SessionStoreError::NotFound(id))
        );
    }

    #[tokio::test]
    async fn capacity_limit_rejects_new_sessions_only() {
        let store = InMemorySessionStore::new(1);
        let existing = SessionId::new();
        store.get_or_create(existing).await.unwrap();

        let result = store.get_or_create(SessionId::new()).await;

        assert!(matches!(result, Err(SessionStoreError::CapacityExceeded(1))));
        assert!(store.get_or_create(existing).await.is_ok());
    }

    #[tokio::test]
    async fn sessions_are_isolated() {
        let store = InMemorySessionStore::default();
        let a = store.get_or_create(SessionId::new()).await.unwrap();
        let b = store.get_or_create(SessionId::new()).await.unwrap();

        a.lock().await.record_assistant("only in a");

        assert_eq!(a.lock().await.transcript().len(), 1);
        assert!(b.lock().await.transcript().is_empty());
    }

    mod eviction {
        use super::*;

        fn complete(session: &mut IntakeSession) {
            for phase in [
                IntakePhase::FeatureRequirements,
                IntakePhase::UserStories,
                IntakePhase::Done,
                IntakePhase::Completed,
            ] {
                session.advance_to(phase).unwrap();
            }
        }

        #[tokio::test]
        async fn full_store_reclaims_completed_session() {
            let store = InMemorySessionStore::new(2);
            let finished = SessionId::new();
            let active = SessionId::new();
            complete(&mut *store.get_or_create(finished).await.unwrap().lock().await);
            store.get_or_create(active).await.unwrap();

            let fresh = SessionId::new();
            assert!(store.get_or_create(fresh).await.is_ok());

            assert!(store.find(finished).await.is_none());
            assert!(store.find(active).await.is_some());
            assert_eq!(store.len().await, 2);
        }

        #[tokio::test]
        async fn full_store_reclaims_idle_session() {
            let store = InMemorySessionStore::new(2).with_idle_ttl(Duration::from_millis(20));
            store.get_or_create(SessionId::new()).await.unwrap();
            store.get_or_create(SessionId::new()).await.unwrap();
            tokio::time::sleep(Duration::from_millis(50)).await;

            assert!(store.get_or_create(SessionId::new()).await.is_ok());
            assert_eq!(store.len().await, 1);
        }

        #[tokio::test]
        async fn full_store_of_live_sessions_still_refuses() {
            let store = InMemorySessionStore::new(2);
            store.get_or_create(SessionId::new()).await.unwrap();
            store.get_or_create(SessionId::new()).await.unwrap();

            let result = store.get_or_create(SessionId::new()).await;

            assert_eq!(result.unwrap_err(), SessionStoreError::CapacityExceeded(2));
        }

        #[tokio::test]
        async fn session_mid_turn_is_never_evicted() {
            let store = InMemorySessionStore::default().with_idle_ttl(Duration::from_millis(20));
            let id = SessionId::new();
            let handle = store.get_or_create(id).await.unwrap();
            let _turn = handle.lock().await;
            tokio::time::sleep(Duration::from_millis(50)).await;

            assert_eq!(store.evict_expired().await, 0);
            assert!(store.find(id).await.is_some());
        }

        #[tokio::test]
        async fn evict_expired_keeps_recent_sessions() {
            let store = InMemorySessionStore::default().with_idle_ttl(Duration::from_millis(20));
            let old = SessionId::new();
            store.get_or_create(old).await.unwrap();
            tokio::time::sleep(Duration::from_millis(50)).await;
            let recent = SessionId::new();
            store.get_or_create(recent).await.unwrap();

            assert_eq!(store.evict_expired().await, 1);
            assert!(store.find(old).await.is_none());
            assert!(store.find(recent).await.is_some());
        }
    }
}

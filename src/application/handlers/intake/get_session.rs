//! GetSessionHandler - Query handler for inspecting an intake session.

use std::sync::Arc;

use thiserror::Error;

use crate::domain::foundation::SessionId;
use crate::domain::intake::IntakeSession;
use crate::ports::SessionStore;

/// Query to get a session by ID.
#[derive(Debug, Clone)]
pub struct GetSessionQuery {
    pub session_id: SessionId,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum GetSessionError {
    #[error("Session not found: {0}")]
    NotFound(SessionId),
}

/// Handler for reading a snapshot of a session.
pub struct GetSessionHandler {
    store: Arc<dyn SessionStore>,
}

impl GetSessionHandler {
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self { store }
    }

    /// Returns a copy of the session as of the last completed turn.
    pub async fn handle(&self, query: GetSessionQuery) -> Result<IntakeSession, GetSessionError> {
        let handle = self
            .store
            .find(query.session_id)
            .await
            .ok_or(GetSessionError::NotFound(query.session_id))?;

        let session = handle.lock().await.clone();
        Ok(session)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::storage::InMemorySessionStore;

    #[tokio::test]
    async fn returns_snapshot_of_existing_session() {
        let store = Arc::new(InMemorySessionStore::default());
        let id = SessionId::new();
        store
            .get_or_create(id)
            .await
            .unwrap()
            .lock()
            .await
            .record_assistant("Welcome");
        let handler = GetSessionHandler::new(store);

        let session = handler.handle(GetSessionQuery { session_id: id }).await.unwrap();

        assert_eq!(session.id(), id);
        assert_eq!(session.transcript().len(), 1);
    }

    #[tokio::test]
    async fn unknown_session_is_not_found() {
        let handler = GetSessionHandler::new(Arc::new(InMemorySessionStore::default()));
        let id = SessionId::new();

        let result = handler.handle(GetSessionQuery { session_id: id }).await;

        assert_eq!(result.unwrap_err(), GetSessionError::NotFound(id));
    }
}

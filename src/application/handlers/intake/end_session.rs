//! EndSessionHandler - Command handler for discarding an intake session.

use std::sync::Arc;

use crate::domain::foundation::SessionId;
use crate::ports::{SessionStore, SessionStoreError};

/// Command to end a session and drop its state.
#[derive(Debug, Clone)]
pub struct EndSessionCommand {
    pub session_id: SessionId,
}

/// Handler for ending sessions.
pub struct EndSessionHandler {
    store: Arc<dyn SessionStore>,
}

impl EndSessionHandler {
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self { store }
    }

    /// Removes the session. A turn already in flight finishes on its own copy
    /// of the handle; later messages with the same id start a new session.
    pub async fn handle(&self, cmd: EndSessionCommand) -> Result<(), SessionStoreError> {
        self.store.remove(cmd.session_id).await?;
        tracing::info!(session_id = %cmd.session_id, "Intake session ended");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::storage::InMemorySessionStore;

    #[tokio::test]
    async fn removes_existing_session() {
        let store = Arc::new(InMemorySessionStore::default());
        let id = SessionId::new();
        store.get_or_create(id).await.unwrap();
        let handler = EndSessionHandler::new(store.clone());

        handler.handle(EndSessionCommand { session_id: id }).await.unwrap();

        assert!(store.find(id).await.is_none());
    }

    #[tokio::test]
    async fn unknown_session_is_not_found() {
        let handler = EndSessionHandler::new(Arc::new(InMemorySessionStore::default()));
        let id = SessionId::new();

        let result = handler.handle(EndSessionCommand { session_id: id }).await;

        assert_eq!(result, Err(SessionStoreError::NotFound(id)));
    }
}

//! Session Store Port - Interface for holding live intake sessions.
//!
//! Each session sits behind its own async mutex. Callers lock it for the
//! whole turn, which serializes turns of one session while other sessions
//! proceed in parallel.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::foundation::SessionId;
use crate::domain::intake::IntakeSession;

/// Shared handle to one session.
pub type SessionHandle = Arc<Mutex<IntakeSession>>;

/// Errors that can occur during session store operations.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SessionStoreError {
    #[error("Session not found: {0}")]
    NotFound(SessionId),

    #[error("Session store is full ({0} sessions)")]
    CapacityExceeded(usize),
}

/// Port for looking up and creating intake sessions.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Returns the session for `id`, creating a fresh one if none exists.
    ///
    /// # Errors
    ///
    /// Returns `SessionStoreError::CapacityExceeded` if a new session would
    /// exceed the configured limit.
    async fn get_or_create(&self, id: SessionId) -> Result<SessionHandle, SessionStoreError>;

    /// Returns the session for `id` if it exists.
    async fn find(&self, id: SessionId) -> Option<SessionHandle>;

    /// Removes the session for `id`.
    ///
    /// # Errors
    ///
    /// Returns `SessionStoreError::NotFound` if no such session exists.
    async fn remove(&self, id: SessionId) -> Result<(), SessionStoreError>;

    /// Number of live sessions.
    async fn len(&self) -> usize;

    /// Returns true when no sessions are live.
    async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the intake domain and the outside world. Adapters implement these ports.
//!
//! - `AIProvider` - The conversational oracle that writes free-form replies
//! - `Notifier` - Delivery of finished packages to the team
//! - `SessionStore` - Live session lookup with per-session locking

mod ai_provider;
mod notifier;
mod session_store;

pub use ai_provider::{
    AIError, AIProvider, CompletionRequest, CompletionResponse, FinishReason, Message,
    MessageRole, ProviderInfo, RequestMetadata, TokenUsage,
};
pub use notifier::{Notification, NotificationError, Notifier};
pub use session_store::{SessionHandle, SessionStore, SessionStoreError};

//! Session storage adapters.
//!
//! - `InMemorySessionStore` - Process-local session map

mod in_memory_session_store;

pub use in_memory_session_store::InMemorySessionStore;

//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the intake domain to external systems:
//! - `ai` - Oracle providers (chat completions, mock)
//! - `notification` - Hand-off delivery (Resend e-mail, mock)
//! - `storage` - Session storage (in-memory)
//! - `http` - axum REST API

pub mod ai;
pub mod http;
pub mod notification;
pub mod storage;

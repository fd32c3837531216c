//! Intake HTTP adapter.
//!
//! Exposes the chat turn endpoint plus session inspection and removal.

pub mod dto;
mod handlers;
mod routes;

pub use handlers::{chat, end_session, get_session, health, IntakeApiError, IntakeAppState};
pub use routes::{cors_layer, intake_app, intake_router};

//! Notification adapters.
//!
//! - `ResendNotifier` - Plain-text e-mail through the Resend HTTP API
//! - `MockNotifier` - Records notifications, can be told to fail

mod mock_notifier;
mod resend_notifier;

pub use mock_notifier::MockNotifier;
pub use resend_notifier::{ResendConfig, ResendNotifier, RESEND_API_URL};

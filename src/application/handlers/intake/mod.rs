//! Intake command and query handlers.

mod end_session;
mod get_session;
mod submit_message;

pub use end_session::{EndSessionCommand, EndSessionHandler};
pub use get_session::{GetSessionError, GetSessionHandler, GetSessionQuery};
pub use submit_message::{
    OracleSettings, SubmitMessageCommand, SubmitMessageError, SubmitMessageHandler,
    SubmitMessageResult,
};

//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations.

pub mod intake;

pub use intake::{
    EndSessionCommand, EndSessionHandler, GetSessionError, GetSessionHandler, GetSessionQuery,
    OracleSettings, SubmitMessageCommand, SubmitMessageError, SubmitMessageHandler,
    SubmitMessageResult,
};

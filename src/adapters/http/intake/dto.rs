//! HTTP DTOs for intake endpoints.
//!
//! These types decouple the HTTP API from domain types, allowing independent evolution.

use serde::{Deserialize, Serialize};

use crate::application::SubmitMessageResult;
use crate::domain::intake::{IntakePhase, IntakeSession, Turn};

// ════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Request to submit one chat message.
///
/// Without a `session_id` a new session is started.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub session_id: Option<String>,
    pub message: String,
}

// ════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Reply to a chat message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatResponse {
    pub reply: String,
    /// Phase label, e.g. "Business Problem".
    pub phase: String,
    pub phase_key: IntakePhase,
    pub session_id: String,
}

impl From<SubmitMessageResult> for ChatResponse {
    fn from(result: SubmitMessageResult) -> Self {
        Self {
            reply: result.reply,
            phase: result.phase.label().to_string(),
            phase_key: result.phase,
            session_id: result.session_id.to_string(),
        }
    }
}

/// One transcript turn.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TurnResponse {
    pub speaker: String,
    pub text: String,
    pub at: String,
}

impl From<&Turn> for TurnResponse {
    fn from(turn: &Turn) -> Self {
        Self {
            speaker: turn.speaker.label().to_string(),
            text: turn.text.clone(),
            at: turn.at.to_rfc3339(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactResponse {
    pub name: String,
    pub phone: String,
}

/// Full session snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionResponse {
    pub id: String,
    pub phase: String,
    pub phase_key: IntakePhase,
    pub awaiting_confirmation: bool,
    pub handoff_ready: bool,
    pub solution_skipped: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact: Option<ContactResponse>,
    pub transcript: Vec<TurnResponse>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<IntakeSession> for SessionResponse {
    fn from(session: IntakeSession) -> Self {
        Self {
            id: session.id().to_string(),
            phase: session.phase().label().to_string(),
            phase_key: session.phase(),
            awaiting_confirmation: session.awaiting_confirmation(),
            handoff_ready: session.handoff_ready(),
            solution_skipped: session.solution_skipped(),
            contact: session.contact().map(|c| ContactResponse {
                name: c.name.clone(),
                phone: c.phone.clone(),
            }),
            transcript: session.transcript().turns().iter().map(TurnResponse::from).collect(),
            created_at: session.created_at().to_rfc3339(),
            updated_at: session.updated_at().to_rfc3339(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub active_sessions: usize,
}

/// Standard error response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorResponse {
    fn new(code: &str, message: impl Into<String>) -> Self {
        Self {
            code: code.to_string(),
            message: message.into(),
            details: None,
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new("BAD_REQUEST", message)
    }

    pub fn not_found(resource_type: &str, id: &str) -> Self {
        Self::new("NOT_FOUND", format!("{} not found: {}", resource_type, id))
    }

    pub fn bad_gateway(message: impl Into<String>) -> Self {
        Self::new("ORACLE_UNAVAILABLE", message)
    }

    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::new("SERVICE_UNAVAILABLE", message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new("INTERNAL_ERROR", message)
    }

    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }
}

//! HTTP handlers for intake endpoints.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::application::{
    EndSessionCommand, EndSessionHandler, GetSessionError, GetSessionHandler, GetSessionQuery,
    OracleSettings, SubmitMessageCommand, SubmitMessageError, SubmitMessageHandler,
};
use crate::domain::foundation::SessionId;
use crate::domain::intake::PhaseStateMachine;
use crate::ports::{AIProvider, Notifier, SessionStore, SessionStoreError};

use super::dto::{ChatRequest, ChatResponse, ErrorResponse, HealthResponse, SessionResponse};

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

/// Shared dependencies for intake handlers.
#[derive(Clone)]
pub struct IntakeAppState {
    pub store: Arc<dyn SessionStore>,
    pub oracle: Arc<dyn AIProvider>,
    pub notifier: Arc<dyn Notifier>,
    pub machine: PhaseStateMachine,
    pub oracle_settings: OracleSettings,
}

impl IntakeAppState {
    pub fn new(
        store: Arc<dyn SessionStore>,
        oracle: Arc<dyn AIProvider>,
        notifier: Arc<dyn Notifier>,
        machine: PhaseStateMachine,
    ) -> Self {
        Self {
            store,
            oracle,
            notifier,
            machine,
            oracle_settings: OracleSettings::default(),
        }
    }

    pub fn with_oracle_settings(mut self, settings: OracleSettings) -> Self {
        self.oracle_settings = settings;
        self
    }

    pub fn submit_message_handler(&self) -> SubmitMessageHandler {
        SubmitMessageHandler::new(
            self.store.clone(),
            self.oracle.clone(),
            self.notifier.clone(),
            self.machine.clone(),
        )
        .with_oracle_settings(self.oracle_settings)
    }

    pub fn get_session_handler(&self) -> GetSessionHandler {
        GetSessionHandler::new(self.store.clone())
    }

    pub fn end_session_handler(&self) -> EndSessionHandler {
        EndSessionHandler::new(self.store.clone())
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Handlers
// ════════════════════════════════════════════════════════════════════════════════

/// POST /api/chat - Submit one message
pub async fn chat(
    State(state): State<IntakeAppState>,
    Json(request): Json<ChatRequest>,
) -> Result<impl IntoResponse, IntakeApiError> {
    let session_id = match request.session_id.as_deref() {
        Some(raw) => parse_session_id(raw)?,
        None => SessionId::new(),
    };

    let handler = state.submit_message_handler();
    let result = handler
        .handle(SubmitMessageCommand::new(session_id, request.message))
        .await?;

    Ok((StatusCode::OK, Json(ChatResponse::from(result))))
}

/// GET /api/sessions/:id - Inspect a session
pub async fn get_session(
    State(state): State<IntakeAppState>,
    Path(session_id): Path<String>,
) -> Result<impl IntoResponse, IntakeApiError> {
    let session_id = parse_session_id(&session_id)?;

    let session = state
        .get_session_handler()
        .handle(GetSessionQuery { session_id })
        .await?;

    Ok(Json(SessionResponse::from(session)))
}

/// DELETE /api/sessions/:id - End a session
pub async fn end_session(
    State(state): State<IntakeAppState>,
    Path(session_id): Path<String>,
) -> Result<impl IntoResponse, IntakeApiError> {
    let session_id = parse_session_id(&session_id)?;

    state
        .end_session_handler()
        .handle(EndSessionCommand { session_id })
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// GET /health - Liveness check
pub async fn health(State(state): State<IntakeAppState>) -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok".to_string(),
        active_sessions: state.store.len().await,
    })
}

fn parse_session_id(raw: &str) -> Result<SessionId, IntakeApiError> {
    raw.parse()
        .map_err(|_| IntakeApiError::BadRequest("Invalid session ID format".to_string()))
}

// ════════════════════════════════════════════════════════════════════════════════
// Error Handling
// ════════════════════════════════════════════════════════════════════════════════

/// API error type that converts application errors to HTTP responses.
#[derive(Debug)]
pub enum IntakeApiError {
    BadRequest(String),
    NotFound(String),
    BadGateway(String),
    ServiceUnavailable(String),
    Internal(String),
}

impl From<SubmitMessageError> for IntakeApiError {
    fn from(err: SubmitMessageError) -> Self {
        match err {
            SubmitMessageError::EmptyMessage => IntakeApiError::BadRequest(err.to_string()),
            SubmitMessageError::Oracle(e) => {
                tracing::error!(error = %e, "Oracle call failed");
                IntakeApiError::BadGateway(
                    "The assistant is unavailable right now, please try again".to_string(),
                )
            }
            SubmitMessageError::Store(e) => IntakeApiError::from(e),
            SubmitMessageError::Domain(e) => {
                tracing::error!(error = %e, "Session rejected a phase change");
                IntakeApiError::Internal(e.to_string())
            }
        }
    }
}

impl From<SessionStoreError> for IntakeApiError {
    fn from(err: SessionStoreError) -> Self {
        match err {
            SessionStoreError::NotFound(id) => IntakeApiError::NotFound(id.to_string()),
            SessionStoreError::CapacityExceeded(_) => {
                IntakeApiError::ServiceUnavailable(err.to_string())
            }
        }
    }
}

impl From<GetSessionError> for IntakeApiError {
    fn from(err: GetSessionError) -> Self {
        match err {
            GetSessionError::NotFound(id) => IntakeApiError::NotFound(id.to_string()),
        }
    }
}

impl IntoResponse for IntakeApiError {
    fn into_response(self) -> axum::response::Response {
        let (status, error) = match self {
            IntakeApiError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, ErrorResponse::bad_request(msg))
            }
            IntakeApiError::NotFound(id) => {
                (StatusCode::NOT_FOUND, ErrorResponse::not_found("Session", &id))
            }
            IntakeApiError::BadGateway(msg) => {
                (StatusCode::BAD_GATEWAY, ErrorResponse::bad_gateway(msg))
            }
            IntakeApiError::ServiceUnavailable(msg) => (
                StatusCode::SERVICE_UNAVAILABLE,
                ErrorResponse::service_unavailable(msg),
            ),
            IntakeApiError::Internal(msg) => {
                (StatusCode::INTERNAL_SERVER_ERROR, ErrorResponse::internal(msg))
            }
        };

        (status, Json(error)).into_response()
    }
}

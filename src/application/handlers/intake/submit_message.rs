//! SubmitMessageHandler - Command handler for one intake conversation turn.
//!
//! Locks the session for the whole turn, lets the phase state machine plan
//! it, performs the oracle call or hand-off the plan asks for, and commits
//! the result. If the oracle fails the session is left as it was.

use std::sync::Arc;

use thiserror::Error;
use uuid::Uuid;

use crate::domain::foundation::{SessionId, ValidationError};
use crate::domain::intake::{
    render_turn_prompt, IntakePhase, OracleCall, PhaseStateMachine, TurnOutcome, TurnPlan,
    SYSTEM_PROMPT,
};
use crate::ports::{
    AIError, AIProvider, CompletionRequest, MessageRole, Notification, Notifier, RequestMetadata,
    SessionStore, SessionStoreError,
};

/// Command to submit one user message.
#[derive(Debug, Clone)]
pub struct SubmitMessageCommand {
    pub session_id: SessionId,
    pub message: String,
}

impl SubmitMessageCommand {
    pub fn new(session_id: SessionId, message: impl Into<String>) -> Self {
        Self {
            session_id,
            message: message.into(),
        }
    }
}

/// Result of a completed turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitMessageResult {
    pub session_id: SessionId,
    pub reply: String,
    pub phase: IntakePhase,
}

/// Errors that can occur when submitting a message.
#[derive(Debug, Error)]
pub enum SubmitMessageError {
    /// Message is empty or whitespace only.
    #[error("Validation error: message cannot be empty")]
    EmptyMessage,

    /// Oracle failed after the provider's own retries.
    #[error("Oracle error: {0}")]
    Oracle(#[from] AIError),

    /// Session rejected a change; indicates corrupted state.
    #[error("Domain error: {0}")]
    Domain(#[from] ValidationError),

    #[error("Session store error: {0}")]
    Store(#[from] SessionStoreError),
}

/// Generation limits for oracle calls.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OracleSettings {
    pub max_tokens: u32,
    pub temperature: f32,
}

impl Default for OracleSettings {
    fn default() -> Self {
        Self {
            max_tokens: 1024,
            temperature: 0.7,
        }
    }
}

/// Handler for intake turns.
pub struct SubmitMessageHandler {
    store: Arc<dyn SessionStore>,
    oracle: Arc<dyn AIProvider>,
    notifier: Arc<dyn Notifier>,
    machine: PhaseStateMachine,
    oracle_settings: OracleSettings,
}

impl SubmitMessageHandler {
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

    pub async fn handle(
        &self,
        cmd: SubmitMessageCommand,
    ) -> Result<SubmitMessageResult, SubmitMessageError> {
        if cmd.message.trim().is_empty() {
            return Err(SubmitMessageError::EmptyMessage);
        }

        let handle = self.store.get_or_create(cmd.session_id).await?;
        // Held until the turn is committed so turns of one session never interleave
        let mut session = handle.lock().await;
        let phase_before = session.phase();

        let outcome = match self.machine.plan_turn(&mut session, &cmd.message)? {
            TurnPlan::Reply(outcome) => outcome,
            TurnPlan::CallOracle(call) => {
                let reply = self.ask_oracle(cmd.session_id, &call).await?;
                self.machine
                    .complete_with_oracle(&mut session, &cmd.message, &call, &reply)?
            }
            TurnPlan::HandOff(package) => {
                let delivered = match self.notifier.notify(&Notification::from(package)).await {
                    Ok(()) => {
                        tracing::info!(session_id = %cmd.session_id, "Hand-off delivered");
                        true
                    }
                    Err(err) => {
                        tracing::error!(
                            session_id = %cmd.session_id,
                            error = %err,
                            "Hand-off delivery failed"
                        );
                        false
                    }
                };
                self.machine
                    .complete_handoff(&mut session, &cmd.message, delivered)?
            }
        };

        if outcome.phase != phase_before {
            tracing::info!(
                session_id = %cmd.session_id,
                from = %phase_before,
                to = %outcome.phase,
                "Intake phase changed"
            );
        }

        let TurnOutcome { reply, phase } = outcome;
        Ok(SubmitMessageResult {
            session_id: cmd.session_id,
            reply,
            phase,
        })
    }

    async fn ask_oracle(&self, session_id: SessionId, call: &OracleCall) -> Result<String, AIError> {
        let prompt = render_turn_prompt(call.phase, &call.transcript, &call.input);
        let trace_id = Uuid::new_v4().to_string();

        tracing::debug!(
            session_id = %session_id,
            trace_id = %trace_id,
            phase = %call.phase,
            prompt_tokens = self.oracle.estimate_tokens(&prompt),
            "Calling oracle"
        );

        let request = CompletionRequest::new(RequestMetadata::new(session_id, trace_id))
            .with_system_prompt(SYSTEM_PROMPT)
            .with_message(MessageRole::User, prompt)
            .with_max_tokens(self.oracle_settings.max_tokens)
            .with_temperature(self.oracle_settings.temperature);

        let response = self.oracle.complete(request).await?;
        Ok(response.content)
    }
}

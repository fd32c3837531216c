//! Intake session record.
//!
//! One mutable record per running conversation. Fields are private so every
//! change goes through a method that keeps the phase, confirmation and
//! contact invariants.

use serde::Serialize;

use crate::domain::foundation::{SessionId, StateMachine, Timestamp, ValidationError};

use super::contact::ContactDetails;
use super::phase::IntakePhase;
use super::transcript::{Speaker, Transcript};

/// State of one intake conversation.
#[derive(Debug, Clone, Serialize)]
pub struct IntakeSession {
    id: SessionId,
    transcript: Transcript,
    phase: IntakePhase,
    awaiting_confirmation: bool,
    contact: Option<ContactDetails>,
    handoff_ready: bool,
    solution_skipped: bool,
    created_at: Timestamp,
    updated_at: Timestamp,
}

impl IntakeSession {
    /// Starts a session in `BusinessProblem` with an empty transcript.
    pub fn new(id: SessionId) -> Self {
        let now = Timestamp::now();
        Self {
            id,
            transcript: Transcript::new(),
            phase: IntakePhase::default(),
            awaiting_confirmation: false,
            contact: None,
            handoff_ready: false,
            solution_skipped: false,
            created_at: now,
            updated_at: now,
        }
    }

    // ─────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn phase(&self) -> IntakePhase {
        self.phase
    }

    pub fn awaiting_confirmation(&self) -> bool {
        self.awaiting_confirmation
    }

    pub fn contact(&self) -> Option<&ContactDetails> {
        self.contact.as_ref()
    }

    pub fn handoff_ready(&self) -> bool {
        self.handoff_ready
    }

    pub fn solution_skipped(&self) -> bool {
        self.solution_skipped
    }

    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    pub fn updated_at(&self) -> Timestamp {
        self.updated_at
    }

    // ─────────────────────────────────────────────────────────────────────
    // Mutations
    // ─────────────────────────────────────────────────────────────────────

    /// Moves to `next` and clears any pending confirmation.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if `next` is not a forward edge from the
    /// current phase.
    pub fn advance_to(&mut self, next: IntakePhase) -> Result<(), ValidationError> {
        self.phase = self.phase.transition_to(next)?;
        self.awaiting_confirmation = false;
        self.touch();
        Ok(())
    }

    pub fn request_confirmation(&mut self) {
        self.awaiting_confirmation = true;
        self.touch();
    }

    pub fn mark_solution_skipped(&mut self) {
        self.solution_skipped = true;
        self.touch();
    }

    /// Stores the contact record and arms the hand-off.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if contact details were already recorded.
    pub fn set_contact(&mut self, contact: ContactDetails) -> Result<(), ValidationError> {
        if self.contact.is_some() {
            return Err(ValidationError::invalid_format(
                "contact",
                "contact details are already recorded",
            ));
        }
        self.contact = Some(contact);
        self.handoff_ready = true;
        self.touch();
        Ok(())
    }

    /// Appends a user turn and the reply it received.
    pub fn record_exchange(&mut self, user_text: &str, reply: &str) {
        self.transcript.record_exchange(user_text, reply);
        self.touch();
    }

    /// Appends a lone assistant turn.
    pub fn record_assistant(&mut self, text: &str) {
        self.transcript.append(Speaker::Assistant, text);
        self.touch();
    }

    fn touch(&mut self) {
        self.updated_at = Timestamp::now();
    }
}

//! Phase state machine.
//!
//! Decides, for every inbound message, whether it is answered with a fixed
//! reply, sent to the oracle, or triggers the hand-off. The decision is split
//! around the two blocking calls so the domain stays synchronous:
//!
//! 1. [`PhaseStateMachine::plan_turn`] commits literal replies directly and
//!    otherwise returns what to call next, leaving the session untouched.
//! 2. [`PhaseStateMachine::complete_with_oracle`] or
//!    [`PhaseStateMachine::complete_handoff`] commits the result.
//!
//! The caller must hold the session exclusively from plan to completion.

use crate::domain::foundation::{StateMachine, ValidationError};

use super::classifier::is_solution_statement;
use super::contact::extract_contact;
use super::gate::{self, GateResult};
use super::handoff::{self, HandoffPackage, HandoffSettings};
use super::heuristics;
use super::phase::IntakePhase;
use super::replies;
use super::session::IntakeSession;

/// Reply and resulting phase for one turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnOutcome {
    pub reply: String,
    pub phase: IntakePhase,
}

impl TurnOutcome {
    fn new(reply: impl Into<String>, phase: IntakePhase) -> Self {
        Self {
            reply: reply.into(),
            phase,
        }
    }
}

/// An oracle request the caller must make before the turn can complete.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OracleCall {
    /// Phase the oracle answers for.
    pub phase: IntakePhase,
    /// Phase change approved this turn, committed only once the oracle answers.
    pub pending_advance: Option<IntakePhase>,
    /// Rendered transcript up to, not including, this turn.
    pub transcript: String,
    /// Input shown to the oracle; a fixed directive when the gate replaced it.
    pub input: String,
}

/// What the caller must do with the current turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TurnPlan {
    /// Already committed; send the reply as is.
    Reply(TurnOutcome),
    /// Call the oracle, then `complete_with_oracle`.
    CallOracle(OracleCall),
    /// Deliver the package, then `complete_handoff`.
    HandOff(HandoffPackage),
}

/// Orchestrates gate, classifier, extractor, oracle heuristics and hand-off.
#[derive(Debug, Clone)]
pub struct PhaseStateMachine {
    handoff: HandoffSettings,
}

impl PhaseStateMachine {
    pub fn new(handoff: HandoffSettings) -> Self {
        Self { handoff }
    }

    pub fn handoff_settings(&self) -> &HandoffSettings {
        &self.handoff
    }

    /// Decides how to handle `user_input`.
    ///
    /// Literal replies are recorded on the session before returning.
    /// Oracle and hand-off plans leave the session unchanged.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if a decided phase change is not a forward
    /// edge, which indicates a corrupted session.
    pub fn plan_turn(
        &self,
        session: &mut IntakeSession,
        user_input: &str,
    ) -> Result<TurnPlan, ValidationError> {
        if user_input == replies::INIT_TOKEN {
            session.record_assistant(replies::WELCOME);
            return Ok(literal(session, replies::WELCOME));
        }

        if session.phase() == IntakePhase::Completed {
            session.record_exchange(user_input, replies::ALREADY_SUBMITTED);
            return Ok(literal(session, replies::ALREADY_SUBMITTED));
        }

        let input_lower = user_input.trim().to_lowercase();
        match gate::evaluate(session.phase(), session.awaiting_confirmation(), &input_lower) {
            GateResult::Advance { next, reply } => {
                session.advance_to(next)?;
                session.record_exchange(user_input, reply);
                return Ok(literal(session, reply));
            }
            GateResult::AdvanceWithOracle { next, oracle_input } => {
                // Validate now so a bad edge never reaches the oracle.
                session.phase().transition_to(next)?;
                return Ok(TurnPlan::CallOracle(OracleCall {
                    phase: next,
                    pending_advance: Some(next),
                    transcript: session.transcript().render(),
                    input: oracle_input.to_string(),
                }));
            }
            GateResult::NotGated => {}
        }

        if session.phase() == IntakePhase::Done && session.contact().is_none() {
            return match extract_contact(user_input) {
                Some(contact) => {
                    let reply = replies::confirm_send(&contact.name);
                    session.set_contact(contact)?;
                    session.record_exchange(user_input, &reply);
                    Ok(literal(session, reply))
                }
                None => {
                    session.record_exchange(user_input, replies::CONTACT_FORMAT_ERROR);
                    Ok(literal(session, replies::CONTACT_FORMAT_ERROR))
                }
            };
        }

        if session.handoff_ready() && replies::is_approval(user_input) {
            let package = handoff::assemble(session, &self.handoff)?;
            return Ok(TurnPlan::HandOff(package));
        }

        if session.phase() == IntakePhase::BusinessProblem && is_solution_statement(user_input) {
            session.advance_to(IntakePhase::FeatureRequirements)?;
            session.mark_solution_skipped();
            session.record_exchange(user_input, replies::SOLUTION_SKIP_ACK);
            return Ok(literal(session, replies::SOLUTION_SKIP_ACK));
        }

        Ok(TurnPlan::CallOracle(OracleCall {
            phase: session.phase(),
            pending_advance: None,
            transcript: session.transcript().render(),
            input: user_input.to_string(),
        }))
    }

    /// Commits an oracle turn and applies the phase heuristics to the reply.
    ///
    /// The transcript records the user's own words and the raw oracle text.
    /// While the session is gated the approval prompt is appended to the
    /// returned reply only.
    pub fn complete_with_oracle(
        &self,
        session: &mut IntakeSession,
        user_input: &str,
        call: &OracleCall,
        oracle_reply: &str,
    ) -> Result<TurnOutcome, ValidationError> {
        if let Some(next) = call.pending_advance {
            session.advance_to(next)?;
        }
        session.record_exchange(user_input, oracle_reply);

        let signal = heuristics::after_oracle_reply(session.phase(), oracle_reply);
        if let Some(next) = signal.advance_to {
            session.advance_to(next)?;
        }

        if signal.await_confirmation {
            session.request_confirmation();
        }

        // Still gated after a follow-up: remind the user how to move on
        let reply = if session.awaiting_confirmation() {
            replies::with_approval_prompt(oracle_reply)
        } else {
            oracle_reply.to_string()
        };

        Ok(TurnOutcome::new(reply, session.phase()))
    }

    /// Commits the hand-off result.
    ///
    /// A failed delivery leaves the session exactly as it was so the user can
    /// retry with the identical package.
    pub fn complete_handoff(
        &self,
        session: &mut IntakeSession,
        user_input: &str,
        delivered: bool,
    ) -> Result<TurnOutcome, ValidationError> {
        if !delivered {
            return Ok(TurnOutcome::new(replies::HANDOFF_FAILURE, session.phase()));
        }

        session.advance_to(IntakePhase::Completed)?;
        session.record_exchange(user_input, replies::HANDOFF_SUCCESS);
        Ok(TurnOutcome::new(replies::HANDOFF_SUCCESS, session.phase()))
    }
}

fn literal(session: &IntakeSession, reply: impl Into<String>) -> TurnPlan {
    TurnPlan::Reply(TurnOutcome::new(reply, session.phase()))
}

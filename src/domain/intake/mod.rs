//! Intake domain module.
//!
//! Drives one guided conversation from a raw business problem to a
//! hand-off package for the delivery team.
//!
//! # Flow
//!
//! - `gate` - Approval keyword handling while a phase awaits sign-off
//! - `classifier` - Spots first messages that already describe a solution
//! - `contact` - Parses the `"<name>, <phone>"` line in the `Done` phase
//! - `heuristics` - Reads oracle replies to decide phase changes
//! - `machine` - Orders all of the above for a single turn

mod classifier;
mod contact;
mod gate;
mod handoff;
mod heuristics;
mod machine;
mod phase;
mod prompt;
mod replies;
mod session;
mod transcript;

pub use classifier::{is_solution_statement, SOLUTION_VOCABULARY};
pub use contact::{extract_contact, ContactDetails};
pub use handoff::{assemble as assemble_handoff, HandoffPackage, HandoffSettings};
pub use heuristics::{after_oracle_reply, PhaseSignal};
pub use machine::{OracleCall, PhaseStateMachine, TurnOutcome, TurnPlan};
pub use phase::IntakePhase;
pub use prompt::{render_turn_prompt, SYSTEM_PROMPT};
pub use replies::{
    is_approval, ALREADY_SUBMITTED, APPROVAL_PROMPT, APPROVAL_TOKEN, CONTACT_FORMAT_ERROR,
    CONTACT_REQUEST, FEATURES_PROMPT, HANDOFF_FAILURE, HANDOFF_SUCCESS, INIT_TOKEN,
    SOLUTION_SKIP_ACK, USER_STORIES_DIRECTIVE, WELCOME,
};
pub use session::IntakeSession;
pub use transcript::{Speaker, Transcript, Turn};


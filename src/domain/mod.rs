//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, timestamps, errors, state machine)
//! - `intake` - Idea intake conversation: phases, gate, heuristics and hand-off

pub mod foundation;
pub mod intake;

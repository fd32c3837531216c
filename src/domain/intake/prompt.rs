//! Oracle prompt rendering.
//!
//! The transcript is flattened to text here and nowhere else on the
//! oracle path.

use super::phase::IntakePhase;

/// System instructions shared by every intake request.
pub const SYSTEM_PROMPT: &str = "You are a business solution assistant. \
Your goal is to help the user identify their business problem, refine the solution, \
gather requirements, and generate user stories.";

/// Renders the per-turn prompt from phase, transcript and user input.
pub fn render_turn_prompt(phase: IntakePhase, transcript: &str, user_input: &str) -> String {
    format!(
        "Current Phase: {phase}\n\
         Phase Goal: {directive}\n\
         Conversation History:\n{transcript}\n\
         User Input: {user_input}\n\n\
         Respond appropriately for this phase by asking relevant questions or providing output like user stories.\n\n\
         Answer:",
        phase = phase.label(),
        directive = phase.directive(),
        transcript = transcript,
        user_input = user_input,
    )
}

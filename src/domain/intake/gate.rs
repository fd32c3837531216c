//! Confirmation gate.
//!
//! While a session is waiting for approval, an exact "approved" moves it to
//! the next phase. Anything else passes straight through; the gate never
//! blocks a turn.

use super::phase::IntakePhase;
use super::replies;

/// Outcome of checking a message against the gate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateResult {
    /// Handle the message normally.
    NotGated,

    /// Approval received; move to `next` and answer with `reply`.
    Advance {
        next: IntakePhase,
        reply: &'static str,
    },

    /// Approval received; move to `next`, but the reply for this turn still
    /// comes from the oracle, prompted with `oracle_input` instead of the
    /// user's "approved".
    AdvanceWithOracle {
        next: IntakePhase,
        oracle_input: &'static str,
    },
}

/// Checks `input_lower` against the gate for a session in `phase`.
pub fn evaluate(phase: IntakePhase, awaiting_confirmation: bool, input_lower: &str) -> GateResult {
    if !awaiting_confirmation || !replies::is_approval(input_lower) {
        return GateResult::NotGated;
    }

    match phase {
        IntakePhase::SolutionIdea => GateResult::Advance {
            next: IntakePhase::FeatureRequirements,
            reply: replies::FEATURES_PROMPT,
        },
        IntakePhase::FeatureRequirements => GateResult::AdvanceWithOracle {
            next: IntakePhase::UserStories,
            oracle_input: replies::USER_STORIES_DIRECTIVE,
        },
        IntakePhase::UserStories => GateResult::Advance {
            next: IntakePhase::Done,
            reply: replies::CONTACT_REQUEST,
        },
        IntakePhase::BusinessProblem | IntakePhase::Done | IntakePhase::Completed => {
            GateResult::NotGated
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ungated_session_passes_approval_through() {
        assert_eq!(
            evaluate(IntakePhase::SolutionIdea, false, "approved"),
            GateResult::NotGated
        );
    }

    #[test]
    fn other_input_while_gated_passes_through() {
        assert_eq!(
            evaluate(IntakePhase::SolutionIdea, true, "can we add payments?"),
            GateResult::NotGated
        );
        assert_eq!(
            evaluate(IntakePhase::SolutionIdea, true, "yes"),
            GateResult::NotGated
        );
    }

    #[test]
    fn solution_idea_approval_moves_to_features() {
        assert_eq!(
            evaluate(IntakePhase::SolutionIdea, true, "approved"),
            GateResult::Advance {
                next: IntakePhase::FeatureRequirements,
                reply: replies::FEATURES_PROMPT,
            }
        );
    }

    #[test]
    fn feature_approval_still_needs_the_oracle() {
        assert_eq!(
            evaluate(IntakePhase::FeatureRequirements, true, "approved"),
            GateResult::AdvanceWithOracle {
                next: IntakePhase::UserStories,
                oracle_input: replies::USER_STORIES_DIRECTIVE,
            }
        );
    }

    #[test]
    fn user_story_approval_asks_for_contact() {
        assert_eq!(
            evaluate(IntakePhase::UserStories, true, "approved"),
            GateResult::Advance {
                next: IntakePhase::Done,
                reply: replies::CONTACT_REQUEST,
            }
        );
    }

    #[test]
    fn closing_phases_are_never_gated() {
        assert_eq!(evaluate(IntakePhase::Done, true, "approved"), GateResult::NotGated);
        assert_eq!(evaluate(IntakePhase::Completed, true, "approved"), GateResult::NotGated);
    }
}

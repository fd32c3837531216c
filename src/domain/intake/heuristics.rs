//! Post-hoc phase heuristics.
//!
//! After the oracle answers, each phase decides from the reply text whether
//! the session should move on and whether the user must approve first. One
//! named rule per phase keeps the policy testable without the orchestrator.

use super::phase::IntakePhase;

/// Signal produced by inspecting an oracle reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PhaseSignal {
    /// Phase to advance to, if any.
    pub advance_to: Option<IntakePhase>,
    /// Whether the reply must ask the user to type "approved".
    pub await_confirmation: bool,
}

impl PhaseSignal {
    /// Nothing changes.
    pub fn none() -> Self {
        Self::default()
    }

    /// Stay put but ask for approval.
    pub fn confirm() -> Self {
        Self {
            advance_to: None,
            await_confirmation: true,
        }
    }

    /// Advance and ask for approval of the new phase's content.
    pub fn advance_and_confirm(next: IntakePhase) -> Self {
        Self {
            advance_to: Some(next),
            await_confirmation: true,
        }
    }
}

/// Routes an oracle reply to the rule for the current phase.
pub fn after_oracle_reply(phase: IntakePhase, reply: &str) -> PhaseSignal {
    match phase {
        IntakePhase::BusinessProblem => business_problem_rule(reply),
        IntakePhase::FeatureRequirements => feature_requirements_rule(),
        IntakePhase::UserStories => user_stories_rule(),
        IntakePhase::SolutionIdea | IntakePhase::Done | IntakePhase::Completed => {
            PhaseSignal::none()
        }
    }
}

/// The oracle moves on once it starts talking about a solution.
pub fn business_problem_rule(reply: &str) -> PhaseSignal {
    if reply.to_lowercase().contains("solution") {
        PhaseSignal::advance_and_confirm(IntakePhase::SolutionIdea)
    } else {
        PhaseSignal::none()
    }
}

/// Every feature summary needs sign-off before stories are written.
pub fn feature_requirements_rule() -> PhaseSignal {
    PhaseSignal::confirm()
}

/// Every batch of user stories needs sign-off before contact collection.
pub fn user_stories_rule() -> PhaseSignal {
    PhaseSignal::confirm()
}

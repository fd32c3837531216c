//! Intake phases.
//!
//! Phases order the guided conversation from the raw problem statement to the
//! hand-off. The ordering is strict: a session never moves backwards.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::{StateMachine, ValidationError};

/// The stage an intake conversation is in.
///
/// Flow: `BusinessProblem` → `SolutionIdea` → `FeatureRequirements` →
/// `UserStories` → `Done` → `Completed`, with one shortcut from
/// `BusinessProblem` straight to `FeatureRequirements` when the user already
/// describes a concrete solution.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "snake_case")]
pub enum IntakePhase {
    /// Understanding what hurts today.
    #[default]
    BusinessProblem,

    /// Shaping the idea that solves it.
    SolutionIdea,

    /// Listing the features the solution needs.
    FeatureRequirements,

    /// Turning features into user stories.
    UserStories,

    /// Content gathered; collecting contact details and send approval.
    Done,

    /// Package handed off. Terminal.
    Completed,
}

impl IntakePhase {
    /// All phases in conversation order.
    pub const ALL: [IntakePhase; 6] = [
        Self::BusinessProblem,
        Self::SolutionIdea,
        Self::FeatureRequirements,
        Self::UserStories,
        Self::Done,
        Self::Completed,
    ];

    /// Human-readable label, used in API replies and the oracle prompt.
    pub fn label(&self) -> &'static str {
        match self {
            Self::BusinessProblem => "Business Problem",
            Self::SolutionIdea => "Solution Idea",
            Self::FeatureRequirements => "Feature Requirements",
            Self::UserStories => "User Stories",
            Self::Done => "Done",
            Self::Completed => "Completed",
        }
    }

    /// What the oracle should focus on while the session is in this phase.
    pub fn directive(&self) -> &'static str {
        match self {
            Self::BusinessProblem => {
                "Ask questions that clarify the business problem: who is affected, how often, and what it costs them."
            }
            Self::SolutionIdea => {
                "Help the user refine a solution idea that addresses the stated problem."
            }
            Self::FeatureRequirements => {
                "Gather and summarise the feature requirements as a numbered list."
            }
            Self::UserStories => {
                "Write user stories in the form 'As a <role>, I want <goal> so that <benefit>'."
            }
            Self::Done => "Answer any final questions briefly. The package is ready to send.",
            Self::Completed => "The request has been submitted. Thank the user.",
        }
    }
}

impl StateMachine for IntakePhase {
    fn can_transition_to(&self, target: &Self) -> bool {
        use IntakePhase::*;
        matches!(
            (self, target),
            (BusinessProblem, SolutionIdea)
                // Solution already described in the first message
                | (BusinessProblem, FeatureRequirements)
                | (SolutionIdea, FeatureRequirements)
                | (FeatureRequirements, UserStories)
                | (UserStories, Done)
                // Only a successful hand-off gets here
                | (Done, Completed)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use IntakePhase::*;
        match self {
            BusinessProblem => vec![SolutionIdea, FeatureRequirements],
            SolutionIdea => vec![FeatureRequirements],
            FeatureRequirements => vec![UserStories],
            UserStories => vec![Done],
            Done => vec![Completed],
            Completed => vec![],
        }
    }
}

impl fmt::Display for IntakePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for IntakePhase {
    type Err = ValidationError;

    /// Accepts either the display label or the snake_case wire name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace(' ', "_");
        Self::ALL
            .into_iter()
            .find(|phase| {
                serde_json::to_value(phase)
                    .ok()
                    .and_then(|v| v.as_str().map(|name| name == normalized))
                    .unwrap_or(false)
            })
            .ok_or_else(|| ValidationError::invalid_format("phase", format!("unknown phase '{}'", s)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod phase_basics {
        use super::*;

        #[test]
        fn default_phase_is_business_problem() {
            assert_eq!(IntakePhase::default(), IntakePhase::BusinessProblem);
        }

        #[test]
        fn serializes_to_snake_case() {
            let json = serde_json::to_string(&IntakePhase::FeatureRequirements).unwrap();
            assert_eq!(json, "\"feature_requirements\"");
        }

        #[test]
        fn displays_label() {
            assert_eq!(IntakePhase::UserStories.to_string(), "User Stories");
        }

        #[test]
        fn parses_label_and_wire_name() {
            assert_eq!("Solution Idea".parse::<IntakePhase>(), Ok(IntakePhase::SolutionIdea));
            assert_eq!("solution_idea".parse::<IntakePhase>(), Ok(IntakePhase::SolutionIdea));
            assert!("Review".parse::<IntakePhase>().is_err());
        }

        #[test]
        fn all_phases_have_directives() {
            for phase in IntakePhase::ALL {
                assert!(!phase.directive().is_empty());
            }
        }

        #[test]
        fn ordering_follows_conversation_flow() {
            let mut sorted = IntakePhase::ALL;
            sorted.sort();
            assert_eq!(sorted, IntakePhase::ALL);
        }
    }

    mod transitions {
        use super::*;

        #[test]
        fn business_problem_can_skip_solution_idea() {
            let phase = IntakePhase::BusinessProblem;
            assert!(phase.can_transition_to(&IntakePhase::SolutionIdea));
            assert!(phase.can_transition_to(&IntakePhase::FeatureRequirements));
            assert!(!phase.can_transition_to(&IntakePhase::UserStories));
        }

        #[test]
        fn no_phase_moves_backwards() {
            for from in IntakePhase::ALL {
                for to in from.valid_transitions() {
                    assert!(to > from, "{:?} -> {:?} goes backwards", from, to);
                }
            }
        }

        #[test]
        fn completed_is_terminal() {
            assert!(IntakePhase::Completed.is_terminal());
            assert!(!IntakePhase::Done.is_terminal());
        }

        #[test]
        fn done_only_leads_to_completed() {
            assert_eq!(IntakePhase::Done.valid_transitions(), vec![IntakePhase::Completed]);
        }

        #[test]
        fn valid_transitions_matches_can_transition_to() {
            for from in IntakePhase::ALL {
                for to in IntakePhase::ALL {
                    assert_eq!(
                        from.can_transition_to(&to),
                        from.valid_transitions().contains(&to),
                        "{:?} -> {:?}",
                        from,
                        to
                    );
                }
            }
        }

        #[test]
        fn transition_to_rejects_regression() {
            assert!(IntakePhase::UserStories
                .transition_to(IntakePhase::SolutionIdea)
                .is_err());
        }
    }
}

//! State machine trait for ordered status enums.
//!
//! Gives every lifecycle enum (intake phases today) the same validated
//! transition API.

use super::ValidationError;

/// Trait for enums that represent state machines.
///
/// Implementors define the allowed edges and get validated
/// transition methods for free.
///
/// # Example
///
/// ```ignore
/// impl StateMachine for IntakePhase {
///     fn can_transition_to(&self, target: &Self) -> bool {
///         matches!((self, target), (BusinessProblem, SolutionIdea) | /* ... */)
///     }
///
///     fn valid_transitions(&self) -> Vec<Self> {
///         match self {
///             BusinessProblem => vec![SolutionIdea, FeatureRequirements],
///             // ...
///         }
///     }
/// }
///
/// let next = phase.transition_to(IntakePhase::SolutionIdea)?;
/// ```
pub trait StateMachine: Sized + Copy + PartialEq + std::fmt::Debug {
    /// Returns true if transition from self to target is valid.
    fn can_transition_to(&self, target: &Self) -> bool;

    /// Returns all valid target states from current state.
    fn valid_transitions(&self) -> Vec<Self>;

    /// Performs transition with validation, returning error if invalid.
    fn transition_to(&self, target: Self) -> Result<Self, ValidationError> {
        if self.can_transition_to(&target) {
            Ok(target)
        } else {
            Err(ValidationError::invalid_format(
                "state_transition",
                format!("Cannot transition from {:?} to {:?}", self, target),
            ))
        }
    }

    /// Checks if current state is terminal (no valid outgoing transitions).
    fn is_terminal(&self) -> bool {
        self.valid_transitions().is_empty()
    }
}

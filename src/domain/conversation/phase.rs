//! Lifecycle of a single chat request.
//!
//! `Validating → Normalizing → Calling → Replied`, with `Failed` reachable
//! from `Validating` and `Calling`. Both `Replied` and `Failed` are terminal;
//! a failed request is never retried server-side.

use serde::Serialize;

use crate::domain::foundation::StateMachine;

/// Phase of a chat request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ChatPhase {
    /// Checking required fields.
    #[default]
    Validating,
    /// Reshaping history into turns.
    Normalizing,
    /// Waiting on the completion provider.
    Calling,
    /// Reply extracted and returned.
    Replied,
    /// Validation or provider failure.
    Failed,
}

impl StateMachine for ChatPhase {
    fn can_transition_to(&self, target: &Self) -> bool {
        use ChatPhase::*;
        matches!(
            (self, target),
            (Validating, Normalizing)
                | (Validating, Failed)
                | (Normalizing, Calling)
                | (Calling, Replied)
                | (Calling, Failed)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use ChatPhase::*;
        match self {
            Validating => vec![Normalizing, Failed],
            Normalizing => vec![Calling],
            Calling => vec![Replied, Failed],
            Replied | Failed => vec![],
        }
    }
}

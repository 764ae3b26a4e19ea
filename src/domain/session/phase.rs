//! SessionPhase - lifecycle status of the estimation session.

use serde::Serialize;

use crate::domain::foundation::StateMachine;

/// Lifecycle phase of the session.
///
/// `Failed` preserves the previous snapshot for display fallback; only the
/// phase and the error message change on a failed submission.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionPhase {
    /// No result yet
    #[default]
    Idle,
    /// Estimation in flight
    Pending,
    /// Result present
    Ready,
    /// Last attempt errored; prior snapshot preserved
    Failed,
}

impl StateMachine for SessionPhase {
    fn can_transition_to(&self, target: &Self) -> bool {
        use SessionPhase::*;
        matches!(
            (self, target),
            // submit from any settled state
            (Idle, Pending) | (Ready, Pending) | (Failed, Pending)
                // estimation settles
                | (Pending, Ready) | (Pending, Failed)
                // undo restores a snapshot with or without a result
                | (Ready, Ready) | (Ready, Idle)
                | (Failed, Ready) | (Failed, Idle)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use SessionPhase::*;
        match self {
            Idle => vec![Pending],
            Pending => vec![Ready, Failed],
            Ready => vec![Pending, Ready, Idle],
            Failed => vec![Pending, Ready, Idle],
        }
    }
}

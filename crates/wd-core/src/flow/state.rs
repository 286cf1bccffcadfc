use serde::Serialize;

use super::FlowError;

/// Which backend call a `Submitting` state is waiting on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SubmitOperation {
    Open,
    GeneratePhrase,
    /// `verified` is false only for the ceremony bypass.
    CreateWallet { verified: bool },
    RecoverWallet,
}

/// Onboarding flow state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum FlowState {
    /// Dialog visible, user picking or filling a form.
    ClosedSelecting { error: Option<FlowError> },
    /// A backend call is in flight.
    Submitting { operation: SubmitOperation },
    /// A freshly generated phrase is on screen.
    AwaitingSeedDisplay,
    /// User is reconstructing the phrase.
    AwaitingSeedVerification { error: Option<FlowError> },
    /// A verified create commit failed; the same phrase is kept for a retry.
    AwaitingCommitRetry { error: FlowError },
    /// Dialog dismissed with a wallet open.
    Open,
}

impl Default for FlowState {
    fn default() -> Self {
        FlowState::ClosedSelecting { error: None }
    }
}

impl FlowState {
    /// Seed dialogs own the screen in these states.
    pub fn is_ceremony_active(&self) -> bool {
        matches!(
            self,
            FlowState::AwaitingSeedDisplay
                | FlowState::AwaitingSeedVerification { .. }
                | FlowState::AwaitingCommitRetry { .. }
        )
    }

    pub fn is_submitting(&self) -> bool {
        matches!(self, FlowState::Submitting { .. })
    }

    pub fn error(&self) -> Option<&FlowError> {
        match self {
            FlowState::ClosedSelecting { error } | FlowState::AwaitingSeedVerification { error } => {
                error.as_ref()
            }
            FlowState::AwaitingCommitRetry { error } => Some(error),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            FlowState::ClosedSelecting { .. } => "closed_selecting",
            FlowState::Submitting { .. } => "submitting",
            FlowState::AwaitingSeedDisplay => "awaiting_seed_display",
            FlowState::AwaitingSeedVerification { .. } => "awaiting_seed_verification",
            FlowState::AwaitingCommitRetry { .. } => "awaiting_commit_retry",
            FlowState::Open => "open",
        }
    }
}

//! Onboarding flow state machine.
//!
//! Defines a pure state transition function for the wallet onboarding dialog.

use super::{FlowAction, FlowError, FlowEvent, FlowState, SubmitOperation};

/// Pure onboarding state machine: no side effects.
pub struct FlowStateMachine;

impl FlowStateMachine {
    pub fn transition(state: FlowState, event: FlowEvent) -> (FlowState, Vec<FlowAction>) {
        match (state, event) {
            // Submits are only accepted from the selector.
            (FlowState::ClosedSelecting { .. }, FlowEvent::SubmitOpen) => (
                FlowState::Submitting {
                    operation: SubmitOperation::Open,
                },
                vec![FlowAction::CommitOpen],
            ),
            (FlowState::ClosedSelecting { .. }, FlowEvent::SubmitCreate { bypass_ceremony }) => {
                if bypass_ceremony {
                    (
                        FlowState::Submitting {
                            operation: SubmitOperation::CreateWallet { verified: false },
                        },
                        vec![FlowAction::PrepareBypassPhrase, FlowAction::CommitCreate],
                    )
                } else {
                    (
                        FlowState::Submitting {
                            operation: SubmitOperation::GeneratePhrase,
                        },
                        vec![FlowAction::GenerateSeedPhrase],
                    )
                }
            }
            (FlowState::ClosedSelecting { .. }, FlowEvent::SubmitRecover) => (
                FlowState::Submitting {
                    operation: SubmitOperation::RecoverWallet,
                },
                vec![FlowAction::CommitRecover],
            ),
            (FlowState::ClosedSelecting { .. }, FlowEvent::DismissError) => {
                (FlowState::ClosedSelecting { error: None }, Vec::new())
            }
            (FlowState::ClosedSelecting { .. }, FlowEvent::HideOnboarding { session_open: true }) => {
                (FlowState::Open, Vec::new())
            }
            (FlowState::ClosedSelecting { .. }, FlowEvent::SessionOpened) => {
                (FlowState::Open, Vec::new())
            }

            // Phrase generation
            (
                FlowState::Submitting {
                    operation: SubmitOperation::GeneratePhrase,
                },
                FlowEvent::PhraseGenerated,
            ) => (FlowState::AwaitingSeedDisplay, Vec::new()),
            (
                FlowState::Submitting {
                    operation: SubmitOperation::GeneratePhrase,
                },
                FlowEvent::PhraseGenerationFailed,
            ) => (
                FlowState::ClosedSelecting {
                    error: Some(FlowError::PhraseGenerationFailed),
                },
                vec![FlowAction::DiscardPendingWallet],
            ),

            // Ceremony
            (FlowState::AwaitingSeedDisplay, FlowEvent::SeedSaved) => (
                FlowState::AwaitingSeedVerification { error: None },
                vec![FlowAction::BeginSeedVerification],
            ),
            (FlowState::AwaitingSeedVerification { .. }, FlowEvent::SeedVerified) => (
                FlowState::Submitting {
                    operation: SubmitOperation::CreateWallet { verified: true },
                },
                vec![FlowAction::CommitCreate],
            ),
            (FlowState::AwaitingSeedVerification { .. }, FlowEvent::SeedMismatch) => (
                FlowState::AwaitingSeedVerification {
                    error: Some(FlowError::SeedPhraseMismatch),
                },
                Vec::new(),
            ),
            (FlowState::AwaitingSeedVerification { .. }, FlowEvent::DismissError) => (
                FlowState::AwaitingSeedVerification { error: None },
                Vec::new(),
            ),
            (FlowState::AwaitingCommitRetry { .. }, FlowEvent::RetryCommit) => (
                FlowState::Submitting {
                    operation: SubmitOperation::CreateWallet { verified: true },
                },
                vec![FlowAction::CommitCreate],
            ),

            // Commit results
            (FlowState::Submitting { operation }, FlowEvent::CommitSucceeded)
                if operation != SubmitOperation::GeneratePhrase =>
            {
                (
                    FlowState::Open,
                    vec![
                        FlowAction::ClearDrafts,
                        FlowAction::DiscardPendingWallet,
                        FlowAction::RefreshCatalog,
                    ],
                )
            }
            (
                FlowState::Submitting {
                    operation: SubmitOperation::CreateWallet { verified: true },
                },
                FlowEvent::CommitFailed { message },
            ) => (
                FlowState::AwaitingCommitRetry {
                    error: FlowError::BackendOperationFailed(message),
                },
                Vec::new(),
            ),
            (FlowState::Submitting { operation }, FlowEvent::CommitFailed { message })
                if operation != SubmitOperation::GeneratePhrase =>
            {
                (
                    FlowState::ClosedSelecting {
                        error: Some(FlowError::BackendOperationFailed(message)),
                    },
                    vec![FlowAction::DiscardPendingWallet],
                )
            }

            // Abandoning the ceremony
            (state, FlowEvent::Cancel) if state.is_ceremony_active() => (
                FlowState::ClosedSelecting { error: None },
                vec![FlowAction::DiscardPendingWallet],
            ),
            (state, FlowEvent::ShowOnboarding) if state.is_ceremony_active() => (
                FlowState::ClosedSelecting { error: None },
                vec![FlowAction::DiscardPendingWallet, FlowAction::RefreshCatalog],
            ),
            (state, FlowEvent::HideOnboarding { session_open }) if state.is_ceremony_active() => {
                let next = if session_open {
                    FlowState::Open
                } else {
                    FlowState::ClosedSelecting { error: None }
                };
                (next, vec![FlowAction::DiscardPendingWallet])
            }

            // Dialog and session outside the ceremony
            (FlowState::Open, FlowEvent::ShowOnboarding) => (
                FlowState::ClosedSelecting { error: None },
                vec![FlowAction::RefreshCatalog],
            ),
            (FlowState::ClosedSelecting { .. }, FlowEvent::ShowOnboarding) => (
                FlowState::ClosedSelecting { error: None },
                vec![FlowAction::RefreshCatalog],
            ),
            (FlowState::Open, FlowEvent::SessionClosed) => (
                FlowState::ClosedSelecting { error: None },
                vec![FlowAction::RefreshCatalog],
            ),

            (state, _event) => (state, Vec::new()),
        }
    }
}

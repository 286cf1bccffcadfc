use serde::{Deserialize, Serialize};

/// Errors that are carried inside flow states and shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[serde(tag = "kind", content = "message", rename_all = "snake_case")]
pub enum FlowError {
    /// Backend message, shown verbatim.
    #[error("{0}")]
    BackendOperationFailed(String),
    #[error("failed to generate a seed phrase")]
    PhraseGenerationFailed,
    #[error("the selected words do not match the seed phrase")]
    SeedPhraseMismatch,
}

use serde::{Deserialize, Serialize};

/// A wallet as reported by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalletSummary {
    pub name: String,
    /// Whether the wallet file is password-encrypted.
    pub secured: bool,
}

impl WalletSummary {
    pub fn new(name: impl Into<String>, secured: bool) -> Self {
        Self {
            name: name.into(),
            secured,
        }
    }
}

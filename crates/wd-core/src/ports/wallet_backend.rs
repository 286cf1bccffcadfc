use async_trait::async_trait;
use thiserror::Error;

use crate::wallet::WalletSummary;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BackendError {
    /// The backend answered with an error message, shown to the user verbatim.
    #[error("{0}")]
    Rejected(String),

    /// The backend could not be reached or answered with garbage.
    #[error("wallet backend unavailable: {0}")]
    Unavailable(String),
}

impl BackendError {
    /// Text for the error banner.
    pub fn user_message(&self) -> String {
        match self {
            BackendError::Rejected(message) => message.clone(),
            BackendError::Unavailable(_) => self.to_string(),
        }
    }
}

/// The external wallet service.
///
/// Mutating calls return `Ok(false)` when the backend declined without a message.
#[async_trait]
pub trait WalletBackendPort: Send + Sync {
    async fn list_wallets(&self) -> Result<Vec<WalletSummary>, BackendError>;

    async fn check_open(&self) -> Result<bool, BackendError>;

    async fn current_wallet_name(&self) -> Result<Option<String>, BackendError>;

    async fn is_current_secured(&self) -> Result<Option<bool>, BackendError>;

    async fn generate_seed_phrase(&self) -> Result<String, BackendError>;

    async fn open_wallet(&self, name: &str, password: Option<&str>) -> Result<bool, BackendError>;

    async fn create_wallet(
        &self,
        name: &str,
        password: Option<&str>,
        use_password: bool,
        seed_phrase: Option<&str>,
    ) -> Result<bool, BackendError>;

    async fn recover_wallet(
        &self,
        name: &str,
        seed_phrase: &str,
        password: Option<&str>,
        use_password: bool,
    ) -> Result<bool, BackendError>;

    async fn close_wallet(&self) -> Result<bool, BackendError>;

    async fn delete_wallet(&self, name: &str) -> Result<bool, BackendError>;
}

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

/// Push notifications from the wallet backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BackendEvent {
    /// One or more wallets were removed outside this client.
    WalletsDeleted,
}

#[async_trait]
pub trait BackendEventPort: Send + Sync {
    /// Start delivering backend events. The channel closes when the source stops.
    async fn subscribe(&self) -> anyhow::Result<mpsc::Receiver<BackendEvent>>;
}

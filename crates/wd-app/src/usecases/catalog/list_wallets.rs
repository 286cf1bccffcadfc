//! Use case for loading the wallet catalog from the backend.

use std::sync::Arc;

use tracing::{info, info_span, warn, Instrument};
use wd_core::ports::{BackendError, WalletBackendPort};
use wd_core::wallet::WalletCatalog;

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("failed to load wallets: {0}")]
    BackendUnavailable(#[source] BackendError),
}

/// Fetch the wallet list and normalise it into a [`WalletCatalog`].
///
/// The caller decides what an error means for the cached catalog; this use
/// case never returns a stale list.
pub struct ListWallets {
    backend: Arc<dyn WalletBackendPort>,
}

impl ListWallets {
    pub fn new(backend: Arc<dyn WalletBackendPort>) -> Self {
        Self { backend }
    }

    pub async fn execute(&self) -> Result<WalletCatalog, CatalogError> {
        let span = info_span!("usecase.list_wallets.execute");

        async {
            match self.backend.list_wallets().await {
                Ok(wallets) => {
                    let catalog = WalletCatalog::new(wallets);
                    info!(count = catalog.len(), "wallet catalog loaded");
                    Ok(catalog)
                }
                Err(err) => {
                    warn!(error = %err, "wallet catalog load failed");
                    Err(CatalogError::BackendUnavailable(err))
                }
            }
        }
        .instrument(span)
        .await
    }
}

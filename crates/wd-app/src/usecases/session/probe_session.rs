//! Use case for reading the backend's current session.

use std::sync::Arc;

use tracing::{debug, info_span, warn, Instrument};
use wd_core::ports::{BackendError, WalletBackendPort};
use wd_core::session::SessionState;

/// Ask the backend whether a wallet is open, and which one.
///
/// ## Behavior
/// - `check_open() == false` yields a closed session
/// - an open session without a name is treated as closed
/// - an unknown `secured` flag is treated as unsecured
pub struct ProbeSession {
    backend: Arc<dyn WalletBackendPort>,
}

impl ProbeSession {
    pub fn new(backend: Arc<dyn WalletBackendPort>) -> Self {
        Self { backend }
    }

    pub async fn execute(&self) -> Result<SessionState, BackendError> {
        let span = info_span!("usecase.probe_session.execute");

        async {
            if !self.backend.check_open().await? {
                debug!("no wallet open");
                return Ok(SessionState::closed());
            }

            let Some(name) = self.backend.current_wallet_name().await? else {
                warn!("backend reports an open wallet without a name");
                return Ok(SessionState::closed());
            };
            let secured = self.backend.is_current_secured().await?.unwrap_or(false);

            debug!(wallet = %name, secured, "wallet open");
            Ok(SessionState::opened(name, secured))
        }
        .instrument(span)
        .await
    }
}

use serde::Serialize;

use crate::flow::FlowState;
use crate::onboarding::OnboardingTab;
use crate::session::SessionState;
use crate::wallet::WalletSummary;

/// Notifications for whatever surface renders onboarding.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum OnboardingUiEvent {
    FlowStateChanged {
        state: FlowState,
    },
    SessionChanged {
        session: SessionState,
    },
    CatalogChanged {
        wallets: Vec<WalletSummary>,
        selected: Option<String>,
        tab: OnboardingTab,
    },
    /// Non-blocking notice, e.g. the catalog could not be loaded.
    Banner {
        message: String,
    },
}

#[async_trait::async_trait]
pub trait OnboardingEventPort: Send + Sync {
    async fn emit(&self, event: OnboardingUiEvent);
}

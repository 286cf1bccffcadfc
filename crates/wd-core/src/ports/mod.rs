//! Port interfaces for the application layer
//!
//! Ports define the contract between the onboarding use cases and the
//! infrastructure that talks to the wallet backend, the settings store and
//! whatever surface renders the dialog. Implementations live in `wd-infra`
//! and the `walletdesk` binary.

pub mod backend_event;
pub mod onboarding_event;
pub mod settings;
pub mod wallet_backend;

pub use backend_event::{BackendEvent, BackendEventPort};
pub use onboarding_event::{OnboardingEventPort, OnboardingUiEvent};
pub use settings::SettingsPort;
pub use wallet_backend::{BackendError, WalletBackendPort};

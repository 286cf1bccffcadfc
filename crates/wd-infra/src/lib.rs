//! Infrastructure adapters for WalletDesk: the settings file, the HTTP wallet
//! backend client and an in-memory sandbox backend.

pub mod backend;
pub mod fs;
pub mod settings;

pub use backend::{HttpBackendConfig, HttpWalletBackend, SandboxWalletBackend};
pub use settings::FileSettingsRepository;

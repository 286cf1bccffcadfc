//! Wallet backend adapters.

pub mod http;
pub mod sandbox;

pub use http::{HttpBackendConfig, HttpWalletBackend};
pub use sandbox::SandboxWalletBackend;

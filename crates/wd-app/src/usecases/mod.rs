//! Business logic use cases
//!
//! Small capability use cases (catalog, session probe, settings) are composed
//! by the onboarding orchestrator; the CLI also calls the settings ones directly.

pub mod catalog;
pub mod onboarding;
pub mod session;
pub mod settings;

pub use catalog::{CatalogError, ListWallets};
pub use session::ProbeSession;
pub use settings::{GetSettings, ResolveCeremonyPolicy, SettingsPatch, UpdateSettings};

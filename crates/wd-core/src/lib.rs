//! # wd-core
//!
//! Core domain models and business logic for WalletDesk.
//!
//! This crate contains pure business logic without any infrastructure dependencies:
//! the wallet catalog, session state, onboarding draft validation, the seed phrase
//! ceremony, the onboarding flow state machine, and the ports the application
//! layer drives.

pub mod flow;
pub mod onboarding;
pub mod ports;
pub mod security;
pub mod seed;
pub mod session;
pub mod settings;
pub mod wallet;

// Re-export commonly used types at the crate root
pub use flow::{FlowAction, FlowError, FlowEvent, FlowState, FlowStateMachine, SubmitOperation};
pub use onboarding::{DraftEdit, OnboardingDraft, OnboardingTab, PendingWallet, ValidationError};
pub use security::SecretString;
pub use seed::{SeedPhrase, SeedVerification};
pub use session::{OpenWallet, SessionState};
pub use settings::Settings;
pub use wallet::{WalletCatalog, WalletSummary};

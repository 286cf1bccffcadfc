//! Onboarding form domain module.
//!
//! Field state for the Open / Create / Recover forms plus the pure validation
//! rules that gate the commit action. Nothing here talks to the backend.

mod draft;
mod pending;
mod validation;

pub use draft::{DraftEdit, DraftView, OnboardingDraft, OnboardingTab, OpenRequest, RecoverRequest};
pub use pending::{PendingCreation, PendingWallet};
pub use validation::{
    check_new_password, check_new_wallet_name, check_open_password, check_recovery_phrase,
    ValidationError,
};

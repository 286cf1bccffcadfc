//! Onboarding use cases.
//!
//! This module exposes the onboarding orchestrator, the session controller
//! behind the wallet open/create/recover dialog.

mod context;
pub mod orchestrator;

pub use orchestrator::{OnboardingError, OnboardingOrchestrator};

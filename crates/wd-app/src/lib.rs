//! WalletDesk Application Orchestration Layer
//!
//! This crate contains the onboarding use cases and the orchestrator that
//! drives the onboarding flow state machine against the wallet backend.

pub mod usecases;

pub use usecases::onboarding::{OnboardingError, OnboardingOrchestrator};

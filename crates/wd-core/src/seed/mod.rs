//! Seed phrase domain module.
//!
//! A seed phrase is generated by the backend, shown to the user once, and then
//! reconstructed from a shuffled pool before the wallet is committed.

mod ceremony;
mod phrase;

pub use ceremony::{CeremonyError, SeedVerification, VerificationView};
pub use phrase::{SeedPhrase, DEFAULT_SEED_WORD_COUNT, MIN_RECOVERY_WORDS};

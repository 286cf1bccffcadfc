use rand::Rng;

use crate::security::SecretString;
use crate::seed::{SeedPhrase, SeedVerification};

/// Validated wallet-creation input held while the seed ceremony runs.
#[derive(Debug)]
pub struct PendingWallet {
    pub name: String,
    pub password: Option<SecretString>,
    pub use_password: bool,
}

impl PendingWallet {
    pub fn password(&self) -> Option<&str> {
        self.password.as_ref().and_then(|p| p.non_empty())
    }
}

/// Where a pending creation currently is in the seed ceremony.
#[derive(Debug)]
enum CeremonyStage {
    /// Waiting for the backend to hand back a phrase.
    Generating,
    /// Phrase is on screen for the user to write down.
    Displaying(SeedPhrase),
    /// User is reconstructing the phrase from the shuffled pool.
    Verifying(SeedVerification),
    /// Reconstruction matched; ready to commit.
    Verified(SeedPhrase),
    /// Ceremony skipped; waiting for an optional backend phrase.
    Bypassing,
    /// Ceremony skipped; commit with whatever phrase the backend produced.
    Bypassed(Option<SeedPhrase>),
}

/// One in-flight wallet creation. Exists only between a create submit and its
/// commit, cancel, or failure.
#[derive(Debug)]
pub struct PendingCreation {
    wallet: PendingWallet,
    stage: CeremonyStage,
}

impl PendingCreation {
    pub fn new(wallet: PendingWallet, bypass_ceremony: bool) -> Self {
        let stage = if bypass_ceremony {
            CeremonyStage::Bypassing
        } else {
            CeremonyStage::Generating
        };
        Self { wallet, stage }
    }

    pub fn wallet(&self) -> &PendingWallet {
        &self.wallet
    }

    /// Store a generated phrase. Returns `false` if no phrase was awaited.
    pub fn attach_phrase(&mut self, phrase: SeedPhrase) -> bool {
        match self.stage {
            CeremonyStage::Generating => {
                self.stage = CeremonyStage::Displaying(phrase);
                true
            }
            CeremonyStage::Bypassing => {
                self.stage = CeremonyStage::Bypassed(Some(phrase));
                true
            }
            _ => false,
        }
    }

    /// Bypass only: generation failed, commit without a phrase.
    pub fn proceed_without_phrase(&mut self) -> bool {
        if matches!(self.stage, CeremonyStage::Bypassing) {
            self.stage = CeremonyStage::Bypassed(None);
            true
        } else {
            false
        }
    }

    /// Words to show while the phrase is displayed.
    pub fn display_words(&self) -> Option<&[String]> {
        match &self.stage {
            CeremonyStage::Displaying(phrase) => Some(phrase.words()),
            _ => None,
        }
    }

    /// Move from display to the verification puzzle.
    pub fn begin_verification<R: Rng + ?Sized>(&mut self, rng: &mut R) -> bool {
        match std::mem::replace(&mut self.stage, CeremonyStage::Generating) {
            CeremonyStage::Displaying(phrase) => {
                self.stage = CeremonyStage::Verifying(SeedVerification::begin(phrase, rng));
                true
            }
            other => {
                self.stage = other;
                false
            }
        }
    }

    pub fn verification(&self) -> Option<&SeedVerification> {
        match &self.stage {
            CeremonyStage::Verifying(verification) => Some(verification),
            _ => None,
        }
    }

    pub fn verification_mut(&mut self) -> Option<&mut SeedVerification> {
        match &mut self.stage {
            CeremonyStage::Verifying(verification) => Some(verification),
            _ => None,
        }
    }

    /// Promote a matching reconstruction to `Verified`. A mismatch keeps the
    /// puzzle as-is and returns `false`.
    pub fn mark_verified(&mut self) -> bool {
        let matched = self.verification().map(|v| v.verify()).unwrap_or(false);
        if !matched {
            return false;
        }
        if let CeremonyStage::Verifying(verification) =
            std::mem::replace(&mut self.stage, CeremonyStage::Generating)
        {
            self.stage = CeremonyStage::Verified(verification.into_phrase());
        }
        true
    }

    /// The phrase to pass to the backend, once the ceremony is finished.
    ///
    /// `None` means not ready. `Some(None)` means ready with no phrase (bypass
    /// after a failed generation).
    pub fn commit_phrase(&self) -> Option<Option<&SeedPhrase>> {
        match &self.stage {
            CeremonyStage::Verified(phrase) => Some(Some(phrase)),
            CeremonyStage::Bypassed(phrase) => Some(phrase.as_ref()),
            _ => None,
        }
    }
}

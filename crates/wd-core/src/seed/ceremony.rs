//! Shuffle-and-reconstruct verification of a freshly generated seed phrase.

use std::fmt;

use rand::seq::SliceRandom;
use rand::Rng;
use serde::Serialize;
use zeroize::Zeroize;

use super::SeedPhrase;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
pub enum CeremonyError {
    #[error("no word at position {index}")]
    IndexOutOfRange { index: usize },
    #[error("the word at position {index} does not match the requested word")]
    WordMismatch { index: usize },
    #[error("{selected} of {expected} words selected")]
    Incomplete { selected: usize, expected: usize },
}

/// Snapshot of the verification puzzle for rendering.
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct VerificationView {
    pub pool: Vec<String>,
    pub selected: Vec<String>,
    pub complete: bool,
}

impl fmt::Debug for VerificationView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VerificationView")
            .field("pool", &self.pool.len())
            .field("selected", &self.selected.len())
            .field("complete", &self.complete)
            .finish()
    }
}

/// Verification puzzle over one seed phrase.
///
/// Words move between `pool` and `selected` one occurrence at a time, so the
/// multiset union of both always equals the phrase's words.
pub struct SeedVerification {
    phrase: SeedPhrase,
    pool: Vec<String>,
    selected: Vec<String>,
}

impl SeedVerification {
    /// Start a verification with a uniformly shuffled pool.
    pub fn begin<R: Rng + ?Sized>(phrase: SeedPhrase, rng: &mut R) -> Self {
        let mut pool = phrase.words().to_vec();
        pool.shuffle(rng);
        Self {
            phrase,
            pool,
            selected: Vec::new(),
        }
    }

    pub fn pool(&self) -> &[String] {
        &self.pool
    }

    pub fn selected(&self) -> &[String] {
        &self.selected
    }

    pub fn is_complete(&self) -> bool {
        self.selected.len() == self.phrase.len()
    }

    /// Move the occurrence at `pool_index` to the end of the selection.
    pub fn select_word(&mut self, word: &str, pool_index: usize) -> Result<(), CeremonyError> {
        match self.pool.get(pool_index) {
            None => Err(CeremonyError::IndexOutOfRange { index: pool_index }),
            Some(found) if found != word => Err(CeremonyError::WordMismatch { index: pool_index }),
            Some(_) => {
                let taken = self.pool.remove(pool_index);
                self.selected.push(taken);
                Ok(())
            }
        }
    }

    /// Move the occurrence at `selected_index` back into the pool.
    pub fn deselect_word(&mut self, word: &str, selected_index: usize) -> Result<(), CeremonyError> {
        match self.selected.get(selected_index) {
            None => Err(CeremonyError::IndexOutOfRange {
                index: selected_index,
            }),
            Some(found) if found != word => Err(CeremonyError::WordMismatch {
                index: selected_index,
            }),
            Some(_) => {
                let returned = self.selected.remove(selected_index);
                self.pool.push(returned);
                Ok(())
            }
        }
    }

    /// Re-randomize the remaining pool; the selection is untouched.
    pub fn reshuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.pool.shuffle(rng);
    }

    /// Return every selected word to the pool.
    pub fn clear_selection(&mut self) {
        self.pool.append(&mut self.selected);
    }

    /// Ordered equality of the selection with the phrase.
    ///
    /// An incomplete selection never verifies.
    pub fn verify(&self) -> bool {
        self.is_complete() && self.phrase.matches(&self.selected)
    }

    pub fn ensure_complete(&self) -> Result<(), CeremonyError> {
        if self.is_complete() {
            Ok(())
        } else {
            Err(CeremonyError::Incomplete {
                selected: self.selected.len(),
                expected: self.phrase.len(),
            })
        }
    }

    pub fn phrase(&self) -> &SeedPhrase {
        &self.phrase
    }

    /// Give up the puzzle and keep only the phrase.
    pub fn into_phrase(mut self) -> SeedPhrase {
        std::mem::take(&mut self.phrase)
    }

    pub fn view(&self) -> VerificationView {
        VerificationView {
            pool: self.pool.clone(),
            selected: self.selected.clone(),
            complete: self.is_complete(),
        }
    }
}

impl fmt::Debug for SeedVerification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SeedVerification")
            .field("expected", &self.phrase.len())
            .field("selected", &self.selected.len())
            .finish()
    }
}

impl Drop for SeedVerification {
    fn drop(&mut self) {
        self.pool.zeroize();
        self.selected.zeroize();
    }
}

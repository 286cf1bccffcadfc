use std::fmt;

use zeroize::Zeroize;

/// Word count the backend generates for new wallets.
pub const DEFAULT_SEED_WORD_COUNT: usize = 12;

/// Minimum word count accepted for wallet recovery.
pub const MIN_RECOVERY_WORDS: usize = 12;

/// Ordered seed phrase words.
///
/// Never printed by `Debug`; zeroed on drop.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct SeedPhrase {
    words: Vec<String>,
}

impl SeedPhrase {
    /// Whitespace-split `raw` into words. `None` when nothing remains.
    pub fn parse(raw: &str) -> Option<Self> {
        let words: Vec<String> = raw.split_whitespace().map(str::to_owned).collect();
        Self::from_words(words)
    }

    pub fn from_words(words: Vec<String>) -> Option<Self> {
        if words.is_empty() || words.iter().any(|w| w.trim().is_empty()) {
            return None;
        }
        Some(Self { words })
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Space-joined form handed to the backend.
    pub fn expose_joined(&self) -> String {
        self.words.join(" ")
    }

    /// Exact ordered comparison against a candidate word sequence.
    pub fn matches(&self, candidate: &[String]) -> bool {
        candidate.join(" ") == self.expose_joined()
    }
}

impl fmt::Debug for SeedPhrase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SeedPhrase([REDACTED; {} words])", self.words.len())
    }
}

impl Drop for SeedPhrase {
    fn drop(&mut self) {
        self.words.zeroize();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_splits_on_any_whitespace() {
        let phrase = SeedPhrase::parse("  alpha\tbravo \n charlie ").unwrap();
        assert_eq!(phrase.words(), &["alpha", "bravo", "charlie"]);
        assert_eq!(phrase.expose_joined(), "alpha bravo charlie");
    }

    #[test]
    fn parse_rejects_blank_input() {
        assert!(SeedPhrase::parse("").is_none());
        assert!(SeedPhrase::parse("   \n ").is_none());
    }

    #[test]
    fn matches_requires_same_order() {
        let phrase = SeedPhrase::parse("alpha bravo charlie").unwrap();
        let same: Vec<String> = vec!["alpha".into(), "bravo".into(), "charlie".into()];
        let swapped: Vec<String> = vec!["bravo".into(), "alpha".into(), "charlie".into()];
        assert!(phrase.matches(&same));
        assert!(!phrase.matches(&swapped));
        assert!(!phrase.matches(&same[..2]));
    }

    #[test]
    fn debug_does_not_leak_words() {
        let phrase = SeedPhrase::parse("alpha bravo").unwrap();
        let rendered = format!("{:?}", phrase);
        assert!(!rendered.contains("alpha"));
        assert!(rendered.contains("2 words"));
    }
}

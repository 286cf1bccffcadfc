use serde::Serialize;

use super::WalletSummary;

/// Ordered list of known wallets.
///
/// Replaced wholesale on every refresh; never patched in place. Names are unique
/// case-insensitively: when the backend reports two names differing only in case,
/// the first one wins.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct WalletCatalog {
    wallets: Vec<WalletSummary>,
}

impl WalletCatalog {
    pub fn new(wallets: Vec<WalletSummary>) -> Self {
        let mut unique: Vec<WalletSummary> = Vec::with_capacity(wallets.len());
        for wallet in wallets {
            let name = wallet.name.trim();
            if name.is_empty() {
                #[cfg(feature = "tracing")]
                tracing::warn!("backend reported a wallet with an empty name, ignoring it");
                continue;
            }
            if unique.iter().any(|w| names_equal(&w.name, name)) {
                #[cfg(feature = "tracing")]
                tracing::warn!(wallet = %wallet.name, "duplicate wallet name in backend listing");
                continue;
            }
            unique.push(wallet);
        }
        Self { wallets: unique }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn wallets(&self) -> &[WalletSummary] {
        &self.wallets
    }

    pub fn len(&self) -> usize {
        self.wallets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.wallets.is_empty()
    }

    /// Default selection for the Open tab.
    pub fn first(&self) -> Option<&WalletSummary> {
        self.wallets.first()
    }

    /// Exact lookup by name, as selected from this catalog.
    pub fn find(&self, name: &str) -> Option<&WalletSummary> {
        self.wallets.iter().find(|w| w.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.find(name).is_some()
    }

    /// True iff some wallet's name equals `trim(candidate)` ignoring case.
    pub fn is_duplicate_name(&self, candidate: &str) -> bool {
        let candidate = candidate.trim();
        self.wallets.iter().any(|w| names_equal(&w.name, candidate))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.wallets.iter().map(|w| w.name.as_str())
    }
}

impl From<Vec<WalletSummary>> for WalletCatalog {
    fn from(wallets: Vec<WalletSummary>) -> Self {
        Self::new(wallets)
    }
}

fn names_equal(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}

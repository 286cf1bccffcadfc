use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};

use crate::wallet::WalletCatalog;

/// Identity of the wallet currently open in the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpenWallet {
    pub name: String,
    pub secured: bool,
}

/// UI-visible wallet session.
///
/// `is_open` is derived from `current`, so `is_open == current.is_some()`
/// holds for every value of this type.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionState {
    current: Option<OpenWallet>,
}

impl SessionState {
    pub fn closed() -> Self {
        Self { current: None }
    }

    pub fn opened(name: impl Into<String>, secured: bool) -> Self {
        Self {
            current: Some(OpenWallet {
                name: name.into(),
                secured,
            }),
        }
    }

    pub fn is_open(&self) -> bool {
        self.current.is_some()
    }

    pub fn current(&self) -> Option<&OpenWallet> {
        self.current.as_ref()
    }

    pub fn current_name(&self) -> Option<&str> {
        self.current.as_ref().map(|w| w.name.as_str())
    }

    pub fn is_secured(&self) -> bool {
        self.current.as_ref().map(|w| w.secured).unwrap_or(false)
    }

    /// Close the session when the open wallet is missing from `catalog`.
    ///
    /// Returns `true` when the session was cleared.
    pub fn reconcile_with(&mut self, catalog: &WalletCatalog) -> bool {
        match self.current_name() {
            Some(name) if !catalog.contains(name) => {
                self.current = None;
                true
            }
            _ => false,
        }
    }
}

impl Serialize for SessionState {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("SessionState", 2)?;
        state.serialize_field("is_open", &self.is_open())?;
        state.serialize_field("current", &self.current)?;
        state.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wallet::WalletSummary;

    #[test]
    fn opened_and_closed_respect_invariant() {
        let open = SessionState::opened("Alice", true);
        assert!(open.is_open());
        assert_eq!(open.current_name(), Some("Alice"));
        assert!(open.is_secured());

        let closed = SessionState::closed();
        assert!(!closed.is_open());
        assert!(closed.current().is_none());
    }

    #[test]
    fn reconcile_clears_session_for_missing_wallet() {
        let mut session = SessionState::opened("Alice", false);
        let catalog = WalletCatalog::new(vec![WalletSummary::new("Bob", false)]);
        assert!(session.reconcile_with(&catalog));
        assert_eq!(session, SessionState::closed());
    }

    #[test]
    fn reconcile_keeps_session_for_present_wallet() {
        let mut session = SessionState::opened("Alice", false);
        let catalog = WalletCatalog::new(vec![WalletSummary::new("Alice", false)]);
        assert!(!session.reconcile_with(&catalog));
        assert!(session.is_open());
    }

    #[test]
    fn serializes_derived_is_open_flag() {
        let json = serde_json::to_value(SessionState::opened("Alice", false)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "is_open": true,
                "current": { "name": "Alice", "secured": false }
            })
        );
        let json = serde_json::to_value(SessionState::closed()).unwrap();
        assert_eq!(json, serde_json::json!({ "is_open": false, "current": null }));
    }
}

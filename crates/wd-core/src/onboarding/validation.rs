use serde::{Deserialize, Serialize};

use crate::security::SecretString;
use crate::seed::{SeedPhrase, MIN_RECOVERY_WORDS};
use crate::wallet::{WalletCatalog, WalletSummary};

/// Local, pre-submit input errors. Never sent to the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[serde(rename_all = "snake_case")]
pub enum ValidationError {
    #[error("wallet name is required")]
    MissingName,
    #[error("a wallet with this name already exists")]
    DuplicateName,
    #[error("passwords do not match")]
    PasswordMismatch,
    #[error("password is required")]
    MissingPassword,
    #[error("seed phrase must contain at least 12 words")]
    ShortSeedPhrase,
    #[error("no wallet selected")]
    NoWalletSelected,
}

/// Returns the trimmed name when it is present and unused.
pub fn check_new_wallet_name(
    name: &str,
    catalog: &WalletCatalog,
) -> Result<String, ValidationError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::MissingName);
    }
    if catalog.is_duplicate_name(trimmed) {
        return Err(ValidationError::DuplicateName);
    }
    Ok(trimmed.to_owned())
}

/// Password pair rules for a new wallet.
///
/// Ignored entirely when protection is off.
pub fn check_new_password(
    use_password: bool,
    password: &SecretString,
    confirm: &SecretString,
) -> Result<(), ValidationError> {
    if !use_password {
        return Ok(());
    }
    if password.is_empty() || confirm.is_empty() {
        return Err(ValidationError::MissingPassword);
    }
    if password.expose() != confirm.expose() {
        return Err(ValidationError::PasswordMismatch);
    }
    Ok(())
}

/// A password is needed only for secured wallets.
pub fn check_open_password(
    wallet: &WalletSummary,
    password: &SecretString,
) -> Result<(), ValidationError> {
    if wallet.secured && password.is_empty() {
        return Err(ValidationError::MissingPassword);
    }
    Ok(())
}

/// At least twelve whitespace-separated tokens. Word-list checks belong to the backend.
pub fn check_recovery_phrase(raw: &SecretString) -> Result<SeedPhrase, ValidationError> {
    match SeedPhrase::parse(raw.expose()) {
        Some(phrase) if phrase.len() >= MIN_RECOVERY_WORDS => Ok(phrase),
        _ => Err(ValidationError::ShortSeedPhrase),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> WalletCatalog {
        WalletCatalog::new(vec![WalletSummary::new("Alice", false)])
    }

    #[test]
    fn name_is_trimmed_and_checked() {
        assert_eq!(check_new_wallet_name("  Bob ", &catalog()), Ok("Bob".into()));
        assert_eq!(
            check_new_wallet_name("   ", &catalog()),
            Err(ValidationError::MissingName)
        );
        assert_eq!(
            check_new_wallet_name("alice", &catalog()),
            Err(ValidationError::DuplicateName)
        );
    }

    #[test]
    fn password_pair_rules() {
        let a = SecretString::new("pw");
        let b = SecretString::new("other");
        let empty = SecretString::default();

        assert_eq!(check_new_password(false, &empty, &b), Ok(()));
        assert_eq!(check_new_password(true, &a, &a.duplicate()), Ok(()));
        assert_eq!(
            check_new_password(true, &empty, &empty),
            Err(ValidationError::MissingPassword)
        );
        assert_eq!(
            check_new_password(true, &a, &empty),
            Err(ValidationError::MissingPassword)
        );
        assert_eq!(
            check_new_password(true, &a, &b),
            Err(ValidationError::PasswordMismatch)
        );
    }

    #[test]
    fn open_password_only_needed_for_secured_wallets() {
        let empty = SecretString::default();
        assert_eq!(
            check_open_password(&WalletSummary::new("A", false), &empty),
            Ok(())
        );
        assert_eq!(
            check_open_password(&WalletSummary::new("A", true), &empty),
            Err(ValidationError::MissingPassword)
        );
        assert_eq!(
            check_open_password(&WalletSummary::new("A", true), &SecretString::new("x")),
            Ok(())
        );
    }

    #[test]
    fn recovery_phrase_needs_twelve_words() {
        let eleven = SecretString::new("a b c d e f g h i j k");
        let twelve = SecretString::new(" a b c d e f g h i j k l ");
        let fifteen = SecretString::new("a b c d e f g h i j k l m n o");

        assert_eq!(
            check_recovery_phrase(&eleven).err(),
            Some(ValidationError::ShortSeedPhrase)
        );
        assert_eq!(check_recovery_phrase(&twelve).map(|p| p.len()), Ok(12));
        assert_eq!(check_recovery_phrase(&fifteen).map(|p| p.len()), Ok(15));
        assert_eq!(
            check_recovery_phrase(&SecretString::default()).err(),
            Some(ValidationError::ShortSeedPhrase)
        );
    }
}

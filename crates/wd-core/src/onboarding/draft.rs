use serde::{Deserialize, Serialize};

use crate::security::SecretString;
use crate::seed::SeedPhrase;
use crate::wallet::WalletCatalog;

use super::validation::{
    check_new_password, check_new_wallet_name, check_open_password, check_recovery_phrase,
    ValidationError,
};
use super::PendingWallet;

/// Which onboarding form is visible.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OnboardingTab {
    #[default]
    Open,
    Create,
}

/// A single user edit of the onboarding form.
#[derive(Debug)]
pub enum DraftEdit {
    SelectWallet(String),
    OpenPassword(SecretString),
    NewName(String),
    NewPassword(SecretString),
    ConfirmPassword(SecretString),
    UsePasswordProtection(bool),
    RecoveryMode(bool),
    RecoveryPhrase(SecretString),
    SwitchTab(OnboardingTab),
}

/// Validated input for opening a wallet.
#[derive(Debug)]
pub struct OpenRequest {
    pub name: String,
    pub password: Option<SecretString>,
    pub secured: bool,
}

/// Validated input for recovering a wallet.
#[derive(Debug)]
pub struct RecoverRequest {
    pub wallet: PendingWallet,
    pub phrase: SeedPhrase,
}

/// Secret-free projection of the draft for rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DraftView {
    pub tab: OnboardingTab,
    pub selected_wallet: Option<String>,
    pub new_name: String,
    pub use_password_protection: bool,
    pub is_recovery: bool,
    pub has_open_password: bool,
    pub has_new_password: bool,
    pub has_confirm_password: bool,
    pub recovery_word_count: usize,
}

/// Transient onboarding form state.
///
/// Password fields never survive a mode switch (Open <-> Create, or recovery
/// on/off). The selection survives everything except a catalog that no longer
/// contains it.
#[derive(Debug)]
pub struct OnboardingDraft {
    tab: OnboardingTab,
    selected_wallet: Option<String>,
    open_password: SecretString,
    new_name: String,
    new_password: SecretString,
    confirm_password: SecretString,
    use_password_protection: bool,
    is_recovery: bool,
    recovery_phrase: SecretString,
}

impl Default for OnboardingDraft {
    fn default() -> Self {
        Self {
            tab: OnboardingTab::Open,
            selected_wallet: None,
            open_password: SecretString::default(),
            new_name: String::new(),
            new_password: SecretString::default(),
            confirm_password: SecretString::default(),
            use_password_protection: true,
            is_recovery: false,
            recovery_phrase: SecretString::default(),
        }
    }
}

impl OnboardingDraft {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tab(&self) -> OnboardingTab {
        self.tab
    }

    pub fn selected_wallet(&self) -> Option<&str> {
        self.selected_wallet.as_deref()
    }

    pub fn new_name(&self) -> &str {
        &self.new_name
    }

    pub fn use_password_protection(&self) -> bool {
        self.use_password_protection
    }

    pub fn is_recovery(&self) -> bool {
        self.is_recovery
    }

    pub fn open_password(&self) -> &SecretString {
        &self.open_password
    }

    pub fn new_password(&self) -> &SecretString {
        &self.new_password
    }

    pub fn confirm_password(&self) -> &SecretString {
        &self.confirm_password
    }

    /// Apply one edit. Returns `true` when the edit was a mode switch, in which
    /// case the caller should also drop any displayed error.
    pub fn apply(&mut self, edit: DraftEdit) -> bool {
        match edit {
            DraftEdit::SelectWallet(name) => {
                self.select_wallet(Some(name));
                false
            }
            DraftEdit::OpenPassword(password) => {
                self.open_password = password;
                false
            }
            DraftEdit::NewName(name) => {
                self.new_name = name;
                false
            }
            DraftEdit::NewPassword(password) => {
                if self.use_password_protection {
                    self.new_password = password;
                }
                false
            }
            DraftEdit::ConfirmPassword(password) => {
                if self.use_password_protection {
                    self.confirm_password = password;
                }
                false
            }
            DraftEdit::UsePasswordProtection(enabled) => {
                self.use_password_protection = enabled;
                if !enabled {
                    self.new_password.clear();
                    self.confirm_password.clear();
                }
                false
            }
            DraftEdit::RecoveryMode(enabled) => self.set_recovery_mode(enabled),
            DraftEdit::RecoveryPhrase(phrase) => {
                self.recovery_phrase = phrase;
                false
            }
            DraftEdit::SwitchTab(tab) => self.switch_tab(tab),
        }
    }

    /// Returns `true` when the tab actually changed.
    pub fn switch_tab(&mut self, tab: OnboardingTab) -> bool {
        if self.tab == tab {
            return false;
        }
        self.tab = tab;
        self.clear_passwords();
        true
    }

    /// Returns `true` when the mode actually changed.
    pub fn set_recovery_mode(&mut self, enabled: bool) -> bool {
        if self.is_recovery == enabled {
            return false;
        }
        self.is_recovery = enabled;
        if !enabled {
            self.recovery_phrase.clear();
        }
        self.clear_passwords();
        true
    }

    /// Keeping the same selection keeps the typed password; a different wallet clears it.
    pub fn select_wallet(&mut self, name: Option<String>) {
        if self.selected_wallet != name {
            self.open_password.clear();
        }
        self.selected_wallet = name;
    }

    pub fn clear_passwords(&mut self) {
        self.open_password.clear();
        self.new_password.clear();
        self.confirm_password.clear();
    }

    /// Follow a catalog refresh.
    ///
    /// - non-empty: keep a still-present selection, otherwise select the first wallet
    /// - empty: drop the selection and show the Create tab
    /// - empty -> non-empty: show the Open tab
    ///
    /// Tab changes are skipped when `allow_tab_switch` is false (a ceremony is
    /// on screen and owns the dialog).
    pub fn apply_catalog(
        &mut self,
        catalog: &WalletCatalog,
        previously_empty: bool,
        allow_tab_switch: bool,
    ) {
        match catalog.first() {
            None => {
                self.select_wallet(None);
                if allow_tab_switch {
                    self.switch_tab(OnboardingTab::Create);
                }
            }
            Some(first) => {
                let keep = self
                    .selected_wallet
                    .as_deref()
                    .map(|name| catalog.contains(name))
                    .unwrap_or(false);
                if !keep {
                    self.select_wallet(Some(first.name.clone()));
                }
                if previously_empty && allow_tab_switch {
                    self.switch_tab(OnboardingTab::Open);
                }
            }
        }
    }

    /// Validate the Open form.
    pub fn validate_open(&self, catalog: &WalletCatalog) -> Result<OpenRequest, ValidationError> {
        let wallet = self
            .selected_wallet
            .as_deref()
            .and_then(|name| catalog.find(name))
            .ok_or(ValidationError::NoWalletSelected)?;
        check_open_password(wallet, &self.open_password)?;
        Ok(OpenRequest {
            name: wallet.name.clone(),
            password: self.open_password.non_empty().map(SecretString::new),
            secured: wallet.secured,
        })
    }

    /// Validate the Create form (recovery off).
    pub fn validate_create(&self, catalog: &WalletCatalog) -> Result<PendingWallet, ValidationError> {
        let name = check_new_wallet_name(&self.new_name, catalog)?;
        check_new_password(
            self.use_password_protection,
            &self.new_password,
            &self.confirm_password,
        )?;
        Ok(self.pending_wallet(name))
    }

    /// Validate the Create form in recovery mode.
    pub fn validate_recover(&self, catalog: &WalletCatalog) -> Result<RecoverRequest, ValidationError> {
        let name = check_new_wallet_name(&self.new_name, catalog)?;
        check_new_password(
            self.use_password_protection,
            &self.new_password,
            &self.confirm_password,
        )?;
        let phrase = check_recovery_phrase(&self.recovery_phrase)?;
        Ok(RecoverRequest {
            wallet: self.pending_wallet(name),
            phrase,
        })
    }

    /// Validate whichever form is currently visible. Drives the commit button.
    pub fn validate_current(&self, catalog: &WalletCatalog) -> Result<(), ValidationError> {
        match (self.tab, self.is_recovery) {
            (OnboardingTab::Open, _) => self.validate_open(catalog).map(|_| ()),
            (OnboardingTab::Create, false) => self.validate_create(catalog).map(|_| ()),
            (OnboardingTab::Create, true) => self.validate_recover(catalog).map(|_| ()),
        }
    }

    pub fn view(&self) -> DraftView {
        DraftView {
            tab: self.tab,
            selected_wallet: self.selected_wallet.clone(),
            new_name: self.new_name.clone(),
            use_password_protection: self.use_password_protection,
            is_recovery: self.is_recovery,
            has_open_password: !self.open_password.is_empty(),
            has_new_password: !self.new_password.is_empty(),
            has_confirm_password: !self.confirm_password.is_empty(),
            recovery_word_count: self.recovery_phrase.split_whitespace().count(),
        }
    }

    fn pending_wallet(&self, name: String) -> PendingWallet {
        let password = if self.use_password_protection {
            Some(self.new_password.duplicate())
        } else {
            None
        };
        PendingWallet {
            name,
            password,
            use_password: self.use_password_protection,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wallet::WalletSummary;

    fn catalog(entries: &[(&str, bool)]) -> WalletCatalog {
        WalletCatalog::new(
            entries
                .iter()
                .map(|(n, s)| WalletSummary::new(*n, *s))
                .collect(),
        )
    }

    fn filled_draft() -> OnboardingDraft {
        let mut draft = OnboardingDraft::new();
        draft.apply(DraftEdit::OpenPassword("open".into()));
        draft.apply(DraftEdit::NewPassword("new".into()));
        draft.apply(DraftEdit::ConfirmPassword("new".into()));
        draft
    }

    fn assert_passwords_empty(draft: &OnboardingDraft) {
        assert_eq!(draft.open_password().expose(), "");
        assert_eq!(draft.new_password().expose(), "");
        assert_eq!(draft.confirm_password().expose(), "");
    }

    #[test]
    fn tab_switch_clears_all_passwords_but_keeps_selection() {
        let mut draft = filled_draft();
        draft.select_wallet(Some("Alice".into()));
        draft.apply(DraftEdit::OpenPassword("open".into()));

        assert!(draft.apply(DraftEdit::SwitchTab(OnboardingTab::Create)));
        assert_passwords_empty(&draft);
        assert_eq!(draft.selected_wallet(), Some("Alice"));

        draft.apply(DraftEdit::OpenPassword("again".into()));
        assert!(draft.apply(DraftEdit::SwitchTab(OnboardingTab::Open)));
        assert_passwords_empty(&draft);
    }

    #[test]
    fn recovery_toggle_clears_all_passwords() {
        let mut draft = filled_draft();
        assert!(draft.apply(DraftEdit::RecoveryMode(true)));
        assert_passwords_empty(&draft);

        let mut draft = filled_draft();
        draft.apply(DraftEdit::RecoveryMode(true));
        draft.apply(DraftEdit::NewPassword("x".into()));
        draft.apply(DraftEdit::RecoveryPhrase("a b c".into()));
        assert!(draft.apply(DraftEdit::RecoveryMode(false)));
        assert_passwords_empty(&draft);
        assert_eq!(draft.view().recovery_word_count, 0);
    }

    #[test]
    fn reselecting_same_wallet_keeps_password() {
        let mut draft = OnboardingDraft::new();
        draft.select_wallet(Some("Alice".into()));
        draft.apply(DraftEdit::OpenPassword("secret".into()));

        draft.apply(DraftEdit::SelectWallet("Alice".into()));
        assert_eq!(draft.open_password().expose(), "secret");

        draft.apply(DraftEdit::SelectWallet("Bob".into()));
        assert_eq!(draft.open_password().expose(), "");
    }

    #[test]
    fn disabling_protection_clears_new_passwords() {
        let mut draft = filled_draft();
        draft.apply(DraftEdit::UsePasswordProtection(false));
        assert_eq!(draft.new_password().expose(), "");
        assert_eq!(draft.confirm_password().expose(), "");
        assert_eq!(draft.open_password().expose(), "open");

        draft.apply(DraftEdit::NewPassword("ignored".into()));
        assert_eq!(draft.new_password().expose(), "");
    }

    #[test]
    fn empty_catalog_switches_to_create() {
        let mut draft = OnboardingDraft::new();
        draft.apply_catalog(&WalletCatalog::empty(), true, true);
        assert_eq!(draft.tab(), OnboardingTab::Create);
        assert_eq!(draft.selected_wallet(), None);
    }

    #[test]
    fn catalog_becoming_non_empty_switches_to_open_and_selects_first() {
        let mut draft = OnboardingDraft::new();
        draft.apply_catalog(&WalletCatalog::empty(), true, true);
        draft.apply_catalog(&catalog(&[("Main", true), ("Other", false)]), true, true);
        assert_eq!(draft.tab(), OnboardingTab::Open);
        assert_eq!(draft.selected_wallet(), Some("Main"));
    }

    #[test]
    fn refresh_keeps_present_selection_and_its_password() {
        let mut draft = OnboardingDraft::new();
        let c = catalog(&[("Main", true), ("Other", true)]);
        draft.apply_catalog(&c, true, true);
        draft.apply(DraftEdit::SelectWallet("Other".into()));
        draft.apply(DraftEdit::OpenPassword("pw".into()));

        draft.apply_catalog(&c, false, true);
        assert_eq!(draft.selected_wallet(), Some("Other"));
        assert_eq!(draft.open_password().expose(), "pw");
    }

    #[test]
    fn refresh_reselects_when_selection_vanishes() {
        let mut draft = OnboardingDraft::new();
        draft.apply_catalog(&catalog(&[("Main", true), ("Other", true)]), true, true);
        draft.apply(DraftEdit::SelectWallet("Other".into()));
        draft.apply(DraftEdit::OpenPassword("pw".into()));

        draft.apply_catalog(&catalog(&[("Main", true)]), false, true);
        assert_eq!(draft.selected_wallet(), Some("Main"));
        assert_eq!(draft.open_password().expose(), "");
    }

    #[test]
    fn refresh_does_not_move_create_tab_when_not_previously_empty() {
        let mut draft = OnboardingDraft::new();
        let c = catalog(&[("Main", false)]);
        draft.apply_catalog(&c, true, true);
        draft.switch_tab(OnboardingTab::Create);
        draft.apply_catalog(&c, false, true);
        assert_eq!(draft.tab(), OnboardingTab::Create);
    }

    #[test]
    fn tab_switch_suppressed_while_ceremony_owns_dialog() {
        let mut draft = OnboardingDraft::new();
        draft.switch_tab(OnboardingTab::Create);
        draft.apply_catalog(&catalog(&[("Main", false)]), true, false);
        assert_eq!(draft.tab(), OnboardingTab::Create);
        assert_eq!(draft.selected_wallet(), Some("Main"));
    }

    #[test]
    fn validate_open_requires_password_for_secured_wallet() {
        let c = catalog(&[("Vault", true), ("Plain", false)]);
        let mut draft = OnboardingDraft::new();
        draft.apply_catalog(&c, true, true);
        assert_eq!(
            draft.validate_open(&c).err(),
            Some(ValidationError::MissingPassword)
        );

        draft.apply(DraftEdit::OpenPassword("pw".into()));
        let request = draft.validate_open(&c).unwrap();
        assert_eq!(request.name, "Vault");
        assert!(request.secured);
        assert_eq!(request.password.as_deref(), Some("pw"));

        draft.apply(DraftEdit::SelectWallet("Plain".into()));
        let request = draft.validate_open(&c).unwrap();
        assert!(request.password.is_none());
    }

    #[test]
    fn validate_open_without_selection() {
        let draft = OnboardingDraft::new();
        assert_eq!(
            draft.validate_open(&WalletCatalog::empty()).err(),
            Some(ValidationError::NoWalletSelected)
        );
    }

    #[test]
    fn validate_create_flags_duplicate_name_in_other_case() {
        let c = catalog(&[("Alice", false)]);
        let mut draft = OnboardingDraft::new();
        draft.switch_tab(OnboardingTab::Create);
        draft.apply(DraftEdit::NewName("alice".into()));
        draft.apply(DraftEdit::UsePasswordProtection(false));
        assert_eq!(
            draft.validate_create(&c).err(),
            Some(ValidationError::DuplicateName)
        );
        assert_eq!(
            draft.validate_current(&c),
            Err(ValidationError::DuplicateName)
        );
    }

    #[test]
    fn validate_create_builds_pending_wallet() {
        let mut draft = OnboardingDraft::new();
        draft.switch_tab(OnboardingTab::Create);
        draft.apply(DraftEdit::NewName("  Alice ".into()));
        assert_eq!(
            draft.validate_create(&WalletCatalog::empty()).err(),
            Some(ValidationError::MissingPassword)
        );

        draft.apply(DraftEdit::NewPassword("pw".into()));
        draft.apply(DraftEdit::ConfirmPassword("pw2".into()));
        assert_eq!(
            draft.validate_create(&WalletCatalog::empty()).err(),
            Some(ValidationError::PasswordMismatch)
        );

        draft.apply(DraftEdit::ConfirmPassword("pw".into()));
        let pending = draft.validate_create(&WalletCatalog::empty()).unwrap();
        assert_eq!(pending.name, "Alice");
        assert!(pending.use_password);
        assert_eq!(pending.password.as_deref(), Some("pw"));
    }

    #[test]
    fn validate_recover_checks_phrase_length() {
        let mut draft = OnboardingDraft::new();
        draft.switch_tab(OnboardingTab::Create);
        draft.apply(DraftEdit::RecoveryMode(true));
        draft.apply(DraftEdit::NewName("Restored".into()));
        draft.apply(DraftEdit::UsePasswordProtection(false));
        draft.apply(DraftEdit::RecoveryPhrase("one two three".into()));
        assert_eq!(
            draft.validate_current(&WalletCatalog::empty()),
            Err(ValidationError::ShortSeedPhrase)
        );

        draft.apply(DraftEdit::RecoveryPhrase(
            "a b c d e f g h i j k l".into(),
        ));
        let request = draft.validate_recover(&WalletCatalog::empty()).unwrap();
        assert_eq!(request.phrase.len(), 12);
        assert!(request.wallet.password.is_none());
    }

    #[test]
    fn view_exposes_no_secret_content() {
        let mut draft = OnboardingDraft::new();
        draft.apply(DraftEdit::OpenPassword("s3cr3t-open".into()));
        draft.apply(DraftEdit::NewPassword("s3cr3t-new".into()));
        draft.apply(DraftEdit::ConfirmPassword("s3cr3t-confirm".into()));
        draft.apply(DraftEdit::RecoveryPhrase("s3cr3t-phrase".into()));

        let view = draft.view();
        assert!(view.has_open_password);
        assert!(view.has_new_password);
        let json = serde_json::to_string(&view).unwrap();
        assert!(!json.contains("s3cr3t"));
    }
}

//! In-memory wallet backend.
//!
//! Used by `walletdesk --sandbox` and by integration tests. Wallets live for
//! the lifetime of the value; nothing touches disk.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use rand::Rng;
use tokio::sync::mpsc;
use tracing::{debug, info};
use wd_core::ports::{BackendError, BackendEvent, BackendEventPort, WalletBackendPort};
use wd_core::seed::{DEFAULT_SEED_WORD_COUNT, MIN_RECOVERY_WORDS};
use wd_core::wallet::WalletSummary;

const EVENT_CHANNEL_CAPACITY: usize = 16;

/// Word list for sandbox phrases. Not a full BIP-39 list.
const WORDS: &[&str] = &[
    "abandon", "ability", "able", "about", "above", "absent", "absorb", "abstract", "absurd",
    "abuse", "access", "accident", "account", "accuse", "achieve", "acid", "acoustic", "acquire",
    "across", "act", "action", "actor", "actress", "actual", "adapt", "add", "addict", "address",
    "adjust", "admit", "adult", "advance", "advice", "aerobic", "affair", "afford", "afraid",
    "again", "age", "agent", "agree", "ahead", "aim", "air", "airport", "aisle", "alarm", "album",
    "alcohol", "alert", "alien", "all", "alley", "allow", "almost", "alone", "alpha", "already",
    "also", "alter", "always", "amateur", "amazing", "among",
];

/// A wallet as stored by the sandbox, exposed for assertions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SandboxWallet {
    pub name: String,
    pub password: Option<String>,
    pub seed_phrase: Option<String>,
}

impl SandboxWallet {
    fn summary(&self) -> WalletSummary {
        WalletSummary::new(self.name.clone(), self.password.is_some())
    }
}

#[derive(Default)]
struct SandboxState {
    wallets: Vec<SandboxWallet>,
    current: Option<String>,
    /// One-shot failures keyed by command name.
    failures: HashMap<&'static str, BackendError>,
    subscribers: Vec<mpsc::Sender<BackendEvent>>,
}

impl SandboxState {
    fn take_failure(&mut self, command: &'static str) -> Result<(), BackendError> {
        match self.failures.remove(command) {
            Some(err) => {
                debug!(command, "sandbox injected failure");
                Err(err)
            }
            None => Ok(()),
        }
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.wallets.iter().position(|w| w.name == name)
    }

    fn insert(
        &mut self,
        name: &str,
        password: Option<&str>,
        use_password: bool,
        seed_phrase: Option<&str>,
    ) -> Result<(), BackendError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(BackendError::Rejected("Wallet name is required".into()));
        }
        if self
            .wallets
            .iter()
            .any(|w| w.name.to_lowercase() == name.to_lowercase())
        {
            return Err(BackendError::Rejected(format!(
                "Wallet '{name}' already exists"
            )));
        }
        let password = match (use_password, password) {
            (true, Some(p)) if !p.is_empty() => Some(p.to_string()),
            (true, _) => return Err(BackendError::Rejected("Password is required".into())),
            (false, _) => None,
        };

        self.wallets.push(SandboxWallet {
            name: name.to_string(),
            password,
            seed_phrase: seed_phrase.map(str::to_string),
        });
        self.current = Some(name.to_string());
        Ok(())
    }

    fn remove(&mut self, name: &str) -> bool {
        let Some(index) = self.position(name) else {
            return false;
        };
        self.wallets.remove(index);
        if self.current.as_deref() == Some(name) {
            self.current = None;
        }
        true
    }

    fn notify(&mut self, event: BackendEvent) {
        self.subscribers
            .retain(|tx| !tx.is_closed() && tx.try_send(event.clone()).is_ok());
    }
}

pub struct SandboxWalletBackend {
    state: Mutex<SandboxState>,
}

impl Default for SandboxWalletBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl SandboxWalletBackend {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(SandboxState::default()),
        }
    }

    /// Start with unsecured wallets named `names`.
    pub fn with_wallets<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let backend = Self::new();
        {
            let mut state = backend.lock();
            for name in names {
                state.wallets.push(SandboxWallet {
                    name: name.into(),
                    password: None,
                    seed_phrase: None,
                });
            }
        }
        backend
    }

    /// Make the next call of `command` fail with `error`.
    pub fn fail_next(&self, command: &'static str, error: BackendError) {
        self.lock().failures.insert(command, error);
    }

    pub fn wallet(&self, name: &str) -> Option<SandboxWallet> {
        let state = self.lock();
        state.position(name).map(|i| state.wallets[i].clone())
    }

    /// Delete a wallet as another client would, pushing `wallets-deleted`.
    pub fn delete_externally(&self, name: &str) -> bool {
        let mut state = self.lock();
        let removed = state.remove(name);
        if removed {
            info!(wallet = %name, "sandbox wallet deleted externally");
            state.notify(BackendEvent::WalletsDeleted);
        }
        removed
    }

    fn lock(&self) -> MutexGuard<'_, SandboxState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl WalletBackendPort for SandboxWalletBackend {
    async fn list_wallets(&self) -> Result<Vec<WalletSummary>, BackendError> {
        let mut state = self.lock();
        state.take_failure("list_wallets")?;
        Ok(state.wallets.iter().map(SandboxWallet::summary).collect())
    }

    async fn check_open(&self) -> Result<bool, BackendError> {
        let mut state = self.lock();
        state.take_failure("check_open")?;
        Ok(state.current.is_some())
    }

    async fn current_wallet_name(&self) -> Result<Option<String>, BackendError> {
        let mut state = self.lock();
        state.take_failure("current_wallet_name")?;
        Ok(state.current.clone())
    }

    async fn is_current_secured(&self) -> Result<Option<bool>, BackendError> {
        let mut state = self.lock();
        state.take_failure("is_current_secured")?;
        let secured = state
            .current
            .as_deref()
            .and_then(|name| state.position(name))
            .map(|i| state.wallets[i].password.is_some());
        Ok(secured)
    }

    async fn generate_seed_phrase(&self) -> Result<String, BackendError> {
        self.lock().take_failure("generate_seed_phrase")?;
        let mut rng = rand::rng();
        let words: Vec<&str> = (0..DEFAULT_SEED_WORD_COUNT)
            .map(|_| WORDS[rng.random_range(0..WORDS.len())])
            .collect();
        Ok(words.join(" "))
    }

    async fn open_wallet(&self, name: &str, password: Option<&str>) -> Result<bool, BackendError> {
        let mut state = self.lock();
        state.take_failure("open_wallet")?;
        let index = state
            .position(name)
            .ok_or_else(|| BackendError::Rejected(format!("Wallet '{name}' not found")))?;
        if let Some(expected) = &state.wallets[index].password {
            if password != Some(expected.as_str()) {
                return Err(BackendError::Rejected("Invalid password".into()));
            }
        }
        state.current = Some(name.to_string());
        info!(wallet = %name, "sandbox wallet opened");
        Ok(true)
    }

    async fn create_wallet(
        &self,
        name: &str,
        password: Option<&str>,
        use_password: bool,
        seed_phrase: Option<&str>,
    ) -> Result<bool, BackendError> {
        let mut state = self.lock();
        state.take_failure("create_wallet")?;
        state.insert(name, password, use_password, seed_phrase)?;
        info!(wallet = %name, use_password, "sandbox wallet created");
        Ok(true)
    }

    async fn recover_wallet(
        &self,
        name: &str,
        seed_phrase: &str,
        password: Option<&str>,
        use_password: bool,
    ) -> Result<bool, BackendError> {
        let mut state = self.lock();
        state.take_failure("recover_wallet")?;
        if seed_phrase.split_whitespace().count() < MIN_RECOVERY_WORDS {
            return Err(BackendError::Rejected("Invalid seed phrase".into()));
        }
        state.insert(name, password, use_password, Some(seed_phrase))?;
        info!(wallet = %name, "sandbox wallet recovered");
        Ok(true)
    }

    async fn close_wallet(&self) -> Result<bool, BackendError> {
        let mut state = self.lock();
        state.take_failure("close_wallet")?;
        Ok(state.current.take().is_some())
    }

    async fn delete_wallet(&self, name: &str) -> Result<bool, BackendError> {
        let mut state = self.lock();
        state.take_failure("delete_wallet")?;
        if !state.remove(name) {
            return Err(BackendError::Rejected(format!("Wallet '{name}' not found")));
        }
        state.notify(BackendEvent::WalletsDeleted);
        Ok(true)
    }
}

#[async_trait]
impl BackendEventPort for SandboxWalletBackend {
    async fn subscribe(&self) -> anyhow::Result<mpsc::Receiver<BackendEvent>> {
        let (tx, rx) = mpsc::channel(EVENT_CHANNEL_CAPACITY);
        self.lock().subscribers.push(tx);
        Ok(rx)
    }
}

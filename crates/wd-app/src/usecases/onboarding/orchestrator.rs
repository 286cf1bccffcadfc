//! Onboarding orchestrator.
//!
//! This module coordinates the onboarding flow state machine, the form draft,
//! the seed phrase ceremony and the wallet backend. It is the only writer of
//! [`SessionState`].

use std::collections::VecDeque;
use std::sync::{Arc, Mutex as StdMutex};

use anyhow::Context as _;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, info_span, warn, Instrument};

use wd_core::{
    flow::{FlowAction, FlowEvent, FlowState, FlowStateMachine},
    onboarding::{
        DraftEdit, DraftView, OnboardingDraft, OnboardingTab, OpenRequest, PendingCreation,
        RecoverRequest, ValidationError,
    },
    ports::{
        BackendError, BackendEvent, BackendEventPort, OnboardingEventPort, OnboardingUiEvent,
        SettingsPort, WalletBackendPort,
    },
    security::SecretString,
    seed::{CeremonyError, SeedPhrase, SeedVerification, VerificationView},
    session::SessionState,
    wallet::WalletCatalog,
};

use crate::usecases::catalog::{CatalogError, ListWallets};
use crate::usecases::onboarding::context::{CommitGuard, OnboardingContext};
use crate::usecases::session::ProbeSession;
use crate::usecases::settings::ResolveCeremonyPolicy;

/// Errors produced by the onboarding orchestrator.
///
/// Backend failures of a submitted commit are not errors here: they land in
/// the returned [`FlowState`] so the dialog can show them.
#[derive(Debug, thiserror::Error)]
pub enum OnboardingError {
    #[error("invalid input: {0}")]
    Validation(#[from] ValidationError),
    #[error("another wallet operation is already in progress")]
    Busy,
    #[error("operation not available while {state}")]
    NotAvailable { state: &'static str },
    #[error("seed verification: {0}")]
    Ceremony(#[from] CeremonyError),
    #[error("{0}")]
    Backend(String),
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

/// A validated submit waiting for its commit action.
enum StagedCommit {
    Open(OpenRequest),
    Recover(RecoverRequest),
}

/// Everything the dialog owns besides the flow state.
struct Workspace {
    draft: OnboardingDraft,
    catalog: WalletCatalog,
    session: SessionState,
    pending: Option<PendingCreation>,
    staged: Option<StagedCommit>,
}

impl Workspace {
    fn new() -> Self {
        Self {
            draft: OnboardingDraft::new(),
            catalog: WalletCatalog::empty(),
            session: SessionState::closed(),
            pending: None,
            staged: None,
        }
    }

    fn catalog_event(&self) -> OnboardingUiEvent {
        OnboardingUiEvent::CatalogChanged {
            wallets: self.catalog.wallets().to_vec(),
            selected: self.draft.selected_wallet().map(str::to_owned),
            tab: self.draft.tab(),
        }
    }
}

/// Arguments for one `create_wallet` backend call, copied out of the workspace.
struct CreateCall {
    name: String,
    password: Option<SecretString>,
    use_password: bool,
    phrase: Option<SecretString>,
}

/// Orchestrator that drives onboarding state and side effects.
pub struct OnboardingOrchestrator {
    context: Arc<OnboardingContext>,
    workspace: Mutex<Workspace>,
    rng: StdMutex<StdRng>,

    list_wallets: ListWallets,
    probe_session: ProbeSession,
    ceremony_policy: ResolveCeremonyPolicy,
    backend: Arc<dyn WalletBackendPort>,
    event_port: Arc<dyn OnboardingEventPort>,
}

impl OnboardingOrchestrator {
    pub fn new(
        backend: Arc<dyn WalletBackendPort>,
        settings: Arc<dyn SettingsPort>,
        event_port: Arc<dyn OnboardingEventPort>,
    ) -> Self {
        Self {
            context: OnboardingContext::default().arc(),
            workspace: Mutex::new(Workspace::new()),
            rng: StdMutex::new(StdRng::from_os_rng()),
            list_wallets: ListWallets::new(Arc::clone(&backend)),
            probe_session: ProbeSession::new(Arc::clone(&backend)),
            ceremony_policy: ResolveCeremonyPolicy::new(settings),
            backend,
            event_port,
        }
    }

    /// Deterministic shuffles for tests.
    pub fn with_rng_seed(mut self, seed: u64) -> Self {
        self.rng = StdMutex::new(StdRng::seed_from_u64(seed));
        self
    }

    /// Probe the backend session and load the catalog.
    ///
    /// Lands in `Open` when a wallet is already open, otherwise stays in
    /// `ClosedSelecting`. Neither a probe nor a catalog failure is fatal.
    pub async fn initialize(&self) -> Result<FlowState, OnboardingError> {
        let span = info_span!("usecase.onboarding.initialize");
        async {
            let session = match self.probe_session.execute().await {
                Ok(session) => session,
                Err(err) => {
                    warn!(error = %err, "session probe failed, assuming no wallet is open");
                    self.emit(OnboardingUiEvent::Banner {
                        message: err.user_message(),
                    })
                    .await;
                    SessionState::closed()
                }
            };
            let session_open = session.is_open();
            self.set_session(session).await;

            if let Err(err) = self.refresh_catalog().await {
                debug!(error = %err, "initial catalog refresh failed");
            }

            let state = if session_open {
                self.dispatch(FlowEvent::SessionOpened).await
            } else {
                let state = self.context.get_state().await;
                self.emit(OnboardingUiEvent::FlowStateChanged {
                    state: state.clone(),
                })
                .await;
                state
            };
            info!(state = state.name(), session_open, "onboarding initialized");
            Ok(state)
        }
        .instrument(span)
        .await
    }

    pub async fn get_state(&self) -> FlowState {
        self.context.get_state().await
    }

    pub async fn session(&self) -> SessionState {
        self.workspace.lock().await.session.clone()
    }

    pub async fn catalog(&self) -> WalletCatalog {
        self.workspace.lock().await.catalog.clone()
    }

    pub async fn draft_view(&self) -> DraftView {
        self.workspace.lock().await.draft.view()
    }

    /// Validation result for the visible form. `Ok` enables the commit button.
    pub async fn validation(&self) -> Result<(), ValidationError> {
        let ws = self.workspace.lock().await;
        ws.draft.validate_current(&ws.catalog)
    }

    pub async fn edit(&self, edit: DraftEdit) -> Result<DraftView, OnboardingError> {
        self.ensure_state(|s| matches!(s, FlowState::ClosedSelecting { .. }))
            .await?;

        let (mode_switched, view) = {
            let mut ws = self.workspace.lock().await;
            let switched = ws.draft.apply(edit);
            (switched, ws.draft.view())
        };
        if mode_switched {
            self.dispatch(FlowEvent::DismissError).await;
        }
        Ok(view)
    }

    /// Reload the catalog from the backend.
    ///
    /// A failure clears the cached catalog and raises a banner. Tab switches
    /// are suppressed while a seed dialog is on screen or a commit is running.
    pub async fn refresh_catalog(&self) -> Result<WalletCatalog, OnboardingError> {
        let result = self.list_wallets.execute().await;
        let state = self.context.get_state().await;
        let allow_tab_switch = !(state.is_ceremony_active() || state.is_submitting());

        let (outcome, event) = {
            let mut guard = self.workspace.lock().await;
            let ws = &mut *guard;
            let previously_empty = ws.catalog.is_empty();
            let outcome = match result {
                Ok(catalog) => {
                    ws.catalog = catalog;
                    Ok(ws.catalog.clone())
                }
                Err(err) => {
                    ws.catalog = WalletCatalog::empty();
                    Err(err)
                }
            };
            ws.draft
                .apply_catalog(&ws.catalog, previously_empty, allow_tab_switch);
            (outcome, ws.catalog_event())
        };

        if let Err(err) = &outcome {
            self.emit(OnboardingUiEvent::Banner {
                message: err.to_string(),
            })
            .await;
        }
        self.emit(event).await;
        outcome.map_err(OnboardingError::from)
    }

    pub async fn handle_backend_event(&self, event: BackendEvent) {
        match event {
            BackendEvent::WalletsDeleted => {
                info!("backend reported deleted wallets");
                // A failed refresh leaves an empty catalog, which still closes
                // the session below.
                if let Err(err) = self.refresh_catalog().await {
                    warn!(error = %err, "catalog refresh after wallet deletion failed");
                }
                let cleared = {
                    let mut guard = self.workspace.lock().await;
                    let ws = &mut *guard;
                    ws.session.reconcile_with(&ws.catalog)
                };
                if cleared {
                    info!("open wallet was deleted, closing session");
                    let session = self.session().await;
                    self.emit(OnboardingUiEvent::SessionChanged { session }).await;
                    self.dispatch(FlowEvent::SessionClosed).await;
                }
            }
        }
    }

    /// Feed backend push events into [`Self::handle_backend_event`] until the
    /// source closes.
    pub async fn start_backend_listener(
        self: &Arc<Self>,
        events: Arc<dyn BackendEventPort>,
    ) -> anyhow::Result<JoinHandle<()>> {
        let mut event_rx = events
            .subscribe()
            .await
            .context("subscribe to wallet backend events")?;
        let orchestrator = Arc::clone(self);

        Ok(tokio::spawn(async move {
            while let Some(event) = event_rx.recv().await {
                orchestrator.handle_backend_event(event).await;
            }
            debug!("backend event stream closed");
        }))
    }

    /// Show the dialog on `tab`, abandoning any ceremony in progress.
    pub async fn open_dialog(&self, tab: OnboardingTab) -> Result<FlowState, OnboardingError> {
        let state = self.dispatch(FlowEvent::ShowOnboarding).await;
        if !matches!(state, FlowState::ClosedSelecting { .. }) {
            return Err(OnboardingError::NotAvailable { state: state.name() });
        }
        let event = {
            let mut ws = self.workspace.lock().await;
            ws.draft.switch_tab(tab);
            ws.catalog_event()
        };
        self.emit(event).await;
        Ok(state)
    }

    pub async fn force_create_tab(&self) -> Result<FlowState, OnboardingError> {
        let state = self.context.get_state().await;
        if !matches!(state, FlowState::ClosedSelecting { .. }) {
            return self.open_dialog(OnboardingTab::Create).await;
        }
        let (switched, event) = {
            let mut ws = self.workspace.lock().await;
            (ws.draft.switch_tab(OnboardingTab::Create), ws.catalog_event())
        };
        self.emit(event).await;
        if switched {
            return Ok(self.dispatch(FlowEvent::DismissError).await);
        }
        Ok(state)
    }

    pub async fn close_dialog(&self) -> Result<FlowState, OnboardingError> {
        let session_open = self.workspace.lock().await.session.is_open();
        Ok(self
            .dispatch(FlowEvent::HideOnboarding { session_open })
            .await)
    }

    /// Submit whichever form is visible.
    pub async fn submit(&self) -> Result<FlowState, OnboardingError> {
        let (tab, recovery) = {
            let ws = self.workspace.lock().await;
            (ws.draft.tab(), ws.draft.is_recovery())
        };
        match (tab, recovery) {
            (OnboardingTab::Open, _) => self.submit_open().await,
            (OnboardingTab::Create, false) => self.submit_create().await,
            (OnboardingTab::Create, true) => self.submit_recover().await,
        }
    }

    pub async fn submit_open(&self) -> Result<FlowState, OnboardingError> {
        let _commit = self.begin_commit()?;
        self.ensure_state(|s| matches!(s, FlowState::ClosedSelecting { .. }))
            .await?;
        {
            let mut guard = self.workspace.lock().await;
            let ws = &mut *guard;
            let request = ws.draft.validate_open(&ws.catalog)?;
            ws.staged = Some(StagedCommit::Open(request));
        }
        Ok(self.dispatch(FlowEvent::SubmitOpen).await)
    }

    pub async fn submit_create(&self) -> Result<FlowState, OnboardingError> {
        let _commit = self.begin_commit()?;
        self.ensure_state(|s| matches!(s, FlowState::ClosedSelecting { .. }))
            .await?;
        let wallet = {
            let ws = self.workspace.lock().await;
            ws.draft.validate_create(&ws.catalog)?
        };
        let bypass_ceremony = self.ceremony_policy.execute().await;
        self.workspace.lock().await.pending = Some(PendingCreation::new(wallet, bypass_ceremony));
        Ok(self
            .dispatch(FlowEvent::SubmitCreate { bypass_ceremony })
            .await)
    }

    pub async fn submit_recover(&self) -> Result<FlowState, OnboardingError> {
        let _commit = self.begin_commit()?;
        self.ensure_state(|s| matches!(s, FlowState::ClosedSelecting { .. }))
            .await?;
        {
            let mut guard = self.workspace.lock().await;
            let ws = &mut *guard;
            let request = ws.draft.validate_recover(&ws.catalog)?;
            ws.staged = Some(StagedCommit::Recover(request));
        }
        Ok(self.dispatch(FlowEvent::SubmitRecover).await)
    }

    /// Words to write down, available only while the phrase is displayed.
    pub async fn seed_words(&self) -> Option<Vec<String>> {
        let ws = self.workspace.lock().await;
        ws.pending
            .as_ref()
            .and_then(|p| p.display_words())
            .map(<[String]>::to_vec)
    }

    pub async fn acknowledge_seed_saved(&self) -> Result<FlowState, OnboardingError> {
        self.ensure_state(|s| matches!(s, FlowState::AwaitingSeedDisplay))
            .await?;
        Ok(self.dispatch(FlowEvent::SeedSaved).await)
    }

    pub async fn verification_view(&self) -> Option<VerificationView> {
        let ws = self.workspace.lock().await;
        ws.pending
            .as_ref()
            .and_then(|p| p.verification())
            .map(|v| v.view())
    }

    pub async fn select_seed_word(
        &self,
        word: &str,
        pool_index: usize,
    ) -> Result<VerificationView, OnboardingError> {
        self.edit_verification(|v| v.select_word(word, pool_index))
            .await
    }

    pub async fn deselect_seed_word(
        &self,
        word: &str,
        selected_index: usize,
    ) -> Result<VerificationView, OnboardingError> {
        self.edit_verification(|v| v.deselect_word(word, selected_index))
            .await
    }

    pub async fn reshuffle_seed_pool(&self) -> Result<VerificationView, OnboardingError> {
        self.edit_verification(|v| {
            let mut rng = self.rng.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
            v.reshuffle(&mut *rng);
            Ok(())
        })
        .await
    }

    pub async fn clear_seed_selection(&self) -> Result<VerificationView, OnboardingError> {
        self.edit_verification(|v| {
            v.clear_selection();
            Ok(())
        })
        .await
    }

    /// Check the reconstruction. A match commits the wallet; a complete but
    /// wrong order stays on the puzzle with `SeedPhraseMismatch`.
    pub async fn verify_seed_phrase(&self) -> Result<FlowState, OnboardingError> {
        let _commit = self.begin_commit()?;
        self.ensure_state(|s| matches!(s, FlowState::AwaitingSeedVerification { .. }))
            .await?;

        let matched = {
            let mut ws = self.workspace.lock().await;
            let pending = ws.pending.as_mut().ok_or(OnboardingError::NotAvailable {
                state: "no seed phrase is being verified",
            })?;
            if let Some(verification) = pending.verification() {
                verification.ensure_complete()?;
            }
            pending.mark_verified()
        };

        let event = if matched {
            FlowEvent::SeedVerified
        } else {
            FlowEvent::SeedMismatch
        };
        Ok(self.dispatch(event).await)
    }

    /// Re-run a failed create commit with the already verified phrase.
    pub async fn retry_create(&self) -> Result<FlowState, OnboardingError> {
        let _commit = self.begin_commit()?;
        self.ensure_state(|s| matches!(s, FlowState::AwaitingCommitRetry { .. }))
            .await?;
        Ok(self.dispatch(FlowEvent::RetryCommit).await)
    }

    pub async fn cancel(&self) -> Result<FlowState, OnboardingError> {
        Ok(self.dispatch(FlowEvent::Cancel).await)
    }

    pub async fn dismiss_error(&self) -> Result<FlowState, OnboardingError> {
        Ok(self.dispatch(FlowEvent::DismissError).await)
    }

    pub async fn close_wallet(&self) -> Result<FlowState, OnboardingError> {
        let _commit = self.begin_commit()?;
        let span = info_span!("usecase.onboarding.close_wallet");
        async {
            self.expect_true("close_wallet", self.backend.close_wallet().await)?;
            info!("wallet closed");
            self.set_session(SessionState::closed()).await;
            Ok(self.dispatch(FlowEvent::SessionClosed).await)
        }
        .instrument(span)
        .await
    }

    pub async fn delete_wallet(&self, name: &str) -> Result<FlowState, OnboardingError> {
        let _commit = self.begin_commit()?;
        let span = info_span!("usecase.onboarding.delete_wallet", wallet = %name);
        async {
            self.expect_true("delete_wallet", self.backend.delete_wallet(name).await)?;
            info!("wallet deleted");

            let was_open = self.workspace.lock().await.session.current_name() == Some(name);
            if let Err(err) = self.refresh_catalog().await {
                warn!(error = %err, "catalog refresh after delete failed");
            }
            if was_open {
                self.set_session(SessionState::closed()).await;
                return Ok(self.dispatch(FlowEvent::SessionClosed).await);
            }
            Ok(self.context.get_state().await)
        }
        .instrument(span)
        .await
    }

    async fn dispatch(&self, event: FlowEvent) -> FlowState {
        let _dispatch_guard = self.context.acquire_dispatch_lock().await;

        let span = info_span!("usecase.onboarding.dispatch", event = ?event);
        async {
            let mut current = self.context.get_state().await;
            let mut pending_events = VecDeque::from([event]);

            while let Some(event) = pending_events.pop_front() {
                let event_name = format!("{:?}", event);
                let (next, actions) = FlowStateMachine::transition(current.clone(), event);
                if next == current && actions.is_empty() {
                    debug!(state = current.name(), event = %event_name, "onboarding event ignored");
                    continue;
                }
                info!(
                    from = current.name(),
                    to = next.name(),
                    event = %event_name,
                    "onboarding state transition"
                );
                // Publish before running actions so `Submitting` is observable.
                self.set_state_and_emit(next.clone()).await;
                current = next;
                pending_events.extend(self.execute_actions(actions).await);
            }

            current
        }
        .instrument(span)
        .await
    }

    async fn execute_actions(&self, actions: Vec<FlowAction>) -> Vec<FlowEvent> {
        let mut follow_up_events = Vec::new();
        for action in actions {
            debug!(?action, "onboarding executing action");
            match action {
                FlowAction::GenerateSeedPhrase => {
                    follow_up_events.push(self.generate_seed_phrase().await);
                }
                FlowAction::PrepareBypassPhrase => {
                    self.prepare_bypass_phrase().await;
                }
                FlowAction::BeginSeedVerification => {
                    let mut ws = self.workspace.lock().await;
                    let mut rng = self.rng.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
                    let started = ws
                        .pending
                        .as_mut()
                        .map(|p| p.begin_verification(&mut *rng))
                        .unwrap_or(false);
                    if !started {
                        error!("seed verification requested without a displayed phrase");
                    }
                }
                FlowAction::CommitOpen => {
                    follow_up_events.push(self.commit_open().await);
                }
                FlowAction::CommitCreate => {
                    follow_up_events.push(self.commit_create().await);
                }
                FlowAction::CommitRecover => {
                    follow_up_events.push(self.commit_recover().await);
                }
                FlowAction::DiscardPendingWallet => {
                    let mut ws = self.workspace.lock().await;
                    ws.pending = None;
                    ws.staged = None;
                }
                FlowAction::ClearDrafts => {
                    self.workspace.lock().await.draft = OnboardingDraft::new();
                }
                FlowAction::RefreshCatalog => {
                    if let Err(err) = self.refresh_catalog().await {
                        debug!(error = %err, "catalog refresh action failed");
                    }
                }
            }
        }
        follow_up_events
    }

    async fn generate_seed_phrase(&self) -> FlowEvent {
        let phrase = match self.backend.generate_seed_phrase().await {
            Ok(raw) => SeedPhrase::parse(&raw),
            Err(err) => {
                warn!(error = %err, "seed phrase generation failed");
                None
            }
        };
        let Some(phrase) = phrase else {
            return FlowEvent::PhraseGenerationFailed;
        };

        let mut ws = self.workspace.lock().await;
        let attached = ws
            .pending
            .as_mut()
            .is_some_and(|pending| pending.attach_phrase(phrase));
        if attached {
            let words = ws
                .pending
                .as_ref()
                .and_then(|pending| pending.display_words())
                .map_or(0, <[String]>::len);
            debug!(words, "seed phrase generated");
            FlowEvent::PhraseGenerated
        } else {
            error!("generated seed phrase has no pending wallet");
            FlowEvent::PhraseGenerationFailed
        }
    }

    async fn prepare_bypass_phrase(&self) {
        let phrase = match self.backend.generate_seed_phrase().await {
            Ok(raw) => SeedPhrase::parse(&raw),
            Err(err) => {
                warn!(error = %err, "seed phrase generation failed under bypass, committing without one");
                None
            }
        };

        let mut ws = self.workspace.lock().await;
        if let Some(pending) = ws.pending.as_mut() {
            match phrase {
                Some(phrase) => {
                    pending.attach_phrase(phrase);
                }
                None => {
                    pending.proceed_without_phrase();
                }
            }
        }
    }

    async fn commit_open(&self) -> FlowEvent {
        let request = match self.workspace.lock().await.staged.take() {
            Some(StagedCommit::Open(request)) => request,
            _ => return Self::missing_input("open_wallet"),
        };

        let result = self
            .backend
            .open_wallet(&request.name, request.password.as_deref())
            .await;
        match Self::commit_outcome("open_wallet", result) {
            Ok(()) => {
                info!(wallet = %request.name, "wallet opened");
                self.confirm_session(&request.name, request.secured).await;
                FlowEvent::CommitSucceeded
            }
            Err(message) => FlowEvent::CommitFailed { message },
        }
    }

    async fn commit_create(&self) -> FlowEvent {
        let call = {
            let ws = self.workspace.lock().await;
            let Some(pending) = ws.pending.as_ref() else {
                return Self::missing_input("create_wallet");
            };
            let Some(phrase) = pending.commit_phrase() else {
                return Self::missing_input("create_wallet");
            };
            let wallet = pending.wallet();
            CreateCall {
                name: wallet.name.clone(),
                password: wallet.password().map(SecretString::new),
                use_password: wallet.use_password,
                phrase: phrase.map(|p| SecretString::new(p.expose_joined())),
            }
        };

        let result = self
            .backend
            .create_wallet(
                &call.name,
                call.password.as_deref(),
                call.use_password,
                call.phrase.as_deref(),
            )
            .await;
        match Self::commit_outcome("create_wallet", result) {
            Ok(()) => {
                info!(wallet = %call.name, secured = call.use_password, "wallet created");
                self.confirm_session(&call.name, call.use_password).await;
                FlowEvent::CommitSucceeded
            }
            Err(message) => FlowEvent::CommitFailed { message },
        }
    }

    async fn commit_recover(&self) -> FlowEvent {
        let request = match self.workspace.lock().await.staged.take() {
            Some(StagedCommit::Recover(request)) => request,
            _ => return Self::missing_input("recover_wallet"),
        };
        let wallet = &request.wallet;
        let phrase = SecretString::new(request.phrase.expose_joined());

        let result = self
            .backend
            .recover_wallet(
                &wallet.name,
                &phrase,
                wallet.password(),
                wallet.use_password,
            )
            .await;
        match Self::commit_outcome("recover_wallet", result) {
            Ok(()) => {
                info!(wallet = %wallet.name, "wallet recovered");
                self.confirm_session(&wallet.name, wallet.use_password).await;
                FlowEvent::CommitSucceeded
            }
            Err(message) => FlowEvent::CommitFailed { message },
        }
    }

    fn commit_outcome(command: &str, result: Result<bool, BackendError>) -> Result<(), String> {
        match result {
            Ok(true) => Ok(()),
            Ok(false) => {
                warn!(command, "backend declined without a message");
                Err(format!("{command} returned false"))
            }
            Err(err) => {
                warn!(command, error = %err, "backend commit failed");
                Err(err.user_message())
            }
        }
    }

    fn expect_true(
        &self,
        command: &str,
        result: Result<bool, BackendError>,
    ) -> Result<(), OnboardingError> {
        Self::commit_outcome(command, result).map_err(OnboardingError::Backend)
    }

    fn missing_input(command: &str) -> FlowEvent {
        error!(command, "commit requested without validated input");
        FlowEvent::CommitFailed {
            message: format!("{command}: nothing to submit"),
        }
    }

    /// Session after a successful commit: the backend's view when it agrees,
    /// otherwise what the request implies.
    async fn confirm_session(&self, name: &str, secured: bool) {
        let session = match self.probe_session.execute().await {
            Ok(probed) if probed.current_name() == Some(name) => probed,
            Ok(probed) => {
                warn!(
                    expected = %name,
                    reported = ?probed.current_name(),
                    "backend session disagrees with committed wallet"
                );
                SessionState::opened(name, secured)
            }
            Err(err) => {
                warn!(error = %err, "session probe after commit failed");
                SessionState::opened(name, secured)
            }
        };
        self.set_session(session).await;
    }

    async fn edit_verification<F>(&self, change: F) -> Result<VerificationView, OnboardingError>
    where
        F: FnOnce(&mut SeedVerification) -> Result<(), CeremonyError>,
    {
        let state = self
            .ensure_state(|s| matches!(s, FlowState::AwaitingSeedVerification { .. }))
            .await?;

        let view = {
            let mut ws = self.workspace.lock().await;
            let verification = ws
                .pending
                .as_mut()
                .and_then(|p| p.verification_mut())
                .ok_or(OnboardingError::NotAvailable {
                    state: "no seed phrase is being verified",
                })?;
            change(verification)?;
            verification.view()
        };

        if state.error().is_some() {
            self.dispatch(FlowEvent::DismissError).await;
        }
        Ok(view)
    }

    fn begin_commit(&self) -> Result<CommitGuard, OnboardingError> {
        self.context.try_begin_commit().ok_or_else(|| {
            debug!("commit rejected, another one is in flight");
            OnboardingError::Busy
        })
    }

    async fn ensure_state(
        &self,
        accept: fn(&FlowState) -> bool,
    ) -> Result<FlowState, OnboardingError> {
        let state = self.context.get_state().await;
        if accept(&state) {
            Ok(state)
        } else {
            Err(OnboardingError::NotAvailable { state: state.name() })
        }
    }

    async fn set_session(&self, session: SessionState) {
        self.workspace.lock().await.session = session.clone();
        self.emit(OnboardingUiEvent::SessionChanged { session }).await;
    }

    async fn set_state_and_emit(&self, state: FlowState) {
        self.context.set_state(state.clone()).await;
        self.emit(OnboardingUiEvent::FlowStateChanged { state }).await;
    }

    async fn emit(&self, event: OnboardingUiEvent) {
        self.event_port.emit(event).await;
    }
}

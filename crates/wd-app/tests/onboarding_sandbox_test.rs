use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use tempfile::TempDir;
use wd_app::usecases::{SettingsPatch, UpdateSettings};
use wd_app::{OnboardingError, OnboardingOrchestrator};
use wd_core::flow::{FlowError, FlowState};
use wd_core::onboarding::{DraftEdit, OnboardingTab, ValidationError};
use wd_core::ports::{
    BackendError, BackendEvent, OnboardingEventPort, OnboardingUiEvent, SettingsPort, WalletBackendPort,
};
use wd_infra::{FileSettingsRepository, SandboxWalletBackend};

#[derive(Default)]
struct RecordingEvents {
    events: Mutex<Vec<OnboardingUiEvent>>,
}

impl RecordingEvents {
    fn banners(&self) -> Vec<String> {
        self.events
            .lock()
            .unwrap()
            .iter()
            .filter_map(|e| match e {
                OnboardingUiEvent::Banner { message } => Some(message.clone()),
                _ => None,
            })
            .collect()
    }
}

#[async_trait]
impl OnboardingEventPort for RecordingEvents {
    async fn emit(&self, event: OnboardingUiEvent) {
        self.events.lock().unwrap().push(event);
    }
}

struct Harness {
    _dir: TempDir,
    backend: Arc<SandboxWalletBackend>,
    settings: Arc<FileSettingsRepository>,
    events: Arc<RecordingEvents>,
    orchestrator: Arc<OnboardingOrchestrator>,
}

fn harness(backend: SandboxWalletBackend) -> Harness {
    let dir = TempDir::new().unwrap();
    let backend = Arc::new(backend);
    let settings = Arc::new(FileSettingsRepository::new(dir.path().join("settings.json")));
    let events = Arc::new(RecordingEvents::default());
    let orchestrator = Arc::new(
        OnboardingOrchestrator::new(
            backend.clone() as Arc<dyn WalletBackendPort>,
            settings.clone() as Arc<dyn SettingsPort>,
            events.clone() as Arc<dyn OnboardingEventPort>,
        )
        .with_rng_seed(11),
    );
    Harness {
        _dir: dir,
        backend,
        settings,
        events,
        orchestrator,
    }
}

async fn fill_create_form(orchestrator: &OnboardingOrchestrator, name: &str) {
    orchestrator
        .edit(DraftEdit::SwitchTab(OnboardingTab::Create))
        .await
        .unwrap();
    orchestrator
        .edit(DraftEdit::NewName(name.to_string()))
        .await
        .unwrap();
    orchestrator
        .edit(DraftEdit::UsePasswordProtection(false))
        .await
        .unwrap();
}

async fn reconstruct(orchestrator: &OnboardingOrchestrator, words: &[String]) {
    for word in words {
        let view = orchestrator.verification_view().await.unwrap();
        let index = view.pool.iter().position(|w| w == word).unwrap();
        orchestrator.select_seed_word(word, index).await.unwrap();
    }
}

async fn wait_for_state(orchestrator: &OnboardingOrchestrator, wanted: fn(&FlowState) -> bool) {
    tokio::time::timeout(Duration::from_secs(5), async {
        while !wanted(&orchestrator.get_state().await) {
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    })
    .await
    .expect("state not reached in time");
}

#[tokio::test]
async fn empty_backend_creates_wallet_through_full_ceremony() {
    let h = harness(SandboxWalletBackend::new());

    let state = h.orchestrator.initialize().await.unwrap();
    assert_eq!(state, FlowState::ClosedSelecting { error: None });
    assert_eq!(h.orchestrator.draft_view().await.tab, OnboardingTab::Create);

    fill_create_form(&h.orchestrator, "Alice").await;
    assert_eq!(
        h.orchestrator.submit().await.unwrap(),
        FlowState::AwaitingSeedDisplay
    );

    let words = h.orchestrator.seed_words().await.unwrap();
    assert_eq!(words.len(), 12);
    assert_eq!(
        h.orchestrator.acknowledge_seed_saved().await.unwrap(),
        FlowState::AwaitingSeedVerification { error: None }
    );

    reconstruct(&h.orchestrator, &words).await;
    assert_eq!(
        h.orchestrator.verify_seed_phrase().await.unwrap(),
        FlowState::Open
    );

    let stored = h.backend.wallet("Alice").unwrap();
    assert_eq!(stored.seed_phrase, Some(words.join(" ")));
    assert_eq!(stored.password, None);

    let session = h.orchestrator.session().await;
    assert_eq!(session.current_name(), Some("Alice"));
    assert!(!session.is_secured());
    assert!(h.orchestrator.catalog().await.contains("Alice"));
}

#[tokio::test]
async fn duplicate_name_blocks_commit_case_insensitively() {
    let h = harness(SandboxWalletBackend::with_wallets(["Alice"]));
    h.orchestrator.initialize().await.unwrap();

    fill_create_form(&h.orchestrator, "alice").await;
    assert_eq!(
        h.orchestrator.validation().await,
        Err(ValidationError::DuplicateName)
    );

    let err = h.orchestrator.submit().await.unwrap_err();
    assert!(matches!(
        err,
        OnboardingError::Validation(ValidationError::DuplicateName)
    ));
    assert_eq!(
        h.orchestrator.get_state().await,
        FlowState::ClosedSelecting { error: None }
    );
    assert!(h.backend.wallet("alice").is_none());
}

#[tokio::test]
async fn developer_bypass_creates_wallet_without_dialogs() {
    let h = harness(SandboxWalletBackend::new());
    UpdateSettings::new(h.settings.clone())
        .execute(SettingsPatch {
            developer_mode: Some(true),
            skip_seed_phrase_dialogs: Some(true),
        })
        .await
        .unwrap();

    h.orchestrator.initialize().await.unwrap();
    fill_create_form(&h.orchestrator, "Quick").await;

    assert_eq!(h.orchestrator.submit().await.unwrap(), FlowState::Open);
    let stored = h.backend.wallet("Quick").unwrap();
    assert_eq!(
        stored.seed_phrase.map(|p| p.split(' ').count()),
        Some(12)
    );
}

#[tokio::test]
async fn wrong_password_keeps_dialog_open_with_backend_message() {
    let backend = SandboxWalletBackend::new();
    backend
        .create_wallet("Vault", Some("secret"), true, None)
        .await
        .unwrap();
    backend.close_wallet().await.unwrap();
    let h = harness(backend);
    h.orchestrator.initialize().await.unwrap();

    h.orchestrator
        .edit(DraftEdit::OpenPassword("nope".into()))
        .await
        .unwrap();
    let state = h.orchestrator.submit().await.unwrap();
    assert_eq!(
        state,
        FlowState::ClosedSelecting {
            error: Some(FlowError::BackendOperationFailed(
                "Invalid password".to_string()
            ))
        }
    );
    assert!(h.orchestrator.draft_view().await.has_open_password);

    h.orchestrator
        .edit(DraftEdit::OpenPassword("secret".into()))
        .await
        .unwrap();
    assert_eq!(h.orchestrator.submit().await.unwrap(), FlowState::Open);
    assert!(h.orchestrator.session().await.is_secured());
}

#[tokio::test]
async fn failed_create_after_verification_retries_same_phrase() {
    let h = harness(SandboxWalletBackend::new());
    h.orchestrator.initialize().await.unwrap();
    fill_create_form(&h.orchestrator, "Retry").await;
    h.orchestrator.submit().await.unwrap();
    let words = h.orchestrator.seed_words().await.unwrap();
    h.orchestrator.acknowledge_seed_saved().await.unwrap();
    reconstruct(&h.orchestrator, &words).await;

    h.backend.fail_next(
        "create_wallet",
        BackendError::Unavailable("disk full".into()),
    );
    let state = h.orchestrator.verify_seed_phrase().await.unwrap();
    assert!(matches!(state, FlowState::AwaitingCommitRetry { .. }));
    assert!(h.backend.wallet("Retry").is_none());

    assert_eq!(h.orchestrator.retry_create().await.unwrap(), FlowState::Open);
    assert_eq!(
        h.backend.wallet("Retry").unwrap().seed_phrase,
        Some(words.join(" "))
    );
}

#[tokio::test]
async fn external_deletion_of_open_wallet_closes_session() {
    let h = harness(SandboxWalletBackend::with_wallets(["Main", "Spare"]));
    h.orchestrator.initialize().await.unwrap();
    assert_eq!(h.orchestrator.submit().await.unwrap(), FlowState::Open);

    let listener = h
        .orchestrator
        .start_backend_listener(h.backend.clone())
        .await
        .unwrap();

    assert!(h.backend.delete_externally("Main"));
    wait_for_state(&h.orchestrator, |s| {
        matches!(s, FlowState::ClosedSelecting { .. })
    })
    .await;

    assert!(!h.orchestrator.session().await.is_open());
    let catalog = h.orchestrator.catalog().await;
    assert_eq!(catalog.names().collect::<Vec<_>>(), vec!["Spare"]);
    assert_eq!(
        h.orchestrator.draft_view().await.selected_wallet.as_deref(),
        Some("Spare")
    );
    listener.abort();
}

#[tokio::test]
async fn wallets_deleted_with_failed_refresh_still_closes_session() {
    let h = harness(SandboxWalletBackend::with_wallets(["Main"]));
    h.orchestrator.initialize().await.unwrap();
    assert_eq!(h.orchestrator.submit().await.unwrap(), FlowState::Open);

    h.backend.fail_next(
        "list_wallets",
        BackendError::Unavailable("connection reset".into()),
    );
    h.orchestrator
        .handle_backend_event(BackendEvent::WalletsDeleted)
        .await;

    assert!(h.orchestrator.catalog().await.is_empty());
    assert!(!h.orchestrator.session().await.is_open());
    assert!(matches!(
        h.orchestrator.get_state().await,
        FlowState::ClosedSelecting { .. }
    ));
}

#[tokio::test]
async fn unreachable_catalog_raises_banner_and_keeps_dialog_usable() {
    let backend = SandboxWalletBackend::new();
    backend.fail_next(
        "list_wallets",
        BackendError::Unavailable("connection refused".into()),
    );
    let h = harness(backend);

    let state = h.orchestrator.initialize().await.unwrap();
    assert_eq!(state, FlowState::ClosedSelecting { error: None });
    assert!(h
        .events
        .banners()
        .iter()
        .any(|m| m.contains("failed to load wallets")));

    h.orchestrator.refresh_catalog().await.unwrap();
    fill_create_form(&h.orchestrator, "Later").await;
    assert_eq!(h.orchestrator.validation().await, Ok(()));
}

//! Dependency assembly.
//!
//! The only place that picks concrete adapters. Decisions about what to do
//! with them belong to the use cases.

use std::sync::Arc;

use tracing::info;
use wd_app::OnboardingOrchestrator;
use wd_core::ports::{BackendEventPort, OnboardingEventPort, SettingsPort, WalletBackendPort};
use wd_infra::{FileSettingsRepository, HttpWalletBackend, SandboxWalletBackend};

use super::config::{AppConfig, BackendKind};

pub type WiringResult<T> = Result<T, WiringError>;

#[derive(Debug, thiserror::Error)]
pub enum WiringError {
    #[error("Wallet backend initialization failed: {0}")]
    BackendInit(String),

    #[error("Settings repository initialization failed: {0}")]
    SettingsInit(String),
}

/// Everything a front end needs to drive onboarding.
pub struct AppDeps {
    pub orchestrator: Arc<OnboardingOrchestrator>,
    pub settings: Arc<dyn SettingsPort>,
    pub backend_events: Arc<dyn BackendEventPort>,
}

fn create_backend(
    config: &AppConfig,
) -> WiringResult<(Arc<dyn WalletBackendPort>, Arc<dyn BackendEventPort>)> {
    match config.backend.kind {
        BackendKind::Http => {
            let backend = Arc::new(
                HttpWalletBackend::new(config.http_backend())
                    .map_err(|e| WiringError::BackendInit(format!("{e:#}")))?,
            );
            info!(base_url = backend.base_url(), "using http wallet backend");
            Ok((backend.clone(), backend))
        }
        BackendKind::Sandbox => {
            info!("using in-memory sandbox wallet backend");
            let backend = Arc::new(SandboxWalletBackend::new());
            Ok((backend.clone(), backend))
        }
    }
}

pub fn wire_dependencies(
    config: &AppConfig,
    event_port: Arc<dyn OnboardingEventPort>,
) -> WiringResult<AppDeps> {
    let (backend, backend_events) = create_backend(config)?;

    let settings_path = config
        .settings_path()
        .map_err(|e| WiringError::SettingsInit(format!("{e:#}")))?;
    let settings: Arc<dyn SettingsPort> = Arc::new(FileSettingsRepository::new(settings_path));

    let orchestrator = Arc::new(OnboardingOrchestrator::new(
        backend,
        Arc::clone(&settings),
        event_port,
    ));

    Ok(AppDeps {
        orchestrator,
        settings,
        backend_events,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ConsoleEventPort;
    use tempfile::TempDir;
    use wd_core::flow::FlowState;
    use wd_core::settings::Settings;

    fn sandbox_config(dir: &TempDir) -> AppConfig {
        let mut config = AppConfig::default();
        config.backend.kind = BackendKind::Sandbox;
        config.settings.path = dir.path().join("settings.json");
        config
    }

    #[test]
    fn wiring_error_display() {
        let err = WiringError::BackendInit("bad url".to_string());
        assert!(err.to_string().contains("Wallet backend initialization"));
        assert!(err.to_string().contains("bad url"));
    }

    #[tokio::test]
    async fn sandbox_wiring_starts_on_empty_catalog() {
        let dir = TempDir::new().unwrap();
        let deps = wire_dependencies(&sandbox_config(&dir), Arc::new(ConsoleEventPort::new()))
            .unwrap();

        let state = deps.orchestrator.initialize().await.unwrap();
        assert_eq!(state, FlowState::ClosedSelecting { error: None });
        assert!(deps.orchestrator.catalog().await.is_empty());
        assert_eq!(deps.settings.load().await.unwrap(), Settings::default());
    }

    #[test]
    fn http_wiring_does_not_connect() {
        let dir = TempDir::new().unwrap();
        let mut config = sandbox_config(&dir);
        config.backend.kind = BackendKind::Http;
        config.backend.base_url = "http://127.0.0.1:1".to_string();

        assert!(wire_dependencies(&config, Arc::new(ConsoleEventPort::new())).is_ok());
    }
}

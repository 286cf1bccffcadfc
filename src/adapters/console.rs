use async_trait::async_trait;
use tracing::{debug, warn};
use wd_core::flow::FlowState;
use wd_core::ports::{OnboardingEventPort, OnboardingUiEvent};

/// Terminal sink for onboarding events.
///
/// State changes and catalog updates go to the log. Banners and flow errors
/// are user-facing and are printed to stderr.
#[derive(Debug, Default)]
pub struct ConsoleEventPort;

impl ConsoleEventPort {
    pub fn new() -> Self {
        Self
    }
}

pub(crate) fn render_state(state: &FlowState) -> String {
    match state.error() {
        Some(error) => format!("{} ({error})", state.name()),
        None => state.name().to_string(),
    }
}

#[async_trait]
impl OnboardingEventPort for ConsoleEventPort {
    async fn emit(&self, event: OnboardingUiEvent) {
        match event {
            OnboardingUiEvent::FlowStateChanged { state } => {
                debug!(state = %render_state(&state), "flow state changed");
                if let Some(error) = state.error() {
                    eprintln!("error: {error}");
                }
            }
            OnboardingUiEvent::SessionChanged { session } => {
                debug!(
                    open = session.is_open(),
                    wallet = session.current_name().unwrap_or("-"),
                    "session changed"
                );
            }
            OnboardingUiEvent::CatalogChanged { wallets, selected, tab } => {
                debug!(
                    wallets = wallets.len(),
                    selected = selected.as_deref().unwrap_or("-"),
                    ?tab,
                    "catalog changed"
                );
            }
            OnboardingUiEvent::Banner { message } => {
                warn!(%message, "onboarding banner");
                eprintln!("warning: {message}");
            }
        }
    }
}

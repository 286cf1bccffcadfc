//! Use case deciding whether the seed phrase ceremony may be skipped.

use std::sync::Arc;

use tracing::{debug, info_span, warn, Instrument};
use wd_core::ports::SettingsPort;

/// Reads a fresh settings snapshot for every create submit.
///
/// Unreadable settings never enable the bypass.
pub struct ResolveCeremonyPolicy {
    settings: Arc<dyn SettingsPort>,
}

impl ResolveCeremonyPolicy {
    pub fn new(settings: Arc<dyn SettingsPort>) -> Self {
        Self { settings }
    }

    /// Returns `true` when the ceremony should be bypassed.
    pub async fn execute(&self) -> bool {
        let span = info_span!("usecase.resolve_ceremony_policy.execute");

        async {
            match self.settings.load().await {
                Ok(settings) => {
                    let bypass = settings.bypasses_seed_ceremony();
                    debug!(
                        developer_mode = settings.developer_mode,
                        skip_seed_phrase_dialogs = settings.skip_seed_phrase_dialogs,
                        bypass,
                        "seed ceremony policy resolved"
                    );
                    bypass
                }
                Err(err) => {
                    warn!(error = %err, "failed to load settings, keeping seed ceremony");
                    false
                }
            }
        }
        .instrument(span)
        .await
    }
}

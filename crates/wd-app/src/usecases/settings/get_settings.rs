//! Use case for getting user settings

use std::sync::Arc;

use anyhow::Result;
use tracing::{info, info_span, Instrument};
use wd_core::ports::SettingsPort;
use wd_core::settings::Settings;

/// Loads the current settings from the configured settings repository.
pub struct GetSettings {
    settings: Arc<dyn SettingsPort>,
}

impl GetSettings {
    pub fn new(settings: Arc<dyn SettingsPort>) -> Self {
        Self { settings }
    }

    pub async fn execute(&self) -> Result<Settings> {
        let span = info_span!("usecase.get_settings.execute");

        async {
            let result = self.settings.load().await?;
            info!("settings retrieved");
            Ok(result)
        }
        .instrument(span)
        .await
    }
}

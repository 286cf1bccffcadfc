//! Use case for changing the developer flags from the settings surface.

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{info, info_span, Instrument};
use wd_core::ports::SettingsPort;
use wd_core::settings::Settings;

/// Fields to change; `None` leaves the stored value untouched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SettingsPatch {
    pub developer_mode: Option<bool>,
    pub skip_seed_phrase_dialogs: Option<bool>,
}

impl SettingsPatch {
    pub fn is_empty(&self) -> bool {
        self.developer_mode.is_none() && self.skip_seed_phrase_dialogs.is_none()
    }

    fn apply(&self, settings: &mut Settings) {
        if let Some(value) = self.developer_mode {
            settings.developer_mode = value;
        }
        if let Some(value) = self.skip_seed_phrase_dialogs {
            settings.skip_seed_phrase_dialogs = value;
        }
    }
}

/// Load, patch, and persist settings. An empty patch skips the write.
pub struct UpdateSettings {
    settings: Arc<dyn SettingsPort>,
}

impl UpdateSettings {
    pub fn new(settings: Arc<dyn SettingsPort>) -> Self {
        Self { settings }
    }

    pub async fn execute(&self, patch: SettingsPatch) -> Result<Settings> {
        let span = info_span!("usecase.update_settings.execute");

        async {
            let mut settings = self.settings.load().await.context("load settings")?;
            if patch.is_empty() {
                return Ok(settings);
            }

            patch.apply(&mut settings);
            self.settings
                .save(&settings)
                .await
                .context("save settings")?;
            info!(
                developer_mode = settings.developer_mode,
                skip_seed_phrase_dialogs = settings.skip_seed_phrase_dialogs,
                "settings updated"
            );
            Ok(settings)
        }
        .instrument(span)
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::usecases::settings::test_support::MockSettingsStore;

    #[tokio::test]
    async fn patch_changes_only_given_fields() {
        let mut store = MockSettingsStore::new();
        store.expect_load().returning(|| {
            Ok(Settings {
                skip_seed_phrase_dialogs: true,
                ..Settings::default()
            })
        });
        store
            .expect_save()
            .withf(|s| s.developer_mode && s.skip_seed_phrase_dialogs)
            .times(1)
            .returning(|_| Ok(()));

        let uc = UpdateSettings::new(Arc::new(store));
        let updated = uc
            .execute(SettingsPatch {
                developer_mode: Some(true),
                skip_seed_phrase_dialogs: None,
            })
            .await
            .unwrap();
        assert!(updated.bypasses_seed_ceremony());
    }

    #[tokio::test]
    async fn empty_patch_does_not_write() {
        let mut store = MockSettingsStore::new();
        store.expect_load().returning(|| Ok(Settings::default()));
        store.expect_save().never();

        let uc = UpdateSettings::new(Arc::new(store));
        let settings = uc.execute(SettingsPatch::default()).await.unwrap();
        assert_eq!(settings, Settings::default());
    }
}

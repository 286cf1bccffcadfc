mod get_settings;
mod resolve_ceremony_policy;
mod update_settings;

pub use get_settings::GetSettings;
pub use resolve_ceremony_policy::ResolveCeremonyPolicy;
pub use update_settings::{SettingsPatch, UpdateSettings};

#[cfg(test)]
pub(crate) mod test_support {
    use async_trait::async_trait;
    use mockall::mock;
    use wd_core::ports::SettingsPort;
    use wd_core::settings::Settings;

    mock! {
        pub SettingsStore {}

        #[async_trait]
        impl SettingsPort for SettingsStore {
            async fn load(&self) -> anyhow::Result<Settings>;
            async fn save(&self, settings: &Settings) -> anyhow::Result<()>;
        }
    }
}

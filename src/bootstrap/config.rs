//! # Configuration loader
//!
//! Reads `walletdesk.toml` into [`AppConfig`]. Missing sections and keys fall
//! back to defaults. Only values that would break an adapter are rejected.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context;
use serde::Deserialize;
use tracing::debug;
use wd_infra::fs::{default_config_path, default_log_dir, default_settings_path};
use wd_infra::HttpBackendConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    #[default]
    Http,
    Sandbox,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct BackendSection {
    pub kind: BackendKind,
    pub base_url: String,
    pub request_timeout_secs: u64,
    pub event_poll_interval_ms: u64,
}

impl Default for BackendSection {
    fn default() -> Self {
        let http = HttpBackendConfig::default();
        Self {
            kind: BackendKind::Http,
            base_url: http.base_url,
            request_timeout_secs: http.request_timeout.as_secs(),
            event_poll_interval_ms: http.event_poll_interval.as_millis() as u64,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SettingsSection {
    /// Empty means the platform default.
    pub path: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    pub file: bool,
    /// Empty means the platform default.
    pub directory: PathBuf,
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            file: true,
            directory: PathBuf::new(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub backend: BackendSection,
    pub settings: SettingsSection,
    pub logging: LoggingSection,
}

impl AppConfig {
    pub fn http_backend(&self) -> HttpBackendConfig {
        HttpBackendConfig {
            base_url: self.backend.base_url.clone(),
            request_timeout: Duration::from_secs(self.backend.request_timeout_secs),
            event_poll_interval: Duration::from_millis(self.backend.event_poll_interval_ms),
        }
    }

    pub fn settings_path(&self) -> anyhow::Result<PathBuf> {
        if self.settings.path.as_os_str().is_empty() {
            return default_settings_path();
        }
        Ok(self.settings.path.clone())
    }

    pub fn log_dir(&self) -> anyhow::Result<PathBuf> {
        if self.logging.directory.as_os_str().is_empty() {
            return default_log_dir();
        }
        Ok(self.logging.directory.clone())
    }
}

/// Load configuration from a TOML file.
///
/// # Errors
///
/// Returns an error if the file cannot be read, is not valid TOML for
/// [`AppConfig`], or sets `backend.event_poll_interval_ms` to zero.
pub fn load_config(config_path: &Path) -> anyhow::Result<AppConfig> {
    let content = std::fs::read_to_string(config_path)
        .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;
    let config: AppConfig = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", config_path.display()))?;
    anyhow::ensure!(
        config.backend.event_poll_interval_ms > 0,
        "Invalid config file {}: backend.event_poll_interval_ms must be greater than zero",
        config_path.display()
    );
    Ok(config)
}

/// Load `explicit` when given. Otherwise read the default location, where a
/// missing file yields [`AppConfig::default()`].
pub fn resolve_config(explicit: Option<&Path>) -> anyhow::Result<AppConfig> {
    if let Some(path) = explicit {
        return load_config(path);
    }
    let path = default_config_path()?;
    if !path.exists() {
        debug!(path = %path.display(), "no config file, using defaults");
        return Ok(AppConfig::default());
    }
    load_config(&path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn reads_all_sections() {
        let file = write_config(
            r#"
            [backend]
            kind = "sandbox"
            base_url = "http://wallet.local:9000"
            request_timeout_secs = 5
            event_poll_interval_ms = 250

            [settings]
            path = "/tmp/wd/settings.json"

            [logging]
            file = false
            directory = "/tmp/wd/logs"
            "#,
        );

        let config = load_config(file.path()).unwrap();
        assert_eq!(config.backend.kind, BackendKind::Sandbox);
        assert_eq!(config.settings_path().unwrap(), PathBuf::from("/tmp/wd/settings.json"));
        assert_eq!(config.log_dir().unwrap(), PathBuf::from("/tmp/wd/logs"));
        assert!(!config.logging.file);

        let http = config.http_backend();
        assert_eq!(http.base_url, "http://wallet.local:9000");
        assert_eq!(http.request_timeout, Duration::from_secs(5));
        assert_eq!(http.event_poll_interval, Duration::from_millis(250));
    }

    #[test]
    fn missing_sections_use_defaults() {
        let file = write_config("[logging]\nfile = false\n");

        let config = load_config(file.path()).unwrap();
        assert_eq!(config.backend, BackendSection::default());
        assert_eq!(config.backend.kind, BackendKind::Http);
        assert_eq!(config.settings, SettingsSection::default());
        assert!(!config.logging.file);
        assert_eq!(config.logging.directory, PathBuf::new());
    }

    #[test]
    fn unknown_backend_kind_is_a_parse_error() {
        let file = write_config("[backend]\nkind = \"carrier-pigeon\"\n");

        let err = load_config(file.path()).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }

    #[test]
    fn zero_poll_interval_is_rejected() {
        let file = write_config("[backend]\nevent_poll_interval_ms = 0\n");

        let err = load_config(file.path()).unwrap_err();
        assert!(err.to_string().contains("event_poll_interval_ms must be greater than zero"));
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let err = resolve_config(Some(Path::new("/this/path/does/not/exist/walletdesk.toml")))
            .unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }
}

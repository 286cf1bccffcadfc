use anyhow::{Context, Result};
use std::path::PathBuf;

const APP_DIR_NAME: &str = "walletdesk";

/// WalletDesk data root.
///
/// - macOS: ~/Library/Application Support/walletdesk
/// - Windows: %APPDATA%\walletdesk
/// - Linux: $XDG_DATA_HOME/walletdesk or ~/.local/share/walletdesk
///
/// Directories are not created here; the caller decides when.
pub fn app_data_dir() -> Result<PathBuf> {
    let base = dirs::data_dir().context("Unable to get platform data directory")?;
    Ok(base.join(APP_DIR_NAME))
}

/// WalletDesk configuration root, e.g. ~/.config/walletdesk on Linux.
pub fn app_config_dir() -> Result<PathBuf> {
    let base = dirs::config_dir().context("Unable to get platform config directory")?;
    Ok(base.join(APP_DIR_NAME))
}

pub fn default_config_path() -> Result<PathBuf> {
    Ok(app_config_dir()?.join("walletdesk.toml"))
}

pub fn default_settings_path() -> Result<PathBuf> {
    Ok(app_data_dir()?.join("settings.json"))
}

pub fn default_log_dir() -> Result<PathBuf> {
    Ok(app_data_dir()?.join("logs"))
}

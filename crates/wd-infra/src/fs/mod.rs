pub mod app_dirs;

pub use app_dirs::{default_config_path, default_log_dir, default_settings_path};

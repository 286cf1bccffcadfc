//! Tracing subscriber setup.
//!
//! Console output goes to stderr so command output on stdout stays clean.
//! A non-blocking file writer is added when `[logging] file = true`.

use std::{fs, io, path::Path, sync::OnceLock};

use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_subscriber::{fmt, fmt::writer::BoxMakeWriter, prelude::*, registry};

use super::config::AppConfig;

static LOG_GUARD: OnceLock<WorkerGuard> = OnceLock::new();

const LOG_FILE_NAME: &str = "walletdesk.log";
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f";

fn is_development() -> bool {
    cfg!(debug_assertions)
}

/// Default filter directives, overridden by `RUST_LOG`.
fn build_filter_directives(is_dev: bool) -> Vec<String> {
    vec![
        if is_dev { "info" } else { "warn" }.to_string(),
        if is_dev { "wd_app=debug" } else { "wd_app=info" }.to_string(),
        if is_dev { "wd_infra=debug" } else { "wd_infra=info" }.to_string(),
        "hyper=warn".to_string(),
        "reqwest=warn".to_string(),
    ]
}

/// Register the global subscriber. Call once, before any logging.
///
/// ```ignore
/// let config = resolve_config(cli.config.as_deref())?;
/// walletdesk_lib::bootstrap::tracing::init_tracing_subscriber(&config)?;
/// ```
pub fn init_tracing_subscriber(config: &AppConfig) -> anyhow::Result<()> {
    let directives = build_filter_directives(is_development());
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(directives.join(",")));

    let console_layer = fmt::layer()
        .with_timer(fmt::time::ChronoUtc::new(TIMESTAMP_FORMAT.to_string()))
        .with_level(true)
        .with_target(true)
        .with_ansi(cfg!(not(test)))
        .with_writer(BoxMakeWriter::new(io::stderr));

    let file_writer = if config.logging.file {
        match config
            .log_dir()
            .and_then(|dir| build_file_writer(&dir))
        {
            Ok(writer) => Some(writer),
            Err(err) => {
                eprintln!("Failed to initialize file logging, continuing without it: {err}");
                None
            }
        }
    } else {
        None
    };

    let file_layer = file_writer.map(|writer| {
        fmt::layer()
            .with_timer(fmt::time::ChronoUtc::new(TIMESTAMP_FORMAT.to_string()))
            .with_level(true)
            .with_file(true)
            .with_line_number(true)
            .with_target(true)
            .with_ansi(false)
            .with_writer(writer)
    });

    registry()
        .with(env_filter)
        .with(console_layer)
        .with(file_layer)
        .try_init()?;

    Ok(())
}

fn build_file_writer(dir: &Path) -> anyhow::Result<NonBlocking> {
    fs::create_dir_all(dir)?;

    let file_appender = tracing_appender::rolling::never(dir, LOG_FILE_NAME);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    LOG_GUARD
        .set(guard)
        .map_err(|_| anyhow::anyhow!("Tracing log guard already initialized"))?;

    Ok(non_blocking)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_directives_follow_build_profile() {
        let dev = build_filter_directives(true);
        assert!(dev.contains(&"info".to_string()));
        assert!(dev.contains(&"wd_app=debug".to_string()));
        assert!(dev.contains(&"reqwest=warn".to_string()));

        let prod = build_filter_directives(false);
        assert!(prod.contains(&"warn".to_string()));
        assert!(prod.contains(&"wd_infra=info".to_string()));
    }

    #[test]
    fn file_writer_creates_log_directory() {
        let dir = tempfile::TempDir::new().unwrap();
        let logs = dir.path().join("nested/logs");

        let _writer = build_file_writer(&logs).unwrap();
        assert!(logs.is_dir());
    }
}

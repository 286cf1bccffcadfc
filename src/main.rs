use std::process::ExitCode;

use clap::Parser;
use walletdesk_lib::bootstrap::tracing::init_tracing_subscriber;
use walletdesk_lib::bootstrap::{resolve_config, BackendKind};
use walletdesk_lib::cli::{self, Cli};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let mut config = match resolve_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("error: {err:#}");
            return ExitCode::FAILURE;
        }
    };
    if cli.sandbox {
        config.backend.kind = BackendKind::Sandbox;
    }

    if let Err(err) = init_tracing_subscriber(&config) {
        eprintln!("Failed to initialize tracing: {err}");
    }

    match cli::run(cli.command, &config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

//! ddbot binary: `ddbot run [--token TOKEN]`.

use std::process::ExitCode;

use clap::Parser;
use ddbot::{Application, BotConfig, Cli, Commands};
use ddbot_core::init_tracing;
use tracing::error;

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let Commands::Run { token } = cli.command;

    let config = match BotConfig::load(token) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load config: {e:#}");
            return ExitCode::FAILURE;
        }
    };
    if let Err(e) = init_tracing(Some(config.log_file())) {
        eprintln!("Failed to initialize logging: {e:#}");
        return ExitCode::FAILURE;
    }

    let mut app = match Application::from_config(config).await {
        Ok(app) => app,
        Err(e) => {
            error!(error = %e, "Failed to build application");
            return ExitCode::FAILURE;
        }
    };

    let started = app.start().await;
    if let Err(e) = &started {
        error!(error = %e, "Application failed");
    }
    let disposed = app.dispose().await;
    if let Err(e) = &disposed {
        error!(error = %e, "Application shutdown failed");
    }

    if started.is_ok() && disposed.is_ok() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

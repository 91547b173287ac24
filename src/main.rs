use std::process::ExitCode;

use clap::Parser;

use workshop_backend::cli::{execute_command, exit_code, render_error, Cli};
use workshop_backend::config::{init_logging, LoggingConfig, WorkshopSettings};

#[tokio::main]
async fn main() -> ExitCode {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    let cli = Cli::parse();

    if let Err(e) = init_logging(&LoggingConfig::from_env()) {
        eprintln!("Failed to initialize logging: {}", e);
        return ExitCode::FAILURE;
    }

    let settings = match WorkshopSettings::from_env() {
        Ok(settings) => settings,
        Err(e) => {
            tracing::error!(error = %e, "Invalid configuration");
            eprintln!("{}", serde_json::json!({ "error": "configuration", "message": e.to_string() }));
            return ExitCode::FAILURE;
        }
    };

    match execute_command(cli, &settings).await {
        Ok(result) => {
            println!("{}", serde_json::to_string_pretty(&result).unwrap_or_else(|_| result.to_string()));
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::debug!(error = ?e, "Command failed");
            eprintln!("{}", render_error(&e));
            ExitCode::from(exit_code(e.kind()))
        }
    }
}

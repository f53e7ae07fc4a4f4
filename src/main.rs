//! Weekly wage API server.
//!
//! Usage: `weekly-wage [CONFIG_PATH]`

use std::process::ExitCode;

use tokio::net::TcpListener;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use weekly_wage::api::{AppState, create_router};
use weekly_wage::config::ConfigLoader;

const DEFAULT_CONFIG_PATH: &str = "./config/weekly-wage.yaml";

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(error = %err, "Server stopped");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string());

    let config = ConfigLoader::load_or_default(&config_path)?.into_config();
    let bind = config.server.bind.clone();
    let state = AppState::from_config(config)?;

    let listener = TcpListener::bind(&bind).await?;
    info!(address = %listener.local_addr()?, config = %config_path, "Listening");

    axum::serve(listener, create_router(state)).await?;
    Ok(())
}

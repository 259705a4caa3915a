//! # Miniblog CLI
//!
//! Command-line front end playing the role of the blog's UI layer:
//! it validates input, performs ownership checks, and drives the post
//! store and auth session.

use clap::Parser;

mod commands;
mod config;
mod state;
mod telemetry;

use commands::Cli;
use config::AppConfig;
use state::AppState;
use telemetry::TelemetryConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    telemetry::init_telemetry(&TelemetryConfig::from_env());

    let cli = Cli::parse();
    let config = AppConfig::from_env();
    let state = AppState::new(&config).await?;

    commands::run(cli, &state).await
}

//! Subcommand implementations

pub mod board;
pub mod login;
pub mod mv;
pub mod replay;

use crate::cli::Commands;
use anyhow::{Context, Result};
use taskboard_client::{ApiClient, ClientConfig};

/// Run one subcommand
pub async fn run(command: Commands) -> Result<()> {
    match command {
        Commands::Login { email, password } => login::execute(&api_client()?, email, password).await,
        Commands::Board { project, format } => board::execute(api_client()?, project, format).await,
        Commands::Move {
            project,
            from,
            to,
            task,
        } => mv::execute(api_client()?, project, from, to, task).await,
        Commands::Replay {
            snapshot,
            gestures,
        } => replay::execute(&snapshot, &gestures),
    }
}

fn api_client() -> Result<ApiClient> {
    let config = ClientConfig::load().context("failed to load configuration")?;
    tracing::debug!(?config, "using configuration");
    Ok(ApiClient::new(&config)?)
}

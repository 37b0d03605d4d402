//! Board command

use crate::cli::OutputFormat;
use crate::display::{board_json, board_table};
use anyhow::Result;
use taskboard_client::ApiClient;
use taskboard_kanban::SyncLayer;

/// Fetch a project's board and print it
pub async fn execute(client: ApiClient, project: String, format: OutputFormat) -> Result<()> {
    let mut layer = SyncLayer::new(client);
    layer.load(&project.into()).await?;

    match format {
        OutputFormat::Table => println!("{}", board_table(layer.state())),
        OutputFormat::Json => println!("{}", board_json(layer.state())?),
    }
    Ok(())
}

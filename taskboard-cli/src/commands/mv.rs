//! Move command

use crate::display::board_table;
use anyhow::Result;
use taskboard_client::ApiClient;
use taskboard_kanban::{Location, MoveGesture, ReconcileOutcome, SyncLayer};

/// Move a task, sync the move, and print the resulting board
pub async fn execute(
    client: ApiClient,
    project: String,
    from: Location,
    to: Location,
    task: Option<String>,
) -> Result<()> {
    let mut layer = SyncLayer::new(client);
    layer.load(&project.into()).await?;

    let mut gesture = MoveGesture::new(from, to);
    if let Some(task) = task {
        gesture = gesture.with_task(task);
    }

    match layer.move_task(&gesture).await? {
        None => println!("Nothing to move."),
        Some(ReconcileOutcome::Confirmed(task)) => println!(
            "Moved '{}' to {} (version {}).",
            task.title, task.section, task.version
        ),
        Some(ReconcileOutcome::RolledBack) => {
            eprintln!("The server refused the move; the board was reloaded.")
        }
        Some(ReconcileOutcome::Discarded | ReconcileOutcome::Queued) => {}
    }
    println!("{}", board_table(layer.state()));
    Ok(())
}

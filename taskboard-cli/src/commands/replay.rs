//! Offline replay of recorded drop results

use crate::display::board_json;
use anyhow::{Context, Result};
use std::path::Path;
use taskboard_kanban::{BoardAction, BoardSnapshot, BoardStore, DropResult};
use tracing::info;

/// Load a snapshot, apply every drop result in order, and print the board
pub fn execute(snapshot: &Path, gestures: &Path) -> Result<()> {
    let text = std::fs::read_to_string(snapshot)
        .with_context(|| format!("failed to read snapshot {}", snapshot.display()))?;
    let snapshot: BoardSnapshot = serde_json::from_str(&text)
        .with_context(|| format!("invalid snapshot {}", snapshot.display()))?;

    let text = std::fs::read_to_string(gestures)
        .with_context(|| format!("failed to read gestures {}", gestures.display()))?;
    let drops = DropResult::parse_all(&text)?;

    let store = replay(snapshot, drops)?;
    info!(revision = store.revision(), "replay finished");
    println!("{}", board_json(store.state())?);
    Ok(())
}

/// Build a store from the snapshot and apply the drops; stops at the first bad one
pub fn replay(snapshot: BoardSnapshot, drops: Vec<DropResult>) -> Result<BoardStore> {
    let snapshot = snapshot.into_rank_order();
    let mut store = BoardStore::new();
    store.dispatch(BoardAction::Initialize {
        sections: snapshot.sections,
        tasks: snapshot.tasks,
    })?;

    for (i, result) in drops.into_iter().enumerate() {
        store
            .move_task(&result.into_gesture())
            .with_context(|| format!("gesture {} could not be applied", i + 1))?;
    }
    Ok(store)
}

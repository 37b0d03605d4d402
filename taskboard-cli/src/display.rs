//! Board rendering for terminal output

use comfy_table::{presets::UTF8_FULL, Cell, ContentArrangement, Table};
use taskboard_kanban::{BoardState, Task};

fn task_cell(task: &Task) -> String {
    let mark = if task.completed { "x" } else { " " };
    format!("[{mark}] {} ({})", task.title, task.id)
}

/// Render the board with one table column per board column
pub fn board_table(board: &BoardState) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(
            board
                .columns()
                .map(|c| Cell::new(format!("{} ({})", c.section.title, c.len()))),
        );

    let depth = board.columns().map(|c| c.len()).max().unwrap_or(0);
    for row in 0..depth {
        table.add_row(board.columns().map(|c| {
            c.tasks
                .get(row)
                .map(task_cell)
                .unwrap_or_default()
        }));
    }
    table
}

/// Render the board as pretty JSON
pub fn board_json(board: &BoardState) -> serde_json::Result<String> {
    serde_json::to_string_pretty(board)
}

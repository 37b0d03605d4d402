use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use taskboard_kanban::Location;

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Default)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "taskboard")]
#[command(version)]
#[command(about = "Kanban boards from the command line")]
#[command(long_about = "
taskboard talks to a Taskboard server: log in, show a project's board, and
move tasks between columns. Moves are applied locally first and then synced;
if the server refuses one, the board is reloaded.

The server URL and token come from ~/.taskboard/config.toml,
./.taskboard/config.toml, or TASKBOARD_* environment variables.

Example usage:
  taskboard login --email ada@example.com --password secret
  taskboard board --project p1
  taskboard move --project p1 --from todo:0 --to done:0
  taskboard replay --snapshot board.json --gestures drops.json
")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub debug: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Log in and print the user record, including its token
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Show a project's board
    Board {
        #[arg(long)]
        project: String,
        #[arg(long, value_enum, default_value = "table")]
        format: OutputFormat,
    },
    /// Move a task and sync the move with the server
    #[command(name = "move")]
    Move {
        #[arg(long)]
        project: String,
        /// Source slot as COLUMN:INDEX
        #[arg(long, value_parser = parse_location)]
        from: Location,
        /// Destination slot as COLUMN:INDEX
        #[arg(long, value_parser = parse_location)]
        to: Location,
        /// Expected task at the source slot; the move is refused if another task is there
        #[arg(long)]
        task: Option<String>,
    },
    /// Apply recorded drop results to a board snapshot, offline
    Replay {
        /// JSON file with `sections` and `tasks`
        #[arg(long)]
        snapshot: PathBuf,
        /// JSON file with an array of drop results
        #[arg(long)]
        gestures: PathBuf,
    },
}

/// Parse `COLUMN:INDEX`; the column may itself contain colons
pub fn parse_location(value: &str) -> Result<Location, String> {
    let (column, index) = value
        .rsplit_once(':')
        .ok_or_else(|| format!("expected COLUMN:INDEX, got '{value}'"))?;
    if column.is_empty() {
        return Err(format!("missing column in '{value}'"));
    }
    let index = index
        .parse::<usize>()
        .map_err(|_| format!("invalid index '{index}' in '{value}'"))?;
    Ok(Location::new(column, index))
}

//! Board actions and the reducer contract for [`BoardState`]

use super::mv::MoveGesture;
use super::state::BoardState;
use crate::error::KanbanError;
use crate::store::Reducer;
use crate::types::{Section, SectionId, Task};
use serde::{Deserialize, Serialize};

/// Every mutation the board accepts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BoardAction {
    /// Rebuild from a flat list of sections and tasks
    Initialize {
        sections: Vec<Section>,
        tasks: Vec<Task>,
    },
    /// Insert (or overwrite) an empty column
    AddColumn { section: Section },
    /// Append a task to a column
    AddTask { section_id: SectionId, task: Task },
    /// Replace a task in place
    UpdateTask { task: Task },
    /// Apply a drag gesture
    MoveTask { gesture: MoveGesture },
}

impl BoardAction {
    /// Short name used in logs
    pub fn name(&self) -> &'static str {
        match self {
            Self::Initialize { .. } => "initialize",
            Self::AddColumn { .. } => "add column",
            Self::AddTask { .. } => "add task",
            Self::UpdateTask { .. } => "update task",
            Self::MoveTask { .. } => "move task",
        }
    }
}

impl Reducer for BoardState {
    type Action = BoardAction;
    type Error = KanbanError;

    fn apply(&mut self, action: BoardAction) -> Result<(), KanbanError> {
        match action {
            BoardAction::Initialize { sections, tasks } => self.initialize(sections, tasks),
            BoardAction::AddColumn { section } => {
                self.add_column(section);
            }
            BoardAction::AddTask { section_id, task } => self.add_task(&section_id, task)?,
            BoardAction::UpdateTask { task } => self.update_task(task)?,
            BoardAction::MoveTask { gesture } => {
                self.move_task(&gesture)?;
            }
        }
        Ok(())
    }
}

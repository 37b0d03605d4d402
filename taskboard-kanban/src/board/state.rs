//! Board state: section id -> column of ordered tasks

use crate::error::{KanbanError, Result};
use crate::types::{Section, SectionId, Task, TaskId};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// One section together with its ordered tasks, as rendered on the board
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    #[serde(flatten)]
    pub section: Section,
    #[serde(rename = "taskItems")]
    pub tasks: Vec<Task>,
}

impl Column {
    /// An empty column for the section
    pub fn new(section: Section) -> Self {
        Self {
            section,
            tasks: Vec::new(),
        }
    }

    /// Section id keying this column
    pub fn id(&self) -> &SectionId {
        &self.section.id
    }

    /// Number of tasks in the column
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Whether the column holds no tasks
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Position of a task in this column
    pub fn position(&self, id: &TaskId) -> Option<usize> {
        self.tasks.iter().position(|t| &t.id == id)
    }
}

/// Client-side view of one project's kanban board.
///
/// Columns keep the order in which their sections were added. Within a column
/// the vector order is the display order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BoardState {
    columns: IndexMap<SectionId, Column>,
}

impl BoardState {
    /// Create an empty board
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild the board from scratch, replacing any prior state.
    ///
    /// A task lands in a section's column when both its project and its section
    /// reference match that section. Input order is kept; nothing is re-sorted.
    /// Tasks that match no section are left off the board.
    pub fn initialize(&mut self, sections: Vec<Section>, tasks: Vec<Task>) {
        let mut columns: IndexMap<SectionId, Column> = IndexMap::with_capacity(sections.len());
        for section in sections {
            columns.insert(section.id.clone(), Column::new(section));
        }

        let total = tasks.len();
        let mut unplaced = 0usize;
        for task in tasks {
            match columns.get_mut(&task.section) {
                Some(column) if task.in_project(&column.section.project) => column.tasks.push(task),
                _ => unplaced += 1,
            }
        }

        if unplaced > 0 {
            warn!(
                unplaced,
                total, "tasks without a matching section in this project were left off the board"
            );
        }
        debug!(columns = columns.len(), placed = total - unplaced, "board initialized");
        self.columns = columns;
    }

    /// Insert an empty column for the section. An existing column with the same
    /// id is replaced, tasks included; the replaced column is returned.
    pub fn add_column(&mut self, section: Section) -> Option<Column> {
        let previous = self
            .columns
            .insert(section.id.clone(), Column::new(section));
        if let Some(previous) = &previous {
            debug!(column = %previous.id(), dropped = previous.len(), "column overwritten");
        }
        previous
    }

    /// Append a task to the end of a column
    pub fn add_task(&mut self, section_id: &SectionId, task: Task) -> Result<()> {
        let column = self.column_mut(section_id)?;
        column.tasks.push(task);
        Ok(())
    }

    /// Replace a task in place, inside the column named by `task.section`.
    ///
    /// The task keeps its index. A task that is not in that column is an error;
    /// nothing is appended.
    pub fn update_task(&mut self, task: Task) -> Result<()> {
        let column = self.column_mut(&task.section)?;
        let index = column
            .position(&task.id)
            .ok_or_else(|| KanbanError::TaskNotFound {
                id: task.id.to_string(),
                column: task.section.to_string(),
            })?;
        column.tasks[index] = task;
        Ok(())
    }

    // =========================================================================
    // Read access
    // =========================================================================

    /// Look up a column
    pub fn column(&self, id: &SectionId) -> Result<&Column> {
        self.columns
            .get(id)
            .ok_or_else(|| KanbanError::column_not_found(id))
    }

    pub(crate) fn column_mut(&mut self, id: &SectionId) -> Result<&mut Column> {
        self.columns
            .get_mut(id)
            .ok_or_else(|| KanbanError::column_not_found(id))
    }

    /// Whether a column exists for the section
    pub fn contains_column(&self, id: &SectionId) -> bool {
        self.columns.contains_key(id)
    }

    /// Columns in insertion order
    pub fn columns(&self) -> impl Iterator<Item = &Column> {
        self.columns.values()
    }

    /// Number of columns
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Total number of tasks across all columns
    pub fn task_count(&self) -> usize {
        self.columns.values().map(Column::len).sum()
    }

    /// Every task, column by column
    pub fn all_tasks(&self) -> impl Iterator<Item = &Task> {
        self.columns.values().flat_map(|c| c.tasks.iter())
    }

    /// Locate a task: its column id and index
    pub fn find_task(&self, id: &TaskId) -> Option<(&SectionId, usize)> {
        self.columns
            .iter()
            .find_map(|(key, column)| column.position(id).map(|index| (key, index)))
    }

    /// Borrow a task by id
    pub fn task(&self, id: &TaskId) -> Option<&Task> {
        self.all_tasks().find(|t| &t.id == id)
    }

    /// Task ids of a column, in order
    pub fn task_ids(&self, column: &SectionId) -> Result<Vec<TaskId>> {
        Ok(self.column(column)?.tasks.iter().map(|t| t.id.clone()).collect())
    }
}

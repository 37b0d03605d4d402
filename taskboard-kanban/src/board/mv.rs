//! Move reconciliation: apply a drag-and-drop gesture to the board

use super::state::BoardState;
use crate::error::{KanbanError, Result};
use crate::types::{Rank, SectionId, Task, TaskId};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// A slot on the board: column plus 0-based index within it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub column: SectionId,
    pub index: usize,
}

impl Location {
    /// Create a new location
    pub fn new(column: impl Into<SectionId>, index: usize) -> Self {
        Self {
            column: column.into(),
            index,
        }
    }
}

/// A completed drag gesture, validated at the gesture boundary.
///
/// `destination` is `None` when the card was dropped outside any column.
/// `task`, when known, names the dragged card so a gesture computed against an
/// outdated board can be rejected instead of moving the wrong task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveGesture {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task: Option<TaskId>,
    pub source: Location,
    pub destination: Option<Location>,
}

impl MoveGesture {
    /// Create a gesture that lands on `destination`
    pub fn new(source: Location, destination: Location) -> Self {
        Self {
            task: None,
            source,
            destination: Some(destination),
        }
    }

    /// Create a gesture that was dropped outside any column
    pub fn cancelled(source: Location) -> Self {
        Self {
            task: None,
            source,
            destination: None,
        }
    }

    /// Name the dragged task
    pub fn with_task(mut self, task: impl Into<TaskId>) -> Self {
        self.task = Some(task.into());
        self
    }

    /// Whether source and destination are the same column
    pub fn is_reorder(&self) -> bool {
        self.destination
            .as_ref()
            .is_some_and(|d| d.column == self.source.column)
    }
}

/// What a move did to the board
#[derive(Debug, Clone, PartialEq)]
pub struct MoveOutcome {
    /// The moved task as it now sits on the board
    pub task: Task,
    /// Column the task left
    pub from: SectionId,
    /// Column the task landed in
    pub to: SectionId,
    /// Final index within `to`, after clamping
    pub index: usize,
    /// False when the task was dropped back onto its own slot
    pub changed: bool,
    /// Other tasks in `to` whose rank was rewritten because the column's ranks
    /// were not strictly increasing
    pub reranked: Vec<Task>,
}

impl BoardState {
    /// Apply a drag gesture.
    ///
    /// Returns `Ok(None)` for a cancelled gesture. Every validation happens
    /// before the first mutation, so an error leaves the board untouched.
    ///
    /// The task is removed from its source slot first and then inserted at
    /// `destination.index` of the already-shortened list; an index past the end
    /// appends. A cross-column move rewrites the task's section reference. The
    /// moved task gets a rank between its new neighbours and no other rank
    /// changes, unless the destination column's ranks were not strictly
    /// increasing to begin with; that column is then re-ranked in display order
    /// and the rewritten tasks are reported in [`MoveOutcome::reranked`].
    pub fn move_task(&mut self, gesture: &MoveGesture) -> Result<Option<MoveOutcome>> {
        let Some(destination) = gesture.destination.as_ref() else {
            debug!(column = %gesture.source.column, index = gesture.source.index, "gesture cancelled");
            return Ok(None);
        };
        let source = &gesture.source;

        let source_column = self.column(&source.column)?;
        if !self.contains_column(&destination.column) {
            return Err(KanbanError::column_not_found(&destination.column));
        }
        let dragged = source_column
            .tasks
            .get(source.index)
            .ok_or_else(|| KanbanError::IndexOutOfRange {
                column: source.column.to_string(),
                index: source.index,
                len: source_column.len(),
            })?;
        if let Some(expected) = &gesture.task {
            if &dragged.id != expected {
                return Err(KanbanError::StaleGesture {
                    expected: expected.to_string(),
                    found: dragged.id.to_string(),
                });
            }
        }

        let outcome = if gesture.is_reorder() {
            self.reorder(&source.column, source.index, destination.index)?
        } else {
            self.transfer(source, destination)?
        };

        debug!(
            task = %outcome.task.id,
            from = %outcome.from,
            to = %outcome.to,
            index = outcome.index,
            changed = outcome.changed,
            reranked = outcome.reranked.len(),
            "task moved"
        );
        Ok(Some(outcome))
    }

    fn reorder(&mut self, column_id: &SectionId, from: usize, to: usize) -> Result<MoveOutcome> {
        let tasks = &mut self.column_mut(column_id)?.tasks;
        let task = tasks.remove(from);
        let index = to.min(tasks.len());
        let changed = index != from;
        let (task, reranked) = if changed {
            place(tasks, index, task)
        } else {
            tasks.insert(index, task.clone());
            (task, Vec::new())
        };

        Ok(MoveOutcome {
            task,
            from: column_id.clone(),
            to: column_id.clone(),
            index,
            changed,
            reranked,
        })
    }

    fn transfer(&mut self, source: &Location, destination: &Location) -> Result<MoveOutcome> {
        let mut task = self.column_mut(&source.column)?.tasks.remove(source.index);
        task.section = destination.column.clone();

        let tasks = &mut self.column_mut(&destination.column)?.tasks;
        let index = destination.index.min(tasks.len());
        let (task, reranked) = place(tasks, index, task);

        Ok(MoveOutcome {
            task,
            from: source.column.clone(),
            to: destination.column.clone(),
            index,
            changed: true,
            reranked,
        })
    }
}

/// Insert `task` at `index` with a rank between its neighbours.
///
/// Returns the placed task and the other tasks whose rank had to be rewritten.
fn place(tasks: &mut Vec<Task>, index: usize, mut task: Task) -> (Task, Vec<Task>) {
    task.rank = rank_for_slot(tasks, index);
    tasks.insert(index, task);

    let mut reranked = Vec::new();
    if !is_strictly_ranked(tasks) {
        let ranks = Rank::sequence(tasks.len());
        for (i, (task, rank)) in tasks.iter_mut().zip(ranks).enumerate() {
            if task.rank != rank {
                task.rank = rank;
                if i != index {
                    reranked.push(task.clone());
                }
            }
        }
    }
    (tasks[index].clone(), reranked)
}

fn is_strictly_ranked(tasks: &[Task]) -> bool {
    tasks.iter().all(|t| t.rank.is_well_formed()) && tasks.windows(2).all(|w| w[0].rank < w[1].rank)
}

/// Rank for a task about to be inserted at `index` of `tasks`
fn rank_for_slot(tasks: &[Task], index: usize) -> Rank {
    let prev = index.checked_sub(1).and_then(|i| tasks.get(i)).map(|t| &t.rank);
    let next = tasks.get(index).map(|t| &t.rank);
    Rank::for_slot(prev, next)
}

//! Board store: the single owner of a project's board state
//!
//! Every change to the board goes through [`BoardStore::dispatch`], which runs
//! the action through the [`Reducer`] and bumps the store revision on success.

use crate::board::{BoardAction, BoardState, MoveGesture, MoveOutcome};
use crate::error::{KanbanError, Result};
use crate::types::ProjectId;
use tracing::{debug, trace, warn};

/// A state that changes only by applying actions
pub trait Reducer {
    /// Actions this state understands
    type Action;
    /// Error produced by a rejected action
    type Error;

    /// Apply one action. A rejected action must leave the state unchanged.
    fn apply(&mut self, action: Self::Action) -> std::result::Result<(), Self::Error>;
}

/// Board state for one project plus a revision counter.
///
/// The revision increases by one for every action that was applied, which
/// lets observers tell cheaply whether they need to re-render.
#[derive(Debug, Clone, Default)]
pub struct BoardStore {
    project: Option<ProjectId>,
    state: BoardState,
    revision: u64,
}

impl BoardStore {
    /// A store with an empty board and no project
    pub fn new() -> Self {
        Self::default()
    }

    /// A store bound to a project, with an empty board
    pub fn for_project(project: impl Into<ProjectId>) -> Self {
        Self {
            project: Some(project.into()),
            ..Self::default()
        }
    }

    /// Current board
    pub fn state(&self) -> &BoardState {
        &self.state
    }

    /// Project the board belongs to
    pub fn project(&self) -> Option<&ProjectId> {
        self.project.as_ref()
    }

    /// Project id, or an error when none is bound
    pub fn require_project(&self) -> Result<&ProjectId> {
        self.project.as_ref().ok_or(KanbanError::ProjectNotLoaded)
    }

    /// Bind the store to a (possibly different) project
    pub fn set_project(&mut self, project: impl Into<ProjectId>) {
        self.project = Some(project.into());
    }

    /// Number of actions applied so far
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Apply an action to the board
    pub fn dispatch(&mut self, action: BoardAction) -> Result<()> {
        let name = action.name();
        trace!(action = name, revision = self.revision, "dispatch");
        match self.state.apply(action) {
            Ok(()) => {
                self.revision += 1;
                debug!(action = name, revision = self.revision, "board updated");
                Ok(())
            }
            Err(e) => {
                warn!(action = name, error = %e, "board action rejected");
                Err(e)
            }
        }
    }

    /// Apply a drag gesture and report what moved.
    ///
    /// A cancelled gesture returns `Ok(None)` and does not bump the revision.
    pub fn move_task(&mut self, gesture: &MoveGesture) -> Result<Option<MoveOutcome>> {
        let outcome = self.state.move_task(gesture)?;
        if outcome.is_some() {
            self.revision += 1;
        }
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Location;
    use crate::types::{Section, Task};

    fn loaded() -> BoardStore {
        let mut store = BoardStore::for_project("p1");
        store
            .dispatch(BoardAction::Initialize {
                sections: vec![
                    Section::new("todo", "To Do", "p1"),
                    Section::new("done", "Done", "p1"),
                ],
                tasks: vec![
                    Task::new("t1", "One", "todo").with_project("p1"),
                    Task::new("t2", "Two", "todo").with_project("p1"),
                ],
            })
            .unwrap();
        store
    }

    #[test]
    fn test_dispatch_bumps_revision() {
        let store = loaded();
        assert_eq!(store.revision(), 1);
        assert_eq!(store.state().task_count(), 2);
        assert_eq!(store.project().map(|p| p.as_str()), Some("p1"));
    }

    #[test]
    fn test_rejected_action_keeps_revision() {
        let mut store = loaded();
        let before = store.state().clone();
        let result = store.dispatch(BoardAction::AddTask {
            section_id: "missing".into(),
            task: Task::new("t3", "Three", "missing"),
        });
        assert!(result.is_err());
        assert_eq!(store.revision(), 1);
        assert_eq!(store.state(), &before);
    }

    #[test]
    fn test_move_task() {
        let mut store = loaded();
        let outcome = store
            .move_task(&MoveGesture::new(Location::new("todo", 1), Location::new("done", 0)))
            .unwrap()
            .unwrap();
        assert_eq!(outcome.task.id.as_str(), "t2");
        assert_eq!(outcome.task.section.as_str(), "done");
        assert_eq!(store.revision(), 2);

        let cancelled = store
            .move_task(&MoveGesture::cancelled(Location::new("todo", 0)))
            .unwrap();
        assert!(cancelled.is_none());
        assert_eq!(store.revision(), 2);
    }

    #[test]
    fn test_require_project() {
        assert!(matches!(
            BoardStore::new().require_project(),
            Err(KanbanError::ProjectNotLoaded)
        ));
        let mut store = BoardStore::new();
        store.set_project("p9");
        assert_eq!(store.require_project().unwrap().as_str(), "p9");
    }
}

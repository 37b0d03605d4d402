//! Kanban board engine for Taskboard
//!
//! This crate holds the client-side model of one project's kanban board and
//! keeps it in step with a remote persistence service.
//!
//! ## Overview
//!
//! - **Board state** - an ordered map from section id to a column of tasks,
//!   changed only through [`BoardAction`]s
//! - **Move reconciliation** - a drag gesture becomes a remove-then-insert on
//!   the board; the moved task gets a fractional [`Rank`] between its new
//!   neighbours
//! - **Sync** - changes apply optimistically, then the server's answer is
//!   folded back in: one request per task is in flight, later changes queue
//!   behind it, failures reload
//! - **Authorization** - owner and member checks on [`Project`]
//!
//! ## Basic Usage
//!
//! ```rust
//! use taskboard_kanban::{BoardAction, BoardStore, Location, MoveGesture, Section, Task};
//!
//! let mut store = BoardStore::for_project("p1");
//! store.dispatch(BoardAction::Initialize {
//!     sections: vec![
//!         Section::new("todo", "To Do", "p1"),
//!         Section::new("done", "Done", "p1"),
//!     ],
//!     tasks: vec![Task::new("t1", "Write docs", "todo").with_project("p1")],
//! })?;
//!
//! store.move_task(&MoveGesture::new(Location::new("todo", 0), Location::new("done", 0)))?;
//! assert_eq!(store.state().task(&"t1".into()).map(|t| t.section.as_str()), Some("done"));
//! # Ok::<(), taskboard_kanban::KanbanError>(())
//! ```
//!
//! Talking to a server goes through a [`BoardService`] implementation wrapped
//! in a [`SyncLayer`].

pub mod auth;
pub mod board;
pub mod error;
pub mod gesture;
pub mod store;
pub mod sync;
pub mod types;

pub use auth::{authenticate, AuthAction, AuthError, AuthService, AuthState, AuthStatus, Credentials};
pub use board::{BoardAction, BoardState, Column, Location, MoveGesture, MoveOutcome};
pub use error::{KanbanError, Result};
pub use gesture::{DraggableLocation, DropReason, DropResult};
pub use store::{BoardStore, Reducer};
pub use sync::{
    BoardService, BoardSnapshot, NewSection, NewTask, ReconcileOutcome, SyncError, SyncLayer,
    SyncResult, SyncTicket, TaskUpdate,
};
pub use types::{Project, ProjectId, Rank, Section, SectionId, Task, TaskId, User, UserId};

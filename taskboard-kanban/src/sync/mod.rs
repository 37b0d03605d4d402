//! Synchronization between the local board and the persistence service

mod error;
mod layer;
mod service;

pub use error::{SyncError, SyncResult};
pub use layer::{ReconcileOutcome, SyncLayer, SyncTicket};
pub use service::{BoardService, BoardSnapshot, NewSection, NewTask, TaskUpdate};

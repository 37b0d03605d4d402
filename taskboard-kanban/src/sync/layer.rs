//! Optimistic board updates reconciled against server responses

use super::error::{SyncError, SyncResult};
use super::service::{BoardService, NewSection, NewTask, TaskUpdate};
use crate::board::{BoardAction, BoardState, MoveGesture};
use crate::error::KanbanError;
use crate::store::BoardStore;
use crate::types::{ProjectId, Rank, Section, SectionId, Task, TaskId};
use std::collections::HashMap;
use taskboard_common::Pretty;
use tracing::{debug, info, instrument, warn};

/// A request to send, waiting for the server's answer
#[derive(Debug, Clone, PartialEq)]
pub struct SyncTicket {
    /// Task the change applies to
    pub task: TaskId,
    /// Issue order; identifies the request in flight for `task`
    pub sequence: u64,
    /// Request to send
    pub update: TaskUpdate,
}

/// How a server response was folded into the board
#[derive(Debug, Clone, PartialEq)]
pub enum ReconcileOutcome {
    /// The server accepted the change; the board holds its record
    Confirmed(Task),
    /// The ticket is no longer in flight; the board was reloaded since it was issued
    Discarded,
    /// The change failed and the board was reloaded from the server
    RolledBack,
    /// A request for the same task is in flight; the change is sent when it completes
    Queued,
}

/// Failed sends are retried this many times when the error is transient
const RETRY_LIMIT: usize = 1;

/// Drives a [`BoardStore`] against a [`BoardService`].
///
/// Local changes apply immediately. At most one request per task is in
/// flight: changes made meanwhile are merged into a single queued update that
/// [`SyncLayer::complete`] sends with the version the server just returned.
/// The last change made therefore wins regardless of response timing. Success
/// adopts the server record, failure reloads the board.
pub struct SyncLayer<S> {
    service: S,
    store: BoardStore,
    next_sequence: u64,
    in_flight: HashMap<TaskId, u64>,
    queued: HashMap<TaskId, TaskUpdate>,
}

impl<S: BoardService> SyncLayer<S> {
    /// Create a layer with an empty store
    pub fn new(service: S) -> Self {
        Self::with_store(service, BoardStore::new())
    }

    /// Create a layer around an existing store
    pub fn with_store(service: S, store: BoardStore) -> Self {
        Self {
            service,
            store,
            next_sequence: 1,
            in_flight: HashMap::new(),
            queued: HashMap::new(),
        }
    }

    /// The store being synchronized
    pub fn store(&self) -> &BoardStore {
        &self.store
    }

    /// Current board
    pub fn state(&self) -> &BoardState {
        self.store.state()
    }

    /// The persistence service
    pub fn service(&self) -> &S {
        &self.service
    }

    /// Give the store back
    pub fn into_store(self) -> BoardStore {
        self.store
    }

    /// Whether a request for `task` awaits its response
    pub fn is_in_flight(&self, task: &TaskId) -> bool {
        self.in_flight.contains_key(task)
    }

    /// Whether a change to `task` waits behind the request in flight
    pub fn is_queued(&self, task: &TaskId) -> bool {
        self.queued.contains_key(task)
    }

    /// Bind to a project and build its board from the server
    #[instrument(skip(self))]
    pub async fn load(&mut self, project: &ProjectId) -> SyncResult<()> {
        self.store.set_project(project.clone());
        self.in_flight.clear();
        self.queued.clear();
        self.refresh(project).await
    }

    /// Apply a gesture locally and describe the requests that persist it.
    ///
    /// The moved task's ticket comes first, followed by one per neighbour
    /// whose rank had to be rewritten. The list is empty when nothing moved or
    /// when every change was queued behind a request already in flight.
    pub fn begin_move(&mut self, gesture: &MoveGesture) -> SyncResult<Vec<SyncTicket>> {
        Ok(match self.stage_move(gesture)? {
            Staged::Unchanged => Vec::new(),
            Staged::Issued { moved, reranked } => moved.into_iter().chain(reranked).collect(),
        })
    }

    /// Apply a title or completion edit locally and describe its request.
    ///
    /// Returns `None` when the edit was queued behind a request in flight.
    pub fn begin_edit(&mut self, task: Task) -> SyncResult<Option<SyncTicket>> {
        let update = TaskUpdate::for_edit(&task);
        self.store.dispatch(BoardAction::UpdateTask { task })?;
        Ok(self.issue(update))
    }

    fn stage_move(&mut self, gesture: &MoveGesture) -> SyncResult<Staged> {
        let Some(outcome) = self.store.move_task(gesture)? else {
            return Ok(Staged::Unchanged);
        };
        if !outcome.changed {
            return Ok(Staged::Unchanged);
        }
        let moved = self.issue(TaskUpdate::for_move(&outcome.task));
        let reranked = outcome
            .reranked
            .iter()
            .filter_map(|task| self.issue(TaskUpdate::for_move(task)))
            .collect();
        Ok(Staged::Issued { moved, reranked })
    }

    fn issue(&mut self, update: TaskUpdate) -> Option<SyncTicket> {
        if self.in_flight.contains_key(&update.id) {
            debug!(task = %update.id, "change queued behind request in flight");
            match self.queued.get_mut(&update.id) {
                Some(pending) => pending.merge(update),
                None => {
                    self.queued.insert(update.id.clone(), update);
                }
            }
            return None;
        }
        Some(self.ticket(update))
    }

    fn ticket(&mut self, update: TaskUpdate) -> SyncTicket {
        let sequence = self.next_sequence;
        self.next_sequence += 1;
        self.in_flight.insert(update.id.clone(), sequence);
        debug!(task = %update.id, sequence, "sync ticket issued");
        SyncTicket {
            task: update.id.clone(),
            sequence,
            update,
        }
    }

    /// Fold the server's answer for a ticket into the board.
    ///
    /// When a newer change to the task was queued meanwhile, it is sent now
    /// with the version the server returned, and the outcome is that of the
    /// last request sent. Transient failures are retried before rolling back.
    ///
    /// An error is returned only when a failed change could not be rolled back
    /// because the reload failed too; the board then keeps its optimistic state.
    pub async fn complete(
        &mut self,
        ticket: SyncTicket,
        result: SyncResult<Task>,
    ) -> SyncResult<ReconcileOutcome> {
        if self.in_flight.get(&ticket.task) != Some(&ticket.sequence) {
            debug!(task = %ticket.task, sequence = ticket.sequence, "response for superseded ticket discarded");
            return Ok(ReconcileOutcome::Discarded);
        }

        let mut ticket = ticket;
        let mut result = result;
        let mut retries = 0;
        let failure = loop {
            match result {
                Ok(task) => match self.queued.remove(&ticket.task) {
                    Some(mut next) => {
                        if let Err(e) = self.adopt_version(&task) {
                            break e;
                        }
                        next.expected_version = task.version;
                        debug!(task = %task.id, version = task.version, "sending queued change");
                        ticket = self.ticket(next);
                        retries = 0;
                    }
                    None => {
                        self.in_flight.remove(&ticket.task);
                        match self.confirm(task) {
                            Ok(task) => return Ok(ReconcileOutcome::Confirmed(task)),
                            Err(e) => break e,
                        }
                    }
                },
                Err(e) if e.is_retryable() && retries < RETRY_LIMIT => {
                    retries += 1;
                    warn!(task = %ticket.task, error = %e, retries, "sync failed, retrying");
                }
                Err(e) => break e,
            }
            result = self.service.update_task(&ticket.update).await;
        };

        self.in_flight.remove(&ticket.task);
        self.queued.remove(&ticket.task);
        warn!(task = %ticket.task, error = %failure, "sync failed, reloading board");
        self.reload().await?;
        Ok(ReconcileOutcome::RolledBack)
    }

    /// Apply a confirmed server record to the board
    fn confirm(&mut self, mut task: Task) -> SyncResult<Task> {
        if task.project.is_none() {
            task.project = self.store.project().cloned();
        }
        self.store.dispatch(BoardAction::UpdateTask { task: task.clone() })?;
        debug!(task = %task.id, version = task.version, "change confirmed");
        Ok(task)
    }

    /// Record the server's version on the local copy, keeping its newer fields
    fn adopt_version(&mut self, confirmed: &Task) -> SyncResult<()> {
        let mut local = self
            .store
            .state()
            .task(&confirmed.id)
            .cloned()
            .ok_or_else(|| KanbanError::TaskNotFound {
                id: confirmed.id.to_string(),
                column: confirmed.section.to_string(),
            })?;
        local.version = confirmed.version;
        self.store.dispatch(BoardAction::UpdateTask { task: local })?;
        Ok(())
    }

    /// Move a task and persist the move.
    ///
    /// Returns `None` when the gesture moved nothing. Neighbours re-ranked by
    /// the move are persisted after the moved task; the outcome reported is the
    /// moved task's.
    pub async fn move_task(&mut self, gesture: &MoveGesture) -> SyncResult<Option<ReconcileOutcome>> {
        let (moved, reranked) = match self.stage_move(gesture)? {
            Staged::Unchanged => return Ok(None),
            Staged::Issued { moved, reranked } => (moved, reranked),
        };

        let outcome = match moved {
            Some(ticket) => self.send(ticket).await?,
            None => ReconcileOutcome::Queued,
        };
        let mut rolled_back = outcome == ReconcileOutcome::RolledBack;
        for ticket in reranked {
            if rolled_back {
                // The reload already replaced the board; these ranks are gone
                self.in_flight.remove(&ticket.task);
                continue;
            }
            rolled_back = self.send(ticket).await? == ReconcileOutcome::RolledBack;
        }
        Ok(Some(outcome))
    }

    /// Edit a task's title or completion and persist the edit
    pub async fn update_task(&mut self, task: Task) -> SyncResult<ReconcileOutcome> {
        match self.begin_edit(task)? {
            Some(ticket) => self.send(ticket).await,
            None => Ok(ReconcileOutcome::Queued),
        }
    }

    async fn send(&mut self, ticket: SyncTicket) -> SyncResult<ReconcileOutcome> {
        let result = self.service.update_task(&ticket.update).await;
        self.complete(ticket, result).await
    }

    /// Create a task on the server and append it to its column
    #[instrument(skip(self, title))]
    pub async fn create_task(&mut self, section: &SectionId, title: impl Into<String>) -> SyncResult<Task> {
        let project = self.store.require_project()?.clone();

        let last = self.store.state().column(section)?.tasks.last().map(|t| &t.rank);
        let draft = NewTask {
            title: title.into(),
            section: section.clone(),
            project: project.clone(),
            rank: Rank::for_slot(last, None),
        };
        let last = last.cloned();

        let mut task = self.service.create_task(&draft).await?;
        if task.project.is_none() {
            task.project = Some(project);
        }
        // Servers that do not store ranks echo the default one
        if last.is_some_and(|last| task.rank <= last) {
            task.rank = draft.rank;
        }
        self.store.dispatch(BoardAction::AddTask {
            section_id: section.clone(),
            task: task.clone(),
        })?;
        info!(task = %task.id, "task created");
        Ok(task)
    }

    /// Create a section on the server and add its column
    #[instrument(skip(self, title))]
    pub async fn create_section(&mut self, title: impl Into<String>) -> SyncResult<Section> {
        let project = self.store.require_project()?.clone();
        let draft = NewSection {
            title: title.into(),
            project,
        };
        let section = self.service.create_section(&draft).await?;
        self.store.dispatch(BoardAction::AddColumn {
            section: section.clone(),
        })?;
        info!(section = %section.id, "section created");
        Ok(section)
    }

    async fn reload(&mut self) -> SyncResult<()> {
        let project = self.store.require_project()?.clone();
        self.refresh(&project).await
    }

    async fn refresh(&mut self, project: &ProjectId) -> SyncResult<()> {
        let snapshot = self.service.fetch_board(project).await?.into_rank_order();
        debug!(
            sections = snapshot.sections.len(),
            tasks = snapshot.tasks.len(),
            "board fetched"
        );
        self.store.dispatch(BoardAction::Initialize {
            sections: snapshot.sections,
            tasks: snapshot.tasks,
        })?;
        debug!(board = %Pretty(self.store.state()), "board reloaded");
        Ok(())
    }
}

/// Tickets produced by applying a gesture locally
enum Staged {
    Unchanged,
    Issued {
        moved: Option<SyncTicket>,
        reranked: Vec<SyncTicket>,
    },
}

//! Persistence service contract and its request/response records

use super::error::SyncResult;
use crate::types::{ProjectId, Rank, Section, SectionId, Task, TaskId};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Everything needed to build a board: the project's sections and tasks
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BoardSnapshot {
    pub sections: Vec<Section>,
    pub tasks: Vec<Task>,
}

impl BoardSnapshot {
    /// Create a snapshot
    pub fn new(sections: Vec<Section>, tasks: Vec<Task>) -> Self {
        Self { sections, tasks }
    }

    /// Stable-sort tasks by rank so column order follows the persisted order.
    /// Tasks with equal ranks keep their server order.
    pub fn into_rank_order(mut self) -> Self {
        self.tasks.sort_by(|a, b| a.rank.cmp(&b.rank));
        self
    }
}

/// Partial task update sent to the server.
///
/// `expected_version` is the version the client last saw; the server refuses
/// the write when its copy has moved on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskUpdate {
    #[serde(rename = "_id")]
    pub id: TaskId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub section: Option<SectionId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rank: Option<Rank>,
    pub expected_version: u64,
}

impl TaskUpdate {
    /// Update carrying a task's new placement
    pub fn for_move(task: &Task) -> Self {
        Self {
            id: task.id.clone(),
            title: None,
            completed: None,
            section: Some(task.section.clone()),
            rank: Some(task.rank.clone()),
            expected_version: task.version,
        }
    }

    /// Update carrying a task's editable fields
    pub fn for_edit(task: &Task) -> Self {
        Self {
            id: task.id.clone(),
            title: Some(task.title.clone()),
            completed: Some(task.completed),
            section: None,
            rank: None,
            expected_version: task.version,
        }
    }

    /// Fold a newer update for the same task into this one.
    ///
    /// Fields the newer update sets win; the rest are kept.
    pub fn merge(&mut self, newer: TaskUpdate) {
        self.title = newer.title.or(self.title.take());
        self.completed = newer.completed.or(self.completed);
        self.section = newer.section.or(self.section.take());
        self.rank = newer.rank.or(self.rank.take());
        self.expected_version = newer.expected_version;
    }
}

/// Request body for creating a task
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewTask {
    pub title: String,
    pub section: SectionId,
    pub project: ProjectId,
    /// Rank placing the task after every task already in `section`
    pub rank: Rank,
}

/// Request body for creating a section; the project travels in the URL
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewSection {
    pub title: String,
    #[serde(skip)]
    pub project: ProjectId,
}

/// Remote persistence for boards
#[async_trait]
pub trait BoardService: Send + Sync {
    /// Fetch every section and task of a project
    async fn fetch_board(&self, project: &ProjectId) -> SyncResult<BoardSnapshot>;

    /// Apply a partial update and return the stored task
    async fn update_task(&self, update: &TaskUpdate) -> SyncResult<Task>;

    /// Create a task and return the stored record
    async fn create_task(&self, draft: &NewTask) -> SyncResult<Task>;

    /// Create a section and return the stored record
    async fn create_section(&self, draft: &NewSection) -> SyncResult<Section>;
}

#[async_trait]
impl<T: BoardService + ?Sized> BoardService for Arc<T> {
    async fn fetch_board(&self, project: &ProjectId) -> SyncResult<BoardSnapshot> {
        (**self).fetch_board(project).await
    }

    async fn update_task(&self, update: &TaskUpdate) -> SyncResult<Task> {
        (**self).update_task(update).await
    }

    async fn create_task(&self, draft: &NewTask) -> SyncResult<Task> {
        (**self).create_task(draft).await
    }

    async fn create_section(&self, draft: &NewSection) -> SyncResult<Section> {
        (**self).create_section(draft).await
    }
}

//! Task type

use super::ids::{ProjectId, SectionId, TaskId};
use super::rank::Rank;
use serde::{Deserialize, Serialize};

/// A task/card on the kanban board
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    #[serde(rename = "_id")]
    pub id: TaskId,
    pub title: String,
    #[serde(default)]
    pub completed: bool,

    /// Owning section; rewritten when the task is dragged to another column
    pub section: SectionId,

    /// Owning project, derived through the section. Older records may omit it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project: Option<ProjectId>,

    /// Position within the section
    #[serde(default)]
    pub rank: Rank,

    /// Server-maintained stamp, bumped on every accepted write
    #[serde(default)]
    pub version: u64,
}

impl Task {
    /// Create a new task in the given section
    pub fn new(id: impl Into<TaskId>, title: impl Into<String>, section: impl Into<SectionId>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            completed: false,
            section: section.into(),
            project: None,
            rank: Rank::initial(),
            version: 0,
        }
    }

    /// Set the owning project
    pub fn with_project(mut self, project: impl Into<ProjectId>) -> Self {
        self.project = Some(project.into());
        self
    }

    /// Set the rank
    pub fn with_rank(mut self, rank: Rank) -> Self {
        self.rank = rank;
        self
    }

    /// Mark the task completed or not
    pub fn with_completed(mut self, completed: bool) -> Self {
        self.completed = completed;
        self
    }

    /// Whether the task belongs to the given project
    pub fn in_project(&self, project: &ProjectId) -> bool {
        self.project.as_ref() == Some(project)
    }
}

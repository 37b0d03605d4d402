//! Section type: a project-scoped column of tasks

use super::ids::{ProjectId, SectionId};
use serde::{Deserialize, Serialize};

/// A section defines one column of the board.
///
/// Its task list is not stored; the board materializes it from tasks whose
/// section reference points here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    #[serde(rename = "_id")]
    pub id: SectionId,
    pub title: String,
    pub project: ProjectId,
}

impl Section {
    /// Create a new section
    pub fn new(
        id: impl Into<SectionId>,
        title: impl Into<String>,
        project: impl Into<ProjectId>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            project: project.into(),
        }
    }
}

//! Core types for the kanban board

mod ids;
mod project;
mod rank;
mod section;
mod task;
mod user;

// Re-export all types
pub use ids::{ProjectId, SectionId, TaskId, UserId};
pub use project::Project;
pub use rank::Rank;
pub use section::Section;
pub use task::Task;
pub use user::User;

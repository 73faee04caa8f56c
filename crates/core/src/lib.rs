//! CRM.AI core types and utilities

pub mod board;
pub mod error;
pub mod insights;
pub mod stats;
pub mod timeline;
pub mod types;

pub use board::{IssuePriority, KanbanColumn, SprintPhase, TaskProgress};
pub use error::{CoreError, CoreResult};
pub use stats::DashboardStats;
pub use types::{
    AuthResponse, Epic, Issue, Membership, Milestone, NewEpic, NewIssue, NewMilestone,
    NewProject, NewTask, NewUserStory, NewWikiPage, Principal, Project, Registration,
    StatusInfo, Task, TimelineEntry, User, UserInfo, UserStory, WikiPage,
};

//! Display-side classification of backlog records
//!
//! The backend's status lookups are per-project and free-form, so columns and
//! filters are derived from keywords in the lower-cased status name.

use crate::types::{Issue, Milestone, StatusInfo, Task, User, UserStory};
use chrono::NaiveDate;
use std::fmt;

fn status_name(info: Option<&StatusInfo>) -> String {
    info.map(|info| info.name.to_lowercase()).unwrap_or_default()
}

/// Kanban board column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KanbanColumn {
    New,
    Ready,
    InProgress,
    ReadyForTest,
    Done,
}

impl KanbanColumn {
    /// Columns in board order
    pub const ALL: [Self; 5] = [
        Self::New,
        Self::Ready,
        Self::InProgress,
        Self::ReadyForTest,
        Self::Done,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            Self::New => "New",
            Self::Ready => "Ready",
            Self::InProgress => "In Progress",
            Self::ReadyForTest => "Ready for Test",
            Self::Done => "Done",
        }
    }

    /// Column for a status name. Checked from most to least advanced so that
    /// "ready for test" lands in the test column rather than "ready".
    pub fn classify(status: &str) -> Self {
        let status = status.to_lowercase();
        if ["done", "closed", "archived"].iter().any(|k| status.contains(k)) {
            Self::Done
        } else if status.contains("test") || status.contains("review") {
            Self::ReadyForTest
        } else if status.contains("progress") || status.contains("started") {
            Self::InProgress
        } else if status.contains("ready") {
            Self::Ready
        } else {
            Self::New
        }
    }

    pub fn of(story: &UserStory) -> Self {
        Self::classify(&status_name(story.status_extra_info.as_ref()))
    }

    /// Group stories by column, every column present and in board order
    pub fn group(stories: &[UserStory]) -> Vec<(Self, Vec<&UserStory>)> {
        Self::ALL
            .iter()
            .map(|column| {
                let cards = stories
                    .iter()
                    .filter(|story| Self::of(story) == *column)
                    .collect();
                (*column, cards)
            })
            .collect()
    }
}

impl fmt::Display for KanbanColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Coarse task state used by the task list filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskProgress {
    New,
    InProgress,
    Done,
}

impl TaskProgress {
    pub fn classify(status: &str) -> Self {
        let status = status.to_lowercase();
        if status.contains("closed") || status.contains("done") {
            Self::Done
        } else if status.contains("progress") {
            Self::InProgress
        } else {
            Self::New
        }
    }

    /// Tasks without a status count as new
    pub fn of(task: &Task) -> Self {
        task.status_extra_info
            .as_ref()
            .map_or(Self::New, |info| Self::classify(&info.name))
    }

    /// Filter tasks; `None` keeps everything
    pub fn filter(tasks: &[Task], wanted: Option<Self>) -> Vec<&Task> {
        tasks
            .iter()
            .filter(|task| wanted.is_none_or(|wanted| Self::of(task) == wanted))
            .collect()
    }
}

impl std::str::FromStr for TaskProgress {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "new" => Ok(Self::New),
            "progress" | "in-progress" => Ok(Self::InProgress),
            "done" => Ok(Self::Done),
            other => Err(format!("unknown task filter '{other}' (expected new, progress or done)")),
        }
    }
}

impl fmt::Display for TaskProgress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::New => "new",
            Self::InProgress => "progress",
            Self::Done => "done",
        })
    }
}

/// Priority class shown next to an issue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IssuePriority {
    High,
    Normal,
    Low,
}

impl IssuePriority {
    pub fn of(issue: &Issue) -> Self {
        let priority = status_name(issue.priority_extra_info.as_ref());
        if priority.contains("high") || priority.contains("critical") {
            Self::High
        } else if priority.contains("low") {
            Self::Low
        } else {
            Self::Normal
        }
    }
}

impl fmt::Display for IssuePriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::High => "high",
            Self::Normal => "normal",
            Self::Low => "low",
        })
    }
}

/// Where a sprint sits relative to today
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SprintPhase {
    Active,
    Closed,
    Planned,
}

impl SprintPhase {
    /// A sprint whose date window contains `today` is active even if closed
    pub fn of(milestone: &Milestone, today: NaiveDate) -> Self {
        let active = match (milestone.estimated_start, milestone.estimated_finish) {
            (Some(start), Some(finish)) => start <= today && today <= finish,
            _ => false,
        };
        if active {
            Self::Active
        } else if milestone.closed {
            Self::Closed
        } else {
            Self::Planned
        }
    }
}

impl fmt::Display for SprintPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Active => "Active",
            Self::Closed => "Closed",
            Self::Planned => "Planned",
        })
    }
}

/// Closed points as a rounded percentage of total points
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn sprint_progress(milestone: &Milestone) -> u8 {
    match milestone.total_points {
        Some(total) if total > 0.0 => {
            let closed = milestone.closed_points.unwrap_or(0.0);
            (closed / total * 100.0).round().clamp(0.0, 100.0) as u8
        }
        _ => 0,
    }
}

/// Case-insensitive team search on display name and username
pub fn search_users<'a>(users: &'a [User], query: &str) -> Vec<&'a User> {
    let query = query.to_lowercase();
    users
        .iter()
        .filter(|user| {
            user.display_name().to_lowercase().contains(&query)
                || user.username.to_lowercase().contains(&query)
        })
        .collect()
}

/// Up to two upper-cased initials
pub fn initials(name: &str) -> String {
    name.split_whitespace()
        .filter_map(|part| part.chars().next())
        .flat_map(char::to_uppercase)
        .take(2)
        .collect()
}

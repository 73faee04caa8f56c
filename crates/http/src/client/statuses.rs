//! Per-project lookup tables

use super::{ApiClient, error::ClientError};
use reqwest::Method;
use serde::{Deserialize, Serialize};

/// One entry of a status, type, priority or severity lookup
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lookup {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub order: Option<i64>,
    #[serde(default)]
    pub is_closed: Option<bool>,
}

/// Which lookup table to fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupKind {
    TaskStatuses,
    IssueStatuses,
    UserStoryStatuses,
    IssueTypes,
    Priorities,
    Severities,
}

impl LookupKind {
    pub const fn path(self) -> &'static str {
        match self {
            Self::TaskStatuses => "/task-statuses",
            Self::IssueStatuses => "/issue-statuses",
            Self::UserStoryStatuses => "/userstory-statuses",
            Self::IssueTypes => "/issue-types",
            Self::Priorities => "/priorities",
            Self::Severities => "/severities",
        }
    }
}

impl ApiClient {
    /// One lookup table of a project, e.g. its task statuses
    pub async fn lookups(&self, kind: LookupKind, project: u64) -> Result<Vec<Lookup>, ClientError> {
        let request = self
            .request(Method::GET, kind.path())
            .query(&[("project", project)]);
        self.execute(request).await
    }
}

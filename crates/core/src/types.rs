//! Records exchanged with the project-management backend
//!
//! The backend returns far more fields than the client displays. Every record
//! here deserializes leniently: missing optional fields default, unknown
//! fields are ignored.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// Identity of the signed-in user as resolved by `GET /users/me`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    #[serde(default)]
    pub id: Option<u64>,
    pub username: String,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub full_name_display: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub photo: Option<String>,
    #[serde(default)]
    pub is_admin: bool,
}

/// First non-empty candidate, falling back to the username
fn first_named<'a>(display: Option<&'a str>, full: Option<&'a str>, username: &'a str) -> &'a str {
    [display, full]
        .into_iter()
        .flatten()
        .find(|name| !name.is_empty())
        .unwrap_or(username)
}

impl Principal {
    /// Name to show in the UI, falling back to the username
    pub fn display_name(&self) -> &str {
        first_named(
            self.full_name_display.as_deref(),
            self.full_name.as_deref(),
            &self.username,
        )
    }
}

/// Body returned by `POST /auth`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthResponse {
    pub auth_token: String,
    #[serde(flatten)]
    pub principal: Principal,
}

/// Body sent to `POST /auth/register`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Registration {
    pub username: String,
    pub password: String,
    pub email: String,
    pub full_name: String,
    #[serde(rename = "type")]
    pub kind: String,
}

impl Registration {
    pub fn public(
        username: impl Into<String>,
        password: impl Into<String>,
        email: impl Into<String>,
        full_name: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            email: email.into(),
            full_name: full_name.into(),
            kind: "public".to_string(),
        }
    }
}

/// Lookup info the backend embeds for statuses, priorities and severities
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusInfo {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub is_closed: Option<bool>,
}

/// Short user summary embedded in assigned records
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserInfo {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub full_name_display: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub is_private: bool,
    #[serde(default)]
    pub total_milestones: Option<u64>,
    #[serde(default)]
    pub total_fans: Option<u64>,
    #[serde(default)]
    pub created_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub modified_date: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewProject {
    pub name: String,
    pub description: String,
    pub is_private: bool,
    pub creation_template: u64,
}

impl NewProject {
    pub fn new(name: impl Into<String>, description: impl Into<String>, is_private: bool) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            is_private,
            creation_template: 1,
        }
    }
}

/// A sprint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Milestone {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub project: Option<u64>,
    #[serde(default)]
    pub estimated_start: Option<NaiveDate>,
    #[serde(default)]
    pub estimated_finish: Option<NaiveDate>,
    #[serde(default)]
    pub closed: bool,
    #[serde(default)]
    pub total_points: Option<f64>,
    #[serde(default)]
    pub closed_points: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewMilestone {
    pub project: u64,
    pub name: String,
    pub estimated_start: NaiveDate,
    pub estimated_finish: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserStory {
    pub id: u64,
    #[serde(default, rename = "ref")]
    pub reference: Option<u64>,
    pub subject: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub status_extra_info: Option<StatusInfo>,
    #[serde(default)]
    pub assigned_to_extra_info: Option<UserInfo>,
    #[serde(default)]
    pub tags: Vec<JsonValue>,
    #[serde(default)]
    pub total_points: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewUserStory {
    pub project: u64,
    pub subject: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: u64,
    #[serde(default, rename = "ref")]
    pub reference: Option<u64>,
    pub subject: String,
    #[serde(default)]
    pub status_extra_info: Option<StatusInfo>,
    #[serde(default)]
    pub assigned_to_extra_info: Option<UserInfo>,
    #[serde(default)]
    pub user_story: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewTask {
    pub project: u64,
    pub subject: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Issue {
    pub id: u64,
    #[serde(default, rename = "ref")]
    pub reference: Option<u64>,
    pub subject: String,
    #[serde(default)]
    pub status_extra_info: Option<StatusInfo>,
    #[serde(default)]
    pub priority_extra_info: Option<StatusInfo>,
    #[serde(default)]
    pub severity_extra_info: Option<StatusInfo>,
    #[serde(default)]
    pub type_extra_info: Option<StatusInfo>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewIssue {
    pub project: u64,
    pub subject: String,
    pub description: String,
    pub priority: u64,
    pub severity: u64,
    #[serde(rename = "type")]
    pub kind: u64,
}

impl NewIssue {
    /// Issue with the default priority, severity and type lookups
    pub fn new(project: u64, subject: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            project,
            subject: subject.into(),
            description: description.into(),
            priority: 3,
            severity: 3,
            kind: 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Epic {
    pub id: u64,
    #[serde(default, rename = "ref")]
    pub reference: Option<u64>,
    pub subject: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewEpic {
    pub project: u64,
    pub subject: String,
    pub description: String,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WikiPage {
    pub id: u64,
    pub slug: String,
    #[serde(default)]
    pub content: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewWikiPage {
    pub project: u64,
    pub slug: String,
    pub content: String,
}

/// A team member as listed by `GET /users`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: u64,
    pub username: String,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub full_name_display: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub photo: Option<String>,
    #[serde(default)]
    pub is_active: bool,
}

impl User {
    pub fn display_name(&self) -> &str {
        first_named(
            self.full_name_display.as_deref(),
            self.full_name.as_deref(),
            &self.username,
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Membership {
    pub id: u64,
    #[serde(default)]
    pub user: Option<u64>,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub role_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineEntry {
    pub id: u64,
    #[serde(default)]
    pub event_type: String,
    #[serde(default)]
    pub created: Option<DateTime<Utc>>,
    #[serde(default)]
    pub data: JsonValue,
}

impl TimelineEntry {
    /// Name of the project the event refers to, if any
    pub fn project_name(&self) -> Option<&str> {
        self.data
            .get("project")
            .and_then(|project| project.get("name"))
            .and_then(JsonValue::as_str)
    }
}

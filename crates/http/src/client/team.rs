//! Users, memberships, timeline and search endpoints

use super::{ApiClient, error::ClientError};
use crmai_core::{Membership, TimelineEntry, User};
use reqwest::Method;
use serde_json::Value;

/// Timeline pages are capped at this many entries
pub const TIMELINE_PAGE_SIZE: u32 = 15;

impl ApiClient {
    /// All users visible to the caller
    pub async fn list_users(&self) -> Result<Vec<User>, ClientError> {
        let request = self.request(Method::GET, "/users");
        self.execute(request).await
    }

    /// One user by id
    pub async fn get_user(&self, id: u64) -> Result<User, ClientError> {
        let request = self.request(Method::GET, &format!("/users/{id}"));
        self.execute(request).await
    }

    /// Users the given user has worked with
    pub async fn user_contacts(&self, id: u64) -> Result<Vec<User>, ClientError> {
        let request = self.request(Method::GET, &format!("/users/{id}/contacts"));
        self.execute(request).await
    }

    /// Members of a project, with their role names
    pub async fn list_memberships(&self, project: u64) -> Result<Vec<Membership>, ClientError> {
        let request = self
            .request(Method::GET, "/memberships")
            .query(&[("project", project)]);
        self.execute(request).await
    }

    /// Latest activity of one user, one page of [`TIMELINE_PAGE_SIZE`] entries
    pub async fn user_timeline(&self, user: u64) -> Result<Vec<TimelineEntry>, ClientError> {
        let request = self
            .request(Method::GET, &format!("/timeline/user/{user}"))
            .query(&[("page_size", TIMELINE_PAGE_SIZE)]);
        self.execute(request).await
    }

    /// Latest activity inside one project, one page of [`TIMELINE_PAGE_SIZE`] entries
    pub async fn project_timeline(&self, project: u64) -> Result<Vec<TimelineEntry>, ClientError> {
        let request = self
            .request(Method::GET, &format!("/timeline/project/{project}"))
            .query(&[("page_size", TIMELINE_PAGE_SIZE)]);
        self.execute(request).await
    }

    /// Full-text search inside one project. Results are grouped by record kind.
    pub async fn search(&self, project: u64, text: &str) -> Result<Value, ClientError> {
        let request = self
            .request(Method::GET, "/search")
            .query(&[("project", project.to_string().as_str()), ("text", text)]);
        self.execute(request).await
    }
}

//! Project endpoints

use super::{ApiClient, error::ClientError};
use crmai_core::{NewProject, Project};
use reqwest::Method;
use serde::Serialize;
use serde_json::Value;

impl ApiClient {
    /// Projects the caller can see
    pub async fn list_projects(&self) -> Result<Vec<Project>, ClientError> {
        let request = self.request(Method::GET, "/projects");
        self.execute(request).await
    }

    /// One project by id
    pub async fn get_project(&self, id: u64) -> Result<Project, ClientError> {
        let request = self.request(Method::GET, &format!("/projects/{id}"));
        self.execute(request).await
    }

    /// Create a project from the default template
    pub async fn create_project(&self, project: &NewProject) -> Result<Project, ClientError> {
        let request = self.request(Method::POST, "/projects").json(project);
        self.execute(request).await
    }

    /// Partially update a project
    pub async fn update_project<P: Serialize + Sync>(
        &self,
        id: u64,
        patch: &P,
    ) -> Result<Project, ClientError> {
        let request = self
            .request(Method::PATCH, &format!("/projects/{id}"))
            .json(patch);
        self.execute(request).await
    }

    /// Delete a project; the backend answers 204
    pub async fn delete_project(&self, id: u64) -> Result<(), ClientError> {
        let request = self.request(Method::DELETE, &format!("/projects/{id}"));
        self.execute_empty(request).await
    }

    /// Aggregate statistics; the shape varies by backend version
    pub async fn project_stats(&self, id: u64) -> Result<Value, ClientError> {
        let request = self.request(Method::GET, &format!("/projects/{id}/stats"));
        self.execute(request).await
    }

    /// Mark the project as liked by the caller
    pub async fn like_project(&self, id: u64) -> Result<(), ClientError> {
        let request = self.request(Method::POST, &format!("/projects/{id}/fan"));
        self.execute_empty(request).await
    }

    /// Withdraw a like
    pub async fn unlike_project(&self, id: u64) -> Result<(), ClientError> {
        let request = self.request(Method::POST, &format!("/projects/{id}/unfan"));
        self.execute_empty(request).await
    }
}

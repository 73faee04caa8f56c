//! Sprint, user story, task, issue and epic endpoints
//!
//! Listings are always scoped to one project via the `project` query parameter.

use super::{ApiClient, error::ClientError};
use crmai_core::{
    Epic, Issue, Milestone, NewEpic, NewIssue, NewMilestone, NewTask, NewUserStory, Task,
    UserStory,
};
use reqwest::Method;
use serde::Serialize;
use serde_json::Value;

impl ApiClient {
    fn project_listing(&self, path: &str, project: u64) -> reqwest::RequestBuilder {
        self.request(Method::GET, path).query(&[("project", project)])
    }

    // Milestones (sprints)

    /// Sprints of one project
    pub async fn list_milestones(&self, project: u64) -> Result<Vec<Milestone>, ClientError> {
        self.execute(self.project_listing("/milestones", project)).await
    }

    /// One sprint by id
    pub async fn get_milestone(&self, id: u64) -> Result<Milestone, ClientError> {
        let request = self.request(Method::GET, &format!("/milestones/{id}"));
        self.execute(request).await
    }

    /// Open a new sprint
    pub async fn create_milestone(&self, milestone: &NewMilestone) -> Result<Milestone, ClientError> {
        let request = self.request(Method::POST, "/milestones").json(milestone);
        self.execute(request).await
    }

    /// Burndown and point totals for a sprint
    pub async fn milestone_stats(&self, id: u64) -> Result<Value, ClientError> {
        let request = self.request(Method::GET, &format!("/milestones/{id}/stats"));
        self.execute(request).await
    }

    // User stories

    /// User stories of one project
    pub async fn list_user_stories(&self, project: u64) -> Result<Vec<UserStory>, ClientError> {
        self.execute(self.project_listing("/userstories", project)).await
    }

    /// One user story by id
    pub async fn get_user_story(&self, id: u64) -> Result<UserStory, ClientError> {
        let request = self.request(Method::GET, &format!("/userstories/{id}"));
        self.execute(request).await
    }

    /// Add a user story to the backlog
    pub async fn create_user_story(&self, story: &NewUserStory) -> Result<UserStory, ClientError> {
        let request = self.request(Method::POST, "/userstories").json(story);
        self.execute(request).await
    }

    /// Partially update a user story
    pub async fn update_user_story<P: Serialize + Sync>(
        &self,
        id: u64,
        patch: &P,
    ) -> Result<UserStory, ClientError> {
        let request = self
            .request(Method::PATCH, &format!("/userstories/{id}"))
            .json(patch);
        self.execute(request).await
    }

    /// Delete a user story
    pub async fn delete_user_story(&self, id: u64) -> Result<(), ClientError> {
        let request = self.request(Method::DELETE, &format!("/userstories/{id}"));
        self.execute_empty(request).await
    }

    // Tasks

    /// Tasks of one project
    pub async fn list_tasks(&self, project: u64) -> Result<Vec<Task>, ClientError> {
        self.execute(self.project_listing("/tasks", project)).await
    }

    /// One task by id
    pub async fn get_task(&self, id: u64) -> Result<Task, ClientError> {
        let request = self.request(Method::GET, &format!("/tasks/{id}"));
        self.execute(request).await
    }

    /// Create a task
    pub async fn create_task(&self, task: &NewTask) -> Result<Task, ClientError> {
        let request = self.request(Method::POST, "/tasks").json(task);
        self.execute(request).await
    }

    /// Partially update a task, e.g. to move it between board columns
    pub async fn update_task<P: Serialize + Sync>(&self, id: u64, patch: &P) -> Result<Task, ClientError> {
        let request = self
            .request(Method::PATCH, &format!("/tasks/{id}"))
            .json(patch);
        self.execute(request).await
    }

    /// Delete a task
    pub async fn delete_task(&self, id: u64) -> Result<(), ClientError> {
        let request = self.request(Method::DELETE, &format!("/tasks/{id}"));
        self.execute_empty(request).await
    }

    // Issues

    /// Issues of one project
    pub async fn list_issues(&self, project: u64) -> Result<Vec<Issue>, ClientError> {
        self.execute(self.project_listing("/issues", project)).await
    }

    /// One issue by id
    pub async fn get_issue(&self, id: u64) -> Result<Issue, ClientError> {
        let request = self.request(Method::GET, &format!("/issues/{id}"));
        self.execute(request).await
    }

    /// Report an issue
    pub async fn create_issue(&self, issue: &NewIssue) -> Result<Issue, ClientError> {
        let request = self.request(Method::POST, "/issues").json(issue);
        self.execute(request).await
    }

    /// Partially update an issue
    pub async fn update_issue<P: Serialize + Sync>(&self, id: u64, patch: &P) -> Result<Issue, ClientError> {
        let request = self
            .request(Method::PATCH, &format!("/issues/{id}"))
            .json(patch);
        self.execute(request).await
    }

    /// Delete an issue
    pub async fn delete_issue(&self, id: u64) -> Result<(), ClientError> {
        let request = self.request(Method::DELETE, &format!("/issues/{id}"));
        self.execute_empty(request).await
    }

    // Epics

    /// Epics of one project
    pub async fn list_epics(&self, project: u64) -> Result<Vec<Epic>, ClientError> {
        self.execute(self.project_listing("/epics", project)).await
    }

    /// One epic by id
    pub async fn get_epic(&self, id: u64) -> Result<Epic, ClientError> {
        let request = self.request(Method::GET, &format!("/epics/{id}"));
        self.execute(request).await
    }

    /// Create an epic
    pub async fn create_epic(&self, epic: &NewEpic) -> Result<Epic, ClientError> {
        let request = self.request(Method::POST, "/epics").json(epic);
        self.execute(request).await
    }
}

//! Wiki endpoints

use super::{ApiClient, error::ClientError};
use crmai_core::{NewWikiPage, WikiPage};
use reqwest::Method;

impl ApiClient {
    /// Wiki pages of one project
    pub async fn list_wiki_pages(&self, project: u64) -> Result<Vec<WikiPage>, ClientError> {
        let request = self
            .request(Method::GET, "/wiki")
            .query(&[("project", project)]);
        self.execute(request).await
    }

    /// One wiki page by id
    pub async fn get_wiki_page(&self, id: u64) -> Result<WikiPage, ClientError> {
        let request = self.request(Method::GET, &format!("/wiki/{id}"));
        self.execute(request).await
    }

    /// Write a new wiki page
    pub async fn create_wiki_page(&self, page: &NewWikiPage) -> Result<WikiPage, ClientError> {
        let request = self.request(Method::POST, "/wiki").json(page);
        self.execute(request).await
    }
}

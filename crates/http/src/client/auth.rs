//! Authentication endpoints

use super::{ApiClient, error::ClientError};
use crmai_core::{AuthResponse, Principal, Registration};
use reqwest::Method;
use serde::Serialize;

#[derive(Serialize)]
struct LoginRequest<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    username: &'a str,
    password: &'a str,
}

impl ApiClient {
    /// Exchange username and password for a bearer credential
    pub async fn login(&self, username: &str, password: &str) -> Result<AuthResponse, ClientError> {
        let request = self.request(Method::POST, "/auth").json(&LoginRequest {
            kind: "normal",
            username,
            password,
        });
        self.execute(request).await
    }

    /// Create a public account. The response body is not used; callers log in
    /// afterwards.
    pub async fn register(&self, registration: &Registration) -> Result<(), ClientError> {
        let request = self
            .request(Method::POST, "/auth/register")
            .json(registration);
        self.execute_empty(request).await
    }

    /// Resolve the principal owning the current credential
    pub async fn me(&self) -> Result<Principal, ClientError> {
        let request = self.request(Method::GET, "/users/me");
        self.execute(request).await
    }
}

//! Client wrapper that turns 401 responses into session expiry

use crate::error::SessionError;
use crate::store::SessionStore;
use crmai_http::reqwest::RequestBuilder;
use crmai_http::{ApiClient, ClientError, Method};
use serde::de::DeserializeOwned;
use std::future::Future;
use tracing::debug;

/// Authenticated data access for protected pages.
///
/// Every call remembers which credential it was sent with. A 401 ends the
/// session through [`SessionStore::expire`] (unless a newer login replaced
/// that credential meanwhile) and surfaces as [`SessionError::SessionExpired`].
/// Other failures become [`SessionError::ResourceOperationFailed`] and leave
/// the session alone.
#[derive(Clone)]
pub struct GuardedClient {
    store: SessionStore,
}

impl GuardedClient {
    pub(crate) const fn new(store: SessionStore) -> Self {
        Self { store }
    }

    /// Run any client operation under 401 supervision
    ///
    /// # Errors
    ///
    /// See the type-level docs for how client errors are mapped
    pub async fn call<T, F, Fut>(&self, op: F) -> Result<T, SessionError>
    where
        F: FnOnce(ApiClient) -> Fut,
        Fut: Future<Output = Result<T, ClientError>>,
    {
        let client = self.store.client().clone();
        let sent_with = client.credential();

        match op(client).await {
            Ok(value) => Ok(value),
            Err(e) if e.is_unauthorized() => {
                debug!(error = %e, "request rejected as unauthorized");
                self.store.expire(sent_with.as_deref());
                Err(SessionError::SessionExpired)
            }
            Err(e) => Err(SessionError::from_resource(&e)),
        }
    }

    /// Start a request carrying the current credential
    pub fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.store.client().request(method, path)
    }

    /// Send a request built by [`request`](GuardedClient::request) and decode
    /// the JSON body
    ///
    /// # Errors
    ///
    /// See the type-level docs for how client errors are mapped
    pub async fn execute<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
    ) -> Result<T, SessionError> {
        self.call(|client| async move { client.execute(request).await })
            .await
    }

    /// Send a request whose response body is ignored
    ///
    /// # Errors
    ///
    /// See the type-level docs for how client errors are mapped
    pub async fn execute_empty(&self, request: RequestBuilder) -> Result<(), SessionError> {
        self.call(|client| async move { client.execute_empty(request).await })
            .await
    }
}

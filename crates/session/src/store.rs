//! The session store: single source of truth for authentication state

use crate::config::AuthConfig;
use crate::error::SessionError;
use crate::guard::{self, GuardDecision};
use crate::guarded::GuardedClient;
use crate::navigator::Navigator;
use crate::routes::Route;
use crate::state::{Session, SessionAction, SessionStatus};
use crate::storage::SessionStorage;
use crmai_core::{AuthResponse, Principal, Registration};
use crmai_http::ApiClient;
use std::sync::Arc;
use tokio::sync::{OnceCell, watch};
use tracing::{debug, info, warn};

/// Handle to the process-wide session. Cloning is cheap and every clone
/// observes the same state.
#[derive(Clone)]
pub struct SessionStore {
    inner: Arc<Inner>,
}

struct Inner {
    client: ApiClient,
    storage: Arc<dyn SessionStorage>,
    navigator: Arc<dyn Navigator>,
    state: watch::Sender<Session>,
    bootstrap: OnceCell<()>,
}

impl SessionStore {
    /// Build the store from whatever is persisted. With a stored credential
    /// the session starts in `Bootstrapping` until [`bootstrap`] runs;
    /// without one it is `Ready` and signed out, and no request is made.
    ///
    /// [`bootstrap`]: SessionStore::bootstrap
    pub fn new(
        client: ApiClient,
        storage: Arc<dyn SessionStorage>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        let credential = match storage.get_item(AuthConfig::TOKEN_KEY) {
            Ok(credential) => credential.filter(|token| !token.is_empty()),
            Err(e) => {
                warn!(error = %e, "could not read persisted credential");
                None
            }
        };

        client.set_credential(credential.as_deref());
        let session = credential.map_or_else(Session::empty, Session::restoring);
        debug!(status = ?session.status(), "session store created");
        let (state, _) = watch::channel(session);

        Self {
            inner: Arc::new(Inner {
                client,
                storage,
                navigator,
                state,
                bootstrap: OnceCell::new(),
            }),
        }
    }

    /// Build the store and wait for the startup check to finish
    pub async fn open(
        client: ApiClient,
        storage: Arc<dyn SessionStorage>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        let store = Self::new(client, storage, navigator);
        store.bootstrap().await;
        store
    }

    /// Validate a persisted credential with `GET /users/me`.
    ///
    /// Runs at most once per store no matter how many callers race here;
    /// later callers wait for the first run and return without a request.
    pub async fn bootstrap(&self) {
        self.inner
            .bootstrap
            .get_or_init(|| self.validate_persisted())
            .await;
    }

    /// Finish the startup check, then return the settled session
    pub async fn ready(&self) -> Session {
        self.bootstrap().await;
        self.snapshot()
    }

    async fn validate_persisted(&self) {
        let session = self.snapshot();
        if !session.is_bootstrapping() {
            return;
        }
        let Some(credential) = session.credential().map(str::to_string) else {
            return;
        };

        info!("validating persisted credential");
        match self.inner.client.me().await {
            Ok(principal) => {
                // A logout or fresh login while the check was in flight wins
                let applied = self.inner.state.send_if_modified(|session| {
                    if session.credential() != Some(credential.as_str()) {
                        return false;
                    }
                    *session = session.reduce(SessionAction::Resolved(principal.clone()));
                    true
                });
                if applied {
                    self.persist_principal(&principal);
                    info!(username = %principal.username, "session restored");
                } else {
                    debug!("discarding stale startup validation");
                }
            }
            Err(e) if e.is_unauthorized() => {
                warn!(error = %e, "persisted credential rejected");
                self.expire(Some(&credential));
            }
            Err(e) => {
                warn!(error = %e, "could not validate persisted credential");
                if self.credential().as_deref() == Some(credential.as_str()) {
                    self.logout();
                }
            }
        }
    }

    /// Exchange username and password for a session.
    ///
    /// # Errors
    ///
    /// [`SessionError::InvalidCredentials`] for 4xx responses,
    /// [`SessionError::ConnectivityFailure`] for anything else. The session
    /// is left unchanged on failure.
    pub async fn login(&self, username: &str, password: &str) -> Result<Principal, SessionError> {
        let AuthResponse {
            auth_token,
            principal,
        } = self
            .inner
            .client
            .login(username, password)
            .await
            .map_err(|e| {
                warn!(error = %e, username, "login failed");
                SessionError::from_login(&e)
            })?;

        self.persist(AuthConfig::TOKEN_KEY, &auth_token);
        self.persist_principal(&principal);
        self.inner.client.set_credential(Some(&auth_token));
        self.inner.state.send_modify(|session| {
            *session = session.reduce(SessionAction::Login {
                credential: auth_token,
                principal: principal.clone(),
            });
        });

        info!(username = %principal.username, "signed in");
        Ok(principal)
    }

    /// Create an account and sign straight into it.
    ///
    /// # Errors
    ///
    /// [`SessionError::PasswordMismatch`] before any request when the two
    /// passwords differ, [`SessionError::ResourceOperationFailed`] carrying
    /// the backend's message when registration is refused, or any
    /// [`login`](SessionStore::login) error.
    pub async fn register(
        &self,
        registration: &Registration,
        confirm_password: &str,
    ) -> Result<Principal, SessionError> {
        if registration.password != confirm_password {
            return Err(SessionError::PasswordMismatch);
        }

        self.inner
            .client
            .register(registration)
            .await
            .map_err(|e| {
                warn!(error = %e, username = %registration.username, "registration failed");
                SessionError::from_resource(&e)
            })?;

        info!(username = %registration.username, "account created");
        self.login(&registration.username, &registration.password)
            .await
    }

    /// Clear durable storage and the in-memory session. Calling this while
    /// signed out changes nothing.
    pub fn logout(&self) {
        for key in [AuthConfig::TOKEN_KEY, AuthConfig::PRINCIPAL_KEY] {
            if let Err(e) = self.inner.storage.remove_item(key) {
                warn!(error = %e, key, "could not clear persisted session");
            }
        }
        self.inner.client.set_credential(None);

        let changed = self.inner.state.send_if_modified(|session| {
            let next = session.reduce(SessionAction::Logout);
            if next == *session {
                return false;
            }
            *session = next;
            true
        });
        if changed {
            info!("signed out");
        }
    }

    /// React to the backend rejecting `rejected`: end the session and force a
    /// navigation to login. A rejection for a credential that has since been
    /// replaced by a newer login is ignored. Returns whether the session was
    /// ended.
    pub fn expire(&self, rejected: Option<&str>) -> bool {
        let current = self.credential();
        if current.is_some() && current.as_deref() != rejected {
            debug!("ignoring rejection of a superseded credential");
            return false;
        }

        warn!("credential rejected by the backend, ending session");
        self.logout();
        self.inner.navigator.navigate(Route::Login);
        true
    }

    /// Copy of the current session
    pub fn snapshot(&self) -> Session {
        self.inner.state.borrow().clone()
    }

    pub fn status(&self) -> SessionStatus {
        self.inner.state.borrow().status()
    }

    pub fn is_authenticated(&self) -> bool {
        self.inner.state.borrow().is_authenticated()
    }

    pub fn credential(&self) -> Option<String> {
        self.inner.state.borrow().credential().map(str::to_string)
    }

    pub fn principal(&self) -> Option<Principal> {
        self.inner.state.borrow().principal().cloned()
    }

    /// Watch session changes
    pub fn subscribe(&self) -> watch::Receiver<Session> {
        self.inner.state.subscribe()
    }

    /// Principal snapshot from the last sign-in, for display while the
    /// startup check runs. Never consulted for access decisions.
    pub fn cached_principal(&self) -> Option<Principal> {
        let raw = match self.inner.storage.get_item(AuthConfig::PRINCIPAL_KEY) {
            Ok(raw) => raw?,
            Err(e) => {
                warn!(error = %e, "could not read cached principal");
                return None;
            }
        };
        serde_json::from_str(&raw)
            .inspect_err(|e| debug!(error = %e, "ignoring unreadable cached principal"))
            .ok()
    }

    /// Route decision for a location under the current session
    pub fn decide(&self, location: &str) -> GuardDecision {
        guard::resolve(location, &self.inner.state.borrow())
    }

    /// The raw client; its failures do not touch the session
    pub fn client(&self) -> &ApiClient {
        &self.inner.client
    }

    /// Client for page data whose 401 responses end the session
    pub fn guarded(&self) -> GuardedClient {
        GuardedClient::new(self.clone())
    }

    fn persist(&self, key: &str, value: &str) {
        if let Err(e) = self.inner.storage.set_item(key, value) {
            warn!(error = %e, key, "could not persist session");
        }
    }

    fn persist_principal(&self, principal: &Principal) {
        match serde_json::to_string(principal) {
            Ok(serialized) => self.persist(AuthConfig::PRINCIPAL_KEY, &serialized),
            Err(e) => warn!(error = %e, "could not serialize principal"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::navigator::MockNavigator;
    use crate::storage::MemoryStorage;

    fn offline_client() -> ApiClient {
        // Nothing listens here; tests below never reach the network
        ApiClient::new("http://127.0.0.1:9").unwrap()
    }

    fn quiet_navigator() -> Arc<MockNavigator> {
        let mut navigator = MockNavigator::new();
        navigator.expect_navigate().never();
        Arc::new(navigator)
    }

    #[tokio::test]
    async fn empty_storage_is_ready_without_network() {
        let store = SessionStore::new(
            offline_client(),
            Arc::new(MemoryStorage::new()),
            quiet_navigator(),
        );
        assert_eq!(store.status(), SessionStatus::Ready);
        assert!(!store.is_authenticated());

        // Would fail loudly if it tried to reach port 9
        let session = store.ready().await;
        assert_eq!(session, Session::empty());
        assert!(!store.client().has_credential());
    }

    #[tokio::test]
    async fn persisted_credential_starts_bootstrapping() {
        let storage = MemoryStorage::with_items([(AuthConfig::TOKEN_KEY, "abc")]);
        let store = SessionStore::new(offline_client(), Arc::new(storage), quiet_navigator());
        assert_eq!(store.status(), SessionStatus::Bootstrapping);
        assert!(store.is_authenticated());
        assert_eq!(store.client().credential().as_deref(), Some("abc"));
        assert_eq!(store.decide("/dashboard"), GuardDecision::Loading);
    }

    #[tokio::test]
    async fn logout_while_signed_out_is_a_no_op() {
        let storage = Arc::new(MemoryStorage::new());
        let store = SessionStore::new(offline_client(), storage.clone(), quiet_navigator());
        let mut changes = store.subscribe();
        changes.mark_unchanged();

        store.logout();
        store.logout();
        assert!(!changes.has_changed().unwrap());
        assert!(storage.is_empty());
    }

    #[tokio::test]
    async fn expire_clears_and_navigates_to_login() {
        let storage = Arc::new(MemoryStorage::with_items([
            (AuthConfig::TOKEN_KEY, "abc"),
            (AuthConfig::PRINCIPAL_KEY, r#"{"username":"admin"}"#),
        ]));
        let mut navigator = MockNavigator::new();
        navigator
            .expect_navigate()
            .withf(|route| *route == Route::Login)
            .times(1)
            .return_const(());

        let store = SessionStore::new(offline_client(), storage.clone(), Arc::new(navigator));
        assert!(store.expire(Some("abc")));
        assert!(!store.is_authenticated());
        assert_eq!(store.status(), SessionStatus::Ready);
        assert!(storage.is_empty());
        assert!(!store.client().has_credential());
    }

    #[tokio::test]
    async fn expire_ignores_superseded_credential() {
        let storage = MemoryStorage::with_items([(AuthConfig::TOKEN_KEY, "fresh")]);
        let store = SessionStore::new(offline_client(), Arc::new(storage), quiet_navigator());
        assert!(!store.expire(Some("stale")));
        assert!(!store.expire(None));
        assert_eq!(store.credential().as_deref(), Some("fresh"));
    }

    #[tokio::test]
    async fn register_checks_passwords_before_any_request() {
        let store = SessionStore::new(
            offline_client(),
            Arc::new(MemoryStorage::new()),
            quiet_navigator(),
        );
        let registration = Registration::public("jdoe", "one", "j@doe.io", "John Doe");
        let err = store.register(&registration, "two").await.unwrap_err();
        assert_eq!(err, SessionError::PasswordMismatch);
    }

    #[tokio::test]
    async fn cached_principal_is_display_only() {
        let storage = MemoryStorage::with_items([(AuthConfig::PRINCIPAL_KEY, r#"{"username":"admin"}"#)]);
        let store = SessionStore::new(offline_client(), Arc::new(storage), quiet_navigator());
        assert_eq!(store.cached_principal().map(|p| p.username), Some("admin".to_string()));
        assert!(!store.is_authenticated());
        assert_eq!(store.decide("/settings"), GuardDecision::Redirect(Route::Login));
    }
}

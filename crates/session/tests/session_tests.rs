//! End-to-end session behavior against a mock backend

use crmai_core::{Project, Registration};
use crmai_session::{
    AuthConfig, FileStorage, GuardDecision, HistoryNavigator, MemoryStorage, Route, SessionError,
    SessionStatus, SessionStorage, SessionStore,
};
use crmai_http::ApiClient;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

struct Harness {
    store: SessionStore,
    storage: Arc<MemoryStorage>,
    navigator: Arc<HistoryNavigator>,
}

fn harness(server: &MockServer, storage: MemoryStorage) -> Harness {
    let storage = Arc::new(storage);
    let navigator = Arc::new(HistoryNavigator::new());
    let client = ApiClient::new(server.uri()).unwrap();
    let store = SessionStore::new(client, storage.clone(), navigator.clone());
    Harness {
        store,
        storage,
        navigator,
    }
}

fn persisted(token: &str) -> MemoryStorage {
    MemoryStorage::with_items([
        (AuthConfig::TOKEN_KEY, token.to_string()),
        (
            AuthConfig::PRINCIPAL_KEY,
            json!({"username": "cached"}).to_string(),
        ),
    ])
}

async fn mount_login(server: &MockServer, token: &str) {
    Mock::given(method("POST"))
        .and(path("/api/v1/auth"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "auth_token": token,
            "id": 1,
            "username": "admin",
            "full_name_display": "Admin"
        })))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_no_credential_is_ready_without_requests() {
    let server = MockServer::start().await;
    let h = harness(&server, MemoryStorage::new());

    let session = h.store.ready().await;
    assert_eq!(session.status(), SessionStatus::Ready);
    assert!(!session.is_authenticated());
    assert!(server.received_requests().await.unwrap().is_empty());
    assert_eq!(h.store.decide("/dashboard"), GuardDecision::Redirect(Route::Login));
}

#[tokio::test]
async fn test_bootstrap_success_restores_session() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/users/me"))
        .and(header("authorization", "Bearer abc"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"id": 7, "username": "admin"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let h = harness(&server, persisted("abc"));
    assert_eq!(h.store.decide("/kanban"), GuardDecision::Loading);
    // Cached snapshot is available for display before validation
    assert_eq!(h.store.cached_principal().unwrap().username, "cached");

    h.store.bootstrap().await;
    assert_eq!(h.store.status(), SessionStatus::Ready);
    assert!(h.store.is_authenticated());
    assert_eq!(h.store.principal().unwrap().id, Some(7));
    assert_eq!(h.store.decide("/kanban"), GuardDecision::Render(Route::Kanban));
    // Snapshot refreshed from the authoritative answer
    assert_eq!(h.store.cached_principal().unwrap().username, "admin");
    assert!(h.navigator.history().is_empty());
}

#[tokio::test]
async fn test_bootstrap_rejection_signs_out_and_navigates_to_login() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/users/me"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({"detail": "expired"})))
        .expect(1)
        .mount(&server)
        .await;

    let h = harness(&server, persisted("abc"));
    h.store.bootstrap().await;

    assert_eq!(h.store.status(), SessionStatus::Ready);
    assert!(!h.store.is_authenticated());
    assert!(h.storage.is_empty());
    assert_eq!(h.navigator.history(), vec![Route::Login]);
    assert_eq!(h.store.decide("/sprints"), GuardDecision::Redirect(Route::Login));
    assert_eq!(h.store.decide("/login"), GuardDecision::Render(Route::Login));
}

#[tokio::test]
async fn test_bootstrap_outage_signs_out_without_navigation() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/users/me"))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&server)
        .await;

    let h = harness(&server, persisted("abc"));
    h.store.bootstrap().await;

    assert_eq!(h.store.status(), SessionStatus::Ready);
    assert!(!h.store.is_authenticated());
    assert!(h.storage.is_empty());
    assert!(h.navigator.history().is_empty());
}

#[tokio::test]
async fn test_bootstrap_runs_once_for_concurrent_callers() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/users/me"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"username": "admin"}))
                .set_delay(Duration::from_millis(100)),
        )
        .expect(1)
        .mount(&server)
        .await;

    let h = harness(&server, persisted("abc"));
    let first = tokio::spawn({
        let store = h.store.clone();
        async move { store.ready().await }
    });
    let second = tokio::spawn({
        let store = h.store.clone();
        async move { store.ready().await }
    });

    let (first, second) = (first.await.unwrap(), second.await.unwrap());
    assert_eq!(first, second);
    assert!(first.is_authenticated());

    h.store.bootstrap().await;
    assert_eq!(server.received_requests().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_logout_wins_over_inflight_bootstrap() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/users/me"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"username": "admin"}))
                .set_delay(Duration::from_millis(200)),
        )
        .mount(&server)
        .await;

    let h = harness(&server, persisted("abc"));
    let pending = tokio::spawn({
        let store = h.store.clone();
        async move { store.bootstrap().await }
    });

    tokio::time::sleep(Duration::from_millis(50)).await;
    h.store.logout();
    pending.await.unwrap();

    assert!(!h.store.is_authenticated());
    assert_eq!(h.store.principal(), None);
    assert_eq!(h.store.status(), SessionStatus::Ready);
    assert!(h.storage.is_empty());
}

#[tokio::test]
async fn test_login_persists_and_unlocks_protected_routes() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/auth"))
        .and(body_json(json!({"type": "normal", "username": "admin", "password": "123123"})))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"auth_token": "abc", "id": 1, "username": "admin"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let h = harness(&server, MemoryStorage::new());
    let principal = h.store.login("admin", "123123").await.unwrap();

    assert_eq!(principal.username, "admin");
    assert_eq!(
        h.storage.get_item(AuthConfig::TOKEN_KEY).unwrap().as_deref(),
        Some("abc")
    );
    assert!(h.storage.get_item(AuthConfig::PRINCIPAL_KEY).unwrap().is_some());
    assert_eq!(h.store.client().credential().as_deref(), Some("abc"));
    assert_eq!(h.store.decide("/dashboard"), GuardDecision::Render(Route::Dashboard));
    assert_eq!(h.store.decide("/register"), GuardDecision::Redirect(Route::Dashboard));
}

#[tokio::test]
async fn test_login_failures_leave_session_untouched() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/auth"))
        .respond_with(
            ResponseTemplate::new(400)
                .set_body_json(json!({"_error_message": "Username or password does not match"})),
        )
        .mount(&server)
        .await;

    let h = harness(&server, MemoryStorage::new());
    let err = h.store.login("admin", "wrong").await.unwrap_err();
    assert!(matches!(err, SessionError::InvalidCredentials(_)));
    assert_eq!(err.to_string(), "Invalid username or password");
    assert!(!h.store.is_authenticated());
    assert!(h.storage.is_empty());
    assert!(h.navigator.history().is_empty());
}

#[tokio::test]
async fn test_login_server_error_is_connectivity_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/auth"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&server)
        .await;

    let h = harness(&server, MemoryStorage::new());
    let err = h.store.login("admin", "123123").await.unwrap_err();
    assert!(matches!(err, SessionError::ConnectivityFailure(_)));
}

#[tokio::test]
async fn test_logout_is_idempotent() {
    let server = MockServer::start().await;
    mount_login(&server, "abc").await;

    let h = harness(&server, MemoryStorage::new());
    h.store.login("admin", "123123").await.unwrap();

    h.store.logout();
    let after_first = h.store.snapshot();
    h.store.logout();
    assert_eq!(h.store.snapshot(), after_first);
    assert!(!after_first.is_authenticated());
    assert!(h.storage.is_empty());
    assert!(!h.store.client().has_credential());
}

#[tokio::test]
async fn test_authenticated_401_expires_session_and_navigates() {
    let server = MockServer::start().await;
    mount_login(&server, "abc").await;
    Mock::given(method("GET"))
        .and(path("/api/v1/projects"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({"detail": "Invalid token"})))
        .mount(&server)
        .await;

    let h = harness(&server, MemoryStorage::new());
    h.store.login("admin", "123123").await.unwrap();

    let err = h
        .store
        .guarded()
        .call(|api| async move { api.list_projects().await })
        .await
        .unwrap_err();

    assert_eq!(err, SessionError::SessionExpired);
    assert!(!h.store.is_authenticated());
    assert!(h.storage.is_empty());
    assert_eq!(h.navigator.take(), Some(Route::Login));
}

#[tokio::test]
async fn test_other_failures_keep_the_session() {
    let server = MockServer::start().await;
    mount_login(&server, "abc").await;
    Mock::given(method("DELETE"))
        .and(path("/api/v1/tasks/9"))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({"detail": "Not allowed"})))
        .mount(&server)
        .await;

    let h = harness(&server, MemoryStorage::new());
    h.store.login("admin", "123123").await.unwrap();

    let guarded = h.store.guarded();
    let err = guarded
        .execute_empty(guarded.request(crmai_http::Method::DELETE, "/tasks/9"))
        .await
        .unwrap_err();

    assert_eq!(
        err,
        SessionError::ResourceOperationFailed {
            status: Some(403),
            message: "Not allowed".into()
        }
    );
    assert!(h.store.is_authenticated());
    assert!(h.navigator.history().is_empty());
}

#[tokio::test]
async fn test_stale_401_does_not_end_newer_session() {
    let server = MockServer::start().await;
    mount_login(&server, "fresh").await;
    Mock::given(method("GET"))
        .and(path("/api/v1/projects"))
        .and(header("authorization", "Bearer old"))
        .respond_with(ResponseTemplate::new(401).set_delay(Duration::from_millis(200)))
        .mount(&server)
        .await;

    let h = harness(&server, persisted("old"));
    let pending = tokio::spawn({
        let guarded = h.store.guarded();
        async move {
            guarded
                .call(|api| async move { api.list_projects().await })
                .await
        }
    });

    tokio::time::sleep(Duration::from_millis(50)).await;
    h.store.login("admin", "123123").await.unwrap();

    let result: Result<Vec<Project>, _> = pending.await.unwrap();
    assert_eq!(result.unwrap_err(), SessionError::SessionExpired);
    assert_eq!(h.store.credential().as_deref(), Some("fresh"));
    assert!(h.navigator.history().is_empty());
}

#[tokio::test]
async fn test_register_then_sign_in() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/auth/register"))
        .and(body_json(json!({
            "username": "jdoe",
            "password": "secret",
            "email": "j@doe.io",
            "full_name": "John Doe",
            "type": "public"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": 2})))
        .expect(1)
        .mount(&server)
        .await;
    mount_login(&server, "new-token").await;

    let h = harness(&server, MemoryStorage::new());
    let registration = Registration::public("jdoe", "secret", "j@doe.io", "John Doe");
    h.store.register(&registration, "secret").await.unwrap();
    assert_eq!(h.store.credential().as_deref(), Some("new-token"));
}

#[tokio::test]
async fn test_register_surfaces_backend_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/auth/register"))
        .respond_with(
            ResponseTemplate::new(400)
                .set_body_json(json!({"_error_message": "Username is already in use."})),
        )
        .mount(&server)
        .await;

    let h = harness(&server, MemoryStorage::new());
    let registration = Registration::public("jdoe", "secret", "j@doe.io", "John Doe");
    let err = h.store.register(&registration, "secret").await.unwrap_err();
    assert_eq!(err.to_string(), "Username is already in use.");
    assert!(!h.store.is_authenticated());
}

#[tokio::test]
async fn test_file_storage_survives_restart() {
    let server = MockServer::start().await;
    mount_login(&server, "abc").await;
    Mock::given(method("GET"))
        .and(path("/api/v1/users/me"))
        .and(header("authorization", "Bearer abc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"username": "admin"})))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join(AuthConfig::STORAGE_FILE);
    let navigator = Arc::new(HistoryNavigator::new());

    let first = SessionStore::new(
        ApiClient::new(server.uri()).unwrap(),
        Arc::new(FileStorage::new(&file)),
        navigator.clone(),
    );
    first.login("admin", "123123").await.unwrap();

    let second = SessionStore::open(
        ApiClient::new(server.uri()).unwrap(),
        Arc::new(FileStorage::new(&file)),
        navigator,
    )
    .await;
    assert!(second.is_authenticated());
    assert_eq!(second.principal().unwrap().username, "admin");
}

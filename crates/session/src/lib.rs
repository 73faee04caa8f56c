//! Authentication state and route protection for the CRM.AI client
//!
//! A [`SessionStore`] is built once per process and handed explicitly to
//! everything that needs it. It owns the credential, keeps the shared
//! [`ApiClient`](crmai_http::ApiClient) in sync with it, validates a persisted
//! credential once at startup, and decides what happens when the backend
//! rejects a credential. Route guards are pure functions of the session.

pub mod config;
pub mod error;
pub mod guard;
pub mod guarded;
pub mod navigator;
pub mod routes;
pub mod state;
pub mod storage;
pub mod store;

pub use config::AuthConfig;
pub use error::SessionError;
pub use guard::{GuardDecision, auth_only_guard, protected_guard, resolve};
pub use guarded::GuardedClient;
pub use navigator::{HistoryNavigator, Navigator};
pub use routes::{Access, Route};
pub use state::{Session, SessionAction, SessionStatus};
pub use storage::{FileStorage, MemoryStorage, SessionStorage};
pub use store::SessionStore;

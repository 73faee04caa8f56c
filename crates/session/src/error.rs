//! Errors surfaced to views

use crmai_core::CoreError;
use crmai_http::ClientError;
use thiserror::Error;

/// What a view may see when a session or resource operation fails
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    /// Login rejected with a 4xx response
    #[error("Invalid username or password")]
    InvalidCredentials(String),

    /// Transport failure or non-4xx response during login
    #[error("Connection error. Please check your internet.")]
    ConnectivityFailure(String),

    /// The credential was rejected. By the time a caller sees this the
    /// session has already been cleared and a navigation to login issued.
    #[error("Session expired. Please log in again.")]
    SessionExpired,

    /// Any other failed resource call; the session is untouched
    #[error("{message}")]
    ResourceOperationFailed { status: Option<u16>, message: String },

    /// Registration form passwords differ
    #[error("Passwords do not match")]
    PasswordMismatch,

    #[error(transparent)]
    Storage(#[from] CoreError),
}

impl SessionError {
    /// Classify a failed login call
    pub fn from_login(err: &ClientError) -> Self {
        if err.is_client_error() {
            Self::InvalidCredentials(err.message())
        } else {
            Self::ConnectivityFailure(err.to_string())
        }
    }

    /// Classify a failed non-401 resource call
    pub fn from_resource(err: &ClientError) -> Self {
        Self::ResourceOperationFailed {
            status: err.status(),
            message: err.message(),
        }
    }

    pub const fn is_session_expired(&self) -> bool {
        matches!(self, Self::SessionExpired)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crmai_http::ClientError;

    #[test]
    fn login_failures_split_on_status_class() {
        let bad = ClientError::BadRequest("nope".into());
        assert_eq!(
            SessionError::from_login(&bad),
            SessionError::InvalidCredentials("nope".into())
        );

        let rejected = ClientError::Unauthorized("nope".into());
        assert!(matches!(
            SessionError::from_login(&rejected),
            SessionError::InvalidCredentials(_)
        ));

        let down = ClientError::ServerError {
            status: 502,
            message: "bad gateway".into(),
        };
        assert!(matches!(
            SessionError::from_login(&down),
            SessionError::ConnectivityFailure(_)
        ));
    }

    #[test]
    fn resource_failures_keep_status() {
        let err = SessionError::from_resource(&ClientError::NotFound("gone".into()));
        assert_eq!(
            err,
            SessionError::ResourceOperationFailed {
                status: Some(404),
                message: "gone".into()
            }
        );
        assert_eq!(err.to_string(), "gone");
    }
}

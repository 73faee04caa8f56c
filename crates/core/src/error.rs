//! Failures of the persisted-state layer

/// Result alias for persisted-state operations
pub type CoreResult<T> = Result<T, CoreError>;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CoreError {
    /// The backing store could not be read or written
    #[error("session storage unavailable: {0}")]
    Storage(String),

    /// Stored contents are not the expected JSON
    #[error("stored session data is malformed: {0}")]
    Serialization(String),
}

impl CoreError {
    /// Map an I/O failure to [`CoreError::Storage`], prefixed with what was
    /// being attempted.
    pub fn io(action: impl std::fmt::Display) -> impl FnOnce(std::io::Error) -> Self {
        move |err| Self::Storage(format!("{action}: {err}"))
    }
}

impl From<serde_json::Error> for CoreError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_failures_carry_the_action() {
        let err = CoreError::io("writing session.json")(std::io::Error::other("disk full"));
        assert_eq!(
            err,
            CoreError::Storage("writing session.json: disk full".into())
        );
        assert_eq!(
            err.to_string(),
            "session storage unavailable: writing session.json: disk full"
        );
    }

    #[test]
    fn json_errors_are_serialization_failures() {
        let err: CoreError = serde_json::from_str::<u8>("nope").unwrap_err().into();
        assert!(matches!(err, CoreError::Serialization(_)));
    }
}

//! Session state and its transitions

use crmai_core::Principal;

/// Whether the startup credential check has finished
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SessionStatus {
    /// A persisted credential is being validated; no routing decision yet
    Bootstrapping,
    /// Routing may proceed. Never reverts to `Bootstrapping`.
    Ready,
}

/// Authentication state
///
/// Fields are private so that a principal can never exist without the
/// credential it was resolved for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    credential: Option<String>,
    principal: Option<Principal>,
    status: SessionStatus,
}

/// Session transitions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionAction {
    Login {
        credential: String,
        principal: Principal,
    },
    Logout,
    /// Startup validation resolved the principal for the current credential
    Resolved(Principal),
}

impl Session {
    /// Signed out and ready
    pub const fn empty() -> Self {
        Self {
            credential: None,
            principal: None,
            status: SessionStatus::Ready,
        }
    }

    /// A persisted credential awaiting validation
    pub const fn restoring(credential: String) -> Self {
        Self {
            credential: Some(credential),
            principal: None,
            status: SessionStatus::Bootstrapping,
        }
    }

    pub fn credential(&self) -> Option<&str> {
        self.credential.as_deref()
    }

    pub const fn principal(&self) -> Option<&Principal> {
        self.principal.as_ref()
    }

    pub const fn status(&self) -> SessionStatus {
        self.status
    }

    pub fn is_bootstrapping(&self) -> bool {
        self.status == SessionStatus::Bootstrapping
    }

    /// Credential presence, not principal presence, so guards do not flicker
    /// while the principal is still resolving
    pub const fn is_authenticated(&self) -> bool {
        self.credential.is_some()
    }

    /// Apply a transition, returning the next state
    #[must_use]
    pub fn reduce(&self, action: SessionAction) -> Self {
        match action {
            SessionAction::Login {
                credential,
                principal,
            } => Self {
                credential: Some(credential),
                principal: Some(principal),
                status: SessionStatus::Ready,
            },
            SessionAction::Logout => Self::empty(),
            SessionAction::Resolved(principal) => {
                if self.credential.is_none() {
                    // Nothing to attach the principal to
                    return Self::empty();
                }
                Self {
                    credential: self.credential.clone(),
                    principal: Some(principal),
                    status: SessionStatus::Ready,
                }
            }
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::empty()
    }
}

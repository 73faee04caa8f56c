//! Route guards
//!
//! Both guards are pure functions of `(status, is_authenticated)`. While the
//! startup check is running they answer [`GuardDecision::Loading`] so nothing
//! redirects to login before a persisted credential has been validated.

use crate::routes::{Access, Route};
use crate::state::{Session, SessionStatus};

/// What to show for a requested location
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GuardDecision {
    /// Show the loading placeholder and decide later
    Loading,
    /// Show the requested page
    Render(Route),
    /// Navigate elsewhere instead
    Redirect(Route),
}

/// Guard for pages behind the sidebar
pub fn protected_guard(
    status: SessionStatus,
    is_authenticated: bool,
    requested: Route,
) -> GuardDecision {
    match (status, is_authenticated) {
        (SessionStatus::Bootstrapping, _) => GuardDecision::Loading,
        (SessionStatus::Ready, true) => GuardDecision::Render(requested),
        (SessionStatus::Ready, false) => GuardDecision::Redirect(Route::Login),
    }
}

/// Guard for the login and registration pages
pub fn auth_only_guard(
    status: SessionStatus,
    is_authenticated: bool,
    requested: Route,
) -> GuardDecision {
    match (status, is_authenticated) {
        (SessionStatus::Bootstrapping, _) => GuardDecision::Loading,
        (SessionStatus::Ready, true) => GuardDecision::Redirect(Route::Dashboard),
        (SessionStatus::Ready, false) => GuardDecision::Render(requested),
    }
}

/// Decide what to show for a raw location. Unknown paths go to the landing page.
pub fn resolve(location: &str, session: &Session) -> GuardDecision {
    let Some(route) = Route::from_path(location) else {
        return GuardDecision::Redirect(Route::Landing);
    };
    let status = session.status();
    let authenticated = session.is_authenticated();

    match route.access() {
        Access::Public => GuardDecision::Render(route),
        Access::AuthOnly => auth_only_guard(status, authenticated, route),
        Access::Protected => protected_guard(status, authenticated, route),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::SessionAction;
    use crmai_core::Principal;

    #[test]
    fn bootstrapping_always_loads() {
        for authenticated in [true, false] {
            for route in Route::ALL {
                assert_eq!(
                    protected_guard(SessionStatus::Bootstrapping, authenticated, route),
                    GuardDecision::Loading
                );
                assert_eq!(
                    auth_only_guard(SessionStatus::Bootstrapping, authenticated, route),
                    GuardDecision::Loading
                );
            }
        }
    }

    #[test]
    fn protected_when_ready() {
        assert_eq!(
            protected_guard(SessionStatus::Ready, false, Route::Kanban),
            GuardDecision::Redirect(Route::Login)
        );
        assert_eq!(
            protected_guard(SessionStatus::Ready, true, Route::Kanban),
            GuardDecision::Render(Route::Kanban)
        );
    }

    #[test]
    fn auth_only_when_ready() {
        assert_eq!(
            auth_only_guard(SessionStatus::Ready, true, Route::Login),
            GuardDecision::Redirect(Route::Dashboard)
        );
        assert_eq!(
            auth_only_guard(SessionStatus::Ready, false, Route::Register),
            GuardDecision::Render(Route::Register)
        );
    }

    #[test]
    fn resolve_locations() {
        let empty = Session::empty();
        let restoring = Session::restoring("abc".into());
        let principal: Principal =
            serde_json::from_value(serde_json::json!({"username": "admin"})).unwrap();
        let signed_in = empty.reduce(SessionAction::Login {
            credential: "abc".into(),
            principal,
        });

        assert_eq!(resolve("/nowhere", &signed_in), GuardDecision::Redirect(Route::Landing));
        assert_eq!(resolve("/pricing", &restoring), GuardDecision::Render(Route::Pricing));
        assert_eq!(resolve("/", &empty), GuardDecision::Render(Route::Landing));
        assert_eq!(resolve("/team", &restoring), GuardDecision::Loading);
        assert_eq!(resolve("/team", &empty), GuardDecision::Redirect(Route::Login));
        assert_eq!(resolve("/team", &signed_in), GuardDecision::Render(Route::Team));
        assert_eq!(resolve("/login", &signed_in), GuardDecision::Redirect(Route::Dashboard));
        assert_eq!(resolve("/login?next=/team", &empty), GuardDecision::Render(Route::Login));
    }
}

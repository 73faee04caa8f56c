//! Application routes

use std::fmt;

/// Who may see a route
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Access {
    /// Marketing pages, visible to everyone at any time
    Public,
    /// Login and registration, hidden from signed-in users
    AuthOnly,
    /// Everything behind the sidebar
    Protected,
}

/// Every navigable page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Landing,
    Features,
    Solutions,
    Pricing,
    Login,
    Register,
    Dashboard,
    Projects,
    Backlog,
    Kanban,
    Sprints,
    Tasks,
    Issues,
    Epics,
    Team,
    Analytics,
    AiInsights,
    Wiki,
    Settings,
}

impl Route {
    pub const ALL: [Self; 19] = [
        Self::Landing,
        Self::Features,
        Self::Solutions,
        Self::Pricing,
        Self::Login,
        Self::Register,
        Self::Dashboard,
        Self::Projects,
        Self::Backlog,
        Self::Kanban,
        Self::Sprints,
        Self::Tasks,
        Self::Issues,
        Self::Epics,
        Self::Team,
        Self::Analytics,
        Self::AiInsights,
        Self::Wiki,
        Self::Settings,
    ];

    pub const fn path(self) -> &'static str {
        match self {
            Self::Landing => "/",
            Self::Features => "/features",
            Self::Solutions => "/solutions",
            Self::Pricing => "/pricing",
            Self::Login => "/login",
            Self::Register => "/register",
            Self::Dashboard => "/dashboard",
            Self::Projects => "/projects",
            Self::Backlog => "/backlog",
            Self::Kanban => "/kanban",
            Self::Sprints => "/sprints",
            Self::Tasks => "/tasks",
            Self::Issues => "/issues",
            Self::Epics => "/epics",
            Self::Team => "/team",
            Self::Analytics => "/analytics",
            Self::AiInsights => "/ai-insights",
            Self::Wiki => "/wiki",
            Self::Settings => "/settings",
        }
    }

    pub const fn access(self) -> Access {
        match self {
            Self::Landing | Self::Features | Self::Solutions | Self::Pricing => Access::Public,
            Self::Login | Self::Register => Access::AuthOnly,
            _ => Access::Protected,
        }
    }

    pub const fn title(self) -> &'static str {
        match self {
            Self::Landing => "CRM.AI",
            Self::Features => "Features",
            Self::Solutions => "Solutions",
            Self::Pricing => "Pricing",
            Self::Login => "Sign In",
            Self::Register => "Create Account",
            Self::Dashboard => "Dashboard",
            Self::Projects => "Projects",
            Self::Backlog => "Backlog",
            Self::Kanban => "Kanban Board",
            Self::Sprints => "Sprints",
            Self::Tasks => "Tasks",
            Self::Issues => "Issues",
            Self::Epics => "Epics",
            Self::Team => "Team",
            Self::Analytics => "Analytics",
            Self::AiInsights => "AI Insights",
            Self::Wiki => "Wiki",
            Self::Settings => "Settings",
        }
    }

    /// Match a location. Query string, fragment and trailing slash are
    /// ignored; unknown paths yield `None`.
    pub fn from_path(location: &str) -> Option<Self> {
        let path = location
            .split(['?', '#'])
            .next()
            .unwrap_or_default()
            .trim();
        let path = match path.trim_end_matches('/') {
            "" => "/",
            trimmed => trimmed,
        };
        Self::ALL.into_iter().find(|route| route.path() == path)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_route_round_trips() {
        for route in Route::ALL {
            assert_eq!(Route::from_path(route.path()), Some(route));
        }
    }

    #[test]
    fn normalizes_locations() {
        assert_eq!(Route::from_path(""), Some(Route::Landing));
        assert_eq!(Route::from_path("/dashboard/"), Some(Route::Dashboard));
        assert_eq!(Route::from_path("/tasks?project=3"), Some(Route::Tasks));
        assert_eq!(Route::from_path("/wiki#home"), Some(Route::Wiki));
        assert_eq!(Route::from_path("/nope"), None);
        assert_eq!(Route::from_path("/dashboard/extra"), None);
    }

    #[test]
    fn access_classes() {
        assert_eq!(Route::Pricing.access(), Access::Public);
        assert_eq!(Route::Register.access(), Access::AuthOnly);
        assert_eq!(Route::AiInsights.access(), Access::Protected);
    }
}

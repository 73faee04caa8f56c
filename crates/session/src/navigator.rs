//! Hard navigation
//!
//! The session store never renders anything. When it must force the user
//! somewhere (a rejected credential sends them to login) it asks the
//! [`Navigator`] the shell provided.

use crate::routes::Route;
use std::sync::Mutex;
use tracing::info;

/// Performs a full navigation, discarding whatever the current view was doing
#[cfg_attr(test, mockall::automock)]
pub trait Navigator: Send + Sync {
    fn navigate(&self, route: Route);
}

/// Navigator that records every forced navigation for the shell to act on
#[derive(Debug, Default)]
pub struct HistoryNavigator {
    history: Mutex<Vec<Route>>,
}

impl HistoryNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Most recent forced navigation, if any
    pub fn current(&self) -> Option<Route> {
        self.history
            .lock()
            .ok()
            .and_then(|history| history.last().copied())
    }

    /// All forced navigations so far, oldest first
    pub fn history(&self) -> Vec<Route> {
        self.history
            .lock()
            .map(|history| history.clone())
            .unwrap_or_default()
    }

    /// Drain pending navigations, returning the last one
    pub fn take(&self) -> Option<Route> {
        let mut history = self.history.lock().ok()?;
        let last = history.last().copied();
        history.clear();
        last
    }
}

impl Navigator for HistoryNavigator {
    fn navigate(&self, route: Route) {
        info!(%route, "forced navigation");
        if let Ok(mut history) = self.history.lock() {
            history.push(route);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_and_drains() {
        let navigator = HistoryNavigator::new();
        assert_eq!(navigator.current(), None);

        navigator.navigate(Route::Login);
        navigator.navigate(Route::Dashboard);
        assert_eq!(navigator.current(), Some(Route::Dashboard));
        assert_eq!(navigator.history(), vec![Route::Login, Route::Dashboard]);

        assert_eq!(navigator.take(), Some(Route::Dashboard));
        assert_eq!(navigator.take(), None);
    }
}

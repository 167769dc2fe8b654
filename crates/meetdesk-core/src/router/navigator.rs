use tracing::{debug, info};

use super::guard::{Decision, NavigationGuard};
use super::route::{Route, RouteTable};
use crate::auth::SessionView;
use crate::error::RouterError;

/// Maximum guard redirects followed for a single navigation.
pub const MAX_REDIRECTS: usize = 10;

/// Applies guard decisions to navigation requests and tracks where the user is.
///
/// The session is lent to the router per navigation, so the caller stays free
/// to mutate it between transitions.
#[derive(Debug, Clone)]
pub struct Router {
    table: RouteTable,
    current: Option<Route>,
    history: Vec<Route>,
}

impl Router {
    pub fn new(table: RouteTable) -> Self {
        Self {
            table,
            current: None,
            history: Vec::new(),
        }
    }

    pub fn table(&self) -> &RouteTable {
        &self.table
    }

    pub fn current(&self) -> Option<&Route> {
        self.current.as_ref()
    }

    /// Name of the current route, if any navigation has completed
    pub fn current_name(&self) -> Option<&'static str> {
        self.current.map(|r| r.name)
    }

    pub fn can_go_back(&self) -> bool {
        !self.history.is_empty()
    }

    /// Navigate to the route called `name`, applying guard redirects.
    pub fn push(&mut self, name: &str, session: &dyn SessionView) -> Result<Route, RouterError> {
        let target = self.resolve(name, session)?;
        self.commit(target, true);
        Ok(target)
    }

    /// Navigate to the route matching `path`, applying guard redirects.
    pub fn push_path(&mut self, path: &str, session: &dyn SessionView) -> Result<Route, RouterError> {
        let route = self
            .table
            .by_path(path)
            .ok_or_else(|| RouterError::UnknownPath(path.to_string()))?;
        self.push(route.name, session)
    }

    /// Return to the previous route. The guard still runs, so a protected
    /// route left before logout resolves to the login screen.
    pub fn back(&mut self, session: &dyn SessionView) -> Result<Option<Route>, RouterError> {
        let Some(previous) = self.history.pop() else {
            return Ok(None);
        };
        let target = self.resolve(previous.name, session)?;
        self.commit(target, false);
        Ok(Some(target))
    }

    /// Re-run the guard against the current route, e.g. after the session changed.
    pub fn reload(&mut self, session: &dyn SessionView) -> Result<Option<Route>, RouterError> {
        let Some(current) = self.current else {
            return Ok(None);
        };
        let target = self.resolve(current.name, session)?;
        self.commit(target, false);
        Ok(Some(target))
    }

    /// Follow guard decisions from `name` until one proceeds.
    fn resolve(&self, name: &str, session: &dyn SessionView) -> Result<Route, RouterError> {
        let guard = NavigationGuard::new(session);
        let mut target = self
            .table
            .by_name(name)
            .ok_or_else(|| RouterError::UnknownRoute(name.to_string()))?;

        let mut redirects = 0;
        loop {
            match guard.decide(&target, self.current.as_ref()) {
                Decision::Proceed => return Ok(target),
                Decision::RedirectTo(next) => {
                    if redirects == MAX_REDIRECTS {
                        return Err(RouterError::RedirectLoop {
                            target: name.to_string(),
                            limit: MAX_REDIRECTS,
                        });
                    }
                    redirects += 1;
                    debug!(from = target.name, to = next, "Guard redirected navigation");
                    target = self
                        .table
                        .by_name(next)
                        .ok_or_else(|| RouterError::UnknownRoute(next.to_string()))?;
                }
            }
        }
    }

    /// Make `target` current. Pushing a route already in the history unwinds
    /// back to it instead of stacking a second entry.
    fn commit(&mut self, target: Route, record_history: bool) {
        if self.current == Some(target) {
            return;
        }
        if let Some(previous) = self.current.replace(target) {
            if record_history {
                match self.history.iter().position(|r| *r == target) {
                    Some(index) => self.history.truncate(index),
                    None => self.history.push(previous),
                }
            }
        }
        info!(route = target.name, path = target.path, "Navigated");
    }
}

impl Default for Router {
    fn default() -> Self {
        Self::new(RouteTable::standard())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::SessionStore;
    use crate::router::route::{RouteMeta, DASHBOARD, LOGIN, MEETING_FORM};
    use crate::storage::MemoryStorage;

    fn store() -> SessionStore {
        SessionStore::open(Box::new(MemoryStorage::new()))
    }

    #[test]
    fn test_anonymous_start_lands_on_login() {
        let session = store();
        let mut router = Router::default();

        let landed = router.push(DASHBOARD, &session).unwrap();

        assert_eq!(landed.name, LOGIN);
        assert_eq!(router.current_name(), Some(LOGIN));
        assert!(!router.can_go_back());
    }

    #[test]
    fn test_anonymous_push_to_form_lands_on_login() {
        let session = store();
        let mut router = Router::default();
        router.push(LOGIN, &session).unwrap();

        assert_eq!(router.push(MEETING_FORM, &session).unwrap().name, LOGIN);
    }

    #[test]
    fn test_authenticated_push_to_login_lands_on_dashboard() {
        let mut session = store();
        session.establish("xyz");
        let mut router = Router::default();
        router.push(MEETING_FORM, &session).unwrap();

        assert_eq!(router.push(LOGIN, &session).unwrap().name, DASHBOARD);
        assert_eq!(router.current_name(), Some(DASHBOARD));
    }

    #[test]
    fn test_login_flow() {
        let mut session = store();
        let mut router = Router::default();
        router.push(DASHBOARD, &session).unwrap();
        assert_eq!(router.current_name(), Some(LOGIN));

        session.establish("xyz");
        router.push(DASHBOARD, &session).unwrap();
        assert_eq!(router.current_name(), Some(DASHBOARD));

        router.push(MEETING_FORM, &session).unwrap();
        assert_eq!(router.current_name(), Some(MEETING_FORM));
    }

    #[test]
    fn test_reload_after_logout_leaves_protected_route() {
        let mut session = store();
        session.establish("xyz");
        let mut router = Router::default();
        router.push(MEETING_FORM, &session).unwrap();

        session.clear();
        let landed = router.reload(&session).unwrap();

        assert_eq!(landed.map(|r| r.name), Some(LOGIN));
    }

    #[test]
    fn test_reload_before_first_navigation() {
        let session = store();
        let mut router = Router::default();
        assert_eq!(router.reload(&session).unwrap(), None);
    }

    #[test]
    fn test_back_runs_guard() {
        let mut session = store();
        session.establish("xyz");
        let mut router = Router::default();
        router.push(DASHBOARD, &session).unwrap();
        router.push(MEETING_FORM, &session).unwrap();

        let back = router.back(&session).unwrap();
        assert_eq!(back.map(|r| r.name), Some(DASHBOARD));
        assert_eq!(router.back(&session).unwrap(), None);

        router.push(MEETING_FORM, &session).unwrap();
        session.clear();
        let back = router.back(&session).unwrap();
        assert_eq!(back.map(|r| r.name), Some(LOGIN));
    }

    #[test]
    fn test_same_route_push_keeps_history_flat() {
        let mut session = store();
        session.establish("xyz");
        let mut router = Router::default();
        router.push(DASHBOARD, &session).unwrap();
        router.push(DASHBOARD, &session).unwrap();
        assert!(!router.can_go_back());
    }

    #[test]
    fn test_returning_to_earlier_route_unwinds_history() {
        let mut session = store();
        session.establish("xyz");
        let mut router = Router::default();
        router.push(DASHBOARD, &session).unwrap();

        for _ in 0..5 {
            router.push(MEETING_FORM, &session).unwrap();
            router.push(DASHBOARD, &session).unwrap();
        }
        assert!(!router.can_go_back());

        router.push(MEETING_FORM, &session).unwrap();
        assert_eq!(router.back(&session).unwrap().map(|r| r.name), Some(DASHBOARD));
        assert!(!router.can_go_back());
    }

    #[test]
    fn test_push_path() {
        let mut session = store();
        session.establish("xyz");
        let mut router = Router::default();

        assert_eq!(router.push_path("/form", &session).unwrap().name, MEETING_FORM);
        assert_eq!(
            router.push_path("/nowhere", &session),
            Err(RouterError::UnknownPath("/nowhere".to_string()))
        );
    }

    #[test]
    fn test_unknown_route_is_an_error() {
        let session = store();
        let mut router = Router::default();
        assert_eq!(
            router.push("settings", &session),
            Err(RouterError::UnknownRoute("settings".to_string()))
        );
        assert_eq!(router.current(), None);
    }

    #[test]
    fn test_redirect_loop_is_detected() {
        let session = store();
        let table = RouteTable::new(vec![Route::new(LOGIN, "/login", RouteMeta::protected())]);
        let mut router = Router::new(table);

        assert_eq!(
            router.push(LOGIN, &session),
            Err(RouterError::RedirectLoop {
                target: LOGIN.to_string(),
                limit: MAX_REDIRECTS,
            })
        );
    }

    #[test]
    fn test_redirect_to_missing_route() {
        let session = store();
        let table = RouteTable::new(vec![Route::new(DASHBOARD, "/", RouteMeta::protected())]);
        let mut router = Router::new(table);

        assert_eq!(
            router.push(DASHBOARD, &session),
            Err(RouterError::UnknownRoute(LOGIN.to_string()))
        );
    }
}

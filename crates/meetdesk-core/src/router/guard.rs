use super::route::{Route, DASHBOARD, LOGIN};
use crate::auth::SessionView;

/// Outcome of a guard check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Proceed,
    /// Navigate to the named route instead
    RedirectTo(&'static str),
}

/// Decides whether a route transition may complete.
///
/// The guard holds a borrowed view of the session and never mutates it.
/// Rules are evaluated in a fixed order and the first match wins:
///
/// 1. protected target while anonymous: redirect to `Login`
/// 2. `Login` while authenticated: redirect to `dashboard`
/// 3. anything else proceeds
pub struct NavigationGuard<'a> {
    session: &'a dyn SessionView,
}

impl<'a> NavigationGuard<'a> {
    pub fn new(session: &'a dyn SessionView) -> Self {
        Self { session }
    }

    /// `_from` is the route being left, `None` on the first navigation.
    pub fn decide(&self, to: &Route, _from: Option<&Route>) -> Decision {
        let authenticated = self.session.is_authenticated();

        if to.requires_auth() && !authenticated {
            return Decision::RedirectTo(LOGIN);
        }

        if authenticated && to.name == LOGIN {
            return Decision::RedirectTo(DASHBOARD);
        }

        Decision::Proceed
    }
}

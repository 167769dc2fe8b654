/// Route names referenced by logical name rather than by path
pub const DASHBOARD: &str = "dashboard";
pub const MEETING_FORM: &str = "MeetingForm";
pub const LOGIN: &str = "Login";

/// Static per-route configuration consulted by the guard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RouteMeta {
    /// `None` when the route does not declare it; treated as public.
    pub requires_auth: Option<bool>,
}

impl RouteMeta {
    pub fn protected() -> Self {
        Self {
            requires_auth: Some(true),
        }
    }

    pub fn requires_auth(&self) -> bool {
        self.requires_auth.unwrap_or(false)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Route {
    pub name: &'static str,
    pub path: &'static str,
    pub meta: RouteMeta,
}

impl Route {
    pub const fn new(name: &'static str, path: &'static str, meta: RouteMeta) -> Self {
        Self { name, path, meta }
    }

    pub fn requires_auth(&self) -> bool {
        self.meta.requires_auth()
    }

    /// Get the display title for this route.
    pub fn title(&self) -> &'static str {
        match self.name {
            DASHBOARD => "Dashboard",
            MEETING_FORM => "New Meeting",
            LOGIN => "Login",
            other => other,
        }
    }
}

#[derive(Debug, Clone)]
pub struct RouteTable {
    routes: Vec<Route>,
}

impl RouteTable {
    pub fn new(routes: Vec<Route>) -> Self {
        Self { routes }
    }

    /// The application's routes: two protected screens and a public login.
    pub fn standard() -> Self {
        Self::new(vec![
            Route::new(DASHBOARD, "/", RouteMeta::protected()),
            Route::new(MEETING_FORM, "/form", RouteMeta::protected()),
            Route::new(LOGIN, "/login", RouteMeta::default()),
        ])
    }

    pub fn by_name(&self, name: &str) -> Option<Route> {
        self.routes.iter().find(|r| r.name == name).copied()
    }

    /// Match a path, ignoring a trailing slash (except on the root).
    pub fn by_path(&self, path: &str) -> Option<Route> {
        let normalized = if path.len() > 1 {
            path.trim_end_matches('/')
        } else {
            path
        };
        self.routes.iter().find(|r| r.path == normalized).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Route> {
        self.routes.iter()
    }
}

impl Default for RouteTable {
    fn default() -> Self {
        Self::standard()
    }
}

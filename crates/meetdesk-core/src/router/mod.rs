//! Route table, navigation guard, and router.
//!
//! The router owns the table and the current route. Before each transition
//! it asks the guard for a decision, following redirects until the guard
//! lets a navigation proceed. The guard reads the session and nothing else.

pub mod guard;
pub mod navigator;
pub mod route;

pub use guard::{Decision, NavigationGuard};
pub use navigator::{Router, MAX_REDIRECTS};
pub use route::{Route, RouteMeta, RouteTable, DASHBOARD, LOGIN, MEETING_FORM};

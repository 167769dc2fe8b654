//! Authentication module for holding the user session.
//!
//! This module provides:
//! - `SessionStore`: the single source of truth for "is there a session"
//! - `SessionSnapshot`: the persisted form written to durable storage
//! - `SessionView`: the read-only view the navigation guard consults
//!
//! Sessions carry one opaque token and are persisted on every change.

pub mod session;

pub use session::{SessionSnapshot, SessionStore, SessionView, STORE_KEY};

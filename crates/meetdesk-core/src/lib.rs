//! Core library for meetdesk.
//!
//! - `auth`: the persisted session store
//! - `storage`: durable key-value backends the store writes into
//! - `router`: route table, navigation guard, and router
//! - `theme`: palette and semantic highlight preset
//! - `config`: on-disk application configuration

pub mod auth;
pub mod config;
pub mod error;
pub mod router;
pub mod storage;
pub mod theme;

pub use auth::{SessionStore, SessionView};
pub use config::Config;
pub use error::{RouterError, StorageError};
pub use router::{Decision, NavigationGuard, Route, RouteTable, Router};
pub use storage::Storage;

//! Durable key-value storage for persisted application state.
//!
//! This module provides:
//! - `Storage`: the read/write/remove contract every backend implements
//! - `FileStorage`: one JSON file per key inside a data directory
//! - `KeyringStorage`: one OS keychain entry per key
//! - `MemoryStorage`: an in-process map, shared between clones
//!
//! Values are opaque strings; callers own their serialization format.

pub mod file;
pub mod keychain;
pub mod memory;

pub use file::FileStorage;
pub use keychain::KeyringStorage;
pub use memory::MemoryStorage;

use crate::error::StorageError;

pub trait Storage {
    /// Read the value stored under `key`, or `None` if nothing was written.
    fn read(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Replace the value stored under `key`.
    fn write(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Delete the value stored under `key`. Removing a missing key is not an error.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

impl<S: Storage + ?Sized> Storage for Box<S> {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).read(key)
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).write(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        (**self).remove(key)
    }
}

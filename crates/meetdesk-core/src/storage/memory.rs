use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use super::Storage;
use crate::error::StorageError;

/// In-process storage. Clones share one map, so a value written through one
/// handle is visible to a store opened later on another.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl Storage for MemoryStorage {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.entries.borrow_mut().remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_entries() {
        let storage = MemoryStorage::new();
        let other = storage.clone();

        storage.write("authStore", "value").unwrap();

        assert_eq!(other.read("authStore").unwrap().as_deref(), Some("value"));
        assert_eq!(other.len(), 1);
    }

    #[test]
    fn test_remove_missing_key() {
        let storage = MemoryStorage::new();
        storage.remove("nothing").unwrap();
        assert!(storage.is_empty());
    }
}

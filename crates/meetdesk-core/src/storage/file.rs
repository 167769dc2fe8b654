use std::path::PathBuf;

use tracing::debug;

use super::Storage;
use crate::error::StorageError;

/// Stores each key as `<dir>/<key>.json`.
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl Storage for FileStorage {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.path_for(key);
        if !path.exists() {
            return Ok(None);
        }

        let contents = std::fs::read_to_string(&path).map_err(|e| StorageError::io(key, e))?;
        debug!(?path, bytes = contents.len(), "Read storage file");
        Ok(Some(contents))
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        std::fs::create_dir_all(&self.dir).map_err(|e| StorageError::io(key, e))?;

        let path = self.path_for(key);
        // Write to a sibling file and rename so readers never see a partial snapshot
        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, value).map_err(|e| StorageError::io(key, e))?;
        std::fs::rename(&tmp, &path).map_err(|e| StorageError::io(key, e))?;
        debug!(?path, bytes = value.len(), "Wrote storage file");
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let path = self.path_for(key);
        if path.exists() {
            std::fs::remove_file(&path).map_err(|e| StorageError::io(key, e))?;
        }
        Ok(())
    }
}

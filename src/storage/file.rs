//! Directory-backed store

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use crate::storage::{KeyValueStore, StorageError};

/// Stores each key as `<key>.json` inside a directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Create a store rooted at `dir`. The directory is created on first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Directory holding the stored files.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StorageError> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');

        if !valid {
            return Err(StorageError::InvalidKey(key.to_string()));
        }

        Ok(self.dir.join(format!("{key}.json")))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.path_for(key)?;

        match fs::read_to_string(path) {
            Ok(raw) => Ok(Some(raw)),
            Err(error) if error.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(error) => Err(error.into()),
        }
    }

    fn set(&mut self, key: &str, value: String) -> Result<(), StorageError> {
        let path = self.path_for(key)?;

        fs::create_dir_all(&self.dir)?;
        fs::write(path, value)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn missing_file_reads_as_none() -> TestResult {
        let dir = tempfile::tempdir()?;
        let store = FileStore::new(dir.path());

        assert_eq!(store.get("shoppingCart")?, None);

        Ok(())
    }

    #[test]
    fn set_creates_directory_and_file() -> TestResult {
        let dir = tempfile::tempdir()?;
        let mut store = FileStore::new(dir.path().join("nested"));

        store.set("orderHistory", "[]".to_string())?;

        assert!(dir.path().join("nested").join("orderHistory.json").exists());
        assert_eq!(store.get("orderHistory")?, Some("[]".to_string()));

        Ok(())
    }

    #[test]
    fn rejects_path_like_keys() -> TestResult {
        let dir = tempfile::tempdir()?;
        let mut store = FileStore::new(dir.path());

        for key in ["", "../escape", "a/b", "cart.json"] {
            assert!(
                matches!(store.set(key, "[]".to_string()), Err(StorageError::InvalidKey(_))),
                "key {key:?} should be rejected"
            );
        }

        Ok(())
    }
}

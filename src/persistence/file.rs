//! File-backed store

use std::{
    collections::BTreeMap,
    fs, io,
    path::{Path, PathBuf},
};

use tracing::debug;

use crate::persistence::{KeyValueStore, PersistenceError};

/// [`KeyValueStore`] kept in a single JSON object on disk.
///
/// The whole document is read once on open and rewritten on every
/// [`set`](KeyValueStore::set). A missing or blank file is an empty store.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl FileStore {
    /// Open the store at `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or is not a
    /// JSON object of strings.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, PersistenceError> {
        let path = path.into();

        let entries = match fs::read_to_string(&path) {
            Ok(contents) if contents.trim().is_empty() => BTreeMap::new(),
            Ok(contents) => serde_json::from_str(&contents)?,
            Err(error) if error.kind() == io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "state file not found, starting empty");

                BTreeMap::new()
            }
            Err(error) => return Err(error.into()),
        };

        Ok(Self { path, entries })
    }

    /// Location of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) -> Result<(), PersistenceError> {
        let contents = serde_json::to_string_pretty(&self.entries)?;

        fs::write(&self.path, contents)?;

        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, PersistenceError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), PersistenceError> {
        self.entries.insert(key.to_string(), value.to_string());

        self.flush()
    }
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;
    use testresult::TestResult;

    use super::*;

    #[test]
    fn missing_file_opens_empty() -> TestResult {
        let dir = tempdir()?;
        let store = FileStore::open(dir.path().join("state.json"))?;

        assert_eq!(store.get("providers")?, None);

        Ok(())
    }

    #[test]
    fn blank_file_opens_empty() -> TestResult {
        let dir = tempdir()?;
        let path = dir.path().join("state.json");

        fs::write(&path, "\n")?;

        let store = FileStore::open(&path)?;

        assert_eq!(store.get("prediscount")?, None);

        Ok(())
    }

    #[test]
    fn values_survive_reopen() -> TestResult {
        let dir = tempdir()?;
        let path = dir.path().join("state.json");

        let mut store = FileStore::open(&path)?;
        store.set("prediscount", "100000")?;
        store.set("providers", "[]")?;

        let reopened = FileStore::open(&path)?;

        assert_eq!(reopened.get("prediscount")?.as_deref(), Some("100000"));
        assert_eq!(reopened.get("providers")?.as_deref(), Some("[]"));
        assert_eq!(reopened.path(), path.as_path());

        Ok(())
    }

    #[test]
    fn malformed_file_is_rejected() -> TestResult {
        let dir = tempdir()?;
        let path = dir.path().join("state.json");

        fs::write(&path, "not json")?;

        assert!(matches!(
            FileStore::open(&path),
            Err(PersistenceError::Json(_))
        ));

        Ok(())
    }

    #[test]
    fn unwritable_location_fails_set() -> TestResult {
        let dir = tempdir()?;
        let mut store = FileStore::open(dir.path().join("missing").join("state.json"))?;

        assert!(matches!(
            store.set("prediscount", "1"),
            Err(PersistenceError::Io(_))
        ));

        Ok(())
    }
}

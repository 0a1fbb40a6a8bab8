// Session store - string key-value persistence for the session identity

use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::debug;

use crate::error::{AppError, AppResult};

pub trait SessionStore: Send + Sync {
    fn get(&self, key: &str) -> AppResult<Option<String>>;
    fn set(&self, key: &str, value: &str) -> AppResult<()>;
    fn remove(&self, key: &str) -> AppResult<()>;
}

/// Process-local store; nothing survives a restart
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    values: Mutex<HashMap<String, String>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemorySessionStore {
    fn get(&self, key: &str) -> AppResult<Option<String>> {
        let values = self
            .values
            .lock()
            .map_err(|e| AppError::Internal(format!("session store lock poisoned: {}", e)))?;
        Ok(values.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> AppResult<()> {
        let mut values = self
            .values
            .lock()
            .map_err(|e| AppError::Internal(format!("session store lock poisoned: {}", e)))?;
        values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> AppResult<()> {
        let mut values = self
            .values
            .lock()
            .map_err(|e| AppError::Internal(format!("session store lock poisoned: {}", e)))?;
        values.remove(key);
        Ok(())
    }
}

/// One file per key under a directory, created on first write
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    dir: PathBuf,
}

impl FileSessionStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        let name: String = key
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() || c == '.' || c == '-' || c == '_' { c } else { '_' })
            .collect();
        self.dir.join(format!("{}.json", name))
    }
}

impl SessionStore for FileSessionStore {
    fn get(&self, key: &str) -> AppResult<Option<String>> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(raw) => Ok(Some(raw)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&self, key: &str, value: &str) -> AppResult<()> {
        fs::create_dir_all(&self.dir)?;
        let path = self.path_for(key);
        fs::write(&path, value)?;
        debug!("Wrote session key {} to {}", key, path.display());
        Ok(())
    }

    fn remove(&self, key: &str) -> AppResult<()> {
        match fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_set_get_remove() {
        let store = MemorySessionStore::new();
        assert_eq!(store.get("k").unwrap(), None);
        store.set("k", "v").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("v"));
        store.remove("k").unwrap();
        assert_eq!(store.get("k").unwrap(), None);
    }

    #[test]
    fn test_file_store_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSessionStore::new(dir.path().join("session"));
        assert_eq!(store.get("campus_graph.session.user").unwrap(), None);

        store.set("campus_graph.session.user", "{\"id\":\"1\"}").unwrap();
        let reopened = FileSessionStore::new(dir.path().join("session"));
        assert_eq!(
            reopened.get("campus_graph.session.user").unwrap().as_deref(),
            Some("{\"id\":\"1\"}")
        );

        reopened.remove("campus_graph.session.user").unwrap();
        reopened.remove("campus_graph.session.user").unwrap();
        assert_eq!(store.get("campus_graph.session.user").unwrap(), None);
    }

    #[test]
    fn test_file_store_sanitizes_key() {
        let store = FileSessionStore::new("/tmp/sessions");
        assert_eq!(
            store.path_for("../user key"),
            PathBuf::from("/tmp/sessions/.._user_key.json")
        );
    }
}

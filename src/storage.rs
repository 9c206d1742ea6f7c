//! File-backed key-value store
//!
//! All keys live in one JSON object file inside the data directory.
//! Writes go to a temp file first and are renamed over the original, so
//! a crash mid-write leaves the previous contents intact.

use baggage_check_common::{Error as CoreError, KeyValueStore, Result as CoreResult};
use parking_lot::Mutex;
use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;

const STORE_FILE_NAME: &str = "store.json";

pub struct FileStore {
    path: PathBuf,
    lock: Mutex<()>,
}

fn unavailable(path: &Path, e: impl std::fmt::Display) -> CoreError {
    CoreError::StorageUnavailable(format!("{}: {}", path.display(), e))
}

impl FileStore {
    /// Store inside `dir`; nothing is created until the first write
    pub fn open(dir: &Path) -> Self {
        Self {
            path: dir.join(STORE_FILE_NAME),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> CoreResult<BTreeMap<String, String>> {
        let content = match fs::read_to_string(&self.path) {
            Ok(c) => c,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(e) => return Err(unavailable(&self.path, e)),
        };
        if content.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        // a damaged file is reported, never silently replaced
        serde_json::from_str(&content).map_err(|e| unavailable(&self.path, e))
    }

    fn write_all(&self, values: &BTreeMap<String, String>) -> CoreResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| unavailable(parent, e))?;
        }

        let content = serde_json::to_string_pretty(values)?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, content).map_err(|e| unavailable(&tmp, e))?;
        fs::rename(&tmp, &self.path).map_err(|e| unavailable(&self.path, e))?;
        debug!(path = %self.path.display(), keys = values.len(), "store written");
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> CoreResult<Option<String>> {
        let _guard = self.lock.lock();
        Ok(self.read_all()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> CoreResult<()> {
        let _guard = self.lock.lock();
        let mut values = self.read_all()?;
        values.insert(key.to_string(), value.to_string());
        self.write_all(&values)
    }

    fn remove(&self, key: &str) -> CoreResult<()> {
        let _guard = self.lock.lock();
        let mut values = self.read_all()?;
        if values.remove(key).is_none() {
            return Ok(());
        }
        self.write_all(&values)
    }
}

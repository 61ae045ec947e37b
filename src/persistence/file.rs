//! JSON-file backed store for native hosts

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use super::{ScoreStore, StoreError};

/// Stores every key in one JSON object: `{ "key": 123 }`
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<BTreeMap<String, u64>, StoreError> {
        match fs::read_to_string(&self.path) {
            Ok(json) => Ok(serde_json::from_str(&json)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(e.into()),
        }
    }
}

impl ScoreStore for JsonFileStore {
    fn get(&self, key: &str) -> Option<u64> {
        match self.read_all() {
            Ok(values) => values.get(key).copied(),
            Err(e) => {
                log::warn!("Ignoring unreadable store {}: {}", self.path.display(), e);
                None
            }
        }
    }

    fn set(&mut self, key: &str, value: u64) -> Result<(), StoreError> {
        // A corrupt file is replaced rather than blocking the write
        let mut values = self.read_all().unwrap_or_default();
        values.insert(key.to_string(), value);

        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir)?;
        }
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, serde_json::to_string_pretty(&values)?)?;
        fs::rename(&tmp, &self.path)?;
        log::debug!("Stored {}={} in {}", key, value, self.path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!(
            "star_invaders_{}_{}.json",
            name,
            std::process::id()
        ))
    }

    #[test]
    fn test_missing_file_reads_absent() {
        let store = JsonFileStore::new(temp_path("missing"));
        assert_eq!(store.get("anything"), None);
    }

    #[test]
    fn test_set_then_get_persists_across_instances() {
        let path = temp_path("persist");
        let mut store = JsonFileStore::new(&path);
        store.set("best", 120).unwrap();
        store.set("other", 7).unwrap();

        let reopened = JsonFileStore::new(&path);
        assert_eq!(reopened.get("best"), Some(120));
        assert_eq!(reopened.get("other"), Some(7));

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_corrupt_file_reads_absent_and_is_overwritten() {
        let path = temp_path("corrupt");
        fs::write(&path, "not json").unwrap();
        let mut store = JsonFileStore::new(&path);

        assert_eq!(store.get("best"), None);
        store.set("best", 30).unwrap();
        assert_eq!(store.get("best"), Some(30));

        let _ = fs::remove_file(&path);
    }
}

//! File-backed settings store persisting all keys as one JSON object.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use super::SettingsStore;

/// Settings store that mirrors its contents to a single JSON file.
///
/// The file is read once when the store is opened and rewritten after every
/// mutation. I/O and deserialization failures are logged and swallowed: a
/// missing or corrupt file yields an empty store, and a failed write leaves
/// the in-memory state authoritative until the next successful flush.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    entries: Mutex<HashMap<String, String>>,
}

impl JsonFileStore {
    /// What: Open a store backed by the JSON file at `path`.
    ///
    /// Inputs:
    /// - `path`: File to read existing entries from and flush mutations to
    ///
    /// Output:
    /// - A store seeded with the file's contents, or empty if the file is
    ///   missing or does not parse
    ///
    /// Details:
    /// - Silently tolerates a missing file (first run); logs a warning and
    ///   starts empty when the file exists but does not parse.
    #[must_use]
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = Self::load(&path);
        Self {
            path,
            entries: Mutex::new(entries),
        }
    }

    /// Read and parse the backing file, tolerating all failures.
    fn load(path: &Path) -> HashMap<String, String> {
        match fs::read_to_string(path) {
            Ok(body) => match serde_json::from_str::<HashMap<String, String>>(&body) {
                Ok(entries) => entries,
                Err(e) => {
                    tracing::warn!(
                        path = %path.display(),
                        error = %e,
                        "settings file is corrupt; starting with an empty store"
                    );
                    HashMap::new()
                }
            },
            // Missing file on first run is the normal case
            Err(_) => HashMap::new(),
        }
    }

    /// Write the current entries back to disk, logging failures.
    fn flush(&self, entries: &HashMap<String, String>) {
        let body = match serde_json::to_string(entries) {
            Ok(body) => body,
            Err(e) => {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %e,
                    "failed to serialize settings for flush"
                );
                return;
            }
        };
        // Ensure parent directory exists before writing
        if let Some(parent) = self.path.parent()
            && let Err(e) = fs::create_dir_all(parent)
        {
            tracing::warn!(
                path = %self.path.display(),
                error = %e,
                "failed to create parent directory for settings file"
            );
            return;
        }
        if let Err(e) = fs::write(&self.path, body) {
            tracing::warn!(
                path = %self.path.display(),
                error = %e,
                "failed to write settings file"
            );
        }
    }
}

impl SettingsStore for JsonFileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries
            .lock()
            .ok()
            .and_then(|guard| guard.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) {
        if let Ok(mut guard) = self.entries.lock() {
            guard.insert(key.to_string(), value.to_string());
            self.flush(&guard);
        }
    }

    fn remove(&self, key: &str) {
        if let Ok(mut guard) = self.entries.lock()
            && guard.remove(key).is_some()
        {
            self.flush(&guard);
        }
    }

    fn keys_with_prefix(&self, prefix: &str) -> Vec<String> {
        self.entries.lock().map_or_else(
            |_| Vec::new(),
            |guard| {
                guard
                    .keys()
                    .filter(|k| k.starts_with(prefix))
                    .cloned()
                    .collect()
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reopen_reads_back_flushed_entries() {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        let path = dir.path().join("settings.json");

        {
            let store = JsonFileStore::open(&path);
            store.set("translation_version", "v1");
            store.set("translation-greeting", r#"{"en":"Hello"}"#);
        }

        let reopened = JsonFileStore::open(&path);
        assert_eq!(
            reopened.get("translation_version"),
            Some("v1".to_string())
        );
        assert_eq!(
            reopened.get("translation-greeting"),
            Some(r#"{"en":"Hello"}"#.to_string())
        );
    }

    #[test]
    fn corrupt_file_yields_empty_store() {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        let path = dir.path().join("settings.json");
        fs::write(&path, "not json at all").expect("failed to write file");

        let store = JsonFileStore::open(&path);
        assert_eq!(store.get("translation_version"), None);
        assert!(store.keys_with_prefix("").is_empty());
    }

    #[test]
    fn missing_parent_directory_is_created_on_write() {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        let path = dir.path().join("nested").join("settings.json");

        let store = JsonFileStore::open(&path);
        store.set("a", "1");
        assert!(path.exists());
        assert_eq!(JsonFileStore::open(&path).get("a"), Some("1".to_string()));
    }
}

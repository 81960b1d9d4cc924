//! In-memory settings store for tests and self-persisting hosts.

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use super::SettingsStore;

/// Settings store backed by a `Mutex<HashMap>`.
///
/// Counts every mutation so tests can assert that a sync against an unchanged
/// remote version performs zero writes.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
    writes: AtomicUsize,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of `set`/`remove` calls performed so far.
    #[must_use]
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }
}

impl SettingsStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries
            .lock()
            .ok()
            .and_then(|guard| guard.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) {
        if let Ok(mut guard) = self.entries.lock() {
            guard.insert(key.to_string(), value.to_string());
            self.writes.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn remove(&self, key: &str) {
        if let Ok(mut guard) = self.entries.lock()
            && guard.remove(key).is_some()
        {
            self.writes.fetch_add(1, Ordering::SeqCst);
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

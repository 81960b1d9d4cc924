//! Local persistence for the translation catalog.
//!
//! The engine talks to a generic key-value settings store and owns nothing in
//! memory: every lookup re-reads the store. Two implementations ship with the
//! crate:
//! - [`JsonFileStore`]: one JSON file on disk, resilient startup (a missing or
//!   corrupt file yields an empty store), write failures logged and swallowed
//!   so a full disk never takes lookups down with it.
//! - [`MemoryStore`]: plain in-memory map with a write counter, for tests and
//!   for hosts that manage persistence themselves.
//!
//! # Storage-key scheme
//!
//! - `translation_version` → last-applied catalog version (the Version
//!   Marker, written only after every entry of a fetch has been persisted)
//! - `translation-<key>` → JSON-encoded locale map for one translation key

mod json_file;
mod memory;

pub use json_file::JsonFileStore;
pub use memory::MemoryStore;

/// Storage key holding the last-applied catalog version.
pub const VERSION_KEY: &str = "translation_version";

/// Prefix under which individual catalog entries are stored.
pub const ENTRY_PREFIX: &str = "translation-";

/// What: Derive the storage key for a translation key.
///
/// Inputs:
/// - `translation_key`: Catalog key as served by the remote (e.g. "greeting")
///
/// Output:
/// - Storage key of the form `translation-<key>`
#[must_use]
pub fn entry_key(translation_key: &str) -> String {
    format!("{ENTRY_PREFIX}{translation_key}")
}

/// Generic key-value settings store the engine persists through.
///
/// The API is deliberately infallible: implementations handle their own I/O
/// errors (log and carry on) so a storage hiccup degrades a lookup to its
/// fallback value instead of aborting it.
pub trait SettingsStore {
    /// Return the value stored under `key`, if any.
    fn get(&self, key: &str) -> Option<String>;
    /// Store `value` under `key`, overwriting any existing value.
    fn set(&self, key: &str, value: &str);
    /// Remove the value stored under `key`, if any.
    fn remove(&self, key: &str);
    /// List all keys starting with `prefix`.
    fn keys_with_prefix(&self, prefix: &str) -> Vec<String>;
}

impl<T: SettingsStore + ?Sized> SettingsStore for &T {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) {
        (**self).set(key, value);
    }

    fn remove(&self, key: &str) {
        (**self).remove(key);
    }

    fn keys_with_prefix(&self, prefix: &str) -> Vec<String> {
        (**self).keys_with_prefix(prefix)
    }
}

impl<T: SettingsStore + ?Sized> SettingsStore for std::sync::Arc<T> {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) {
        (**self).set(key, value);
    }

    fn remove(&self, key: &str) {
        (**self).remove(key);
    }

    fn keys_with_prefix(&self, prefix: &str) -> Vec<String> {
        (**self).keys_with_prefix(prefix)
    }
}

#[cfg(test)]
mod tests {
    use super::entry_key;

    #[test]
    fn entry_key_applies_prefix() {
        assert_eq!(entry_key("greeting"), "translation-greeting");
        assert_eq!(entry_key(""), "translation-");
    }
}

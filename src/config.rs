//! Host-supplied service configuration.
//!
//! The embedding application builds a [`ServiceConfig`] once at startup and
//! hands it to [`SyncEngine::new`](crate::engine::SyncEngine::new). An engine
//! constructed without a configuration degrades gracefully: every lookup
//! returns its fallback argument and every sync is a no-op.

/// Identifies the remote translation repository and the locale consulted when
/// the device locale has no translation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    /// Repository identifier; doubles as the `Authorization` credential for
    /// the remote service and as the logical namespace of the catalog.
    pub repository_id: String,
    /// Locale code tried when the device locale misses (e.g. `"en"`).
    pub fallback_locale: String,
}

impl ServiceConfig {
    /// What: Build a configuration from a repository identifier and a
    /// fallback locale.
    ///
    /// Inputs:
    /// - `repository_id`: Remote repository identifier / auth credential
    /// - `fallback_locale`: Locale code used when the device locale misses
    ///
    /// Output:
    /// - An immutable `ServiceConfig` value
    #[must_use]
    pub fn new(repository_id: impl Into<String>, fallback_locale: impl Into<String>) -> Self {
        Self {
            repository_id: repository_id.into(),
            fallback_locale: fallback_locale.into(),
        }
    }
}

//! Sync & lookup engine: the core of the crate.
//!
//! One engine is bound to one repository. Syncing compares the locally
//! persisted Version Marker with the remote version and, on any difference,
//! replaces the whole local catalog: every entry is written (overwriting),
//! entries the remote no longer serves are pruned, and the marker is written
//! last as the commit signal. An interrupted sync therefore leaves the old
//! marker in place and the next sync re-fetches the full catalog, so partial
//! applies heal themselves at the cost of re-downloading unchanged entries.
//!
//! Lookups never touch the network and never fail: missing configuration,
//! missing entries, and corrupt cached blobs all resolve to the caller's
//! fallback string.

use std::collections::{HashMap, HashSet};

use tracing::{debug, info};

use crate::config::ServiceConfig;
use crate::error::SyncError;
use crate::locale::detect_system_locale;
use crate::remote::CatalogClient;
use crate::store::{self, SettingsStore};

/// Outcome of the staleness check: a fetch carries the version to apply, so
/// "stale without a version" is unrepresentable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum FetchDecision {
    /// The local marker matches the remote version.
    UpToDate,
    /// The remote differs; holds the version to apply.
    Stale(String),
}

/// Result of a completed [`SyncEngine::load_translations`] call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncOutcome {
    /// No configuration is set; the sync was skipped without network activity.
    NotConfigured,
    /// The local catalog already matches the remote version; nothing written.
    UpToDate {
        /// The shared local/remote version.
        version: String,
    },
    /// A newer catalog was fetched and fully applied.
    Applied {
        /// The version now recorded in the Version Marker.
        version: String,
        /// Number of catalog entries persisted.
        entries: usize,
    },
}

/// Translation cache engine over a settings store and a catalog client.
pub struct SyncEngine<S, C> {
    store: S,
    client: C,
    config: Option<ServiceConfig>,
    device_locale: String,
    /// Serializes whole refreshes; concurrent sync calls queue here so a
    /// partially applied catalog is never interleaved with another apply.
    refresh_gate: tokio::sync::Mutex<()>,
}

impl<S: SettingsStore, C: CatalogClient> SyncEngine<S, C> {
    /// What: Build an engine, auto-detecting the device locale.
    ///
    /// Inputs:
    /// - `store`: Local settings store holding the cached catalog
    /// - `client`: Remote catalog client
    /// - `config`: Service configuration; `None` puts the engine into
    ///   fallback-only mode (lookups return their fallback, syncs no-op)
    ///
    /// Output:
    /// - Engine whose device locale is the detected system locale, or the
    ///   configured fallback locale when the platform reports none
    #[must_use]
    pub fn new(store: S, client: C, config: Option<ServiceConfig>) -> Self {
        let device_locale = detect_system_locale()
            .or_else(|| config.as_ref().map(|c| c.fallback_locale.clone()))
            .unwrap_or_default();
        Self::with_device_locale(store, client, config, device_locale)
    }

    /// Build an engine with an explicit device locale (language code).
    #[must_use]
    pub fn with_device_locale(
        store: S,
        client: C,
        config: Option<ServiceConfig>,
        device_locale: impl Into<String>,
    ) -> Self {
        Self {
            store,
            client,
            config,
            device_locale: device_locale.into(),
            refresh_gate: tokio::sync::Mutex::new(()),
        }
    }

    /// Language code that lookups resolve against first.
    #[must_use]
    pub fn device_locale(&self) -> &str {
        &self.device_locale
    }

    /// The settings store this engine persists through.
    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// What: Return the locally persisted catalog version.
    ///
    /// Output:
    /// - The Version Marker, or `""` if no sync has ever completed. Pure
    ///   read, no side effects.
    #[must_use]
    pub fn local_version(&self) -> String {
        self.store.get(store::VERSION_KEY).unwrap_or_default()
    }

    /// What: Decide whether the local catalog is stale.
    ///
    /// Inputs:
    /// - `repository_id`: Credential for the remote version endpoint
    ///
    /// Output:
    /// - `Ok(FetchDecision)` comparing versions as plain strings (any byte
    ///   difference counts as stale); `Err` when the remote query fails
    async fn needs_fetch(&self, repository_id: &str) -> Result<FetchDecision, SyncError> {
        let local = self.local_version();
        let remote = self.client.fetch_version(repository_id).await?;
        if remote == local {
            Ok(FetchDecision::UpToDate)
        } else {
            debug!(local = %local, remote = %remote, "local catalog is stale");
            Ok(FetchDecision::Stale(remote))
        }
    }

    /// What: Synchronize the local catalog with the remote repository.
    ///
    /// Output:
    /// - `Ok(SyncOutcome::NotConfigured)` without any network activity when
    ///   no configuration is set
    /// - `Ok(SyncOutcome::UpToDate)` when the remote version matches the
    ///   Version Marker (zero writes)
    /// - `Ok(SyncOutcome::Applied)` after a full catalog replace
    /// - `Err(SyncError)` when either remote call fails; the store is then
    ///   left exactly as it was
    ///
    /// # Errors
    /// - `SyncError::Network` on transport errors or non-200 responses
    /// - `SyncError::Decode` on response bodies of unexpected shape
    ///
    /// Details:
    /// - The whole refresh runs under one lock, so concurrent calls
    ///   serialize instead of racing the multi-key write.
    /// - Every locale map is serialized before the first write (staging), so
    ///   a catalog that fails to encode leaves the store untouched.
    /// - Entries are overwritten, entries absent from the new catalog are
    ///   removed, and the Version Marker is written last: if the process dies
    ///   mid-apply the marker still names the old version and the next sync
    ///   repeats the full fetch.
    pub async fn load_translations(&self) -> Result<SyncOutcome, SyncError> {
        let Some(config) = &self.config else {
            debug!("no configuration set; skipping translation sync");
            return Ok(SyncOutcome::NotConfigured);
        };

        let _gate = self.refresh_gate.lock().await;

        let version = match self.needs_fetch(&config.repository_id).await? {
            FetchDecision::UpToDate => {
                let version = self.local_version();
                debug!(version = %version, "local catalog up to date");
                return Ok(SyncOutcome::UpToDate { version });
            }
            FetchDecision::Stale(version) => version,
        };

        let catalog = self.client.fetch_catalog(&config.repository_id).await?;

        // Stage every entry before the first write so an unencodable catalog
        // cannot leave a half-applied store behind.
        let mut staged: Vec<(String, String)> = Vec::with_capacity(catalog.len());
        for (key, locales) in &catalog {
            let blob = serde_json::to_string(locales)
                .map_err(|e| SyncError::Decode(format!("entry {key} failed to encode: {e}")))?;
            staged.push((store::entry_key(key), blob));
        }

        for (storage_key, blob) in &staged {
            self.store.set(storage_key, blob);
        }

        // Prune entries the remote no longer serves
        let kept: HashSet<&str> = staged.iter().map(|(k, _)| k.as_str()).collect();
        for stale_key in self
            .store
            .keys_with_prefix(store::ENTRY_PREFIX)
            .iter()
            .filter(|k| !kept.contains(k.as_str()))
        {
            debug!(key = %stale_key, "pruning entry absent from new catalog");
            self.store.remove(stale_key);
        }

        // Commit: the marker only advances once every entry is persisted
        self.store.set(store::VERSION_KEY, &version);
        info!(
            version = %version,
            entries = staged.len(),
            "applied translation catalog"
        );
        Ok(SyncOutcome::Applied {
            version,
            entries: staged.len(),
        })
    }

    /// What: Resolve a translation key to a display string.
    ///
    /// Inputs:
    /// - `key`: Translation key as served by the remote catalog
    /// - `fallback`: String returned when no cached translation applies
    ///
    /// Output:
    /// - The translation for the device locale, else for the configured
    ///   fallback locale, else `fallback`
    ///
    /// Details:
    /// - Re-reads the store on every call; nothing is cached in memory.
    /// - Missing configuration, a missing entry, and a corrupt cached blob
    ///   all resolve to `fallback` (the blob case is logged).
    #[must_use]
    pub fn translate(&self, key: &str, fallback: &str) -> String {
        let Some(config) = &self.config else {
            return fallback.to_string();
        };
        let Some(blob) = self.store.get(&store::entry_key(key)) else {
            return fallback.to_string();
        };
        let locales: HashMap<String, String> = match serde_json::from_str(&blob) {
            Ok(map) => map,
            Err(e) => {
                tracing::warn!(
                    key,
                    error = %e,
                    "cached translation entry is corrupt; using fallback"
                );
                return fallback.to_string();
            }
        };
        if let Some(translation) = locales.get(&self.device_locale) {
            return translation.clone();
        }
        if let Some(translation) = locales.get(&config.fallback_locale) {
            return translation.clone();
        }
        debug!(key, "no translation for device or fallback locale");
        fallback.to_string()
    }

    /// Equivalent to [`translate`](Self::translate) with an empty fallback.
    #[must_use]
    pub fn translate_key(&self, key: &str) -> String {
        self.translate(key, "")
    }
}

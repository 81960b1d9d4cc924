//! Client-side translation catalog cache: versioned sync against a remote
//! repository plus locale-fallback lookup through a pluggable local store.
//!
//! ```rust,no_run
//! use lexicache::{HttpCatalogClient, JsonFileStore, ServiceConfig, SyncEngine};
//!
//! # async fn demo() {
//! let engine = SyncEngine::new(
//!     JsonFileStore::open("/tmp/translations.json"),
//!     HttpCatalogClient::default(),
//!     Some(ServiceConfig::new("repo-1", "en")),
//! );
//! if let Err(e) = engine.load_translations().await {
//!     tracing::warn!(error = %e, "translation sync failed");
//! }
//! let greeting = engine.translate("greeting", "Hello");
//! # let _ = greeting;
//! # }
//! ```

pub mod config;
pub mod engine;
pub mod error;
pub mod locale;
pub mod remote;
pub mod store;

pub use config::ServiceConfig;
pub use engine::{SyncEngine, SyncOutcome};
pub use error::SyncError;
pub use locale::detect_system_locale;
pub use remote::{Catalog, CatalogClient, DEFAULT_BASE_URL, HttpCatalogClient};
pub use store::{JsonFileStore, MemoryStore, SettingsStore};

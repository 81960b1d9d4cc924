//! Remote catalog client: authenticated GETs against the translation service.

use std::collections::HashMap;
use std::sync::LazyLock;
use std::time::Duration;

use serde_json::Value;
use tracing::{debug, warn};

use crate::error::SyncError;

/// Full catalog as served by the list endpoint: translation key -> locale map.
pub type Catalog = HashMap<String, HashMap<String, String>>;

/// Base URL of the hosted translation service.
pub const DEFAULT_BASE_URL: &str = "https://translate.alexanderwodarz.de/api";

/// Shared HTTP client with connection pooling for catalog fetching.
/// Connection pooling is enabled by default in `reqwest::Client`.
static HTTP_CLIENT: LazyLock<reqwest::Client> = LazyLock::new(|| {
    reqwest::Client::builder()
        .connect_timeout(Duration::from_secs(15))
        .timeout(Duration::from_secs(30))
        .user_agent(format!("lexicache/{}", env!("CARGO_PKG_VERSION")))
        .build()
        .expect("Failed to create HTTP client")
});

/// Access to the remote translation service.
///
/// The engine is generic over this trait so tests (and alternate transports)
/// can stand in for the HTTP client. Both calls are single best-effort
/// attempts; retry policy is deliberately out of scope.
pub trait CatalogClient {
    /// Fetch the current catalog version for `repository_id`.
    fn fetch_version(
        &self,
        repository_id: &str,
    ) -> impl Future<Output = Result<String, SyncError>> + Send;

    /// Fetch the full catalog for `repository_id`.
    fn fetch_catalog(
        &self,
        repository_id: &str,
    ) -> impl Future<Output = Result<Catalog, SyncError>> + Send;
}

impl<T: CatalogClient + Send + Sync + ?Sized> CatalogClient for std::sync::Arc<T> {
    async fn fetch_version(&self, repository_id: &str) -> Result<String, SyncError> {
        (**self).fetch_version(repository_id).await
    }

    async fn fetch_catalog(&self, repository_id: &str) -> Result<Catalog, SyncError> {
        (**self).fetch_catalog(repository_id).await
    }
}

/// HTTP implementation of [`CatalogClient`].
///
/// The repository identifier travels as the `Authorization` header on both
/// endpoints. Any status other than 200 counts as a network failure.
#[derive(Debug, Clone)]
pub struct HttpCatalogClient {
    base_url: String,
}

impl HttpCatalogClient {
    /// Client against a custom service base URL (no trailing slash).
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    /// What: Issue one authenticated GET and return the 200-status response.
    ///
    /// Inputs:
    /// - `path`: Endpoint path below the base URL (e.g. "/library/version")
    /// - `repository_id`: Credential sent as the `Authorization` header
    ///
    /// Output:
    /// - `Ok(Response)` for HTTP 200; `Err(SyncError::Network)` for transport
    ///   errors and every other status
    async fn get_authenticated(
        &self,
        path: &str,
        repository_id: &str,
    ) -> Result<reqwest::Response, SyncError> {
        let url = format!("{}{path}", self.base_url);
        let response = HTTP_CLIENT
            .get(&url)
            .header(reqwest::header::AUTHORIZATION, repository_id)
            .send()
            .await
            .map_err(|e| {
                warn!(url = %url, error = %e, "catalog request failed");
                SyncError::Network(format!("request to {url} failed: {e}"))
            })?;

        let status = response.status();
        if status != reqwest::StatusCode::OK {
            warn!(url = %url, status = %status, "catalog request returned non-success status");
            return Err(SyncError::Network(format!(
                "{url} returned status {status}"
            )));
        }
        Ok(response)
    }
}

impl Default for HttpCatalogClient {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

impl CatalogClient for HttpCatalogClient {
    async fn fetch_version(&self, repository_id: &str) -> Result<String, SyncError> {
        let response = self
            .get_authenticated("/library/version", repository_id)
            .await?;
        let body: Value = response
            .json()
            .await
            .map_err(|e| SyncError::Decode(format!("version response is not JSON: {e}")))?;
        let version = version_from_body(&body)?;
        debug!(version = %version, "fetched remote catalog version");
        Ok(version)
    }

    async fn fetch_catalog(&self, repository_id: &str) -> Result<Catalog, SyncError> {
        let response = self
            .get_authenticated("/library/list", repository_id)
            .await?;
        let catalog: Catalog = response.json().await.map_err(|e| {
            SyncError::Decode(format!("catalog response has unexpected shape: {e}"))
        })?;
        debug!(entries = catalog.len(), "fetched remote catalog");
        Ok(catalog)
    }
}

/// What: Extract the `version` field from the version-endpoint body.
///
/// Inputs:
/// - `body`: Parsed JSON body of the version endpoint
///
/// Output:
/// - `Ok(String)` with the version value; non-string JSON values are
///   stringified so a numeric version still compares byte-wise
/// - `Err(SyncError::Decode)` when the field is missing
fn version_from_body(body: &Value) -> Result<String, SyncError> {
    match body.get("version") {
        Some(Value::String(s)) => Ok(s.clone()),
        Some(other) => Ok(other.to_string()),
        None => Err(SyncError::Decode(
            "version response lacks a \"version\" field".to_string(),
        )),
    }
}

//! Error type shared by the remote client and the sync engine.
//!
//! Lookups never fail: a corrupt cache entry or missing configuration is
//! downgraded to the caller-supplied fallback string. Sync operations report
//! failures explicitly so hosts can tell "sync failed" apart from "no
//! translation available". A missing configuration is not an error either; it
//! surfaces as [`SyncOutcome::NotConfigured`](crate::engine::SyncOutcome).

use thiserror::Error;

/// Failure of a sync operation against the remote translation service.
#[derive(Debug, Error)]
pub enum SyncError {
    /// Transport error or non-200 HTTP status from the remote service.
    #[error("network failure: {0}")]
    Network(String),
    /// Response body that does not parse or lacks the expected shape.
    #[error("decode failure: {0}")]
    Decode(String),
}

#[cfg(test)]
mod tests {
    use super::SyncError;

    #[test]
    fn error_display_names_the_failure_class() {
        let net = SyncError::Network("connection refused".to_string());
        assert_eq!(net.to_string(), "network failure: connection refused");
        let dec = SyncError::Decode("missing version field".to_string());
        assert_eq!(dec.to_string(), "decode failure: missing version field");
    }
}

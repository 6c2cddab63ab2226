//! Error types for the Marquee plugin.
//!
//! [`MarqueeError`] is the crate-wide error with a matching [`Result`] alias.
//! [`FetchError`] describes why a single movie fetch failed. The view-state
//! controller never shows these details to the user; they exist for logs.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The main error type for Marquee plugin operations.
///
/// # Examples
///
/// ```
/// use marquee::domain::MarqueeError;
///
/// fn validate() -> Result<(), MarqueeError> {
///     Err(MarqueeError::Config("endpoint is required for the http source".to_string()))
/// }
/// assert!(validate().is_err());
/// ```
#[derive(Debug, Error)]
pub enum MarqueeError {
    /// Reading or parsing the local catalog failed.
    #[error("Catalog error: {0}")]
    Catalog(String),

    /// Filesystem or I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Theme parsing or loading failed.
    #[error("Theme error: {0}")]
    Theme(String),

    /// Configuration is invalid or missing.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A movie fetch failed.
    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),
}

/// Why a movie fetch did not produce a movie list.
///
/// Every variant collapses to the same user-facing message once it reaches
/// the controller.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum FetchError {
    /// The HTTP backend answered with a non-success status.
    #[error("backend responded with status {0}")]
    Status(u16),

    /// The response body was not a movie list.
    #[error("failed to decode movies: {0}")]
    Decode(String),

    /// The local catalog could not be read.
    #[error("catalog unavailable: {0}")]
    Catalog(String),

    /// The user denied the permissions the configured source needs.
    #[error("permission denied")]
    PermissionDenied,
}

impl From<MarqueeError> for FetchError {
    fn from(err: MarqueeError) -> Self {
        match err {
            MarqueeError::Fetch(inner) => inner,
            other => Self::Catalog(other.to_string()),
        }
    }
}

/// A specialized `Result` type for Marquee operations.
pub type Result<T> = std::result::Result<T, MarqueeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fetch_errors_round_trip_through_crate_error() {
        let err: MarqueeError = FetchError::Status(503).into();
        assert_eq!(FetchError::from(err), FetchError::Status(503));
    }

    #[test]
    fn io_errors_become_catalog_fetch_failures() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let fetch = FetchError::from(MarqueeError::from(io));
        assert!(matches!(fetch, FetchError::Catalog(msg) if msg.contains("missing")));
    }
}

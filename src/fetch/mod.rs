//! Movie fetch service.
//!
//! The controller only ever sees the contract "given a search term, settle
//! later with an ordered movie list or a failure". This module supplies the
//! pieces the runtime needs to honour it:
//!
//! - [`request`]: request tokens and the settlement ordering policy
//! - [`http`]: URL building and response decoding for HTTP backends
//! - [`gate`]: holding back or rejecting fetches around the permission prompt
//! - [`FetchSource`]: which backend the plugin is configured to use

pub mod gate;
pub mod http;
pub mod request;

pub use gate::{GateDecision, PermissionGate};
pub use request::{FetchOrdering, FetchRequest, RequestToken};

use crate::domain::{MarqueeError, Result};

/// Backend that serves movie fetches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchSource {
    /// Remote service queried through Zellij's `web_request`.
    Http {
        /// Base URL; the search term is appended as the `search` parameter.
        endpoint: String,
    },

    /// Local JSON catalog searched on the worker thread.
    Catalog {
        /// Sandbox path to the catalog file.
        path: String,
    },
}

impl FetchSource {
    /// Resolves the backend from the `source`, `endpoint` and `catalog_path`
    /// configuration values.
    ///
    /// # Errors
    ///
    /// Returns [`MarqueeError::Config`] for an unknown source kind or an
    /// `http` source without an endpoint.
    pub fn from_config(
        kind: Option<&str>,
        endpoint: Option<&str>,
        catalog_path: String,
    ) -> Result<Self> {
        match kind.map(|k| k.trim().to_ascii_lowercase()).as_deref() {
            None | Some("catalog") => Ok(Self::Catalog { path: catalog_path }),
            Some("http") => endpoint
                .map(str::trim)
                .filter(|e| !e.is_empty())
                .map(|e| Self::Http {
                    endpoint: e.to_string(),
                })
                .ok_or_else(|| {
                    MarqueeError::Config("endpoint is required for the http source".to_string())
                }),
            Some(other) => Err(MarqueeError::Config(format!("unknown source: {other}"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_is_the_default_source() {
        let source = FetchSource::from_config(None, None, "/tmp/c.json".to_string()).unwrap();
        assert_eq!(
            source,
            FetchSource::Catalog {
                path: "/tmp/c.json".to_string()
            }
        );
    }

    #[test]
    fn http_source_requires_endpoint() {
        assert!(FetchSource::from_config(Some("http"), None, String::new()).is_err());
        assert!(FetchSource::from_config(Some("http"), Some("  "), String::new()).is_err());

        let source =
            FetchSource::from_config(Some("HTTP"), Some("http://h/movies"), String::new()).unwrap();
        assert!(matches!(source, FetchSource::Http { endpoint } if endpoint == "http://h/movies"));
    }

    #[test]
    fn unknown_source_is_rejected() {
        assert!(matches!(
            FetchSource::from_config(Some("ftp"), None, String::new()),
            Err(MarqueeError::Config(_))
        ));
    }
}

//! Marquee: a Zellij plugin for browsing a movie catalog.
//!
//! Marquee shows a grid of movie cards, lets the user search the catalog and
//! opens a details overlay for a chosen movie. Movies come either from a
//! local JSON catalog read on a worker thread or from an HTTP service
//! queried through the host.

#![allow(clippy::multiple_crate_versions)]

//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Zellij Plugin Shim (main.rs)                       │  ← Entry point
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │
//! │  - View-state controller                            │
//! │  - Event handling and actions                       │
//! │  - View model computation                           │
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ UI Layer      │   │ Fetch/Catalog │   │ Worker Layer  │
//! │ (ui/)         │   │ (fetch/,      │   │ (worker/)     │
//! │ - Rendering   │   │  catalog/)    │   │ - Catalog I/O │
//! │ - Theming     │   │ - HTTP decode │   │ - IPC bridge  │
//! │ - Components  │   │ - Filtering   │   │               │
//! └───────────────┘   └───────────────┘   └───────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Domain (domain/) + Infrastructure + Observability  │
//! └─────────────────────────────────────────────────────┘
//! ```

pub mod app;
pub mod catalog;
pub mod domain;
pub mod fetch;
pub mod infrastructure;
pub mod observability;
pub mod ui;
pub mod worker;

pub use app::{handle_event, Action, AppState, Event, InputMode, ViewController};
pub use domain::{FetchError, MarqueeError, Movie, Result};
pub use fetch::{FetchOrdering, FetchRequest, FetchSource, RequestToken};
pub use ui::theme::{Theme, ThemeContext};

use std::collections::BTreeMap;

/// Plugin configuration parsed from Zellij's configuration system.
///
/// ```kdl
/// plugin location="file:/path/to/marquee.wasm" {
///     source "http"
///     endpoint "http://localhost:8080/movies"
///     fetch_ordering "latest"
///     theme "catppuccin-mocha"
///     trace_level "debug"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Where movies come from. Default: the local catalog.
    pub source: FetchSource,

    /// How overlapping fetches are reconciled. Default: latest only.
    pub fetch_ordering: FetchOrdering,

    /// Built-in theme name. Ignored if `theme_file` loads.
    pub theme_name: Option<String>,

    /// Path to a custom TOML theme file.
    pub theme_file: Option<String>,

    /// Tracing level directive. Default: `"info"`
    pub trace_level: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source: FetchSource::Catalog {
                path: infrastructure::default_catalog_path().display().to_string(),
            },
            fetch_ordering: FetchOrdering::default(),
            theme_name: None,
            theme_file: None,
            trace_level: None,
        }
    }
}

impl Config {
    /// Parses configuration from Zellij's configuration map.
    ///
    /// Keys: `source`, `endpoint`, `catalog_path`, `fetch_ordering`, `theme`,
    /// `theme_file`, `trace_level`. Paths starting with `~` are rewritten to
    /// the sandbox's `/host`.
    ///
    /// ```rust
    /// use std::collections::BTreeMap;
    /// use marquee::{Config, FetchOrdering, FetchSource};
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("catalog_path".to_string(), "~/movies.json".to_string());
    /// map.insert("fetch_ordering".to_string(), "last-settled".to_string());
    ///
    /// let config = Config::from_zellij(&map)?;
    /// assert_eq!(config.source, FetchSource::Catalog { path: "/host/movies.json".to_string() });
    /// assert_eq!(config.fetch_ordering, FetchOrdering::LastSettledWins);
    /// # Ok::<(), marquee::MarqueeError>(())
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`MarqueeError::Config`] for an unknown `source` or
    /// `fetch_ordering`, or an `http` source without an `endpoint`.
    pub fn from_zellij(config: &BTreeMap<String, String>) -> Result<Self> {
        let get = |key: &str| {
            config
                .get(key)
                .map(|value| value.trim())
                .filter(|value| !value.is_empty())
        };

        let catalog_path = get("catalog_path").map_or_else(
            || infrastructure::default_catalog_path().display().to_string(),
            infrastructure::expand_tilde,
        );
        let source = FetchSource::from_config(get("source"), get("endpoint"), catalog_path)?;

        let fetch_ordering = match get("fetch_ordering") {
            None => FetchOrdering::default(),
            Some(value) => FetchOrdering::from_config(value).ok_or_else(|| {
                MarqueeError::Config(format!("unknown fetch_ordering: {value}"))
            })?,
        };

        Ok(Self {
            source,
            fetch_ordering,
            theme_name: get("theme").map(String::from),
            theme_file: get("theme_file").map(infrastructure::expand_tilde),
            trace_level: get("trace_level").map(String::from),
        })
    }
}

/// Creates the application state and the initial fetch for `config`.
///
/// The returned request is the unfiltered catalog load; the runtime must
/// dispatch it once it is allowed to.
#[must_use]
pub fn initialize(config: &Config) -> (AppState, FetchRequest) {
    tracing::debug!(
        source = ?config.source,
        ordering = ?config.fetch_ordering,
        "initializing marquee plugin"
    );

    let (controller, initial) = ViewController::new(config.fetch_ordering);
    (AppState::new(controller), initial)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn empty_map_gives_defaults() {
        assert_eq!(Config::from_zellij(&BTreeMap::new()).unwrap(), Config::default());
    }

    #[test]
    fn http_source_reads_endpoint() {
        let config = Config::from_zellij(&map(&[
            ("source", "http"),
            ("endpoint", "http://localhost:8080/movies"),
        ]))
        .unwrap();

        assert_eq!(
            config.source,
            FetchSource::Http {
                endpoint: "http://localhost:8080/movies".to_string()
            }
        );
    }

    #[test]
    fn unknown_values_are_config_errors() {
        assert!(matches!(
            Config::from_zellij(&map(&[("fetch_ordering", "random")])),
            Err(MarqueeError::Config(_))
        ));
        assert!(matches!(
            Config::from_zellij(&map(&[("source", "ftp")])),
            Err(MarqueeError::Config(_))
        ));
    }

    #[test]
    fn blank_values_count_as_unset() {
        let config = Config::from_zellij(&map(&[("theme", "  "), ("source", "")])).unwrap();
        assert_eq!(config.theme_name, None);
        assert!(matches!(config.source, FetchSource::Catalog { .. }));
    }

    #[test]
    fn initialize_issues_unfiltered_fetch() {
        let (state, initial) = initialize(&Config::default());
        assert_eq!(initial.search_term, "");
        assert_eq!(state.controller.latest_token(), Some(initial.token));
        assert!(state.controller.state().is_loading);
    }
}

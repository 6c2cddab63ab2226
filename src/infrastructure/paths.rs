//! Path helpers for the Zellij sandbox.
//!
//! Inside the sandbox `/host` is the host directory Zellij was started from,
//! usually the user's home, so `~` is rewritten to `/host`.

use std::path::PathBuf;

/// Data directory holding the catalog and trace files:
/// `/host/.local/share/zellij/marquee`.
///
/// ```
/// use marquee::infrastructure::get_data_dir;
///
/// assert_eq!(get_data_dir().to_str(), Some("/host/.local/share/zellij/marquee"));
/// ```
#[must_use]
pub fn get_data_dir() -> PathBuf {
    PathBuf::from("/host/.local/share/zellij").join("marquee")
}

/// Catalog file read when `catalog_path` is not configured.
#[must_use]
pub fn default_catalog_path() -> PathBuf {
    get_data_dir().join("catalog.json")
}

/// Rewrites a leading `~` to the sandbox's `/host`.
///
/// ```
/// use marquee::infrastructure::expand_tilde;
///
/// assert_eq!(expand_tilde("~/movies.json"), "/host/movies.json");
/// assert_eq!(expand_tilde("~"), "/host");
/// assert_eq!(expand_tilde("/data/movies.json"), "/data/movies.json");
/// assert_eq!(expand_tilde("~other/movies.json"), "~other/movies.json");
/// ```
#[must_use]
pub fn expand_tilde(path: &str) -> String {
    if path.starts_with("~/") {
        path.replacen('~', "/host", 1)
    } else if path == "~" {
        "/host".to_string()
    } else {
        path.to_string()
    }
}

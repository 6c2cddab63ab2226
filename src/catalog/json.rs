//! JSON file catalog backend.
//!
//! The catalog is re-read on every fetch, so edits to the file show up on the
//! next search without restarting the plugin. Nothing is ever written back.
//!
//! # File Format
//!
//! ```json
//! {
//!   "version": 1,
//!   "movies": [
//!     {
//!       "id": "1",
//!       "title": "Inception",
//!       "year": "2010",
//!       "posterUrl": "https://img.example/inception.jpg",
//!       "plot": "A thief who steals corporate secrets...",
//!       "director": "Christopher Nolan",
//!       "actors": ["Leonardo DiCaprio"],
//!       "genre": ["Action", "Sci-Fi"],
//!       "reviews": [
//!         {"id": "r1", "movieId": "1", "username": "ana", "comment": "Layered.", "timestamp": 1700000000000}
//!       ],
//!       "ratings": [{"movieId": "1", "score": 5}]
//!     }
//!   ]
//! }
//! ```
//!
//! `reviews` and `ratings` may be left out.

use crate::catalog::backend::MovieSource;
use crate::catalog::search::CatalogQuery;
use crate::domain::error::{MarqueeError, Result};
use crate::domain::Movie;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Top-level structure of the catalog file.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct CatalogData {
    /// Format version for future migrations.
    #[serde(default = "CatalogData::current_version")]
    version: u32,

    #[serde(default)]
    movies: Vec<Movie>,
}

impl CatalogData {
    const fn current_version() -> u32 {
        1
    }
}

/// Read-only catalog stored as a JSON file.
#[derive(Debug, Clone)]
pub struct CatalogFile {
    file_path: PathBuf,
}

impl CatalogFile {
    /// Points a catalog at `file_path`. The file is not touched until the
    /// first fetch.
    pub fn new(file_path: impl Into<PathBuf>) -> Self {
        Self {
            file_path: file_path.into(),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.file_path
    }

    /// Loads every movie in file order.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not a valid catalog.
    pub fn load(&self) -> Result<Vec<Movie>> {
        let _span = tracing::debug_span!("catalog_load", path = ?self.file_path).entered();

        let contents = std::fs::read_to_string(&self.file_path)?;
        let data: CatalogData = serde_json::from_str(&contents)
            .map_err(|e| MarqueeError::Catalog(format!("failed to parse catalog JSON: {e}")))?;

        tracing::debug!(
            version = data.version,
            movie_count = data.movies.len(),
            "catalog loaded"
        );

        Ok(data.movies)
    }
}

impl MovieSource for CatalogFile {
    fn fetch_movies(&self, search_term: &str) -> Result<Vec<Movie>> {
        let _span = tracing::debug_span!("catalog_fetch_movies",
            search_term = %search_term
        ).entered();

        let movies = self.load()?;
        let query = CatalogQuery::new(search_term);
        let matched = if query.is_empty() {
            movies
        } else {
            query.filter(&movies)
        };

        tracing::debug!(matched_count = matched.len(), "catalog search complete");
        Ok(matched)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_catalog(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    const CATALOG: &str = r#"{
        "version": 1,
        "movies": [
            {"id":"1","title":"Inception","year":"2010","director":"Christopher Nolan"},
            {"id":"2","title":"Arrival","year":"2016","director":"Denis Villeneuve"},
            {"id":"3","title":"Interstellar","year":"2014","director":"Christopher Nolan"}
        ]
    }"#;

    #[test]
    fn empty_search_returns_whole_catalog() {
        let file = write_catalog(CATALOG);
        let movies = CatalogFile::new(file.path()).fetch_movies("").unwrap();
        assert_eq!(movies.len(), 3);
        assert_eq!(movies[1].title, "Arrival");
    }

    #[test]
    fn director_search_keeps_file_order() {
        let file = write_catalog(CATALOG);
        let movies = CatalogFile::new(file.path()).fetch_movies("nolan").unwrap();
        let ids: Vec<&str> = movies.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, ["1", "3"]);
    }

    #[test]
    fn missing_version_defaults() {
        let file = write_catalog(r#"{"movies":[]}"#);
        assert!(CatalogFile::new(file.path()).load().unwrap().is_empty());
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let catalog = CatalogFile::new(dir.path().join("absent.json"));
        assert!(matches!(catalog.fetch_movies(""), Err(MarqueeError::Io(_))));
    }

    #[test]
    fn invalid_json_is_a_catalog_error() {
        let file = write_catalog("not json");
        assert!(matches!(
            CatalogFile::new(file.path()).fetch_movies(""),
            Err(MarqueeError::Catalog(_))
        ));
    }

    #[test]
    fn edits_are_visible_on_next_fetch() {
        let mut file = write_catalog(r#"{"movies":[]}"#);
        let catalog = CatalogFile::new(file.path());
        assert!(catalog.fetch_movies("").unwrap().is_empty());

        file.as_file_mut().set_len(0).unwrap();
        std::fs::write(file.path(), CATALOG).unwrap();
        assert_eq!(catalog.fetch_movies("").unwrap().len(), 3);
    }
}

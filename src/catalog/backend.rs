//! Catalog backend abstraction.
//!
//! [`MovieSource`] is the synchronous seam the worker thread calls to answer a
//! fetch. It is deliberately tiny: one query, one ordered answer.

use crate::domain::{Movie, Result};

/// A searchable source of movies.
///
/// # Implementations
///
/// - [`CatalogFile`](crate::catalog::CatalogFile): JSON catalog on disk
///
/// # Examples
///
/// ```no_run
/// use marquee::catalog::{CatalogFile, MovieSource};
///
/// let catalog = CatalogFile::new("/tmp/catalog.json");
/// let movies = catalog.fetch_movies("nolan")?;
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub trait MovieSource: Send {
    /// Returns the movies matching `search_term`, in catalog order.
    ///
    /// An empty term returns the whole catalog.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying catalog cannot be read.
    fn fetch_movies(&self, search_term: &str) -> Result<Vec<Movie>>;
}

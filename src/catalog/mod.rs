//! Local movie catalog.
//!
//! Backs the `catalog` fetch source. The worker thread owns a [`MovieSource`]
//! and answers each fetch by searching it.
//!
//! # Modules
//!
//! - `backend`: The [`MovieSource`] trait
//! - `json`: JSON file implementation
//! - `search`: Term tokenizing and matching

pub mod backend;
pub mod json;
pub mod search;

pub use backend::MovieSource;
pub use json::CatalogFile;
pub use search::CatalogQuery;

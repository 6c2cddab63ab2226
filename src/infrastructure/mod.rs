//! Infrastructure layer for the Zellij plugin sandbox, where the host
//! filesystem is mounted under `/host`.

pub mod paths;

pub use paths::{default_catalog_path, expand_tilde, get_data_dir};

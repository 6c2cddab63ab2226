//! Domain layer for the Marquee plugin.
//!
//! Core types independent of Zellij APIs:
//!
//! - [`error`]: Error types and result aliases
//! - [`movie`]: The catalog movie model
//! - [`review`]: Reviews and ratings embedded in a movie

pub mod error;
pub mod movie;
pub mod review;

pub use error::{FetchError, MarqueeError, Result};
pub use movie::Movie;
pub use review::{Rating, RatingSummary, Review};

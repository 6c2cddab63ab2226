//! Actions representing side effects to be executed by the plugin runtime.
//!
//! The event handler never performs I/O. It returns a `Vec<Action>` and the
//! runtime executes them in order.
//!
//! # Example
//!
//! ```rust
//! use marquee::app::Action;
//! use marquee::fetch::{FetchRequest, RequestToken};
//!
//! let actions = vec![Action::Fetch(FetchRequest {
//!     token: RequestToken::FIRST,
//!     search_term: String::new(),
//! })];
//! ```

use crate::fetch::FetchRequest;

/// Commands representing side effects to be executed by the plugin runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Hides the plugin pane.
    CloseFocus,

    /// Dispatches a movie fetch to the configured source.
    ///
    /// The runtime must eventually answer with
    /// [`Event::MoviesFetched`](crate::app::Event::MoviesFetched) or a worker
    /// response carrying the same token.
    Fetch(FetchRequest),
}

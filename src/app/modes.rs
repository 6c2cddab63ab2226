//! Input mode state for the application.
//!
//! Marquee has two input modes:
//! - **Browse**: keys move the card cursor and open details
//! - **Search**: keys edit the search query
//!
//! Whether the details overlay is open is not a mode; it follows from the
//! controller's selected movie.

/// Current input handling mode.
///
/// Controls which keybindings are active and whether the search bar is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    /// Card grid navigation.
    ///
    /// Available keybindings: arrows/hjkl (navigate), Enter (details),
    /// / (search), r (reload), q (quit).
    #[default]
    Browse,

    /// Search query editing.
    ///
    /// Characters append to the query, Enter submits, Esc cancels.
    Search,
}

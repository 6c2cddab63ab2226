//! View model types representing renderable UI state.
//!
//! View models are computed by `AppState::compute_viewmodel()` and consumed by
//! the renderer. They contain no business logic, only display-ready data such
//! as truncated titles, wrapped plot lines and highlight ranges.

/// Rows occupied by a single card, borders included.
pub const CARD_HEIGHT: usize = 4;

/// Horizontal space between adjacent cards.
pub const CARD_GAP: usize = 2;

/// Narrowest card the grid will lay out.
pub const CARD_MIN_WIDTH: usize = 24;

/// Widest the details overlay grows, borders included.
pub const DETAILS_MAX_WIDTH: usize = 72;

/// Reviews shown in the details overlay.
pub const DETAILS_REVIEW_LIMIT: usize = 3;

/// Computes how many cards fit per row and how wide each card is.
///
/// At least one column is always returned, even when the pane is narrower
/// than [`CARD_MIN_WIDTH`].
///
/// ```
/// use marquee::ui::viewmodel::grid_layout;
///
/// assert_eq!(grid_layout(80), (3, 25));
/// assert_eq!(grid_layout(10).0, 1);
/// ```
#[must_use]
pub fn grid_layout(cols: usize) -> (usize, usize) {
    let columns = ((cols + CARD_GAP) / (CARD_MIN_WIDTH + CARD_GAP)).max(1);
    let card_width = ((cols + CARD_GAP) / columns).saturating_sub(CARD_GAP);
    (columns, card_width)
}

/// Complete UI view model for rendering.
#[derive(Debug, Clone)]
pub struct UIViewModel {
    pub header: HeaderInfo,

    /// Present only in search mode.
    pub search_bar: Option<SearchBarInfo>,

    /// Main body: exactly one of loading, error, empty or cards.
    pub content: ContentView,

    /// Details overlay drawn over the content when a movie is selected.
    pub details: Option<DetailsView>,

    pub footer: FooterInfo,
}

/// The body of the view. Variants are mutually exclusive.
#[derive(Debug, Clone)]
pub enum ContentView {
    Loading(StatusInfo),
    Error(StatusInfo),
    Empty(EmptyState),
    Cards(CardGrid),
}

/// A single centered status line.
#[derive(Debug, Clone)]
pub struct StatusInfo {
    pub message: String,
}

/// The visible window of movie cards.
#[derive(Debug, Clone)]
pub struct CardGrid {
    /// Cards in reading order, already windowed around the cursor.
    pub cards: Vec<CardItem>,

    /// Cards per row.
    pub columns: usize,

    /// Width of one card, borders included.
    pub card_width: usize,
}

/// Display information for one movie card.
#[derive(Debug, Clone)]
pub struct CardItem {
    /// Title, truncated to the card's inner width.
    pub title: String,

    /// Year and genres, truncated to the card's inner width.
    pub meta: String,

    pub is_selected: bool,

    /// Character ranges of `title` matched by the search term.
    ///
    /// Each tuple is `(start_index, end_index)` in UTF-8 character indices.
    pub highlight_ranges: Vec<(usize, usize)>,
}

/// Content of the details overlay.
#[derive(Debug, Clone)]
pub struct DetailsView {
    /// "Title (Year)".
    pub heading: String,

    /// Labelled facts such as director and cast, in display order.
    pub facts: Vec<(String, String)>,

    /// Plot, wrapped to the overlay's inner width.
    pub plot_lines: Vec<String>,

    pub poster_url: String,

    /// Newest reviews first, at most [`DETAILS_REVIEW_LIMIT`].
    pub reviews: Vec<ReviewLine>,
}

/// One review in the details overlay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewLine {
    /// `"username · YYYY-MM-DD"`, or just the username without a usable date.
    pub byline: String,

    /// Comment wrapped to the overlay's inner width.
    pub comment_lines: Vec<String>,
}

/// Header display information.
#[derive(Debug, Clone)]
pub struct HeaderInfo {
    /// Title text to display in the header.
    pub title: String,
}

/// Footer display information.
#[derive(Debug, Clone)]
pub struct FooterInfo {
    /// Keybinding help text.
    pub keybindings: String,
}

/// Empty state message display information.
///
/// Shown when a fetch succeeded with no movies.
#[derive(Debug, Clone)]
pub struct EmptyState {
    /// Primary message naming the search term.
    pub message: String,

    /// Secondary hint text.
    pub subtitle: String,
}

/// Search bar display information.
#[derive(Debug, Clone)]
pub struct SearchBarInfo {
    /// Current search query text.
    pub query: String,
}

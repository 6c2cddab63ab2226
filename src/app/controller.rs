//! View-state controller and data-loading lifecycle.
//!
//! [`ViewController`] owns the [`ViewState`] and is the only thing allowed to
//! change it. It has two user-facing entry points, [`search`] and
//! [`select_movie`], plus [`settle`], which the runtime calls when a fetch it
//! dispatched on the controller's behalf resolves or fails.
//!
//! ```text
//! search(term) ──► FetchRequest { token, term } ──► runtime performs fetch
//!                                                          │
//! ViewState ◄── settle(token, Ok(movies) | Err(_)) ◄───────┘
//! ```
//!
//! Each search is stamped with a [`RequestToken`]. Under
//! [`FetchOrdering::LatestOnly`] a settlement for anything but the newest
//! token is dropped, so a slow response to an old term can never replace the
//! results of a newer one. [`FetchOrdering::LastSettledWins`] applies every
//! settlement as it arrives.
//!
//! [`search`]: ViewController::search
//! [`select_movie`]: ViewController::select_movie
//! [`settle`]: ViewController::settle

use crate::domain::{FetchError, Movie};
use crate::fetch::{FetchOrdering, FetchRequest, RequestToken};
use std::collections::BTreeSet;

/// The user-facing message shown for every fetch failure.
pub const FETCH_ERROR_MESSAGE: &str = "Failed to fetch movies. Please try again later.";

/// Everything that governs what the content area currently shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewState {
    /// Movies from the last applied successful fetch, in backend order.
    pub movies: Vec<Movie>,

    /// Movie whose details overlay is open.
    ///
    /// An owned snapshot: it stays valid even after a later search replaces
    /// `movies`.
    pub selected_movie: Option<Movie>,

    pub is_loading: bool,

    /// User-facing error from the last applied failed fetch.
    pub error: Option<String>,

    /// Term of the most recent search, empty for the unfiltered catalog.
    pub search_term: String,
}

impl ViewState {
    fn initial() -> Self {
        Self {
            movies: Vec::new(),
            selected_movie: None,
            is_loading: true,
            error: None,
            search_term: String::new(),
        }
    }

    /// Derives what the content area should display.
    ///
    /// Loading beats error, error beats the empty-result message, and cards
    /// are shown only when none of those apply.
    #[must_use]
    pub fn content(&self) -> ContentState<'_> {
        if self.is_loading {
            ContentState::Loading
        } else if let Some(message) = &self.error {
            ContentState::Error(message)
        } else if self.movies.is_empty() {
            ContentState::Empty {
                search_term: &self.search_term,
            }
        } else {
            ContentState::Cards(&self.movies)
        }
    }

    /// The movie for the details overlay, independent of [`content`](Self::content).
    #[must_use]
    pub const fn details(&self) -> Option<&Movie> {
        self.selected_movie.as_ref()
    }
}

/// What the content area renders, in priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentState<'a> {
    Loading,
    Error(&'a str),
    Empty { search_term: &'a str },
    Cards(&'a [Movie]),
}

/// Result of handing a settlement to the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Settlement {
    /// The outcome was merged into the view state.
    Applied,
    /// A newer search was issued; the outcome was discarded.
    Stale,
    /// The token was never issued or already settled.
    Unknown,
}

/// Owner of the [`ViewState`].
#[derive(Debug, Clone)]
pub struct ViewController {
    state: ViewState,
    ordering: FetchOrdering,
    last_issued: Option<RequestToken>,
    pending: BTreeSet<RequestToken>,
}

impl ViewController {
    /// Creates the controller and issues the initial unfiltered fetch.
    ///
    /// The returned request is the only fetch issued before user
    /// interaction; the caller must dispatch it.
    ///
    /// ```
    /// use marquee::app::controller::ViewController;
    /// use marquee::fetch::FetchOrdering;
    ///
    /// let (controller, initial) = ViewController::new(FetchOrdering::default());
    /// assert_eq!(initial.search_term, "");
    /// assert!(controller.state().is_loading);
    /// ```
    #[must_use]
    pub fn new(ordering: FetchOrdering) -> (Self, FetchRequest) {
        let mut controller = Self {
            state: ViewState::initial(),
            ordering,
            last_issued: None,
            pending: BTreeSet::new(),
        };
        let initial = controller.search("");
        (controller, initial)
    }

    #[must_use]
    pub const fn state(&self) -> &ViewState {
        &self.state
    }

    #[must_use]
    pub const fn ordering(&self) -> FetchOrdering {
        self.ordering
    }

    /// Token of the most recently issued search.
    #[must_use]
    pub const fn latest_token(&self) -> Option<RequestToken> {
        self.last_issued
    }

    /// Number of issued fetches that have not settled yet.
    #[must_use]
    pub fn in_flight(&self) -> usize {
        self.pending.len()
    }

    /// Starts a search for `term`.
    ///
    /// Records the term, enters the loading state and clears any previous
    /// error. Movies and selection are left as they are until the fetch
    /// settles.
    pub fn search(&mut self, term: impl Into<String>) -> FetchRequest {
        let term = term.into();
        let token = self
            .last_issued
            .map_or(RequestToken::FIRST, RequestToken::next);

        tracing::debug!(
            token = %token,
            search_term = %term,
            in_flight = self.pending.len(),
            "issuing movie fetch"
        );

        self.last_issued = Some(token);
        self.pending.insert(token);

        self.state.search_term.clone_from(&term);
        self.state.is_loading = true;
        self.state.error = None;

        FetchRequest {
            token,
            search_term: term,
        }
    }

    /// Merges the outcome of the fetch identified by `token`.
    ///
    /// On success the movie list is replaced wholesale. On failure the fixed
    /// [`FETCH_ERROR_MESSAGE`] is set and the previous movie list is kept.
    /// Either way loading ends.
    pub fn settle(
        &mut self,
        token: RequestToken,
        outcome: Result<Vec<Movie>, FetchError>,
    ) -> Settlement {
        if !self.pending.remove(&token) {
            tracing::debug!(token = %token, "ignoring settlement for unknown token");
            return Settlement::Unknown;
        }

        if self.ordering == FetchOrdering::LatestOnly && Some(token) != self.last_issued {
            tracing::debug!(
                token = %token,
                latest = ?self.last_issued,
                "discarding stale settlement"
            );
            return Settlement::Stale;
        }

        match outcome {
            Ok(movies) => {
                tracing::debug!(token = %token, movie_count = movies.len(), "fetch succeeded");
                self.state.movies = movies;
            }
            Err(e) => {
                tracing::warn!(token = %token, error = %e, "fetch failed");
                self.state.error = Some(FETCH_ERROR_MESSAGE.to_string());
            }
        }
        self.state.is_loading = false;

        Settlement::Applied
    }

    /// Opens the details overlay for `movie`, or closes it with `None`.
    ///
    /// No check is made that the movie belongs to the current list.
    pub fn select_movie(&mut self, movie: Option<Movie>) {
        tracing::debug!(movie_id = ?movie.as_ref().map(|m| m.id.as_str()), "selecting movie");
        self.state.selected_movie = movie;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inception() -> Movie {
        Movie::new("1", "Inception", "2010")
    }

    fn arrival() -> Movie {
        Movie::new("2", "Arrival", "2016")
    }

    #[test]
    fn creation_issues_single_unfiltered_fetch() {
        let (controller, initial) = ViewController::new(FetchOrdering::LatestOnly);

        assert_eq!(initial.token, RequestToken::FIRST);
        assert_eq!(initial.search_term, "");
        assert_eq!(controller.in_flight(), 1);
        assert_eq!(controller.state().content(), ContentState::Loading);
    }

    #[test]
    fn successful_fetch_populates_movies() {
        let (mut controller, initial) = ViewController::new(FetchOrdering::LatestOnly);

        let settled = controller.settle(initial.token, Ok(vec![inception(), arrival()]));

        assert_eq!(settled, Settlement::Applied);
        let state = controller.state();
        assert_eq!(state.movies.len(), 2);
        assert!(!state.is_loading);
        assert_eq!(state.error, None);
    }

    #[test]
    fn empty_result_derives_empty_content_with_term() {
        let (mut controller, initial) = ViewController::new(FetchOrdering::LatestOnly);
        controller.settle(initial.token, Ok(vec![]));

        let request = controller.search("zzz-no-match");
        controller.settle(request.token, Ok(vec![]));

        assert_eq!(
            controller.state().content(),
            ContentState::Empty {
                search_term: "zzz-no-match"
            }
        );
    }

    #[test]
    fn failure_sets_fixed_message_and_keeps_movies() {
        let (mut controller, initial) = ViewController::new(FetchOrdering::LatestOnly);
        controller.settle(initial.token, Ok(vec![inception()]));

        let request = controller.search("x");
        controller.settle(request.token, Err(FetchError::Status(500)));

        let state = controller.state();
        assert_eq!(state.error.as_deref(), Some(FETCH_ERROR_MESSAGE));
        assert_eq!(state.movies, vec![inception()]);
        assert!(!state.is_loading);
        assert_eq!(state.content(), ContentState::Error(FETCH_ERROR_MESSAGE));
    }

    #[test]
    fn search_clears_error_and_enters_loading() {
        let (mut controller, initial) = ViewController::new(FetchOrdering::LatestOnly);
        controller.settle(initial.token, Err(FetchError::Decode("bad".to_string())));

        controller.search("retry");

        assert_eq!(controller.state().error, None);
        assert!(controller.state().is_loading);
        assert_eq!(controller.state().search_term, "retry");
    }

    #[test]
    fn latest_only_discards_out_of_order_settlement() {
        let (mut controller, initial) = ViewController::new(FetchOrdering::LatestOnly);
        controller.settle(initial.token, Ok(vec![]));

        let a = controller.search("a");
        let ab = controller.search("ab");

        assert_eq!(controller.settle(ab.token, Ok(vec![arrival()])), Settlement::Applied);
        assert_eq!(controller.settle(a.token, Ok(vec![inception()])), Settlement::Stale);

        assert_eq!(controller.state().movies, vec![arrival()]);
        assert_eq!(controller.in_flight(), 0);
    }

    #[test]
    fn latest_only_keeps_loading_until_newest_settles() {
        let (mut controller, initial) = ViewController::new(FetchOrdering::LatestOnly);
        controller.settle(initial.token, Ok(vec![]));

        let a = controller.search("a");
        let ab = controller.search("ab");
        controller.settle(a.token, Ok(vec![inception()]));

        assert!(controller.state().is_loading);
        controller.settle(ab.token, Ok(vec![arrival()]));
        assert!(!controller.state().is_loading);
    }

    #[test]
    fn last_settled_wins_lets_older_result_overwrite() {
        let (mut controller, initial) = ViewController::new(FetchOrdering::LastSettledWins);
        controller.settle(initial.token, Ok(vec![]));

        let a = controller.search("a");
        let ab = controller.search("ab");
        controller.settle(ab.token, Ok(vec![arrival()]));
        controller.settle(a.token, Ok(vec![inception()]));

        assert_eq!(controller.state().movies, vec![inception()]);
        assert_eq!(controller.state().search_term, "ab");
    }

    #[test]
    fn unknown_and_repeated_tokens_are_ignored() {
        let (mut controller, initial) = ViewController::new(FetchOrdering::LastSettledWins);

        assert_eq!(
            controller.settle(RequestToken::new(99), Ok(vec![inception()])),
            Settlement::Unknown
        );
        assert_eq!(controller.settle(initial.token, Ok(vec![])), Settlement::Applied);
        assert_eq!(
            controller.settle(initial.token, Ok(vec![inception()])),
            Settlement::Unknown
        );
        assert!(controller.state().movies.is_empty());
    }

    #[test]
    fn closing_selection_leaves_other_state_alone() {
        let (mut controller, initial) = ViewController::new(FetchOrdering::LatestOnly);
        controller.settle(initial.token, Ok(vec![inception(), arrival()]));
        let before = controller.state().clone();

        controller.select_movie(Some(arrival()));
        assert_eq!(controller.state().details(), Some(&arrival()));

        controller.select_movie(None);
        assert_eq!(controller.state(), &before);
    }

    #[test]
    fn selection_survives_a_new_search() {
        let (mut controller, initial) = ViewController::new(FetchOrdering::LatestOnly);
        controller.settle(initial.token, Ok(vec![inception()]));
        controller.select_movie(Some(inception()));

        let request = controller.search("arrival");
        controller.settle(request.token, Ok(vec![arrival()]));

        assert_eq!(controller.state().details(), Some(&inception()));
    }
}

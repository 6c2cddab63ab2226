//! Application state and view model computation.
//!
//! [`AppState`] wraps the [`ViewController`] with the interaction state the
//! controller does not care about: the input mode, the search query being
//! typed, and the card cursor. Everything the renderer needs is derived from
//! it by [`AppState::compute_viewmodel`].
//!
//! The theme is not part of this state. It is resolved once at load and handed
//! to the renderer separately.

use super::controller::{ContentState, ViewController};
use super::modes::InputMode;
use crate::domain::{Movie, Review};
use crate::ui::helpers::{truncate, wrap_text};
use crate::ui::viewmodel::{
    grid_layout, CardGrid, CardItem, ContentView, DetailsView, EmptyState, FooterInfo, HeaderInfo,
    ReviewLine, SearchBarInfo, StatusInfo, UIViewModel, CARD_HEIGHT, DETAILS_MAX_WIDTH,
    DETAILS_REVIEW_LIMIT,
};
use fuzzy_matcher::skim::SkimMatcherV2;

/// Rows used by chrome in browse mode: blank, header, two borders, footer, spare.
const BROWSE_CHROME_ROWS: usize = 6;

/// Browse chrome plus the three-line search box.
const SEARCH_CHROME_ROWS: usize = 9;

/// Central application state container.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Owner of movies, selection, loading and error state.
    pub controller: ViewController,

    pub input_mode: InputMode,

    /// Query being edited in search mode. Submitted with `SubmitSearch`.
    pub query: String,

    /// Index of the highlighted card within the controller's movie list.
    pub cursor: usize,

    /// Cards per grid row at the last known pane width.
    ///
    /// Vertical navigation steps by this amount. Updated by
    /// [`set_viewport`](Self::set_viewport) before each render.
    pub grid_columns: usize,
}

impl AppState {
    /// Creates application state around a freshly created controller.
    #[must_use]
    pub fn new(controller: ViewController) -> Self {
        Self {
            controller,
            input_mode: InputMode::Browse,
            query: String::new(),
            cursor: 0,
            grid_columns: 1,
        }
    }

    /// Records the pane width so navigation matches the rendered grid.
    pub fn set_viewport(&mut self, cols: usize) {
        self.grid_columns = grid_layout(cols).0;
    }

    fn movie_count(&self) -> usize {
        self.controller.state().movies.len()
    }

    /// Whether the details overlay is open.
    #[must_use]
    pub fn details_open(&self) -> bool {
        self.controller.state().selected_movie.is_some()
    }

    /// The movie under the cursor, if the grid has any cards.
    #[must_use]
    pub fn cursor_movie(&self) -> Option<&Movie> {
        self.controller.state().movies.get(self.cursor)
    }

    /// Moves the cursor to the next card, wrapping to the first.
    pub fn move_cursor_right(&mut self) {
        let len = self.movie_count();
        if len == 0 {
            return;
        }
        self.cursor = (self.cursor + 1) % len;
    }

    /// Moves the cursor to the previous card, wrapping to the last.
    pub fn move_cursor_left(&mut self) {
        let len = self.movie_count();
        if len == 0 {
            return;
        }
        self.cursor = if self.cursor == 0 { len - 1 } else { self.cursor - 1 };
    }

    /// Moves the cursor one grid row down, wrapping to the top of the column.
    pub fn move_cursor_down(&mut self) {
        let len = self.movie_count();
        if len == 0 {
            return;
        }
        let columns = self.grid_columns.max(1);
        self.cursor = if self.cursor + columns < len {
            self.cursor + columns
        } else {
            self.cursor % columns
        };
    }

    /// Moves the cursor one grid row up, wrapping to the bottom of the column.
    pub fn move_cursor_up(&mut self) {
        let len = self.movie_count();
        if len == 0 {
            return;
        }
        let columns = self.grid_columns.max(1);
        self.cursor = if self.cursor >= columns {
            self.cursor - columns
        } else {
            let last = len - 1;
            if self.cursor > last {
                last
            } else {
                self.cursor + ((last - self.cursor) / columns) * columns
            }
        };
    }

    /// Keeps the cursor inside the current movie list.
    pub fn clamp_cursor(&mut self) {
        let len = self.movie_count();
        self.cursor = if len == 0 { 0 } else { self.cursor.min(len - 1) };
    }

    /// Computes a renderable view model for a pane of `rows` x `cols`.
    ///
    /// # Parameters
    ///
    /// * `rows` - Pane height, used to size the visible card window
    /// * `cols` - Pane width, used for the grid layout and text wrapping
    ///
    /// # Returns
    ///
    /// A [`UIViewModel`] with every string already truncated or wrapped to
    /// fit. The content area follows [`ViewState::content`] and the details
    /// overlay follows the selected movie.
    ///
    /// [`ViewState::content`]: crate::app::ViewState::content
    #[must_use]
    pub fn compute_viewmodel(&self, rows: usize, cols: usize) -> UIViewModel {
        let state = self.controller.state();

        let content = match state.content() {
            ContentState::Loading => ContentView::Loading(StatusInfo {
                message: "Loading movies...".to_string(),
            }),
            ContentState::Error(message) => ContentView::Error(StatusInfo {
                message: message.to_string(),
            }),
            ContentState::Empty { search_term } => ContentView::Empty(EmptyState {
                message: format!("No movies found for \"{search_term}\". Try a different search."),
                subtitle: "Press / to search again or r to reload".to_string(),
            }),
            ContentState::Cards(movies) => {
                ContentView::Cards(self.compute_card_grid(movies, rows, cols, &state.search_term))
            }
        };

        UIViewModel {
            header: self.compute_header(),
            search_bar: self.compute_search_bar(),
            content,
            details: state.details().map(|movie| Self::compute_details(movie, cols)),
            footer: self.compute_footer(),
        }
    }

    /// Lays out the visible window of cards around the cursor.
    ///
    /// The window is measured in grid rows: the cursor's row is kept near the
    /// middle, and the window is pulled back when it would run past the end.
    fn compute_card_grid(
        &self,
        movies: &[Movie],
        rows: usize,
        cols: usize,
        search_term: &str,
    ) -> CardGrid {
        let (columns, card_width) = grid_layout(cols);
        let inner_width = card_width.saturating_sub(2);

        let total_rows = movies.len().div_ceil(columns);
        let visible_rows = (self.calculate_available_rows(rows) / CARD_HEIGHT).max(1);
        let cursor_row = self.cursor.min(movies.len().saturating_sub(1)) / columns;

        let mut start_row = cursor_row.saturating_sub(visible_rows / 2);
        let end_row = (start_row + visible_rows).min(total_rows);
        if end_row - start_row < visible_rows && total_rows >= visible_rows {
            start_row = end_row.saturating_sub(visible_rows);
        }

        let first = start_row * columns;
        let last = (end_row * columns).min(movies.len());

        let matcher = if search_term.trim().is_empty() {
            None
        } else {
            Some(SkimMatcherV2::default())
        };

        let cards = movies[first..last]
            .iter()
            .enumerate()
            .map(|(offset, movie)| {
                let title = truncate(&movie.title, inner_width);
                let highlight_ranges = matcher.as_ref().map_or_else(Vec::new, |m| {
                    Self::compute_highlight_ranges(&movie.title, search_term, m, title.chars().count())
                });

                CardItem {
                    title,
                    meta: truncate(&Self::card_meta(movie), inner_width),
                    is_selected: first + offset == self.cursor,
                    highlight_ranges,
                }
            })
            .collect();

        CardGrid {
            cards,
            columns,
            card_width,
        }
    }

    fn card_meta(movie: &Movie) -> String {
        match (movie.year.trim().is_empty(), movie.genre.is_empty()) {
            (false, false) => format!("{} · {}", movie.year, movie.genre_line()),
            (false, true) => movie.year.clone(),
            (true, false) => movie.genre_line(),
            (true, true) => String::new(),
        }
    }

    /// Computes character ranges of the title matched by the search term.
    ///
    /// Consecutive match indices are coalesced into `(start, end)` ranges with
    /// exclusive end. Ranges are cut at `visible_chars` so they never point
    /// past a truncated title.
    fn compute_highlight_ranges(
        title: &str,
        search_term: &str,
        matcher: &SkimMatcherV2,
        visible_chars: usize,
    ) -> Vec<(usize, usize)> {
        use fuzzy_matcher::FuzzyMatcher;

        let pattern: String = search_term.split_whitespace().collect::<Vec<_>>().join("");
        let Some((_score, indices)) = matcher.fuzzy_indices(title, &pattern.to_lowercase()) else {
            return vec![];
        };

        let mut ranges: Vec<(usize, usize)> = Vec::new();
        for idx in indices {
            match ranges.last_mut() {
                Some((_, end)) if *end == idx => *end = idx + 1,
                _ => ranges.push((idx, idx + 1)),
            }
        }

        ranges
            .into_iter()
            .filter(|&(start, _)| start < visible_chars)
            .map(|(start, end)| (start, end.min(visible_chars)))
            .collect()
    }

    fn compute_details(movie: &Movie, cols: usize) -> DetailsView {
        let inner_width = cols
            .saturating_sub(8)
            .min(DETAILS_MAX_WIDTH)
            .saturating_sub(4)
            .max(10);

        let mut facts = Vec::new();
        if !movie.director.is_empty() {
            facts.push(("Director".to_string(), movie.director.clone()));
        }
        if !movie.genre.is_empty() {
            facts.push(("Genre".to_string(), movie.genre_line()));
        }
        if !movie.actors.is_empty() {
            facts.push(("Starring".to_string(), movie.cast_line()));
        }
        if let Some(summary) = movie.rating_summary() {
            facts.push(("Rating".to_string(), summary.label()));
        }

        DetailsView {
            heading: movie.label(),
            facts,
            plot_lines: wrap_text(&movie.plot, inner_width),
            poster_url: movie.poster_url.clone(),
            reviews: movie
                .latest_reviews(DETAILS_REVIEW_LIMIT)
                .into_iter()
                .map(|review| Self::compute_review_line(review, inner_width))
                .collect(),
        }
    }

    fn compute_review_line(review: &Review, width: usize) -> ReviewLine {
        let byline = match review.date() {
            Some(date) => format!("{} · {date}", review.username),
            None => review.username.clone(),
        };

        ReviewLine {
            byline: truncate(&byline, width),
            comment_lines: wrap_text(&review.comment, width),
        }
    }

    fn compute_header(&self) -> HeaderInfo {
        let title = match self.controller.state().content() {
            ContentState::Cards(movies) => format!(" Featured Movies ({}) ", movies.len()),
            _ => " Featured Movies ".to_string(),
        };

        HeaderInfo { title }
    }

    fn compute_footer(&self) -> FooterInfo {
        let keybindings = match (self.input_mode, self.details_open()) {
            (InputMode::Search, _) => "Enter: search  Esc: cancel  Type to edit query",
            (InputMode::Browse, true) => "Esc/Enter/q: close details",
            (InputMode::Browse, false) => {
                "arrows or hjkl: navigate  Enter: details  /: search  r: reload  q: quit"
            }
        };

        FooterInfo {
            keybindings: keybindings.to_string(),
        }
    }

    fn compute_search_bar(&self) -> Option<SearchBarInfo> {
        (self.input_mode == InputMode::Search).then(|| SearchBarInfo {
            query: self.query.clone(),
        })
    }

    const fn calculate_available_rows(&self, total_rows: usize) -> usize {
        match self.input_mode {
            InputMode::Browse => total_rows.saturating_sub(BROWSE_CHROME_ROWS),
            InputMode::Search => total_rows.saturating_sub(SEARCH_CHROME_ROWS),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Rating;
    use crate::fetch::FetchOrdering;

    fn movies(count: usize) -> Vec<Movie> {
        (0..count)
            .map(|i| Movie::new(i.to_string(), format!("Movie {i}"), "2000"))
            .collect()
    }

    fn loaded_state(list: Vec<Movie>) -> AppState {
        let (mut controller, initial) = ViewController::new(FetchOrdering::LatestOnly);
        controller.settle(initial.token, Ok(list));
        AppState::new(controller)
    }

    #[test]
    fn horizontal_navigation_wraps() {
        let mut state = loaded_state(movies(3));
        state.move_cursor_left();
        assert_eq!(state.cursor, 2);
        state.move_cursor_right();
        assert_eq!(state.cursor, 0);
    }

    #[test]
    fn vertical_navigation_steps_by_columns() {
        let mut state = loaded_state(movies(7));
        state.grid_columns = 3;

        state.move_cursor_down();
        assert_eq!(state.cursor, 3);
        state.move_cursor_down();
        assert_eq!(state.cursor, 6);
        state.move_cursor_down();
        assert_eq!(state.cursor, 0);

        state.cursor = 2;
        state.move_cursor_up();
        assert_eq!(state.cursor, 5);
    }

    #[test]
    fn navigation_is_noop_without_movies() {
        let mut state = loaded_state(vec![]);
        state.move_cursor_down();
        state.move_cursor_right();
        assert_eq!(state.cursor, 0);
        assert!(state.cursor_movie().is_none());
    }

    #[test]
    fn loading_viewmodel_has_no_cards() {
        let (controller, _initial) = ViewController::new(FetchOrdering::LatestOnly);
        let vm = AppState::new(controller).compute_viewmodel(24, 80);

        assert!(matches!(vm.content, ContentView::Loading(_)));
        assert_eq!(vm.header.title, " Featured Movies ");
    }

    #[test]
    fn empty_viewmodel_mentions_search_term() {
        let mut state = loaded_state(movies(1));
        let request = state.controller.search("zzz-no-match");
        state.controller.settle(request.token, Ok(vec![]));

        let vm = state.compute_viewmodel(24, 80);

        let ContentView::Empty(empty) = vm.content else {
            panic!("expected empty state");
        };
        assert!(empty.message.contains("\"zzz-no-match\""));
    }

    #[test]
    fn card_window_follows_cursor() {
        let mut state = loaded_state(movies(30));
        state.set_viewport(80);
        state.cursor = 29;

        let vm = state.compute_viewmodel(24, 80);

        let ContentView::Cards(grid) = vm.content else {
            panic!("expected cards");
        };
        assert_eq!(grid.columns, state.grid_columns);
        assert!(grid.cards.iter().any(|c| c.is_selected && c.title == "Movie 29"));
        assert!(grid.cards.len() <= 30);
    }

    #[test]
    fn header_keeps_featured_title_while_searching() {
        let mut state = loaded_state(vec![]);
        let request = state.controller.search("movie");
        state.controller.settle(request.token, Ok(movies(2)));

        let vm = state.compute_viewmodel(24, 80);
        assert_eq!(vm.header.title, " Featured Movies (2) ");
    }

    #[test]
    fn highlight_ranges_coalesce_consecutive_matches() {
        let matcher = SkimMatcherV2::default();
        let ranges = AppState::compute_highlight_ranges("Inception", "incep", &matcher, 9);
        assert_eq!(ranges, vec![(0, 5)]);
    }

    #[test]
    fn highlight_ranges_stop_at_visible_width() {
        let matcher = SkimMatcherV2::default();
        let ranges = AppState::compute_highlight_ranges("Inception", "ion", &matcher, 4);
        assert!(ranges.iter().all(|&(start, end)| start < 4 && end <= 4));
    }

    #[test]
    fn details_follow_selection() {
        let mut state = loaded_state(movies(2));
        assert!(state.compute_viewmodel(24, 80).details.is_none());

        let movie = state.cursor_movie().cloned();
        state.controller.select_movie(movie);

        let details = state.compute_viewmodel(24, 80).details.unwrap();
        assert_eq!(details.heading, "Movie 0 (2000)");
    }

    #[test]
    fn details_show_rating_and_latest_reviews() {
        let mut movie = Movie::new("7", "Heat", "1995");
        movie.ratings = [5, 4, 4, 0]
            .into_iter()
            .map(|score| Rating {
                movie_id: "7".to_string(),
                score,
            })
            .collect();
        movie.reviews = (0..5)
            .map(|i| Review {
                id: i.to_string(),
                movie_id: "7".to_string(),
                username: format!("user{i}"),
                comment: "Great heist movie".to_string(),
                timestamp: 1_700_000_000_000 + i * 86_400_000,
            })
            .collect();
        let mut state = loaded_state(vec![movie.clone()]);
        state.controller.select_movie(Some(movie));

        let details = state.compute_viewmodel(30, 100).details.unwrap();

        assert!(details
            .facts
            .contains(&("Rating".to_string(), "4.3 / 5 (3 ratings)".to_string())));
        let bylines: Vec<&str> = details.reviews.iter().map(|r| r.byline.as_str()).collect();
        assert_eq!(
            bylines,
            ["user4 · 2023-11-18", "user3 · 2023-11-17", "user2 · 2023-11-16"]
        );
        assert_eq!(details.reviews[0].comment_lines, vec!["Great heist movie"]);
    }

    #[test]
    fn details_without_ratings_omit_rating_fact() {
        let mut state = loaded_state(movies(1));
        let movie = state.cursor_movie().cloned();
        state.controller.select_movie(movie);

        let details = state.compute_viewmodel(24, 80).details.unwrap();
        assert!(details.facts.iter().all(|(label, _)| label != "Rating"));
        assert!(details.reviews.is_empty());
    }

    #[test]
    fn search_bar_only_in_search_mode() {
        let mut state = loaded_state(movies(1));
        assert!(state.compute_viewmodel(24, 80).search_bar.is_none());

        state.input_mode = InputMode::Search;
        state.query = "dune".to_string();
        assert_eq!(state.compute_viewmodel(24, 80).search_bar.unwrap().query, "dune");
    }
}

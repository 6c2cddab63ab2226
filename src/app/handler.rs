//! Event handling and state transition logic.
//!
//! The handler follows a unidirectional data flow pattern:
//! 1. Events arrive from the plugin runtime or worker thread
//! 2. [`handle_event`] pattern-matches the event type
//! 3. State mutations occur via [`AppState`] and its controller
//! 4. Actions are collected and returned for execution
//!
//! Events fall into several categories:
//! - **Navigation**: `KeyDown`, `KeyUp`, `KeyLeft`, `KeyRight`
//! - **Details**: `OpenDetails`, `CloseDetails`
//! - **Search**: `SearchMode`, `Char`, `Backspace`, `SubmitSearch`, `ExitSearch`
//! - **Fetch results**: `MoviesFetched`, `WorkerResponse`
//!
//! # Example
//!
//! ```rust
//! use marquee::app::{handle_event, AppState, Event, ViewController};
//! use marquee::fetch::FetchOrdering;
//!
//! let (controller, initial) = ViewController::new(FetchOrdering::default());
//! let mut state = AppState::new(controller);
//! let (render, _actions) = handle_event(
//!     &mut state,
//!     &Event::MoviesFetched { token: initial.token, outcome: Ok(vec![]) },
//! )?;
//! assert!(render);
//! # Ok::<(), marquee::domain::MarqueeError>(())
//! ```

use super::controller::Settlement;
use super::modes::InputMode;
use crate::app::{Action, AppState};
use crate::domain::error::Result;
use crate::domain::{FetchError, Movie};
use crate::fetch::RequestToken;
use crate::worker::WorkerResponse;

/// Events triggered by user input or fetch completion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Moves the cursor one grid row down.
    KeyDown,
    /// Moves the cursor one grid row up.
    KeyUp,
    /// Moves the cursor to the previous card.
    KeyLeft,
    /// Moves the cursor to the next card.
    KeyRight,

    /// Opens the details overlay for the card under the cursor.
    OpenDetails,
    /// Closes the details overlay.
    CloseDetails,

    /// Enters search mode, seeding the query with the current search term.
    SearchMode,
    /// Appends a character to the search query.
    Char(char),
    /// Removes the last character from the search query.
    Backspace,
    /// Submits the query as a new search.
    SubmitSearch,
    /// Leaves search mode without searching.
    ExitSearch,

    /// Repeats the current search.
    Reload,
    /// Hides the plugin pane.
    CloseFocus,

    /// A fetch dispatched by the runtime has settled.
    MoviesFetched {
        token: RequestToken,
        outcome: std::result::Result<Vec<Movie>, FetchError>,
    },

    /// Wraps a response from the background worker thread.
    WorkerResponse(WorkerResponse),
}

/// Processes an event, mutates application state, and returns actions to execute.
///
/// The boolean is `true` when the state changed in a way that needs a
/// re-render.
///
/// # Errors
///
/// Currently infallible; the `Result` keeps the runtime's error path uniform.
pub fn handle_event(state: &mut AppState, event: &Event) -> Result<(bool, Vec<Action>)> {
    let _span = tracing::debug_span!("handle_event", event_type = ?event).entered();

    match event {
        Event::KeyDown | Event::KeyUp | Event::KeyLeft | Event::KeyRight => {
            if state.details_open() || state.input_mode == InputMode::Search {
                return Ok((false, vec![]));
            }
            match event {
                Event::KeyDown => state.move_cursor_down(),
                Event::KeyUp => state.move_cursor_up(),
                Event::KeyLeft => state.move_cursor_left(),
                _ => state.move_cursor_right(),
            }
            Ok((true, vec![]))
        }
        Event::OpenDetails => {
            let Some(movie) = state.cursor_movie().cloned() else {
                tracing::debug!("no movie under cursor");
                return Ok((false, vec![]));
            };
            state.controller.select_movie(Some(movie));
            Ok((true, vec![]))
        }
        Event::CloseDetails => {
            if !state.details_open() {
                return Ok((false, vec![]));
            }
            state.controller.select_movie(None);
            Ok((true, vec![]))
        }
        Event::SearchMode => {
            tracing::debug!("entering search mode");
            state.input_mode = InputMode::Search;
            state.query.clone_from(&state.controller.state().search_term);
            Ok((true, vec![]))
        }
        Event::Char(c) => {
            if state.input_mode != InputMode::Search {
                return Ok((false, vec![]));
            }
            state.query.push(*c);
            tracing::trace!(query = %state.query, "search query updated");
            Ok((true, vec![]))
        }
        Event::Backspace => {
            if state.input_mode != InputMode::Search {
                return Ok((false, vec![]));
            }
            state.query.pop();
            Ok((true, vec![]))
        }
        Event::SubmitSearch => {
            if state.input_mode != InputMode::Search {
                return Ok((false, vec![]));
            }
            state.input_mode = InputMode::Browse;
            let request = state.controller.search(std::mem::take(&mut state.query));
            Ok((true, vec![Action::Fetch(request)]))
        }
        Event::ExitSearch => {
            tracing::debug!(query = %state.query, "exiting search mode");
            state.input_mode = InputMode::Browse;
            state.query.clear();
            Ok((true, vec![]))
        }
        Event::Reload => {
            let term = state.controller.state().search_term.clone();
            let request = state.controller.search(term);
            Ok((true, vec![Action::Fetch(request)]))
        }
        Event::CloseFocus => Ok((false, vec![Action::CloseFocus])),
        Event::MoviesFetched { token, outcome } => Ok(apply_outcome(state, *token, outcome.clone())),
        Event::WorkerResponse(response) => {
            let (token, outcome) = response.clone().into_outcome();
            Ok(apply_outcome(state, token, outcome))
        }
    }
}

/// Settles a fetch and repositions the cursor over the resulting list.
///
/// A successful settlement starts the cursor at the first card; a failed one
/// keeps it where it was.
fn apply_outcome(
    state: &mut AppState,
    token: RequestToken,
    outcome: std::result::Result<Vec<Movie>, FetchError>,
) -> (bool, Vec<Action>) {
    let succeeded = outcome.is_ok();

    match state.controller.settle(token, outcome) {
        Settlement::Applied => {
            if succeeded {
                state.cursor = 0;
            } else {
                state.clamp_cursor();
            }
            (true, vec![])
        }
        Settlement::Stale | Settlement::Unknown => (false, vec![]),
    }
}

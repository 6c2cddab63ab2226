//! Application layer coordinating state, events, and actions.
//!
//! ```text
//! User Input → Events → Event Handler → State Mutations → Actions → Side Effects
//!                           ↑                                  ↓
//!                           └────────── Fetch results ─────────┘
//! ```
//!
//! - [`controller`]: Movie list, selection, loading and error state
//! - [`actions`]: Side effect commands emitted by the event handler
//! - [`handler`]: Event processing logic and state transition coordinator
//! - [`modes`]: Input mode state
//! - [`state`]: Interaction state and view model computation

pub mod actions;
pub mod controller;
pub mod handler;
pub mod modes;
pub mod state;

pub use actions::Action;
pub use controller::{ContentState, Settlement, ViewController, ViewState, FETCH_ERROR_MESSAGE};
pub use handler::{handle_event, Event};
pub use modes::InputMode;
pub use state::AppState;

//! Top-level rendering coordinator.
//!
//! Rendering is a two-step process: the application state is turned into a
//! [`UIViewModel`](crate::ui::viewmodel::UIViewModel), then the components
//! print it as ANSI-styled text.

use crate::app::AppState;
use crate::ui::components;
use crate::ui::theme::Theme;

/// Renders the plugin UI to stdout for a pane of `rows` x `cols`.
///
/// The theme is supplied by the caller; it is resolved once at load time.
pub fn render(state: &AppState, theme: &Theme, rows: usize, cols: usize) {
    let viewmodel = state.compute_viewmodel(rows, cols);
    components::render_layout(&viewmodel, theme, cols, rows);
}

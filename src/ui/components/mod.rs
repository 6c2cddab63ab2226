//! Composable UI component renderers.
//!
//! - [`header`]: Title bar
//! - [`footer`]: Keybinding hints
//! - [`search`]: Search input box
//! - [`cards`]: Movie card grid
//! - [`status`]: Loading and error messages
//! - [`empty`]: No-results message
//! - [`details`]: Details overlay
//!
//! [`render_layout`] stacks them:
//!
//! ```text
//! [blank line]
//! [Header]
//! [Border]
//! [Search Bar - 3 lines, search mode only]
//! [Content: loading | error | empty | cards]
//! [Border]
//! [Footer]
//! ```
//!
//! The details overlay is drawn last, over the content area.

mod cards;
mod details;
mod empty;
mod footer;
mod header;
mod search;
mod status;

use crate::ui::helpers::position_cursor;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{ContentView, UIViewModel};

use cards::render_card_grid;
use details::render_details;
use empty::render_empty_state;
use footer::render_footer;
use header::render_header;
use search::render_search_bar;
use status::render_status;

/// Renders a horizontal border line at `row`. Returns the next row.
fn render_border(row: usize, color: &str, cols: usize) -> usize {
    position_cursor(row, 1);
    print!("{}", Theme::fg(color));
    print!("{}", "─".repeat(cols));
    print!("{}", Theme::reset());
    row + 1
}

/// Renders the whole pane for `vm`.
pub fn render_layout(vm: &UIViewModel, theme: &Theme, cols: usize, rows: usize) {
    let mut current_row = 2;

    current_row = render_header(current_row, &vm.header, theme, cols);
    current_row = render_border(current_row, &theme.colors.border, cols);
    if let Some(search) = &vm.search_bar {
        current_row = render_search_bar(current_row, search, theme, cols);
    }

    let footer_row = rows.saturating_sub(1);
    let border_row = footer_row.saturating_sub(1);
    let content_top = current_row;
    let message_row = content_top + border_row.saturating_sub(content_top) / 3;

    match &vm.content {
        ContentView::Loading(status) => {
            render_status(message_row, status, &theme.colors.loading_fg, cols);
        }
        ContentView::Error(status) => {
            render_status(message_row, status, &theme.colors.error_fg, cols);
        }
        ContentView::Empty(empty) => render_empty_state(message_row, empty, theme, cols),
        ContentView::Cards(grid) => {
            render_card_grid(content_top, grid, theme);
        }
    }

    if let Some(details) = &vm.details {
        render_details(details, theme, content_top, border_row, cols);
    }

    render_border(border_row, &theme.colors.border, cols);
    render_footer(footer_row, &vm.footer, theme, cols);
}

//! Loading and error status line.

use crate::ui::helpers::{position_cursor, truncate};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::StatusInfo;

/// Renders a single centered status message at `row` in `color`.
pub fn render_status(row: usize, status: &StatusInfo, color: &str, cols: usize) {
    let message = truncate(&status.message, cols);
    let len = message.chars().count();
    let padding = cols.saturating_sub(len) / 2;

    position_cursor(row, 1);
    print!("{}", Theme::bold());
    print!("{}", Theme::fg(color));
    print!("{}", " ".repeat(padding));
    print!("{message}");
    print!("{}", " ".repeat(cols.saturating_sub(padding + len)));
    print!("{}", Theme::reset());
}

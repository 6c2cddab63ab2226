//! Movie card grid renderer.
//!
//! Each card is [`CARD_HEIGHT`] rows tall:
//!
//! ```text
//! ┌──────────────────────┐
//! │Inception             │
//! │2010 · Action, Sci-Fi │
//! └──────────────────────┘
//! ```
//!
//! The selected card is drawn with the selection colors and a heavier frame.

use crate::ui::helpers::{self, position_cursor};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{CardGrid, CardItem, CARD_GAP, CARD_HEIGHT};

/// Renders the card grid starting at `row`.
///
/// Cards are laid out left to right in rows of `grid.columns`, each
/// [`CARD_HEIGHT`] lines tall. The selected card gets the selection colors
/// and fuzzy-matched title characters are highlighted.
///
/// # Returns
///
/// The row after the last rendered card row.
pub fn render_card_grid(row: usize, grid: &CardGrid, theme: &Theme) -> usize {
    let columns = grid.columns.max(1);
    let mut current_row = row;

    for chunk in grid.cards.chunks(columns) {
        for (i, card) in chunk.iter().enumerate() {
            let col = 1 + i * (grid.card_width + CARD_GAP);
            render_card(current_row, col, card, grid.card_width, theme);
        }
        current_row += CARD_HEIGHT;
    }

    current_row
}

fn render_card(row: usize, col: usize, card: &CardItem, width: usize, theme: &Theme) {
    let inner = width.saturating_sub(2);
    let (top, side, bottom) = if card.is_selected {
        (('┏', '┓'), '┃', ('┗', '┛'))
    } else {
        (('┌', '┐'), '│', ('└', '┘'))
    };
    let (horizontal, border_color) = if card.is_selected {
        ('━', &theme.colors.selection_bg)
    } else {
        ('─', &theme.colors.card_border)
    };
    let rule: String = std::iter::repeat(horizontal).take(inner).collect();

    position_cursor(row, col);
    print!("{}{}{rule}{}{}", Theme::fg(border_color), top.0, top.1, Theme::reset());

    position_cursor(row + 1, col);
    print!("{}{side}", Theme::fg(border_color));
    if card.is_selected {
        print!("{}", Theme::bold());
        print!("{}", Theme::fg(&theme.colors.selection_fg));
        print!("{}", Theme::bg(&theme.colors.selection_bg));
    } else {
        print!("{}", Theme::fg(&theme.colors.card_title_fg));
    }
    helpers::render_highlighted_text(&card.title, &card.highlight_ranges, theme, card.is_selected);
    print!("{}", " ".repeat(inner.saturating_sub(card.title.chars().count())));
    print!("{}{}{side}{}", Theme::reset(), Theme::fg(border_color), Theme::reset());

    position_cursor(row + 2, col);
    print!("{}{side}", Theme::fg(border_color));
    print!("{}", Theme::fg(&theme.colors.text_dim));
    print!("{}", card.meta);
    print!("{}", " ".repeat(inner.saturating_sub(card.meta.chars().count())));
    print!("{}{side}{}", Theme::fg(border_color), Theme::reset());

    position_cursor(row + 3, col);
    print!("{}{}{rule}{}{}", Theme::fg(border_color), bottom.0, bottom.1, Theme::reset());
}

//! Details overlay renderer.

use crate::ui::helpers::{position_cursor, truncate};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{DetailsView, DETAILS_MAX_WIDTH};

/// Draws the details overlay centered over rows `top..bottom`.
///
/// The box width matches the width the plot was wrapped for. Plot lines
/// that do not fit the available height are dropped and the last visible
/// line ends in `...`. Reviews follow the plot and are cut at the bottom
/// border when the pane is too short.
///
/// # Parameters
///
/// * `details` - The overlay content
/// * `theme` - Color theme for the border, title and text
/// * `top` - First row of the overlay
/// * `bottom` - Row the overlay must end before
/// * `cols` - Pane width, used to center the box
pub fn render_details(details: &DetailsView, theme: &Theme, top: usize, bottom: usize, cols: usize) {
    let box_width = cols.saturating_sub(8).min(DETAILS_MAX_WIDTH).max(14);
    let inner = box_width.saturating_sub(4);
    let left = cols.saturating_sub(box_width) / 2 + 1;

    let mut lines: Vec<(String, &str)> = Vec::new();
    lines.push((truncate(&details.heading, inner), theme.colors.overlay_title_fg.as_str()));
    lines.push((String::new(), theme.colors.text_normal.as_str()));
    for (label, value) in &details.facts {
        lines.push((truncate(&format!("{label}: {value}"), inner), theme.colors.text_normal.as_str()));
    }
    if !details.poster_url.is_empty() {
        lines.push((truncate(&format!("Poster: {}", details.poster_url), inner), theme.colors.text_dim.as_str()));
    }

    let height = bottom.saturating_sub(top);
    let fixed = lines.len() + 3;
    let plot_room = height.saturating_sub(fixed);
    if !details.plot_lines.is_empty() && plot_room > 0 {
        lines.push((String::new(), theme.colors.text_normal.as_str()));
        let shown = details.plot_lines.len().min(plot_room - 1);
        for (i, line) in details.plot_lines.iter().take(shown).enumerate() {
            let text = if i + 1 == shown && shown < details.plot_lines.len() {
                truncate(&format!("{line}..."), inner)
            } else {
                line.clone()
            };
            lines.push((text, theme.colors.text_normal.as_str()));
        }
    }

    if !details.reviews.is_empty() {
        lines.push((String::new(), theme.colors.text_normal.as_str()));
        lines.push(("Reviews".to_string(), theme.colors.overlay_title_fg.as_str()));
        for review in &details.reviews {
            lines.push((review.byline.clone(), theme.colors.text_dim.as_str()));
            for line in &review.comment_lines {
                lines.push((format!("  {}", truncate(line, inner.saturating_sub(2))), theme.colors.text_normal.as_str()));
            }
        }
    }
    lines.truncate(height.saturating_sub(2));

    let border = Theme::fg(&theme.colors.overlay_border);
    let rule = "─".repeat(box_width.saturating_sub(2));

    position_cursor(top, left);
    print!("{border}╭{rule}╮{}", Theme::reset());

    for (offset, (text, color)) in lines.iter().enumerate() {
        position_cursor(top + 1 + offset, left);
        print!("{border}│ ");
        if offset == 0 {
            print!("{}", Theme::bold());
        }
        print!("{}{text}", Theme::fg(color));
        print!("{}", " ".repeat(inner.saturating_sub(text.chars().count())));
        print!("{}{border} │{}", Theme::reset(), Theme::reset());
    }

    position_cursor(top + 1 + lines.len(), left);
    print!("{border}╰{rule}╯{}", Theme::reset());
}

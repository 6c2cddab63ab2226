//! Theme management and ANSI escape sequence generation.
//!
//! Built-in themes are the four Catppuccin flavors; `catppuccin-mocha` is the
//! default. Custom themes are TOML files with the same keys:
//!
//! ```toml
//! name = "my-theme"
//!
//! [colors]
//! header_fg = "#cba6f7"
//! selection_fg = "#1e1e2e"
//! selection_bg = "#f5c2e7"
//! text_normal = "#cdd6f4"
//! text_dim = "#6c7086"
//! border = "#45475a"
//! search_bar_border = "#f5c2e7"
//! match_highlight_fg = "#1e1e2e"
//! match_highlight_bg = "#f9e2af"
//! empty_state_fg = "#89b4fa"
//! error_fg = "#f38ba8"
//! loading_fg = "#fab387"
//! card_border = "#45475a"
//! card_title_fg = "#cdd6f4"
//! overlay_border = "#b4befe"
//! overlay_title_fg = "#cba6f7"
//! ```
//!
//! A theme is resolved once when the plugin loads and passed to the renderer
//! on every frame; nothing else reads it.

use crate::domain::error::{MarqueeError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Name of the theme used when nothing else is configured.
pub const DEFAULT_THEME: &str = "catppuccin-mocha";

/// Color scheme configuration for UI rendering.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Theme {
    /// Human-readable theme name.
    pub name: String,
    /// Color palette for all UI elements.
    pub colors: ThemeColors,
}

/// Color definitions for all UI elements, as hex strings (e.g. "#cdd6f4").
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ThemeColors {
    pub header_fg: String,
    #[serde(default)]
    pub header_bg: Option<String>,

    /// Selected card foreground color.
    pub selection_fg: String,
    /// Selected card background color.
    pub selection_bg: String,

    pub text_normal: String,
    /// Dimmed text color (footer, card metadata).
    pub text_dim: String,

    /// Border and separator line color.
    pub border: String,

    pub search_bar_border: String,
    pub match_highlight_fg: String,
    pub match_highlight_bg: String,

    /// Empty result message color.
    pub empty_state_fg: String,
    /// Fetch error message color.
    pub error_fg: String,
    /// Loading indicator color.
    pub loading_fg: String,

    pub card_border: String,
    pub card_title_fg: String,

    /// Details overlay frame color.
    pub overlay_border: String,
    /// Details overlay heading color.
    pub overlay_title_fg: String,
}

impl Theme {
    /// Loads a built-in theme by name.
    ///
    /// Supported names: `catppuccin-mocha`, `catppuccin-latte`,
    /// `catppuccin-frappe`, `catppuccin-macchiato`.
    ///
    /// ```rust
    /// use marquee::ui::theme::Theme;
    ///
    /// let theme = Theme::from_name("catppuccin-latte").unwrap();
    /// assert_eq!(theme.name, "catppuccin-latte");
    /// assert!(Theme::from_name("solarized").is_none());
    /// ```
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let toml_str = match name {
            "catppuccin-mocha" => include_str!("../../themes/catppuccin-mocha.toml"),
            "catppuccin-latte" => include_str!("../../themes/catppuccin-latte.toml"),
            "catppuccin-frappe" => include_str!("../../themes/catppuccin-frappe.toml"),
            "catppuccin-macchiato" => include_str!("../../themes/catppuccin-macchiato.toml"),
            _ => return None,
        };

        toml::from_str(toml_str).ok()
    }

    /// Loads a theme from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`MarqueeError::Theme`] if the file cannot be read or parsed.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .map_err(|e| MarqueeError::Theme(format!("failed to read {}: {e}", path.display())))?;

        toml::from_str(&contents)
            .map_err(|e| MarqueeError::Theme(format!("failed to parse {}: {e}", path.display())))
    }

    /// Picks the theme to use: a readable theme file first, then a known
    /// built-in name, then the default.
    ///
    /// Failures are logged and fall through to the next choice.
    #[must_use]
    pub fn resolve(name: Option<&str>, file: Option<&Path>) -> Self {
        if let Some(path) = file {
            match Self::from_file(path) {
                Ok(theme) => return theme,
                Err(e) => tracing::warn!(error = %e, "custom theme unavailable, falling back"),
            }
        }

        if let Some(name) = name {
            if let Some(theme) = Self::from_name(name) {
                return theme;
            }
            tracing::warn!(theme = %name, "unknown theme name, using {DEFAULT_THEME}");
        }

        Self::default()
    }

    /// Converts a hex color to RGB, falling back to white on malformed input.
    fn hex_to_rgb(hex: &str) -> (u8, u8, u8) {
        let hex = hex.trim_start_matches('#').trim();

        if hex.len() != 6 || !hex.is_ascii() {
            return (255, 255, 255);
        }

        let r = u8::from_str_radix(&hex[0..2], 16).unwrap_or(255);
        let g = u8::from_str_radix(&hex[2..4], 16).unwrap_or(255);
        let b = u8::from_str_radix(&hex[4..6], 16).unwrap_or(255);

        (r, g, b)
    }

    /// ANSI 24-bit foreground color escape sequence.
    ///
    /// ```rust
    /// use marquee::ui::theme::Theme;
    ///
    /// assert_eq!(Theme::fg("#ff0080"), "\u{1b}[38;2;255;0;128m");
    /// ```
    #[must_use]
    pub fn fg(hex: &str) -> String {
        let (r, g, b) = Self::hex_to_rgb(hex);
        format!("\u{001b}[38;2;{r};{g};{b}m")
    }

    /// ANSI 24-bit background color escape sequence.
    #[must_use]
    pub fn bg(hex: &str) -> String {
        let (r, g, b) = Self::hex_to_rgb(hex);
        format!("\u{001b}[48;2;{r};{g};{b}m")
    }

    #[must_use]
    pub const fn bold() -> &'static str {
        "\u{001b}[1m"
    }

    #[must_use]
    pub const fn dim() -> &'static str {
        "\u{001b}[2m"
    }

    /// Clears all styling (colors, bold, dim).
    #[must_use]
    pub const fn reset() -> &'static str {
        "\u{001b}[0m"
    }
}

/// The theme chosen at load time, handed to the renderer on every frame.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ThemeContext {
    theme: Theme,
}

impl ThemeContext {
    /// Resolves the configured theme once: theme file, then theme name,
    /// then [`DEFAULT_THEME`].
    #[must_use]
    pub fn init(config: &crate::Config) -> Self {
        let theme = Theme::resolve(
            config.theme_name.as_deref(),
            config.theme_file.as_deref().map(Path::new),
        );
        tracing::debug!(theme = %theme.name, "theme resolved");
        Self { theme }
    }

    #[must_use]
    pub const fn theme(&self) -> &Theme {
        &self.theme
    }
}

impl Default for Theme {
    /// Returns the default theme (Catppuccin Mocha).
    ///
    /// # Panics
    ///
    /// Panics if the built-in theme fails to parse.
    fn default() -> Self {
        Self::from_name(DEFAULT_THEME).expect("built-in catppuccin-mocha theme should always parse")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn all_builtin_themes_parse() {
        for name in [
            "catppuccin-mocha",
            "catppuccin-latte",
            "catppuccin-frappe",
            "catppuccin-macchiato",
        ] {
            let theme = Theme::from_name(name).unwrap_or_else(|| panic!("{name} should parse"));
            assert_eq!(theme.name, name);
        }
    }

    #[test]
    fn theme_file_wins_over_name() {
        let mut custom = Theme::from_name("catppuccin-latte").unwrap();
        custom.name = "custom".to_string();
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(toml::to_string(&custom).unwrap().as_bytes()).unwrap();

        let theme = Theme::resolve(Some("catppuccin-frappe"), Some(file.path()));
        assert_eq!(theme.name, "custom");
    }

    #[test]
    fn unreadable_file_falls_back_to_name_then_default() {
        let missing = Path::new("/nonexistent/marquee-theme.toml");

        assert_eq!(
            Theme::resolve(Some("catppuccin-frappe"), Some(missing)).name,
            "catppuccin-frappe"
        );
        assert_eq!(Theme::resolve(Some("nope"), Some(missing)).name, DEFAULT_THEME);
        assert_eq!(Theme::resolve(None, None).name, DEFAULT_THEME);
    }

    #[test]
    fn malformed_theme_file_is_a_theme_error() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"name = 3").unwrap();
        assert!(matches!(Theme::from_file(file.path()), Err(MarqueeError::Theme(_))));
    }

    #[test]
    fn context_uses_configured_name() {
        let config = crate::Config {
            theme_name: Some("catppuccin-macchiato".to_string()),
            ..crate::Config::default()
        };
        assert_eq!(ThemeContext::init(&config).theme().name, "catppuccin-macchiato");
    }

    #[test]
    fn malformed_hex_renders_white() {
        assert_eq!(Theme::fg("zzz"), Theme::fg("#ffffff"));
    }
}

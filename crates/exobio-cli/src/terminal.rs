//! Terminal styling and color utilities.
//!
//! ANSI escape code definitions and capability detection for the text
//! renderers. Color can be disabled with `--no-color`, `NO_COLOR` or
//! `TERM=dumb`.

/// ANSI escape codes for text styling and colors.
pub mod colors {
    /// Reset all styling.
    pub const RESET: &str = "\x1b[0m";

    /// Bright bold white for genus and body names.
    pub const WHITE_BOLD: &str = "\x1b[1;97m";
    /// Gray for secondary elements (tree lines, empty results).
    pub const GRAY: &str = "\x1b[90m";
    /// Cyan for color variants.
    pub const CYAN: &str = "\x1b[36m";
    /// Green for identified values.
    pub const GREEN: &str = "\x1b[32m";
    /// Orange (256-color) for value ranges.
    pub const ORANGE: &str = "\x1b[38;5;208m";
    /// Red for not-applicable genera.
    pub const RED: &str = "\x1b[31m";
}

/// A collection of resolved color codes, either actual ANSI sequences
/// or empty strings when color is disabled.
#[derive(Debug, Clone, Copy)]
pub struct ColorPalette {
    pub reset: &'static str,
    pub heading: &'static str,
    pub muted: &'static str,
    pub variant: &'static str,
    pub value: &'static str,
    pub range: &'static str,
    pub warning: &'static str,
}

impl ColorPalette {
    /// Create a palette with actual ANSI color codes.
    #[must_use]
    pub const fn colored() -> Self {
        Self {
            reset: colors::RESET,
            heading: colors::WHITE_BOLD,
            muted: colors::GRAY,
            variant: colors::CYAN,
            value: colors::GREEN,
            range: colors::ORANGE,
            warning: colors::RED,
        }
    }

    /// Create a palette with no colors (empty strings).
    #[must_use]
    pub const fn plain() -> Self {
        Self {
            reset: "",
            heading: "",
            muted: "",
            variant: "",
            value: "",
            range: "",
            warning: "",
        }
    }

    /// Create a palette based on terminal capabilities.
    #[must_use]
    pub fn detect() -> Self {
        if supports_color() {
            Self::colored()
        } else {
            Self::plain()
        }
    }

    /// Palette honoring an explicit `--no-color` flag before detection.
    #[must_use]
    pub fn for_flag(no_color: bool) -> Self {
        if no_color {
            Self::plain()
        } else {
            Self::detect()
        }
    }
}

impl Default for ColorPalette {
    fn default() -> Self {
        Self::detect()
    }
}

/// Check if the terminal supports ANSI color codes.
///
/// Respects the `NO_COLOR` environment variable (https://no-color.org/) and
/// the `TERM=dumb` convention.
#[must_use]
pub fn supports_color() -> bool {
    if std::env::var_os("NO_COLOR").is_some() {
        return false;
    }
    if let Ok(term) = std::env::var("TERM") {
        if term.eq_ignore_ascii_case("dumb") {
            return false;
        }
    }
    true
}

/// Check if the terminal supports Unicode characters.
///
/// Looks for explicit UTF hints in `LANG` and `LC_ALL`.
#[must_use]
pub fn supports_unicode() -> bool {
    for var in ["LANG", "LC_ALL"] {
        if let Ok(value) = std::env::var(var) {
            if value.to_uppercase().contains("UTF") {
                return true;
            }
        }
    }
    cfg!(windows)
}

/// Tree connector used before breakdown entries.
#[must_use]
pub fn branch(last: bool, unicode: bool) -> &'static str {
    match (last, unicode) {
        (false, true) => "├─",
        (true, true) => "└─",
        (false, false) => "|-",
        (true, false) => "`-",
    }
}

/// Format a number with thousand separators (commas).
///
/// # Examples
///
/// ```
/// # use exobio_cli::terminal::format_with_separators;
/// assert_eq!(format_with_separators(999), "999");
/// assert_eq!(format_with_separators(7252500), "7,252,500");
/// ```
#[must_use]
pub fn format_with_separators(n: u64) -> String {
    if n < 1000 {
        return n.to_string();
    }
    let s = n.to_string();
    let mut result = String::new();
    for (i, c) in s.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }
    result.chars().rev().collect()
}

//! Measuring and laying out text that contains ANSI escape sequences.
//!
//! Every width decision in this crate goes through [`visible_length`], which
//! counts characters after [`strip_ansi`] has removed CSI sequences
//! (`ESC [`, any parameter bytes, then a single letter or `~`).
//!
//! ```rust
//! use mb_util::ansi::{center_ansi, strip_ansi, visible_length};
//!
//! let bold = "\x1b[1mBold\x1b[0m";
//! assert_eq!(strip_ansi(bold), "Bold");
//! assert_eq!(visible_length(bold), 4);
//! assert_eq!(center_ansi(bold, 8), "  \x1b[1mBold\x1b[0m  ");
//! ```

use std::borrow::Cow;

use once_cell::sync::Lazy;
use regex::Regex;

static CSI_SEQUENCE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\x1b\[[^A-Za-z~]*[A-Za-z~]").expect("CSI sequence pattern is valid")
});

static WHITESPACE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s").expect("whitespace pattern is valid"));

/// Returns a copy of `s` with ANSI CSI escape sequences removed.
///
/// Handles bare resets (`ESC[m`), multi-parameter SGR sequences
/// (`ESC[1;33m`, `ESC[48;2;100;50;50m`) and cursor movement / clearing
/// sequences (`ESC[H`, `ESC[2J`, `ESC[12A`, `ESC[3~`).
pub fn strip_ansi(s: &str) -> Cow<'_, str> {
    CSI_SEQUENCE.replace_all(s, "")
}

/// Number of characters in `s` once escape sequences are removed.
pub fn visible_length(s: &str) -> usize {
    strip_ansi(s).chars().count()
}

/// Centers `s` in `columns` characters, disregarding escape sequences.
///
/// Every whitespace character in `s` becomes a plain space. Padding is added
/// only at the two ends, the left side getting the smaller half. Text wider
/// than `columns` comes back without padding.
pub fn center_ansi(s: &str, columns: usize) -> String {
    let normalized = WHITESPACE.replace_all(s, " ");
    let length = visible_length(&normalized);

    if length >= columns {
        return normalized.into_owned();
    }

    let extra = columns - length;
    let pre = extra / 2;
    let post = extra - pre;

    format!("{}{}{}", " ".repeat(pre), normalized, " ".repeat(post))
}

/// Word-wraps `text` to fit a terminal `width` columns wide.
///
/// Lines are filled to at most `width - 1` visible columns so the cursor never
/// lands in the last column. Escape sequences do not count toward the width,
/// and words longer than a line are broken.
pub fn wrap(text: &str, width: usize) -> String {
    let options = textwrap::Options::new(width.saturating_sub(1).max(1)).break_words(true);
    textwrap::fill(text, options)
}

/// [`wrap`] using the current terminal width.
pub fn wrap_to_terminal(text: &str) -> String {
    wrap(text, crate::console::width())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_ansi_colors() {
        let input = "\x1b[1mBold\x1b[0m \x1b[34mBlue\x1b[0m \x1b[1;32mBright Green\x1b[0m \x1b[48;2;100;50;50mRust Background\x1b[0m";
        assert_eq!(strip_ansi(input), "Bold Blue Bright Green Rust Background");
    }

    #[test]
    fn test_strip_ansi_positioning_and_clearing() {
        assert_eq!(strip_ansi("Hi\x1b[H\x1b[2J\x1b[12Athere"), "Hithere");
    }

    #[test]
    fn test_strip_ansi_bare_reset_and_tilde() {
        assert_eq!(strip_ansi("a\x1b[mb\x1b[3~c"), "abc");
    }

    #[test]
    fn test_strip_ansi_borrows_plain_text() {
        assert!(matches!(strip_ansi("plain"), Cow::Borrowed("plain")));
    }

    #[test]
    fn test_visible_length_counts_chars_not_bytes() {
        assert_eq!(visible_length("\x1b[31mé─\x1b[0m"), 2);
        assert_eq!(visible_length(""), 0);
    }

    #[test]
    fn test_center_ansi_narrow_target() {
        assert_eq!(center_ansi("abcd", 1), "abcd");
        assert_eq!(center_ansi("abcd", 4), "abcd");
    }

    #[test]
    fn test_center_ansi_odd_padding_goes_right() {
        assert_eq!(center_ansi("ab", 5), " ab  ");
    }

    #[test]
    fn test_center_ansi_preserves_escapes() {
        let centered = center_ansi("\x1b[1;31mhi\x1b[0m", 6);
        assert_eq!(centered, "  \x1b[1;31mhi\x1b[0m  ");
    }

    #[test]
    fn test_center_ansi_replaces_whitespace() {
        assert_eq!(center_ansi("a\tb\nc", 5), "a b c");
    }

    #[test]
    fn test_wrap_breaks_before_last_column() {
        assert_eq!(wrap("hello world foo bar", 12), "hello world\nfoo bar");
    }

    #[test]
    fn test_wrap_ignores_escapes() {
        let wrapped = wrap("\x1b[1mhello\x1b[0m world", 12);
        assert_eq!(wrapped, "\x1b[1mhello\x1b[0m world");
    }

    #[test]
    fn test_wrap_to_terminal_uses_terminal_width() {
        let text = "word ".repeat(60);
        assert_eq!(wrap_to_terminal(&text), wrap(&text, crate::console::width()));
        assert_eq!(wrap_to_terminal("hi"), "hi");
    }
}

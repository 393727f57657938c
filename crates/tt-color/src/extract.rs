// SPDX-License-Identifier: MIT

//! Find color literals inside JSON string tokens.

use std::sync::LazyLock;

use regex::Regex;

/// First hex (`#` + 8/6/4/3 digits, longest first) or `rgb[a](…)` /
/// `hsl[a](…)` literal. Functional arguments may hold ASCII digits, dots,
/// whitespace, `%` and commas.
static COLOR_LITERAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"#(?:[0-9a-fA-F]{8}|[0-9a-fA-F]{6}|[0-9a-fA-F]{4}|[0-9a-fA-F]{3})|rgba?\((?-u:[\d.\s%,])+\)|hsla?\((?-u:[\d.\s%,])+\)",
    )
    .expect("color literal pattern is valid")
});

/// Return the first color literal inside a quoted string token.
///
/// The first and last characters of `quoted` are taken to be the quotes and
/// are not searched. For an unterminated token (no closing quote) that
/// still drops the final character, which is what the highlighter wants:
/// a literal is only swatched once it is followed by something.
///
/// ```
/// use tt_color::extract_color;
///
/// assert_eq!(extract_color(r##""#3b82f6""##), Some("#3b82f6"));
/// assert_eq!(extract_color(r#""border: 1px solid rgb(0, 0, 0)""#), Some("rgb(0, 0, 0)"));
/// assert_eq!(extract_color(r#""Inter""#), None);
/// ```
#[must_use]
pub fn extract_color(quoted: &str) -> Option<&str> {
    let inner = strip_outer_chars(quoted);
    COLOR_LITERAL.find(inner).map(|m| m.as_str())
}

/// Drop the first and last character (char-boundary safe).
fn strip_outer_chars(s: &str) -> &str {
    let mut chars = s.chars();
    if chars.next().is_none() || chars.next_back().is_none() {
        return "";
    }
    chars.as_str()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_lengths() {
        assert_eq!(extract_color(r##""#abc""##), Some("#abc"));
        assert_eq!(extract_color(r##""#abcd""##), Some("#abcd"));
        assert_eq!(extract_color(r##""#aabbcc""##), Some("#aabbcc"));
        assert_eq!(extract_color(r##""#aabbccdd""##), Some("#aabbccdd"));
    }

    #[test]
    fn prefers_longest_hex() {
        // Five digits: the four-digit form is the longest valid prefix.
        assert_eq!(extract_color(r##""#abcde""##), Some("#abcd"));
        // Seven digits: six wins.
        assert_eq!(extract_color(r##""#abcdef1""##), Some("#abcdef"));
    }

    #[test]
    fn too_short_hex() {
        assert_eq!(extract_color(r##""#ab""##), None);
    }

    #[test]
    fn functional_forms() {
        assert_eq!(extract_color(r#""rgba(0,0,0,0.2)""#), Some("rgba(0,0,0,0.2)"));
        assert_eq!(extract_color(r#""hsl(217, 91%, 60%)""#), Some("hsl(217, 91%, 60%)"));
        assert_eq!(extract_color(r#""hsla(0, 0%, 0%, .5)""#), Some("hsla(0, 0%, 0%, .5)"));
    }

    #[test]
    fn first_match_wins() {
        assert_eq!(extract_color(r##""#fff then #000""##), Some("#fff"));
    }

    #[test]
    fn embedded_in_text() {
        assert_eq!(extract_color(r##""color: #f00;""##), Some("#f00"));
    }

    #[test]
    fn no_color() {
        assert_eq!(extract_color(r#""0.75rem""#), None);
        assert_eq!(extract_color(r#""rgb()""#), None);
        assert_eq!(extract_color(r#""""#), None);
    }

    #[test]
    fn quotes_are_not_searched() {
        // The last character is treated as the closing quote.
        assert_eq!(extract_color(r##""#fff"##), None);
        assert_eq!(extract_color("\""), None);
        assert_eq!(extract_color(""), None);
    }

    #[test]
    fn non_ascii_digits_are_not_colors() {
        assert_eq!(extract_color("\"rgb(٣٣,٣,٣)\""), None);
        assert_eq!(extract_color("\"hsl(１２０, 50%, 50%)\""), None);
    }

    #[test]
    fn single_quotes() {
        assert_eq!(extract_color("'#123456'"), Some("#123456"));
    }
}

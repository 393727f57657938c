// SPDX-License-Identifier: MIT
//
// Display-column helpers.
//
// Lint errors carry char columns; a terminal needs display columns to put a
// caret under the right glyph (CJK and most emoji take two cells).

use unicode_width::UnicodeWidthChar;

/// Display width of the first `chars` characters of `line`.
///
/// Tabs count as `tab_width` cells. Control characters count as zero.
#[must_use]
pub fn prefix_width(line: &str, chars: usize, tab_width: usize) -> usize {
    line.chars()
        .take(chars)
        .map(|c| if c == '\t' { tab_width } else { c.width().unwrap_or(0) })
        .sum()
}

/// Number of decimal digits needed to print `n` (at least 1).
#[must_use]
pub const fn digits(mut n: usize) -> usize {
    let mut count = 1;
    while n >= 10 {
        n /= 10;
        count += 1;
    }
    count
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ascii_prefix() {
        assert_eq!(prefix_width("  \"bogus\": 1", 2, 2), 2);
    }

    #[test]
    fn wide_chars_take_two_cells() {
        assert_eq!(prefix_width("日本語", 2, 2), 4);
    }

    #[test]
    fn tabs_expand() {
        assert_eq!(prefix_width("\t\tx", 3, 2), 5);
    }

    #[test]
    fn prefix_longer_than_line() {
        assert_eq!(prefix_width("ab", 10, 2), 2);
    }

    #[test]
    fn digit_counts() {
        assert_eq!(digits(0), 1);
        assert_eq!(digits(9), 1);
        assert_eq!(digits(10), 2);
        assert_eq!(digits(1280), 4);
    }
}

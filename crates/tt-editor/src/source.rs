// SPDX-License-Identifier: MIT

//! Source text and position types.
//!
//! All coordinates are **0-indexed** internally. Line 0 is the first line,
//! column 0 is the first character. Columns count Unicode scalar values
//! (chars), not bytes. Lint errors convert to 1-indexed at the boundary,
//! because that is what the error panel and the JSON parser speak.
//!
//! Lines are split on `\n` only. A `\r` before the newline stays part of the
//! line, which keeps line numbers identical to the JSON parser's.

use std::borrow::Cow;
use std::fmt;

use ropey::Rope;

// ---------------------------------------------------------------------------
// Position
// ---------------------------------------------------------------------------

/// A position in the editor text: (line, column), both 0-indexed.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    pub line: usize,
    pub col: usize,
}

impl Position {
    /// The origin: line 0, column 0.
    pub const ZERO: Self = Self { line: 0, col: 0 };

    /// Create a new position.
    #[inline]
    #[must_use]
    pub const fn new(line: usize, col: usize) -> Self {
        Self { line, col }
    }

    /// 1-based line number.
    #[inline]
    #[must_use]
    pub const fn line_number(self) -> usize {
        self.line + 1
    }

    /// 1-based column number.
    #[inline]
    #[must_use]
    pub const fn column_number(self) -> usize {
        self.col + 1
    }
}

impl fmt::Debug for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Pos({}:{})", self.line, self.col)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // 1-indexed for human display.
        write!(f, "{}:{}", self.line + 1, self.col + 1)
    }
}

// ---------------------------------------------------------------------------
// SourceText
// ---------------------------------------------------------------------------

/// Editor text with line indexing.
///
/// Wraps a [`ropey::Rope`] built with LF-only line breaks. An empty text has
/// one (empty) line, and a trailing newline starts a final empty line, the
/// same way `str::split('\n')` counts.
#[derive(Clone)]
pub struct SourceText {
    rope: Rope,
}

impl SourceText {
    /// Index `text`.
    #[must_use]
    pub fn new(text: &str) -> Self {
        Self {
            rope: Rope::from_str(text),
        }
    }

    /// Number of lines (always at least 1).
    #[must_use]
    pub fn len_lines(&self) -> usize {
        self.rope.len_lines()
    }

    /// Text of line `idx` without its trailing `\n`.
    ///
    /// Returns `None` when `idx` is past the last line.
    #[must_use]
    pub fn line(&self, idx: usize) -> Option<Cow<'_, str>> {
        if idx >= self.rope.len_lines() {
            return None;
        }
        let line = self.rope.line(idx);
        let len = line.len_chars();
        let end = if len > 0 && line.char(len - 1) == '\n' {
            len - 1
        } else {
            len
        };
        Some(Cow::from(line.slice(..end)))
    }

    /// Iterate over all lines, without trailing newlines.
    pub fn lines(&self) -> impl Iterator<Item = Cow<'_, str>> + '_ {
        (0..self.len_lines()).filter_map(|idx| self.line(idx))
    }

    /// Position of the first occurrence of `needle` on any single line.
    ///
    /// Lines are searched top to bottom; within the first matching line the
    /// leftmost occurrence wins.
    #[must_use]
    pub fn find(&self, needle: &str) -> Option<Position> {
        self.lines().enumerate().find_map(|(idx, line)| {
            line.find(needle)
                .map(|byte| Position::new(idx, line[..byte].chars().count()))
        })
    }

    /// Convert a parser location (1-based line, 1-based **byte** column) to a
    /// char position.
    ///
    /// Parsers report byte columns; the editor works in chars. A column that
    /// falls inside a multi-byte character snaps back to that character.
    /// Line 0 (no location) maps to the origin; lines and columns past the
    /// end clamp to the text.
    #[must_use]
    pub fn byte_location_to_position(&self, line: usize, byte_col: usize) -> Position {
        if line == 0 {
            return Position::ZERO;
        }
        let idx = (line - 1).min(self.len_lines() - 1);
        let Some(text) = self.line(idx) else {
            return Position::ZERO;
        };

        let mut prefix = byte_col.saturating_sub(1).min(text.len());
        while !text.is_char_boundary(prefix) {
            prefix -= 1;
        }
        Position::new(idx, text[..prefix].chars().count())
    }
}

impl fmt::Debug for SourceText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SourceText")
            .field("lines", &self.len_lines())
            .field("chars", &self.rope.len_chars())
            .finish()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

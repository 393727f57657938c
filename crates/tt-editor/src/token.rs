// SPDX-License-Identifier: MIT

//! Line tokenizer for JSON-like editor text.
//!
//! The editor highlights text while it is being typed, so the tokenizer
//! never rejects input. It scans one line at a time, left to right, with a
//! single character of state (the open quote, if any) and produces
//! [`Token`]s that tile the line exactly: concatenating every token's text
//! gives back the original line, byte for byte.
//!
//! Classification rules:
//!
//! - a quoted span followed (after optional whitespace) by `:` is a **key**,
//!   any other quoted span is a **string**; the lookahead happens when the
//!   quote closes, not when it opens
//! - `: , { } [ ]` outside a string are single-char **punctuation** tokens
//! - everything else accumulates into a bare run, classified on flush as
//!   **number**, **boolean**, **null** or **default**; surrounding
//!   whitespace stays in the run, so ` 123` is one number token
//! - a string still open at the end of the line becomes a string token
//!   running to the end of the line (syntax errors are the validator's job)
//!
//! Both `"` and `'` open strings. A quote preceded by `\` does not close.

use std::sync::LazyLock;

use regex::Regex;

/// JSON number literal (after trimming).
static NUMBER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^-?[0-9]+(\.[0-9]+)?([eE][+-]?[0-9]+)?$").expect("number pattern is valid")
});

// ---------------------------------------------------------------------------
// Token
// ---------------------------------------------------------------------------

/// Classification of a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    String,
    Key,
    Punctuation,
    Number,
    Boolean,
    Null,
    Default,
}

impl TokenKind {
    /// Classify an unquoted run of text.
    #[must_use]
    pub fn classify_bare(raw: &str) -> Self {
        let t = raw.trim();
        if NUMBER.is_match(t) {
            Self::Number
        } else if t == "true" || t == "false" {
            Self::Boolean
        } else if t == "null" {
            Self::Null
        } else {
            Self::Default
        }
    }
}

/// A classified span of one line.
///
/// `start` and `end` are char offsets within the line, `end` exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub text: &'a str,
    pub kind: TokenKind,
    pub start: usize,
    pub end: usize,
}

impl Token<'_> {
    /// Whether a 1-based `column` touches this token.
    ///
    /// Both edges count: a column equal to `start + 1` (first char) or
    /// `end + 1` (just past the last char) is considered inside.
    #[inline]
    #[must_use]
    pub const fn touches_column(&self, column: usize) -> bool {
        column >= self.start + 1 && column <= self.end + 1
    }
}

// ---------------------------------------------------------------------------
// Tokenizer
// ---------------------------------------------------------------------------

/// Emits tokens as contiguous slices of one line.
struct Emitter<'a> {
    line: &'a str,
    tokens: Vec<Token<'a>>,
    /// Byte offset where the next token starts.
    pending: usize,
    /// Char offset where the next token starts.
    offset: usize,
}

impl<'a> Emitter<'a> {
    const fn new(line: &'a str) -> Self {
        Self {
            line,
            tokens: Vec::new(),
            pending: 0,
            offset: 0,
        }
    }

    /// Whether bare text is waiting before byte `at`.
    const fn has_pending(&self, at: usize) -> bool {
        self.pending < at
    }

    /// Emit `line[pending..end]` as one token.
    fn emit(&mut self, end: usize, kind: TokenKind) {
        let text = &self.line[self.pending..end];
        let start = self.offset;
        let end_offset = start + text.chars().count();
        self.tokens.push(Token {
            text,
            kind,
            start,
            end: end_offset,
        });
        self.pending = end;
        self.offset = end_offset;
    }

    /// Emit pending bare text before byte `at`, if any.
    fn flush_bare(&mut self, at: usize) {
        if self.has_pending(at) {
            let kind = TokenKind::classify_bare(&self.line[self.pending..at]);
            self.emit(at, kind);
        }
    }
}

/// Tokenize one line (without its newline).
///
/// ```
/// use tt_editor::token::{tokenize_line, TokenKind};
///
/// let kinds: Vec<_> = tokenize_line(r#"{"a":"b"}"#).iter().map(|t| t.kind).collect();
/// assert_eq!(kinds, [
///     TokenKind::Punctuation,
///     TokenKind::Key,
///     TokenKind::Punctuation,
///     TokenKind::String,
///     TokenKind::Punctuation,
/// ]);
/// ```
#[must_use]
pub fn tokenize_line(line: &str) -> Vec<Token<'_>> {
    let mut out = Emitter::new(line);
    let mut quote: Option<char> = None;
    let mut prev: Option<char> = None;

    for (i, ch) in line.char_indices() {
        let next = i + ch.len_utf8();

        match quote {
            Some(q) => {
                if ch == q && prev != Some('\\') {
                    let is_key = line[next..].trim_start().starts_with(':');
                    out.emit(next, if is_key { TokenKind::Key } else { TokenKind::String });
                    quote = None;
                }
            }
            None if ch == '"' || ch == '\'' => {
                out.flush_bare(i);
                quote = Some(ch);
            }
            None if matches!(ch, ':' | ',' | '{' | '}' | '[' | ']') => {
                out.flush_bare(i);
                out.emit(next, TokenKind::Punctuation);
            }
            None => {}
        }

        prev = Some(ch);
    }

    if out.has_pending(line.len()) {
        if quote.is_some() {
            out.emit(line.len(), TokenKind::String);
        } else {
            out.flush_bare(line.len());
        }
    }

    out.tokens
}

/// Tokenize every line of `text` (split on `\n`).
#[must_use]
pub fn tokenize(text: &str) -> Vec<Vec<Token<'_>>> {
    text.split('\n').map(tokenize_line).collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use super::TokenKind::{Boolean, Default, Key, Null, Number, Punctuation, String};

    fn kinds(line: &str) -> Vec<(&str, TokenKind)> {
        tokenize_line(line).iter().map(|t| (t.text, t.kind)).collect()
    }

    fn rejoin(line: &str) -> std::string::String {
        tokenize_line(line).iter().map(|t| t.text).collect()
    }

    // ── Tiling ──────────────────────────────────────────────────────

    #[test]
    fn tokens_tile_the_line() {
        let lines = [
            "",
            "{",
            r##"  "primary": "#3b82f6","##,
            r#"  "sans": ["Inter", "system-ui", "sans-serif"]"#,
            r#"  "n": -1.5e+10, "t": true, "f": false, "z": null"#,
            r#"  "unterminated: 1"#,
            "  'single': 'quoted'",
            r#""esc\"aped": "x\"y""#,
            "garbage ~~ \t !!",
            "  \"日本語\": \"é\"",
            "}\r",
        ];
        for line in lines {
            assert_eq!(rejoin(line), line, "line: {line:?}");
        }
    }

    #[test]
    fn spans_are_contiguous_char_offsets() {
        let line = "  \"é\": [1, true]";
        let tokens = tokenize_line(line);
        let mut expected_start = 0;
        for t in &tokens {
            assert_eq!(t.start, expected_start, "token {t:?}");
            assert_eq!(t.end - t.start, t.text.chars().count());
            expected_start = t.end;
        }
        assert_eq!(expected_start, line.chars().count());
    }

    #[test]
    fn empty_line_has_no_tokens() {
        assert!(tokenize_line("").is_empty());
    }

    // ── Classification ──────────────────────────────────────────────

    #[test]
    fn key_colon_number() {
        assert_eq!(
            kinds(r#""key": 123"#),
            vec![(r#""key""#, Key), (":", Punctuation), (" 123", Number)]
        );
    }

    #[test]
    fn key_versus_string() {
        assert_eq!(
            kinds(r#"{"a": "b"}"#),
            vec![
                ("{", Punctuation),
                (r#""a""#, Key),
                (":", Punctuation),
                (" ", Default),
                (r#""b""#, String),
                ("}", Punctuation),
            ]
        );
    }

    #[test]
    fn key_lookahead_skips_whitespace() {
        assert_eq!(kinds(r#""a"   : 1"#)[0], (r#""a""#, Key));
    }

    #[test]
    fn string_before_comma_is_not_key() {
        assert_eq!(kinds(r#""a", "b""#)[0], (r#""a""#, String));
    }

    #[test]
    fn bare_literals() {
        assert_eq!(
            kinds("[true,false,null,-0.5,1e3,nope]"),
            vec![
                ("[", Punctuation),
                ("true", Boolean),
                (",", Punctuation),
                ("false", Boolean),
                (",", Punctuation),
                ("null", Null),
                (",", Punctuation),
                ("-0.5", Number),
                (",", Punctuation),
                ("1e3", Number),
                (",", Punctuation),
                ("nope", Default),
                ("]", Punctuation),
            ]
        );
    }

    #[test]
    fn classify_bare_edge_cases() {
        assert_eq!(TokenKind::classify_bare("  42  "), Number);
        assert_eq!(TokenKind::classify_bare("1."), Default);
        assert_eq!(TokenKind::classify_bare("+1"), Default);
        assert_eq!(TokenKind::classify_bare("1E-7"), Number);
        assert_eq!(TokenKind::classify_bare("True"), Default);
        assert_eq!(TokenKind::classify_bare("٣"), Default);
        assert_eq!(TokenKind::classify_bare("   "), Default);
    }

    #[test]
    fn escaped_quote_does_not_close() {
        assert_eq!(kinds(r#""a\"b": 1"#)[0], (r#""a\"b""#, Key));
    }

    #[test]
    fn single_quotes_open_strings() {
        assert_eq!(kinds("'it\"s'"), vec![("'it\"s'", String)]);
    }

    #[test]
    fn unterminated_string_runs_to_end() {
        assert_eq!(
            kinds(r#""a": "unfinished, [1"#),
            vec![
                (r#""a""#, Key),
                (":", Punctuation),
                (" ", Default),
                (r#""unfinished, [1"#, String),
            ]
        );
    }

    #[test]
    fn punctuation_inside_string_is_not_split() {
        assert_eq!(kinds(r#""a:b,{c}""#), vec![(r#""a:b,{c}""#, String)]);
    }

    #[test]
    fn bare_text_before_quote_is_flushed() {
        assert_eq!(kinds(r#"oops"x""#), vec![("oops", Default), (r#""x""#, String)]);
    }

    // ── Offsets / columns ───────────────────────────────────────────

    #[test]
    fn offsets_count_chars() {
        let tokens = tokenize_line("\"é\": 1");
        assert_eq!((tokens[0].start, tokens[0].end), (0, 3));
        assert_eq!((tokens[1].start, tokens[1].end), (3, 4));
        assert_eq!((tokens[2].start, tokens[2].end), (4, 6));
    }

    #[test]
    fn touches_column_includes_both_edges() {
        let t = Token { text: "\"ab\"", kind: String, start: 2, end: 6 };
        assert!(!t.touches_column(2));
        assert!(t.touches_column(3));
        assert!(t.touches_column(7));
        assert!(!t.touches_column(8));
    }

    #[test]
    fn tokenize_splits_lines() {
        let lines = tokenize("{\n  \"a\": 1\n}");
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[1][0].text, "  ");
        assert_eq!(lines[1][1].kind, Key);
        assert_eq!(lines[1][1].start, 2);
    }
}

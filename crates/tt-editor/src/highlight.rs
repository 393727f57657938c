// SPDX-License-Identifier: MIT

//! Render projection: tokens + lint errors → per-token styles.
//!
//! The overlay drawn over the editor text is a pure function of the current
//! text and the current error list. Each line is tokenized, paired with the
//! errors that sit on it, and every token gets a [`PartStyle`]:
//!
//! 1. a token touched by an error column is painted as an error
//! 2. otherwise a string token containing a color literal becomes a swatch
//!    (background = the color, foreground = the better-contrast of
//!    white/black)
//! 3. otherwise the token gets its kind's palette color
//!
//! Styles carry [`Rgba`] values, alpha included. Compositing onto a concrete
//! background is the renderer's job.

use tt_color::{Rgba, extract_color, normalize_css_color, parse_color, pick_text_contrast};

use crate::token::{Token, TokenKind, tokenize_line};
use crate::validate::LintError;

// ---------------------------------------------------------------------------
// Palette
// ---------------------------------------------------------------------------

/// Editor colors (One Dark).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    // ── Syntax ────────────────────────────────────────────────
    pub key: Rgba,
    pub string: Rgba,
    pub number: Rgba,
    pub boolean: Rgba,
    pub null: Rgba,
    pub punctuation: Rgba,
    /// Default text and bare tokens.
    pub text: Rgba,

    // ── Chrome ────────────────────────────────────────────────
    pub editor_bg: Rgba,
    pub gutter_bg: Rgba,
    /// Line numbers and secondary text.
    pub text_muted: Rgba,

    // ── Diagnostics ───────────────────────────────────────────
    pub error: Rgba,
    /// Translucent wash behind an erroneous token.
    pub error_bg: Rgba,
    /// Inset outline around color swatches.
    pub swatch_outline: Rgba,
}

impl Palette {
    /// The base foreground for a token kind.
    #[must_use]
    pub const fn token_color(&self, kind: TokenKind) -> Rgba {
        match kind {
            TokenKind::Key => self.key,
            TokenKind::String => self.string,
            TokenKind::Number => self.number,
            TokenKind::Boolean => self.boolean,
            TokenKind::Null => self.null,
            TokenKind::Punctuation => self.punctuation,
            TokenKind::Default => self.text,
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            key: Rgba::rgb(0xc6, 0x78, 0xdd),
            string: Rgba::rgb(0x98, 0xc3, 0x79),
            number: Rgba::rgb(0xd1, 0x9a, 0x66),
            boolean: Rgba::rgb(0xe5, 0xc0, 0x7b),
            null: Rgba::rgb(0x56, 0xb6, 0xc2),
            punctuation: Rgba::rgb(0x61, 0xaf, 0xef),
            text: Rgba::rgb(0xab, 0xb2, 0xbf),
            editor_bg: Rgba::rgb(0x28, 0x2c, 0x34),
            gutter_bg: Rgba::rgb(0x21, 0x25, 0x2b),
            text_muted: Rgba::rgb(0x7f, 0x84, 0x8e),
            error: Rgba::rgb(0xe0, 0x6c, 0x75),
            error_bg: Rgba::rgba(224, 108, 117, 0.18),
            swatch_outline: Rgba::rgba(0, 0, 0, 0.25),
        }
    }
}

// ---------------------------------------------------------------------------
// PartStyle
// ---------------------------------------------------------------------------

bitflags::bitflags! {
    /// Box decorations around a token.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
    pub struct Decoration: u8 {
        /// Horizontal padding around the text.
        const PADDED        = 1 << 0;
        /// Rounded corners on the background.
        const ROUNDED       = 1 << 1;
        /// Draw `outline` inside the background edge.
        const INSET_OUTLINE = 1 << 2;
    }
}

/// How one token is painted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PartStyle {
    pub fg: Rgba,
    pub bg: Option<Rgba>,
    pub attrs: Decoration,
    pub outline: Option<Rgba>,
}

impl PartStyle {
    /// Foreground only, no background or decoration.
    #[must_use]
    pub const fn plain(fg: Rgba) -> Self {
        Self {
            fg,
            bg: None,
            attrs: Decoration::empty(),
            outline: None,
        }
    }

    /// Whether this token is drawn as an error.
    #[must_use]
    pub fn is_error(&self, palette: &Palette) -> bool {
        self.fg == palette.error && self.bg == Some(palette.error_bg)
    }

    /// Whether this token is drawn as a color swatch.
    #[must_use]
    pub const fn is_swatch(&self) -> bool {
        self.outline.is_some()
    }
}

/// Style for one token.
///
/// `has_error` wins over everything; a swatch is only drawn for string
/// tokens (never keys) whose text contains a color literal.
#[must_use]
pub fn part_style(token: &Token<'_>, has_error: bool, palette: &Palette) -> PartStyle {
    if has_error {
        return PartStyle {
            fg: palette.error,
            bg: Some(palette.error_bg),
            attrs: Decoration::PADDED | Decoration::ROUNDED,
            outline: None,
        };
    }

    let literal = (token.kind == TokenKind::String)
        .then_some(token.text)
        .and_then(extract_color);
    if let Some(literal) = literal {
        let css = normalize_css_color(literal);
        let (r, g, b) = pick_text_contrast(&css).rgb();
        return PartStyle {
            fg: Rgba::rgb(r, g, b),
            bg: Some(parse_color(&css)),
            attrs: Decoration::PADDED | Decoration::ROUNDED | Decoration::INSET_OUTLINE,
            outline: Some(palette.swatch_outline),
        };
    }

    PartStyle::plain(palette.token_color(token.kind))
}

/// Whether any of `errors` touches `token` (see [`Token::touches_column`]).
#[must_use]
pub fn token_has_error(token: &Token<'_>, errors: &[&LintError]) -> bool {
    errors.iter().any(|e| token.touches_column(e.column))
}

// ---------------------------------------------------------------------------
// HighlightedLine
// ---------------------------------------------------------------------------

/// One line of the overlay: its tokens and the errors that sit on it.
#[derive(Debug, Clone, PartialEq)]
pub struct HighlightedLine<'a> {
    /// 0-based line index.
    pub line_index: usize,
    pub tokens: Vec<Token<'a>>,
    /// Errors whose 1-based `line` is `line_index + 1`.
    pub errors: Vec<&'a LintError>,
}

impl<'a> HighlightedLine<'a> {
    /// Whether any error sits on this line.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Every token paired with its style.
    pub fn styled_parts<'p>(
        &'p self,
        palette: &'p Palette,
    ) -> impl Iterator<Item = (&'p Token<'a>, PartStyle)> + 'p {
        self.tokens.iter().map(move |token| {
            let has_error = token_has_error(token, &self.errors);
            (token, part_style(token, has_error, palette))
        })
    }
}

/// Project `text` and its lint errors into highlighted lines.
///
/// One entry per `\n`-separated line, so an empty text yields one empty line.
#[must_use]
pub fn highlight_json<'a>(text: &'a str, errors: &'a [LintError]) -> Vec<HighlightedLine<'a>> {
    text.split('\n')
        .enumerate()
        .map(|(line_index, line)| HighlightedLine {
            line_index,
            tokens: tokenize_line(line),
            errors: errors.iter().filter(|e| e.line == line_index + 1).collect(),
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

// SPDX-License-Identifier: MIT

//! WCAG contrast math and automatic text-color selection.
//!
//! Swatches in the editor paint a color literal as its own background, so
//! the literal's text has to stay readable on top of it. [`pick_text_contrast`]
//! chooses white or black by WCAG 2.1 contrast ratio.
//!
//! Translucent backgrounds are a special case: a swatch with alpha below
//! [`TRANSLUCENT_ALPHA`] mostly shows the dark editor canvas underneath, so
//! the pick is forced to white regardless of the computed ratio.

use std::fmt;

use crate::color::parse_color;

/// Below this alpha a swatch is treated as sitting over the dark canvas.
pub const TRANSLUCENT_ALPHA: f64 = 0.35;

/// Text color chosen for a swatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextContrast {
    White,
    Black,
}

impl TextContrast {
    /// CSS keyword (`"white"` / `"black"`).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::White => "white",
            Self::Black => "black",
        }
    }

    /// 8-bit channels of the chosen color.
    #[must_use]
    pub const fn rgb(self) -> (u8, u8, u8) {
        match self {
            Self::White => (255, 255, 255),
            Self::Black => (0, 0, 0),
        }
    }
}

impl fmt::Display for TextContrast {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Relative luminance of an 8-bit sRGB color per WCAG 2.1.
///
/// Each channel is normalized to `[0, 1]` and linearized:
///   `c <= 0.03928 ? c / 12.92 : ((c + 0.055) / 1.055) ^ 2.4`
/// then weighted `0.2126 R + 0.7152 G + 0.0722 B`.
#[must_use]
pub fn relative_luminance(r: u8, g: u8, b: u8) -> f64 {
    let r_lin = linearize(r);
    let g_lin = linearize(g);
    let b_lin = linearize(b);
    0.2126f64.mul_add(r_lin, 0.7152f64.mul_add(g_lin, 0.0722 * b_lin))
}

#[inline]
fn linearize(channel: u8) -> f64 {
    let c = f64::from(channel) / 255.0;
    if c <= 0.039_28 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

/// WCAG contrast ratio between two luminances, in `[1, 21]`.
///
/// Argument order does not matter.
#[must_use]
pub fn contrast_ratio(l1: f64, l2: f64) -> f64 {
    let (lighter, darker) = if l1 > l2 { (l1, l2) } else { (l2, l1) };
    (lighter + 0.05) / (darker + 0.05)
}

/// Pick white or black text for the CSS color `bg`.
///
/// Whichever has the higher contrast ratio wins; a tie goes to white.
/// Backgrounds with alpha below [`TRANSLUCENT_ALPHA`] always get white.
/// Unparseable input is treated as opaque black (and so gets white).
#[must_use]
pub fn pick_text_contrast(bg: &str) -> TextContrast {
    let color = parse_color(bg);
    if color.a < TRANSLUCENT_ALPHA {
        return TextContrast::White;
    }

    let l = relative_luminance(color.r, color.g, color.b);
    let white = contrast_ratio(l, relative_luminance(255, 255, 255));
    let black = contrast_ratio(l, relative_luminance(0, 0, 0));

    if white >= black {
        TextContrast::White
    } else {
        TextContrast::Black
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

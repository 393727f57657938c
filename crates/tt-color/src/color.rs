// SPDX-License-Identifier: MIT

//! CSS color parsing and conversion.
//!
//! [`Rgba`] is the single color representation in the workspace: 8-bit sRGB
//! channels plus a floating-point alpha in `[0, 1]`, which is what CSS
//! itself uses. Every hex/rgb/hsl conversion the theme pipeline needs lives
//! here so that stored CSS variable strings are produced by exactly one
//! code path and stay byte-for-byte stable across runs.
//!
//! Accepted inputs for [`parse_color`]:
//!
//! - `#RGB`, `#RGBA`, `#RRGGBB`, `#RRGGBBAA` (short forms expand by digit
//!   duplication, so `#abc` is `#aabbcc`)
//! - `rgb(r, g, b)` / `rgba(r, g, b, a)`
//! - `hsl(h, s%, l%)` / `hsla(h, s%, l%, a)`
//!
//! Anything else parses as opaque black. That is a defined fallback, not an
//! error: callers render something sensible for half-typed input.

use std::fmt;

// ---------------------------------------------------------------------------
// Rgba
// ---------------------------------------------------------------------------

/// An sRGB color with 8-bit channels and a `[0, 1]` alpha.
#[derive(Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    /// Opacity: 0.0 (transparent) to 1.0 (opaque).
    pub a: f64,
}

impl Rgba {
    /// Opaque black, also the parse fallback.
    pub const BLACK: Self = Self::rgb(0, 0, 0);

    /// Opaque white.
    pub const WHITE: Self = Self::rgb(255, 255, 255);

    /// Create an opaque color.
    #[inline]
    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Create a color with alpha (clamped to `[0, 1]`).
    #[inline]
    #[must_use]
    pub const fn rgba(r: u8, g: u8, b: u8, a: f64) -> Self {
        Self { r, g, b, a: a.clamp(0.0, 1.0) }
    }

    /// Parse a hex color: `#RGB`, `#RGBA`, `#RRGGBB` or `#RRGGBBAA`.
    ///
    /// The leading `#` is optional. Returns `None` for any other length or
    /// for non-hex digits.
    #[must_use]
    pub fn from_hex(s: &str) -> Option<Self> {
        let s = s.strip_prefix('#').unwrap_or(s);
        let bytes = s.as_bytes();

        match bytes.len() {
            // #RGB
            3 => {
                let r = parse_hex_digit(bytes[0])?;
                let g = parse_hex_digit(bytes[1])?;
                let b = parse_hex_digit(bytes[2])?;
                Some(Self::rgb(r << 4 | r, g << 4 | g, b << 4 | b))
            }
            // #RGBA
            4 => {
                let r = parse_hex_digit(bytes[0])?;
                let g = parse_hex_digit(bytes[1])?;
                let b = parse_hex_digit(bytes[2])?;
                let a = parse_hex_digit(bytes[3])?;
                Some(Self::rgba(r << 4 | r, g << 4 | g, b << 4 | b, byte_alpha(a << 4 | a)))
            }
            // #RRGGBB
            6 => {
                let r = parse_hex_byte(&bytes[0..2])?;
                let g = parse_hex_byte(&bytes[2..4])?;
                let b = parse_hex_byte(&bytes[4..6])?;
                Some(Self::rgb(r, g, b))
            }
            // #RRGGBBAA
            8 => {
                let r = parse_hex_byte(&bytes[0..2])?;
                let g = parse_hex_byte(&bytes[2..4])?;
                let b = parse_hex_byte(&bytes[4..6])?;
                let a = parse_hex_byte(&bytes[6..8])?;
                Some(Self::rgba(r, g, b, byte_alpha(a)))
            }
            _ => None,
        }
    }

    /// Whether alpha is at (or above) 1.0.
    #[inline]
    #[must_use]
    pub fn is_opaque(self) -> bool {
        self.a >= 1.0
    }

    /// `#rrggbb`, or `#rrggbbaa` when the color is translucent.
    #[must_use]
    pub fn to_hex(self) -> String {
        let Self { r, g, b, .. } = self;
        if self.is_opaque() {
            format!("#{r:02x}{g:02x}{b:02x}")
        } else {
            let a = unit_to_u8(self.a);
            format!("#{r:02x}{g:02x}{b:02x}{a:02x}")
        }
    }

    /// CSS functional form: `rgba(r, g, b, a)`.
    ///
    /// Alpha uses the shortest representation that round-trips, so an
    /// opaque color prints `rgba(10, 20, 30, 1)`.
    #[must_use]
    pub fn to_css_rgba(self) -> String {
        format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
    }

    /// Hue (degrees), saturation and lightness (both `[0, 1]`).
    ///
    /// Alpha is ignored. When several channels tie for the maximum the
    /// red branch wins, then green.
    #[must_use]
    pub fn to_hsl(self) -> (f64, f64, f64) {
        let r = f64::from(self.r) / 255.0;
        let g = f64::from(self.g) / 255.0;
        let b = f64::from(self.b) / 255.0;

        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let l = (max + min) / 2.0;

        if (max - min).abs() < f64::EPSILON {
            return (0.0, 0.0, l);
        }

        let d = max - min;
        let s = if l > 0.5 { d / (2.0 - max - min) } else { d / (max + min) };
        #[allow(clippy::float_cmp)] // max is exactly one of the channels.
        let h = if max == r {
            (g - b) / d + if g < b { 6.0 } else { 0.0 }
        } else if max == g {
            (b - r) / d + 2.0
        } else {
            (r - g) / d + 4.0
        };

        (h * 60.0, s, l)
    }

    /// Composite this color over an opaque `dst` ("source over", sRGB).
    ///
    /// The result is opaque. Surfaces without alpha support (terminals)
    /// use this to resolve translucent backgrounds against the canvas.
    #[must_use]
    pub fn blend_over(self, dst: Self) -> Self {
        if self.is_opaque() {
            return self;
        }
        let a = self.a.clamp(0.0, 1.0);
        let mix = |s: u8, d: u8| clamp_channel(f64::from(s).mul_add(a, f64::from(d) * (1.0 - a)));
        Self::rgb(mix(self.r, dst.r), mix(self.g, dst.g), mix(self.b, dst.b))
    }
}

impl Default for Rgba {
    fn default() -> Self {
        Self::BLACK
    }
}

impl fmt::Debug for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_css_rgba())
    }
}

// ---------------------------------------------------------------------------
// Parsing
// ---------------------------------------------------------------------------

/// Parse any supported CSS color literal.
///
/// Never fails: input that is not a recognizable hex, `rgb[a]()` or
/// `hsl[a]()` literal yields [`Rgba::BLACK`].
///
/// Functional notations are parsed leniently: every character other than
/// digits, `.` and `,` (plus `%` for HSL) is dropped before splitting on
/// commas. Channels round and clamp to `[0, 255]`; a missing or unreadable
/// channel reads as 0 and a missing or unreadable alpha as 1.
#[must_use]
pub fn parse_color(css: &str) -> Rgba {
    let css = css.trim();
    let lower = css.get(..3).map(str::to_ascii_lowercase);

    match lower.as_deref() {
        Some("rgb") => parse_rgb_function(css),
        Some("hsl") => parse_hsl_function(css),
        _ if css.starts_with('#') => Rgba::from_hex(css).unwrap_or(Rgba::BLACK),
        _ => Rgba::BLACK,
    }
}

fn parse_rgb_function(css: &str) -> Rgba {
    let args = functional_args(css, false);
    let r = clamp_channel(args.first().copied().flatten().unwrap_or(0.0));
    let g = clamp_channel(args.get(1).copied().flatten().unwrap_or(0.0));
    let b = clamp_channel(args.get(2).copied().flatten().unwrap_or(0.0));
    Rgba::rgba(r, g, b, alpha_arg(&args))
}

fn parse_hsl_function(css: &str) -> Rgba {
    let args = functional_args(css, true);
    let h = args.first().copied().flatten().unwrap_or(0.0);
    let s = args.get(1).copied().flatten().unwrap_or(0.0) / 100.0;
    let l = args.get(2).copied().flatten().unwrap_or(0.0) / 100.0;
    let (r, g, b) = hsl_to_rgb(h, s, l);
    Rgba::rgba(r, g, b, alpha_arg(&args))
}

/// Split a functional color literal into numeric arguments.
///
/// `None` marks an argument that was present but held no number.
fn functional_args(css: &str, keep_percent: bool) -> Vec<Option<f64>> {
    let filtered: String = css
        .chars()
        .filter(|&c| c.is_ascii_digit() || c == '.' || c == ',' || (keep_percent && c == '%'))
        .collect();

    filtered.split(',').map(|arg| parse_float_prefix(arg.trim())).collect()
}

fn alpha_arg(args: &[Option<f64>]) -> f64 {
    match args.get(3) {
        Some(Some(a)) => a.clamp(0.0, 1.0),
        _ => 1.0,
    }
}

/// Parse the longest leading decimal number (`12`, `1.5`, `.5`).
///
/// Trailing junk is ignored, so `"50%"` reads as 50 and `"1.2.3"` as 1.2.
fn parse_float_prefix(s: &str) -> Option<f64> {
    let mut seen_dot = false;
    let end = s
        .char_indices()
        .find(|&(_, c)| {
            if c == '.' && !seen_dot {
                seen_dot = true;
                false
            } else {
                !c.is_ascii_digit()
            }
        })
        .map_or(s.len(), |(i, _)| i);

    s[..end].parse::<f64>().ok()
}

#[inline]
fn clamp_channel(v: f64) -> u8 {
    v.round().clamp(0.0, 255.0) as u8
}

#[inline]
fn unit_to_u8(v: f64) -> u8 {
    clamp_channel(v.clamp(0.0, 1.0) * 255.0)
}

/// HSL → 8-bit sRGB using the chroma / hue-sector construction.
///
/// `h` in degrees, `s` and `l` as fractions. A negative hue falls outside
/// every sector and leaves only the lightness offset.
#[must_use]
pub fn hsl_to_rgb(h: f64, s: f64, l: f64) -> (u8, u8, u8) {
    let c = (1.0 - 2.0f64.mul_add(l, -1.0).abs()) * s;
    let hp = (h % 360.0) / 60.0;
    let x = c * (1.0 - ((hp % 2.0) - 1.0).abs());

    let (r1, g1, b1) = match hp {
        hp if (0.0..1.0).contains(&hp) => (c, x, 0.0),
        hp if (1.0..2.0).contains(&hp) => (x, c, 0.0),
        hp if (2.0..3.0).contains(&hp) => (0.0, c, x),
        hp if (3.0..4.0).contains(&hp) => (0.0, x, c),
        hp if (4.0..5.0).contains(&hp) => (x, 0.0, c),
        hp if (5.0..6.0).contains(&hp) => (c, 0.0, x),
        _ => (0.0, 0.0, 0.0),
    };

    let m = l - c / 2.0;
    (
        clamp_channel((r1 + m) * 255.0),
        clamp_channel((g1 + m) * 255.0),
        clamp_channel((b1 + m) * 255.0),
    )
}

#[inline]
const fn parse_hex_digit(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'a'..=b'f' => Some(c - b'a' + 10),
        b'A'..=b'F' => Some(c - b'A' + 10),
        _ => None,
    }
}

#[inline]
fn parse_hex_byte(bytes: &[u8]) -> Option<u8> {
    let hi = parse_hex_digit(bytes[0])?;
    let lo = parse_hex_digit(bytes[1])?;
    Some(hi << 4 | lo)
}

#[inline]
fn byte_alpha(a: u8) -> f64 {
    f64::from(a) / 255.0
}

// ---------------------------------------------------------------------------
// Normalization for swatches
// ---------------------------------------------------------------------------

/// Canonicalize an extracted color literal for use as a swatch background.
///
/// - `#abc` → `rgba(170, 187, 204, 1)` (expanded to `#aabbccff` first)
/// - `#abcd` → rgba of `#aabbccdd`
/// - `#aabbcc` → unchanged
/// - `#aabbccdd` → `rgba(170, 187, 204, 0.8666666666666667)`
/// - anything else (functional notation, malformed hex) → unchanged
#[must_use]
pub fn normalize_css_color(input: &str) -> String {
    if input.starts_with('#') {
        match input.len() {
            4 | 5 | 9 => {
                if let Some(rgba) = hex_to_rgba(input) {
                    return rgba;
                }
            }
            _ => {}
        }
    }
    input.to_owned()
}

/// Convert any hex literal [`Rgba::from_hex`] accepts to `rgba(r, g, b, a)`.
///
/// Returns `None` when the literal is not valid hex.
#[must_use]
pub fn hex_to_rgba(hex: &str) -> Option<String> {
    Rgba::from_hex(hex).map(Rgba::to_css_rgba)
}

// ---------------------------------------------------------------------------
// CSS variable helpers
// ---------------------------------------------------------------------------

/// Space-separated HSL components as used in CSS custom properties:
/// `"217 91% 60%"`.
///
/// Degrees and percentages are rounded to integers so the output is stable
/// for caching and comparison.
#[must_use]
pub fn hsl_components(css: &str) -> String {
    let (h, s, l) = parse_color(css).to_hsl();
    format!("{} {}% {}%", round_js(h), round_js(s * 100.0), round_js(l * 100.0))
}

/// Scale each channel toward black by `factor` and return `#rrggbb`.
#[must_use]
pub fn darken(css: &str, factor: f64) -> String {
    let c = parse_color(css);
    let scale = |v: u8| clamp_channel(f64::from(v) * (1.0 - factor));
    Rgba::rgb(scale(c.r), scale(c.g), scale(c.b)).to_hex()
}

/// Move each channel toward white by `factor` and return `#rrggbb`.
#[must_use]
pub fn lighten(css: &str, factor: f64) -> String {
    let c = parse_color(css);
    let scale = |v: u8| {
        let v = f64::from(v);
        clamp_channel((255.0 - v).mul_add(factor, v))
    };
    Rgba::rgb(scale(c.r), scale(c.g), scale(c.b)).to_hex()
}

/// Foreground HSL components for text placed on `css`.
///
/// Uses perceived (YIQ) brightness: black text above 0.5, white otherwise.
#[must_use]
pub fn foreground_for(css: &str) -> &'static str {
    let c = parse_color(css);
    let yiq = 0.114f64.mul_add(
        f64::from(c.b),
        0.299f64.mul_add(f64::from(c.r), 0.587 * f64::from(c.g)),
    ) / 255.0;
    if yiq > 0.5 { "0 0% 0%" } else { "0 0% 100%" }
}

/// Round half toward positive infinity and print without a fraction.
#[inline]
fn round_js(v: f64) -> i64 {
    (v + 0.5).floor() as i64
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    // ── parse_color ─────────────────────────────────────────────────

    #[test]
    fn parse_six_digit_hex() {
        assert_eq!(parse_color("#3b82f6"), Rgba::rgb(0x3b, 0x82, 0xf6));
    }

    #[test]
    fn parse_short_hex_duplicates_digits() {
        assert_eq!(parse_color("#abc"), Rgba::rgb(0xaa, 0xbb, 0xcc));
        assert_eq!(parse_color("#f00"), parse_color("#ff0000"));
    }

    #[test]
    fn parse_short_hex_with_alpha() {
        let c = parse_color("#0008");
        assert_eq!((c.r, c.g, c.b), (0, 0, 0));
        assert!((c.a - 136.0 / 255.0).abs() < 1e-9, "alpha: {}", c.a);
    }

    #[test]
    fn parse_eight_digit_hex() {
        let c = parse_color("#ff000080");
        assert_eq!((c.r, c.g, c.b), (255, 0, 0));
        assert!((c.a - 128.0 / 255.0).abs() < 1e-9);
    }

    #[test]
    fn parse_rgb_function() {
        assert_eq!(parse_color("rgb(10, 20, 30)"), Rgba::rgb(10, 20, 30));
    }

    #[test]
    fn parse_rgba_function() {
        let c = parse_color("rgba(0,0,0,0.2)");
        assert_eq!((c.r, c.g, c.b), (0, 0, 0));
        assert!((c.a - 0.2).abs() < 1e-9);
    }

    #[test]
    fn parse_rgb_rounds_and_clamps() {
        assert_eq!(parse_color("rgb(12.6, 300, 0)"), Rgba::rgb(13, 255, 0));
    }

    #[test]
    fn parse_rgba_alpha_clamped() {
        assert_eq!(parse_color("rgba(1, 2, 3, 7)").a, 1.0);
    }

    #[test]
    fn parse_rgb_missing_channels_read_as_zero() {
        assert_eq!(parse_color("rgb(255)"), Rgba::rgb(255, 0, 0));
    }

    #[test]
    fn parse_hsl_primaries() {
        assert_eq!(parse_color("hsl(0, 100%, 50%)"), Rgba::rgb(255, 0, 0));
        assert_eq!(parse_color("hsl(120, 100%, 50%)"), Rgba::rgb(0, 255, 0));
        assert_eq!(parse_color("hsl(240, 100%, 50%)"), Rgba::rgb(0, 0, 255));
    }

    #[test]
    fn parse_hsl_gray_and_alpha() {
        let c = parse_color("hsla(200, 0%, 50%, 0.5)");
        assert_eq!((c.r, c.g, c.b), (128, 128, 128));
        assert!((c.a - 0.5).abs() < 1e-9);
    }

    #[test]
    fn parse_hsl_hue_wraps() {
        assert_eq!(parse_color("hsl(360, 100%, 50%)"), parse_color("hsl(0, 100%, 50%)"));
    }

    #[test]
    fn unparseable_is_opaque_black() {
        for input in ["", "red", "#12", "#ggg", "#12345", "transparent", "  "] {
            assert_eq!(parse_color(input), Rgba::BLACK, "input: {input:?}");
        }
    }

    // ── normalization ───────────────────────────────────────────────

    #[test]
    fn normalize_short_hex() {
        assert_eq!(normalize_css_color("#abc"), "rgba(170, 187, 204, 1)");
    }

    #[test]
    fn normalize_short_hex_alpha() {
        let expected = format!("rgba(170, 187, 204, {})", 221.0 / 255.0);
        assert_eq!(normalize_css_color("#abcd"), expected);
    }

    #[test]
    fn normalize_six_digit_passes_through() {
        assert_eq!(normalize_css_color("#aabbcc"), "#aabbcc");
    }

    #[test]
    fn normalize_eight_digit_to_rgba() {
        assert_eq!(normalize_css_color("#ff000000"), "rgba(255, 0, 0, 0)");
    }

    #[test]
    fn normalize_functional_passes_through() {
        assert_eq!(normalize_css_color("hsl(1, 2%, 3%)"), "hsl(1, 2%, 3%)");
    }

    #[test]
    fn normalize_short_and_long_agree() {
        let short = parse_color(&normalize_css_color("#f00"));
        let long = parse_color(&normalize_css_color("#ff0000"));
        assert_eq!((short.r, short.g, short.b), (long.r, long.g, long.b));
    }

    #[test]
    fn hex_to_rgba_rejects_garbage() {
        assert_eq!(hex_to_rgba("#zzzzzz"), None);
        assert_eq!(hex_to_rgba("#102030").as_deref(), Some("rgba(16, 32, 48, 1)"));
    }

    // ── HSL / CSS helpers ───────────────────────────────────────────

    #[test]
    fn hsl_components_of_default_primary() {
        assert_eq!(hsl_components("#3b82f6"), "217 91% 60%");
    }

    #[test]
    fn hsl_components_of_white_and_black() {
        assert_eq!(hsl_components("#ffffff"), "0 0% 100%");
        assert_eq!(hsl_components("#000000"), "0 0% 0%");
    }

    #[test]
    fn darken_and_lighten() {
        assert_eq!(darken("#ffffff", 0.2), "#cccccc");
        assert_eq!(lighten("#000000", 0.2), "#333333");
        assert_eq!(lighten("#ffffff", 0.2), "#ffffff");
    }

    #[test]
    fn foreground_uses_yiq() {
        assert_eq!(foreground_for("#ffffff"), "0 0% 0%");
        assert_eq!(foreground_for("#1e293b"), "0 0% 100%");
    }

    #[test]
    fn to_hex_round_trips() {
        assert_eq!(Rgba::rgb(1, 2, 255).to_hex(), "#0102ff");
        assert_eq!(Rgba::rgba(0, 0, 0, 0.0).to_hex(), "#00000000");
    }

    #[test]
    fn blend_over_canvas() {
        let canvas = Rgba::rgb(0x28, 0x2c, 0x34);
        assert_eq!(Rgba::rgba(255, 0, 0, 0.0).blend_over(canvas), canvas);
        assert_eq!(Rgba::rgb(1, 2, 3).blend_over(canvas), Rgba::rgb(1, 2, 3));
        assert_eq!(Rgba::rgba(255, 255, 255, 0.5).blend_over(Rgba::BLACK), Rgba::rgb(128, 128, 128));
    }

    #[test]
    fn float_prefix() {
        assert_eq!(parse_float_prefix("50%"), Some(50.0));
        assert_eq!(parse_float_prefix("1.2.3"), Some(1.2));
        assert_eq!(parse_float_prefix(".5"), Some(0.5));
        assert_eq!(parse_float_prefix(""), None);
        assert_eq!(parse_float_prefix("."), None);
    }
}

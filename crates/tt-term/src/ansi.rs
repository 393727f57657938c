// SPDX-License-Identifier: MIT
//
// ANSI escape sequence generation.
//
// Pure functions that write SGR sequences to any `impl Write`. No state:
// `write_styled` always brackets a run with its style and a reset, which is
// exactly right for line-oriented output where runs are short.
//
// All functions return `io::Result` propagated from the underlying writer.

use std::io::{self, Write};

use crate::style::{Attr, CellColor, Style};

// ─── Reset ───────────────────────────────────────────────────────────────────

/// Reset all attributes and colors to the terminal default (SGR 0).
#[inline]
pub fn reset(w: &mut impl Write) -> io::Result<()> {
    w.write_all(b"\x1b[0m")
}

// ─── Colors ──────────────────────────────────────────────────────────────────

/// Set the foreground (text) color.
pub fn fg(w: &mut impl Write, color: CellColor) -> io::Result<()> {
    match color {
        CellColor::Default => w.write_all(b"\x1b[39m"),
        CellColor::Rgb(r, g, b) => write!(w, "\x1b[38;2;{r};{g};{b}m"),
    }
}

/// Set the background color.
pub fn bg(w: &mut impl Write, color: CellColor) -> io::Result<()> {
    match color {
        CellColor::Default => w.write_all(b"\x1b[49m"),
        CellColor::Rgb(r, g, b) => write!(w, "\x1b[48;2;{r};{g};{b}m"),
    }
}

// ─── Text Attributes ─────────────────────────────────────────────────────────

/// Emit SGR codes for text attributes as a single CSI sequence.
///
/// Multiple attributes are semicolon-separated: `\x1b[1;4m` for
/// bold + underline. Does nothing if no attributes are set.
pub fn attrs(w: &mut impl Write, attr: Attr) -> io::Result<()> {
    if attr.is_empty() {
        return Ok(());
    }

    let codes: Vec<&str> = [
        (Attr::BOLD, "1"),
        (Attr::DIM, "2"),
        (Attr::ITALIC, "3"),
        (Attr::UNDERLINE, "4"),
        (Attr::INVERSE, "7"),
    ]
    .into_iter()
    .filter(|(flag, _)| attr.contains(*flag))
    .map(|(_, code)| code)
    .collect();

    write!(w, "\x1b[{}m", codes.join(";"))
}

// ─── Styled Runs ─────────────────────────────────────────────────────────────

/// Write `text` in `style`, followed by a reset.
///
/// Plain styles write the text untouched, with no escape codes at all.
pub fn write_styled(w: &mut impl Write, text: &str, style: Style) -> io::Result<()> {
    if style.is_plain() {
        return w.write_all(text.as_bytes());
    }
    if !style.fg.is_default() {
        fg(w, style.fg)?;
    }
    if !style.bg.is_default() {
        bg(w, style.bg)?;
    }
    attrs(w, style.attrs)?;
    w.write_all(text.as_bytes())?;
    reset(w)
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    /// Helper: run an ANSI function and return its output as a string.
    fn emit<F>(f: F) -> String
    where
        F: FnOnce(&mut Vec<u8>) -> io::Result<()>,
    {
        let mut buf = Vec::new();
        f(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn reset_sequence() {
        assert_eq!(emit(|w| reset(w)), "\x1b[0m");
    }

    #[test]
    fn fg_default() {
        assert_eq!(emit(|w| fg(w, CellColor::Default)), "\x1b[39m");
    }

    #[test]
    fn fg_rgb() {
        assert_eq!(emit(|w| fg(w, CellColor::Rgb(198, 120, 221))), "\x1b[38;2;198;120;221m");
    }

    #[test]
    fn bg_rgb() {
        assert_eq!(emit(|w| bg(w, CellColor::Rgb(0, 0, 0))), "\x1b[48;2;0;0;0m");
    }

    #[test]
    fn bg_default() {
        assert_eq!(emit(|w| bg(w, CellColor::Default)), "\x1b[49m");
    }

    #[test]
    fn attrs_empty_writes_nothing() {
        assert_eq!(emit(|w| attrs(w, Attr::empty())), "");
    }

    #[test]
    fn attrs_combined() {
        assert_eq!(emit(|w| attrs(w, Attr::BOLD | Attr::UNDERLINE)), "\x1b[1;4m");
    }

    #[test]
    fn plain_text_has_no_escapes() {
        assert_eq!(emit(|w| write_styled(w, "{", Style::default())), "{");
    }

    #[test]
    fn styled_run_is_reset() {
        let style = Style::fg_bg(CellColor::Rgb(255, 255, 255), CellColor::Rgb(59, 130, 246));
        assert_eq!(
            emit(|w| write_styled(w, "\"#3b82f6\"", style)),
            "\x1b[38;2;255;255;255m\x1b[48;2;59;130;246m\"#3b82f6\"\x1b[0m"
        );
    }
}

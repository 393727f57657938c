// SPDX-License-Identifier: MIT
//
// Terminal rendering of the editor overlay and the error panel.
//
// Layout of `check` output:
//
//    1 │ {
//    2 │   "colors": {
//    3 │     "primary": "#3b82f6",      ← swatch: bg = the color
//   ...
//   12 │   "bogus": 1                   ← error: red on translucent red
//
//   ✗ 2 problems
//     12:3  Unknown property "bogus". Expected one of: ...
//           "bogus": 1
//           ^
//
// Styles from tt-editor carry alpha; everything is composited over the
// editor background here, because a terminal only takes opaque colors.
// Box decorations (padding, rounded corners, outlines) have no terminal
// equivalent and are dropped.

use std::io::{self, Write};

use tt_color::Rgba;
use tt_editor::{LintError, LintKind, Palette, PartStyle, highlight_json};
use tt_term::ansi::write_styled;
use tt_term::width::{digits, prefix_width};
use tt_term::{Attr, CellColor, Style};

const TAB_WIDTH: usize = 2;

/// Output settings shared by every command.
#[derive(Debug, Clone, Copy)]
pub struct Renderer {
    pub palette: Palette,
    pub color: bool,
}

impl Renderer {
    #[must_use]
    pub fn new(color: bool) -> Self {
        Self {
            palette: Palette::default(),
            color,
        }
    }

    fn write(&self, w: &mut impl Write, text: &str, style: Style) -> io::Result<()> {
        if self.color {
            write_styled(w, text, style)
        } else {
            w.write_all(text.as_bytes())
        }
    }

    // ─── Editor overlay ──────────────────────────────────────────────────

    /// Gutter plus highlighted text, one terminal line per source line.
    pub fn editor(&self, w: &mut impl Write, text: &str, errors: &[LintError]) -> io::Result<()> {
        let lines = highlight_json(text, errors);
        let width = digits(lines.len());
        let gutter = Style::fg_bg(
            cell(self.palette.text_muted),
            cell(self.palette.gutter_bg),
        );

        for line in &lines {
            let number = format!("{:>width$} │ ", line.line_index + 1);
            let gutter_style = if line.has_errors() {
                gutter.with_attrs(Attr::BOLD)
            } else {
                gutter
            };
            self.write(w, &number, gutter_style)?;
            for (token, style) in line.styled_parts(&self.palette) {
                self.write(w, token.text, term_style(&style, &self.palette))?;
            }
            writeln!(w)?;
        }
        Ok(())
    }

    // ─── Error panel ─────────────────────────────────────────────────────

    /// Error count, then each error with its source line and a caret.
    pub fn errors(&self, w: &mut impl Write, text: &str, errors: &[LintError]) -> io::Result<()> {
        let error = Style::fg(cell(self.palette.error)).with_attrs(Attr::BOLD);
        let muted = Style::fg(cell(self.palette.text_muted));

        if errors.is_empty() {
            return self.write(w, "✓ no problems\n", Style::fg(cell(self.palette.string)));
        }

        let noun = if errors.len() == 1 { "problem" } else { "problems" };
        self.write(w, &format!("✗ {} {noun}\n", errors.len()), error)?;

        let lines: Vec<&str> = text.split('\n').collect();
        for e in errors {
            let location = format!("{}:{}", e.line, e.column);
            write!(w, "  ")?;
            self.write(w, &location, muted)?;
            writeln!(w, "  {}", e.message)?;

            // Missing sections point at (1,1) by convention, not at text.
            if e.kind == LintKind::Structural && e.message.starts_with("Missing") {
                continue;
            }
            let Some(source) = lines.get(e.line.saturating_sub(1)) else {
                continue;
            };
            let indent = " ".repeat(location.len() + 4);
            writeln!(w, "{indent}{source}")?;
            let pad = prefix_width(source, e.column.saturating_sub(1), TAB_WIDTH);
            write!(w, "{indent}{}", " ".repeat(pad))?;
            self.write(w, "^", error)?;
            writeln!(w)?;
        }
        Ok(())
    }

    /// The generic notice shown when a save is refused.
    pub fn blocked(&self, w: &mut impl Write, message: &str) -> io::Result<()> {
        let style = Style::fg(cell(self.palette.error)).with_attrs(Attr::BOLD);
        self.write(w, message, style)?;
        writeln!(w)
    }
}

// ─── Style conversion ────────────────────────────────────────────────────────

const fn cell(c: Rgba) -> CellColor {
    CellColor::Rgb(c.r, c.g, c.b)
}

/// Resolve a token style to an opaque terminal style.
///
/// Plain tokens keep the terminal's own background. Tokens with a
/// background (errors, swatches) have it composited over the editor
/// background, and their foreground composited over that. Errors are also
/// underlined, which still shows on terminals without truecolor.
#[must_use]
pub fn term_style(style: &PartStyle, palette: &Palette) -> Style {
    let Some(bg) = style.bg else {
        return Style::fg(cell(style.fg.blend_over(palette.editor_bg)));
    };
    let bg = bg.blend_over(palette.editor_bg);
    let term = Style::fg_bg(cell(style.fg.blend_over(bg)), cell(bg));
    if style.is_error(palette) {
        term.with_attrs(Attr::UNDERLINE)
    } else {
        term
    }
}

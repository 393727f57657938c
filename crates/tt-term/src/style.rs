// SPDX-License-Identifier: MIT
//
// Style — what one run of terminal text looks like.
//
// A Style bundles a foreground, a background and a set of SGR attributes.
// Colors are fully resolved 24-bit values (or the terminal default): alpha
// has already been composited away by the caller, so emitting a style
// never involves color math.

// ─── Cell Color ──────────────────────────────────────────────────────────────

/// A terminal color: the terminal's own default, or 24-bit RGB.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum CellColor {
    /// Whatever the terminal is configured to use (SGR 39 / 49).
    #[default]
    Default,
    /// 24-bit `TrueColor`.
    Rgb(u8, u8, u8),
}

impl CellColor {
    /// Whether this is the terminal default.
    #[inline]
    #[must_use]
    pub const fn is_default(self) -> bool {
        matches!(self, Self::Default)
    }
}

// ─── Text Attributes ─────────────────────────────────────────────────────────

bitflags::bitflags! {
    /// Text attributes stored as a compact bitfield.
    ///
    /// These map directly to SGR (Select Graphic Rendition) parameters.
    /// Combine with bitwise OR:
    ///
    /// ```
    /// use tt_term::Attr;
    ///
    /// let style = Attr::BOLD | Attr::UNDERLINE;
    /// assert!(style.contains(Attr::BOLD));
    /// assert!(!style.contains(Attr::DIM));
    /// ```
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
    pub struct Attr: u8 {
        /// SGR 1 — increased intensity.
        const BOLD      = 1 << 0;
        /// SGR 2 — decreased intensity (faint).
        const DIM       = 1 << 1;
        /// SGR 3 — italic.
        const ITALIC    = 1 << 2;
        /// SGR 4 — straight underline.
        const UNDERLINE = 1 << 3;
        /// SGR 7 — swap foreground and background.
        const INVERSE   = 1 << 4;
    }
}

// ─── Style ───────────────────────────────────────────────────────────────────

/// Foreground, background and attributes for a run of text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Style {
    pub fg: CellColor,
    pub bg: CellColor,
    pub attrs: Attr,
}

impl Style {
    /// Style with only a foreground color.
    #[must_use]
    pub const fn fg(fg: CellColor) -> Self {
        Self {
            fg,
            bg: CellColor::Default,
            attrs: Attr::empty(),
        }
    }

    /// Style with foreground and background.
    #[must_use]
    pub const fn fg_bg(fg: CellColor, bg: CellColor) -> Self {
        Self {
            fg,
            bg,
            attrs: Attr::empty(),
        }
    }

    /// Return a copy with `attrs` added.
    #[must_use]
    pub const fn with_attrs(self, attrs: Attr) -> Self {
        Self {
            attrs: self.attrs.union(attrs),
            ..self
        }
    }

    /// Whether this style changes nothing about default terminal output.
    #[must_use]
    pub const fn is_plain(self) -> bool {
        self.fg.is_default() && self.bg.is_default() && self.attrs.is_empty()
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

// SPDX-License-Identifier: MIT

//! # tt-color — CSS color math for tenant themes
//!
//! Everything the theme editor and the CSS generator need to know about
//! colors, in one place:
//!
//! ```text
//! CSS literal ("#abc", "rgba(…)", "hsl(…)")
//!     │
//!     ▼
//! color.rs:    parse to Rgba (total: garbage becomes opaque black)
//!     │
//!     ├──▶ contrast.rs: WCAG luminance, contrast ratio, white/black pick
//!     │
//!     └──▶ color.rs:    HSL components, darken/lighten, hex/rgba output
//!
//! JSON string token ──▶ extract.rs: first color literal inside the quotes
//! ```
//!
//! No function in this crate fails. Malformed input degrades to a defined
//! fallback, because the editor calls these on every keystroke against
//! half-typed text.

// Single-char channel names (r, g, b, h, s, l) are the convention in color math.
#![allow(clippy::many_single_char_names)]
// Channel math moves between u8 and f64 constantly; values are clamped first.
#![allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]

pub mod color;
pub mod contrast;
pub mod extract;

pub use color::{Rgba, normalize_css_color, parse_color};
pub use contrast::{TextContrast, contrast_ratio, pick_text_contrast, relative_luminance};
pub use extract::extract_color;

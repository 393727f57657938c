// SPDX-License-Identifier: MIT

//! # tt-editor — Theme editor core
//!
//! The validation-and-highlighting pipeline behind the theme JSON editor:
//!
//! - **[`source`]** — `Position` and `SourceText` (rope-backed line/column mapping)
//! - **[`token`]** — line tokenizer producing tiled, classified `Token` spans
//! - **[`validate`]** — JSON syntax + theme-structure linting into `LintError`s
//! - **[`highlight`]** — render projection from tokens + errors to `PartStyle`s
//! - **[`session`]** — debounced validation, throttled scroll sync, format-on-blur
//!
//! Data flow for one edit:
//!
//! ```text
//! editor text ──▶ validate ──▶ Vec<LintError> ──┬──▶ error panel
//!      │                                        │
//!      └──────▶ token ──▶ highlight ◀───────────┘
//!                             │
//!                             ▼
//!                      PartStyle per token
//! ```
//!
//! Everything here is a pure function of the current text. Nothing is
//! cached between edits.

pub mod highlight;
pub mod session;
pub mod source;
pub mod token;
pub mod validate;

pub use highlight::{Decoration, HighlightedLine, Palette, PartStyle, highlight_json, part_style};
pub use session::{CommitError, Debouncer, EditorSession, SessionConfig, Throttle, format_json};
pub use source::{Position, SourceText};
pub use token::{Token, TokenKind, tokenize, tokenize_line};
pub use validate::{LintError, LintKind, validate_theme, validate_theme_code};

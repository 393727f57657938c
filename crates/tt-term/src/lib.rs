// SPDX-License-Identifier: MIT
//
// tt-term — terminal output for the tenant-theme CLI.
//
// The theme editor's render projection produces abstract display
// attributes (colors, error emphasis, swatches). This crate is the last
// step: it turns those into SGR escape sequences and lays text out in
// terminal columns. There is no terminal framework or raw mode; the CLI only
// prints styled lines to stdout.

pub mod ansi;
pub mod style;
pub mod width;

pub use style::{Attr, CellColor, Style};

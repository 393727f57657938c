// SPDX-License-Identifier: MIT

//! # tt-theme — Tenant theme model
//!
//! The typed side of a tenant theme, from editor text to stylesheet:
//!
//! ```text
//! editor text ──▶ config.rs: ThemeConfig::from_json (strict, typed)
//!                     │
//!                     ├──▶ css.rs:   :root / .dark CSS custom properties
//!                     │
//!                     └──▶ store.rs: upsert by domain, fall back to default
//!
//! stored/fetched JSON ──▶ config.rs: PartialThemeConfig (lenient)
//!                             │
//!                             └──▶ css.rs: live-apply variable list
//! ```
//!
//! Linting the raw text lives in `tt-editor`; this crate assumes the text
//! has already been accepted there and only enforces the typed shape.

pub mod config;
pub mod css;
pub mod error;
pub mod store;

pub use config::{DEFAULT_THEME_JSON, PartialThemeConfig, ThemeConfig, parse_theme_config};
pub use css::{apply_partial, generate_css_variables};
pub use error::{StoreError, ThemeError};
pub use store::{FileStore, MemoryStore, TenantTheme, ThemeStore, theme_by_domain};

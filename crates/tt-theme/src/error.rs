// SPDX-License-Identifier: MIT
//
// Error types for the theme model and the tenant store.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// The text does not describe a complete [`ThemeConfig`](crate::ThemeConfig).
#[derive(Debug, Error)]
pub enum ThemeError {
    /// Syntax error, missing field, or a field of the wrong type.
    #[error("invalid theme config: {0}")]
    Invalid(#[from] serde_json::Error),
}

/// Failures of a [`ThemeStore`](crate::ThemeStore).
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("domain required")]
    EmptyDomain,

    #[error("failed to read theme store {}: {source}", .path.display())]
    Read { path: PathBuf, source: io::Error },

    #[error("failed to write theme store {}: {source}", .path.display())]
    Write { path: PathBuf, source: io::Error },

    #[error("theme store {} is not valid JSON: {source}", .path.display())]
    Corrupt {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("failed to serialize theme: {0}")]
    Serialize(#[from] serde_json::Error),
}

pub type Result<T, E = StoreError> = std::result::Result<T, E>;

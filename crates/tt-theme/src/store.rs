// SPDX-License-Identifier: MIT

//! Tenant theme storage.
//!
//! A store maps a tenant domain to its theme record. Saving is an upsert:
//! one record per domain, replaced in place, with `created_at` kept from
//! the first save. Reads never fail the caller that only wants a theme to
//! render: [`theme_by_domain`] falls back to the default theme for missing
//! records, unreadable configs and store errors alike.
//!
//! Two implementations:
//!
//! - [`MemoryStore`]: a map, for tests and one-shot runs
//! - [`FileStore`]: one JSON file, loaded on first use and rewritten
//!   atomically (temp file + rename) after every change

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::config::{ThemeConfig, parse_theme_config};
use crate::error::{Result, StoreError, ThemeError};

// ---------------------------------------------------------------------------
// TenantTheme
// ---------------------------------------------------------------------------

/// A stored theme.
///
/// `config` is the theme serialized as JSON text, exactly as it will be
/// handed back. Timestamps are Unix seconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TenantTheme {
    pub domain: String,
    pub name: String,
    pub config: String,
    pub created_at: u64,
    pub updated_at: u64,
}

impl TenantTheme {
    /// Strictly parse the stored config.
    ///
    /// # Errors
    ///
    /// Returns [`ThemeError::Invalid`] if the stored text is not a complete
    /// theme.
    pub fn theme(&self) -> Result<ThemeConfig, ThemeError> {
        ThemeConfig::from_json(&self.config)
    }
}

// ---------------------------------------------------------------------------
// ThemeStore
// ---------------------------------------------------------------------------

/// Persistence boundary for tenant themes.
///
/// Methods take `&mut self` so implementations can load lazily and cache.
pub trait ThemeStore {
    /// Insert or replace the theme for `domain`.
    ///
    /// # Errors
    ///
    /// [`StoreError::EmptyDomain`] for an empty domain, or an I/O error
    /// from the backing storage.
    fn save_theme(&mut self, domain: &str, config: &ThemeConfig) -> Result<TenantTheme>;

    /// The record for `domain`, if any.
    ///
    /// # Errors
    ///
    /// Backing storage could not be read.
    fn get_theme(&mut self, domain: &str) -> Result<Option<TenantTheme>>;

    /// Remove the record for `domain`. Returns whether one existed.
    ///
    /// # Errors
    ///
    /// Backing storage could not be read or written.
    fn delete_theme(&mut self, domain: &str) -> Result<bool>;

    /// Every stored domain, sorted.
    ///
    /// # Errors
    ///
    /// Backing storage could not be read.
    fn list_domains(&mut self) -> Result<Vec<String>>;
}

/// The theme to render for `domain`.
///
/// Never fails: no record, a config that no longer parses, or a store error
/// all produce [`ThemeConfig::default`], logged at `warn` where something
/// went wrong.
pub fn theme_by_domain(store: &mut impl ThemeStore, domain: &str) -> ThemeConfig {
    match store.get_theme(domain) {
        Ok(Some(record)) => parse_theme_config(Some(&record.config)),
        Ok(None) => {
            debug!(domain, "no stored theme, using default theme");
            ThemeConfig::default()
        }
        Err(e) => {
            warn!(domain, error = %e, "theme store unavailable, using default theme");
            ThemeConfig::default()
        }
    }
}

// ---------------------------------------------------------------------------
// Shared table
// ---------------------------------------------------------------------------

/// Domain → record, kept sorted so the file store writes stable output.
type Table = BTreeMap<String, TenantTheme>;

fn upsert(table: &mut Table, domain: &str, config: &ThemeConfig, now: u64) -> Result<TenantTheme> {
    if domain.is_empty() {
        return Err(StoreError::EmptyDomain);
    }
    let text = serde_json::to_string(config)?;
    let created_at = table.get(domain).map_or(now, |old| old.created_at);
    let record = TenantTheme {
        domain: domain.to_owned(),
        name: config.tenant_name().to_owned(),
        config: text,
        created_at,
        updated_at: now,
    };
    table.insert(domain.to_owned(), record.clone());
    Ok(record)
}

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |d| d.as_secs())
}

// ---------------------------------------------------------------------------
// MemoryStore
// ---------------------------------------------------------------------------

/// In-memory store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    themes: Table,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl ThemeStore for MemoryStore {
    fn save_theme(&mut self, domain: &str, config: &ThemeConfig) -> Result<TenantTheme> {
        upsert(&mut self.themes, domain, config, unix_now())
    }

    fn get_theme(&mut self, domain: &str) -> Result<Option<TenantTheme>> {
        Ok(self.themes.get(domain).cloned())
    }

    fn delete_theme(&mut self, domain: &str) -> Result<bool> {
        Ok(self.themes.remove(domain).is_some())
    }

    fn list_domains(&mut self) -> Result<Vec<String>> {
        Ok(self.themes.keys().cloned().collect())
    }
}

// ---------------------------------------------------------------------------
// FileStore
// ---------------------------------------------------------------------------

/// Store backed by one JSON file.
///
/// The file is read the first time any method needs it and held for the
/// life of the handle. A missing file is an empty store; it is created on
/// the first save.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    themes: Option<Table>,
}

impl FileStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            themes: None,
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn table(&mut self) -> Result<&mut Table> {
        if self.themes.is_none() {
            let loaded = self.load()?;
            debug!(path = %self.path.display(), themes = loaded.len(), "theme store loaded");
            self.themes = Some(loaded);
        }
        Ok(self.themes.get_or_insert_with(Table::new))
    }

    fn load(&self) -> Result<Table> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Table::new()),
            Err(source) => {
                return Err(StoreError::Read {
                    path: self.path.clone(),
                    source,
                });
            }
        };
        serde_json::from_str(&text).map_err(|source| StoreError::Corrupt {
            path: self.path.clone(),
            source,
        })
    }

    /// Write the table next to the target and rename it into place.
    fn persist(&self, table: &Table) -> Result<()> {
        let write_err = |source| StoreError::Write {
            path: self.path.clone(),
            source,
        };

        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir).map_err(write_err)?;
        }
        let mut text = serde_json::to_string_pretty(table)?;
        text.push('\n');

        let tmp = self.tmp_path();
        fs::write(&tmp, text).map_err(write_err)?;
        fs::rename(&tmp, &self.path).map_err(write_err)
    }

    /// Per-process temp file, so concurrent writers never share one.
    fn tmp_path(&self) -> PathBuf {
        self.path.with_extension(format!("json.{}.tmp", std::process::id()))
    }

    /// Apply `change` to a copy of the table and keep the copy only once it
    /// is on disk.
    fn commit<T>(&mut self, change: impl FnOnce(&mut Table) -> Result<T>) -> Result<T> {
        let mut next = self.table()?.clone();
        let out = change(&mut next)?;
        self.persist(&next)?;
        self.themes = Some(next);
        Ok(out)
    }
}

impl ThemeStore for FileStore {
    fn save_theme(&mut self, domain: &str, config: &ThemeConfig) -> Result<TenantTheme> {
        let record = self.commit(|table| upsert(table, domain, config, unix_now()))?;
        info!(domain, name = %record.name, path = %self.path.display(), "theme saved");
        Ok(record)
    }

    fn get_theme(&mut self, domain: &str) -> Result<Option<TenantTheme>> {
        Ok(self.table()?.get(domain).cloned())
    }

    fn delete_theme(&mut self, domain: &str) -> Result<bool> {
        if !self.table()?.contains_key(domain) {
            return Ok(false);
        }
        self.commit(|table| Ok(table.remove(domain)))?;
        info!(domain, path = %self.path.display(), "theme deleted");
        Ok(true)
    }

    fn list_domains(&mut self) -> Result<Vec<String>> {
        Ok(self.table()?.keys().cloned().collect())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

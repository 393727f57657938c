// SPDX-License-Identifier: MIT
//
// User configuration.
//
// Search order:
//   1. --config <path>
//   2. TENANT_THEME_CONFIG env var
//   3. <config dir>/tenant-theme/config.toml
//   4. Defaults
//
// The first file that exists wins. A file that exists but fails to read or
// parse is logged and skipped, so a typo never stops the tool from running.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use tracing::{info, warn};
use tt_editor::SessionConfig;

pub const CONFIG_ENV: &str = "TENANT_THEME_CONFIG";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Theme store file. Defaults to the user data dir.
    pub store_path: Option<PathBuf>,
    /// Quiet period before re-validating after an edit.
    pub debounce_ms: u64,
    /// Minimum gap between scroll-sync passes.
    pub scroll_throttle_ms: u64,
    /// Colored terminal output.
    pub color: bool,
    /// Indent width for formatting.
    pub indent: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            store_path: None,
            debounce_ms: 140,
            scroll_throttle_ms: 16,
            color: true,
            indent: 2,
        }
    }
}

impl Config {
    /// Where the theme store lives.
    #[must_use]
    pub fn store_path(&self) -> PathBuf {
        self.store_path.clone().unwrap_or_else(|| {
            dirs::data_dir().map_or_else(
                || PathBuf::from("themes.json"),
                |d| d.join("tenant-theme").join("themes.json"),
            )
        })
    }

    /// Editor session knobs.
    #[must_use]
    pub const fn session(&self) -> SessionConfig {
        SessionConfig {
            debounce: Duration::from_millis(self.debounce_ms),
            scroll_throttle: Duration::from_millis(self.scroll_throttle_ms),
            indent: self.indent,
        }
    }
}

/// Load the config following the search order above.
pub fn load(explicit: Option<&Path>) -> Config {
    let candidates = [
        explicit.map(Path::to_path_buf),
        std::env::var(CONFIG_ENV).ok().map(PathBuf::from),
        dirs::config_dir().map(|d| d.join("tenant-theme").join("config.toml")),
    ];
    load_first(candidates.into_iter().flatten())
}

fn load_first(candidates: impl IntoIterator<Item = PathBuf>) -> Config {
    for candidate in candidates {
        if !candidate.exists() {
            continue;
        }
        match fs::read_to_string(&candidate) {
            Ok(content) => match toml::from_str::<Config>(&content) {
                Ok(config) => {
                    info!(path = %candidate.display(), "loaded config");
                    return config;
                }
                Err(e) => {
                    warn!(path = %candidate.display(), error = %e, "failed to parse config");
                }
            },
            Err(e) => {
                warn!(path = %candidate.display(), error = %e, "failed to read config");
            }
        }
    }

    info!("no config file found, using defaults");
    Config::default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn defaults() {
        let config = Config::default();
        assert_eq!(config.session(), SessionConfig::default());
        assert!(config.color);
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "debounce_ms = 300\nstore_path = \"/tmp/t.json\"\n").unwrap();

        let config = load_first([path]);
        assert_eq!(config.debounce_ms, 300);
        assert_eq!(config.scroll_throttle_ms, 16);
        assert_eq!(config.store_path(), PathBuf::from("/tmp/t.json"));
    }

    #[test]
    fn missing_files_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let real = dir.path().join("real.toml");
        fs::write(&real, "color = false\n").unwrap();

        let config = load_first([dir.path().join("nope.toml"), real]);
        assert!(!config.color);
    }

    #[test]
    fn broken_file_falls_through() {
        let dir = tempfile::tempdir().unwrap();
        let broken = dir.path().join("broken.toml");
        let fallback = dir.path().join("fallback.toml");
        fs::write(&broken, "indent = \"wide\"").unwrap();
        fs::write(&fallback, "indent = 4").unwrap();

        assert_eq!(load_first([broken.clone()]), Config::default());
        assert_eq!(load_first([broken, fallback]).indent, 4);
    }
}

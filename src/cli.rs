// SPDX-License-Identifier: MIT
//
// Command-line surface.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Lint, format, store and render tenant themes.
#[derive(Debug, Parser)]
#[command(name = "tenant-theme", version, about)]
pub struct Cli {
    /// Config file (TOML). Overrides TENANT_THEME_CONFIG.
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Theme store file. Overrides `store_path` from the config.
    #[arg(long, global = true, value_name = "PATH")]
    pub store: Option<PathBuf>,

    /// Disable ANSI colors.
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Highlight a theme file and list its problems.
    Check {
        file: PathBuf,
        /// Print the problems as JSON instead of the overlay.
        #[arg(long, conflicts_with = "watch")]
        json: bool,
        /// Re-check whenever the file changes.
        #[arg(long)]
        watch: bool,
    },

    /// Pretty-print a theme file if it parses.
    Fmt {
        file: PathBuf,
        /// Rewrite the file in place instead of printing.
        #[arg(long)]
        write: bool,
    },

    /// Print the CSS custom properties for a theme file.
    Css {
        /// Theme file. The default theme when omitted.
        file: Option<PathBuf>,
    },

    /// Print the variables a live page would set for a fetched theme.
    Apply { file: PathBuf },

    /// Store a theme for a domain.
    Save { domain: String, file: PathBuf },

    /// Print the theme served for a domain.
    Show {
        domain: String,
        /// Print CSS variables instead of JSON.
        #[arg(long)]
        css: bool,
    },

    /// Remove the stored theme for a domain.
    Delete { domain: String },

    /// List stored domains.
    List,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["tenant-theme", "show", "acme.com", "--no-color", "--css"])
            .unwrap();
        assert!(cli.no_color);
        assert!(matches!(cli.command, Command::Show { css: true, .. }));
    }

    #[test]
    fn json_and_watch_conflict() {
        let err = Cli::try_parse_from(["tenant-theme", "check", "t.json", "--json", "--watch"]);
        assert!(err.is_err());
    }

    #[test]
    fn css_file_is_optional() {
        let cli = Cli::try_parse_from(["tenant-theme", "css"]).unwrap();
        assert!(matches!(cli.command, Command::Css { file: None }));
    }
}

// SPDX-License-Identifier: MIT
//
// tenant-theme — lint, format, store and render tenant themes.
//
// This is the binary that wires the crates together:
//
//   tt-editor → tokenizer, linter, highlighting, editor session
//   tt-theme  → typed theme model, CSS variables, tenant store
//   tt-term   → SGR output and display widths
//
// Every command reads a file or the store, runs it through one of the
// library entry points and writes to stdout:
//
//   check  → EditorSession::new   → Renderer::editor + Renderer::errors
//   fmt    → EditorSession::blur  → formatted text
//   save   → EditorSession::commit → ThemeConfig::from_value → store
//   show   → theme_by_domain      → JSON or CSS
//   css    → parse_theme_config   → generate_css_variables
//   apply  → PartialThemeConfig   → apply_partial
//
// Diagnostics go through tracing to stderr, filtered by TENANT_THEME_LOG.

mod cli;
mod config;
mod render;

use std::fs;
use std::io::{self, Write};
use std::path::Path;
use std::process::ExitCode;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use serde_json::Value;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use unicode_width::UnicodeWidthStr;

use tt_editor::{CommitError, EditorSession, SessionConfig};
use tt_theme::{
    FileStore, PartialThemeConfig, ThemeConfig, ThemeStore, apply_partial, generate_css_variables,
    parse_theme_config, theme_by_domain,
};

use cli::{Cli, Command};
use render::Renderer;

const LOG_ENV: &str = "TENANT_THEME_LOG";

/// How often `check --watch` looks at the file.
const WATCH_POLL: Duration = Duration::from_millis(50);

fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();
    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("tenant-theme: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: Cli) -> Result<ExitCode> {
    let config = config::load(cli.config.as_deref());
    let renderer = Renderer::new(config.color && !cli.no_color);
    let session = config.session();
    let mut store = FileStore::new(cli.store.unwrap_or_else(|| config.store_path()));
    let mut out = io::stdout().lock();

    let ok = match cli.command {
        Command::Check { file, json, watch } => {
            if watch {
                return watch_file(&mut out, &renderer, &file, session);
            }
            check(&mut out, &renderer, &read(&file)?, session, json)?
        }
        Command::Fmt { file, write } => fmt(&mut out, &renderer, &file, session, write)?,
        Command::Css { file } => {
            let theme = match file {
                Some(path) => parse_theme_config(Some(&read(&path)?)),
                None => ThemeConfig::default(),
            };
            out.write_all(generate_css_variables(&theme).as_bytes())?;
            true
        }
        Command::Apply { file } => {
            apply(&mut out, &read(&file)?)?;
            true
        }
        Command::Save { domain, file } => {
            save(&mut out, &renderer, &mut store, &domain, &read(&file)?, session)?
        }
        Command::Show { domain, css } => {
            show(&mut out, &mut store, &domain, css)?;
            true
        }
        Command::Delete { domain } => delete(&mut out, &mut store, &domain)?,
        Command::List => {
            list(&mut out, &mut store)?;
            true
        }
    };

    Ok(if ok { ExitCode::SUCCESS } else { ExitCode::FAILURE })
}

fn read(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

// ─── Editor commands ────────────────────────────────────────────────────────

/// Overlay plus error panel. Returns whether the text is clean.
fn check(
    out: &mut impl Write,
    renderer: &Renderer,
    text: &str,
    config: SessionConfig,
    json: bool,
) -> Result<bool> {
    let session = EditorSession::new(text, config);
    if json {
        serde_json::to_writer_pretty(&mut *out, session.errors())?;
        writeln!(out)?;
    } else {
        report(out, renderer, &session)?;
    }
    Ok(!session.has_errors())
}

fn report(out: &mut impl Write, renderer: &Renderer, session: &EditorSession) -> io::Result<()> {
    renderer.editor(out, session.text(), session.errors())?;
    writeln!(out)?;
    renderer.errors(out, session.text(), session.errors())
}

/// Re-check on every save of the file, once the writes settle.
fn watch_file(
    out: &mut impl Write,
    renderer: &Renderer,
    path: &Path,
    config: SessionConfig,
) -> Result<ExitCode> {
    let mut session = EditorSession::new(read(path)?, config);
    report(out, renderer, &session)?;
    out.flush()?;

    loop {
        thread::sleep(next_wake(&session, Instant::now()));
        let now = Instant::now();
        match fs::read_to_string(path) {
            Ok(text) if text != session.text() => session.edit(text, now),
            Ok(_) => {}
            Err(e) => warn!(path = %path.display(), error = %e, "failed to re-read theme"),
        }
        if session.tick(now) {
            writeln!(out, "\n── {} ──\n", path.display())?;
            report(out, renderer, &session)?;
            out.flush()?;
        }
    }
}

/// Sleep until the next poll, or until a pending validation falls due if
/// that comes first.
fn next_wake(session: &EditorSession, now: Instant) -> Duration {
    session.validation_deadline().map_or(WATCH_POLL, |due| {
        due.saturating_duration_since(now).min(WATCH_POLL)
    })
}

/// Pretty-print when the text parses, then report what is left.
fn fmt(
    out: &mut impl Write,
    renderer: &Renderer,
    path: &Path,
    config: SessionConfig,
    write: bool,
) -> Result<bool> {
    let mut session = EditorSession::new(read(path)?, config);
    let changed = session.blur();

    if write {
        if changed {
            fs::write(path, session.text())
                .with_context(|| format!("failed to write {}", path.display()))?;
            info!(path = %path.display(), "formatted");
        }
    } else {
        out.write_all(session.text().as_bytes())?;
        writeln!(out)?;
    }

    if session.has_errors() {
        renderer.errors(&mut io::stderr().lock(), session.text(), session.errors())?;
    }
    Ok(!session.has_errors())
}

// ─── Theme commands ─────────────────────────────────────────────────────────

/// The variables and title a live page would set for a fetched theme.
fn apply(out: &mut impl Write, text: &str) -> Result<()> {
    let value: Value = serde_json::from_str(text).context("theme is not valid JSON")?;
    let theme = PartialThemeConfig::from_value(&value);

    if let Some(title) = theme.document_title() {
        writeln!(out, "/* {title} */")?;
    }
    writeln!(out, ":root {{")?;
    for (name, value) in apply_partial(&theme) {
        writeln!(out, "  {name}: {value};")?;
    }
    writeln!(out, "}}")?;
    Ok(())
}

/// Commit the editor text and store it. Returns `false` when the lint
/// errors blocked the save.
fn save(
    out: &mut impl Write,
    renderer: &Renderer,
    store: &mut impl ThemeStore,
    domain: &str,
    text: &str,
    config: SessionConfig,
) -> Result<bool> {
    let mut session = EditorSession::new(text, config);
    let value = match session.commit() {
        Ok(value) => value,
        Err(e @ CommitError::HasErrors { .. }) => {
            renderer.blocked(out, &e.to_string())?;
            renderer.errors(out, session.text(), session.errors())?;
            return Ok(false);
        }
        Err(e) => return Err(e.into()),
    };

    let theme = ThemeConfig::from_value(value)?;
    let record = store.save_theme(domain, &theme)?;
    writeln!(out, "saved \"{}\" for {}", record.name, record.domain)?;
    Ok(true)
}

fn show(out: &mut impl Write, store: &mut impl ThemeStore, domain: &str, css: bool) -> Result<()> {
    let theme = theme_by_domain(store, domain);
    if css {
        out.write_all(generate_css_variables(&theme).as_bytes())?;
    } else {
        writeln!(out, "{}", theme.to_json_pretty()?)?;
    }
    Ok(())
}

/// Returns `false` when nothing was stored for `domain`.
fn delete(out: &mut impl Write, store: &mut impl ThemeStore, domain: &str) -> Result<bool> {
    if store.delete_theme(domain)? {
        writeln!(out, "deleted {domain}")?;
        Ok(true)
    } else {
        writeln!(out, "no theme stored for {domain}")?;
        Ok(false)
    }
}

/// One line per domain: the domain, then the tenant name.
fn list(out: &mut impl Write, store: &mut impl ThemeStore) -> Result<()> {
    let domains = store.list_domains()?;
    let width = domains.iter().map(|d| d.width()).max().unwrap_or(0);
    for domain in &domains {
        let name = store
            .get_theme(domain)?
            .map(|record| record.name)
            .unwrap_or_default();
        let pad = " ".repeat(width - domain.width());
        writeln!(out, "{domain}{pad}  {name}")?;
    }
    Ok(())
}

// ─── Tests ──────────────────────────────────────────────────────────────────

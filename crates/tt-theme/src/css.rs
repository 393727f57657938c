// SPDX-License-Identifier: MIT

//! CSS custom properties from a theme.
//!
//! Colors are emitted as bare HSL components (`217 91% 60%`) so stylesheets
//! can wrap them in `hsl(var(--primary))` and add their own alpha. The dark
//! block derives every color from the light one by scaling toward black or
//! white by [`DARK_MODE_FACTOR`].

use tt_color::color::{darken, foreground_for, hsl_components, lighten};

use crate::config::{PartialThemeConfig, ThemeConfig};

/// How far dark-mode colors move toward black/white.
pub const DARK_MODE_FACTOR: f64 = 0.2;

/// Corner radius shared by every tenant.
pub const RADIUS: &str = "0.5rem";

/// One `--name: value` declaration.
pub type Declaration = (&'static str, String);

// ---------------------------------------------------------------------------
// Stylesheet
// ---------------------------------------------------------------------------

/// Render the `:root` and `.dark` blocks for `config`.
///
/// The output depends only on `config`: the same theme always produces the
/// same bytes.
#[must_use]
pub fn generate_css_variables(config: &ThemeConfig) -> String {
    let mut out = String::new();
    write_block(&mut out, ":root", &root_groups(config));
    out.push('\n');
    write_block(&mut out, ".dark", &[dark_declarations(config)]);
    out
}

/// Light-mode declarations, grouped for readability.
fn root_groups(config: &ThemeConfig) -> [Vec<Declaration>; 4] {
    let c = &config.colors;
    let hsl = hsl_components;
    let family = &config.typography.font_family;
    let sp = &config.spacing;
    let bp = &config.breakpoints;

    [
        vec![
            ("--primary", hsl(&c.primary)),
            ("--primary-foreground", foreground_for(&c.primary).to_owned()),
            ("--secondary", hsl(&c.secondary)),
            ("--secondary-foreground", foreground_for(&c.secondary).to_owned()),
            ("--accent", hsl(&c.accent)),
            ("--accent-foreground", foreground_for(&c.accent).to_owned()),
            ("--background", hsl(&c.background)),
            ("--foreground", hsl(&c.text)),
            ("--card", hsl(&c.surface)),
            ("--card-foreground", hsl(&c.text)),
            ("--popover", hsl(&c.surface)),
            ("--popover-foreground", hsl(&c.text)),
            ("--muted", hsl(&c.text_muted)),
            ("--muted-foreground", hsl(&c.text_muted)),
            ("--border", format!("{} / 0.2", hsl(&c.text_muted))),
            ("--input", format!("{} / 0.2", hsl(&c.text_muted))),
            ("--ring", hsl(&c.primary)),
            ("--radius", RADIUS.to_owned()),
        ],
        vec![
            ("--font-sans", family.sans.join(", ")),
            ("--font-mono", family.mono.join(", ")),
        ],
        vec![
            ("--spacing-xs", sp.xs.clone()),
            ("--spacing-sm", sp.sm.clone()),
            ("--spacing-md", sp.md.clone()),
            ("--spacing-lg", sp.lg.clone()),
            ("--spacing-xl", sp.xl.clone()),
        ],
        vec![
            ("--breakpoint-sm", bp.sm.clone()),
            ("--breakpoint-md", bp.md.clone()),
            ("--breakpoint-lg", bp.lg.clone()),
            ("--breakpoint-xl", bp.xl.clone()),
        ],
    ]
}

/// Dark-mode color overrides.
fn dark_declarations(config: &ThemeConfig) -> Vec<Declaration> {
    let c = &config.colors;
    let dark = |css: &str| hsl_components(&darken(css, DARK_MODE_FACTOR));
    let light = |css: &str| hsl_components(&lighten(css, DARK_MODE_FACTOR));

    vec![
        ("--background", dark(&c.background)),
        ("--foreground", light(&c.text)),
        ("--card", dark(&c.surface)),
        ("--card-foreground", light(&c.text)),
        ("--popover", dark(&c.surface)),
        ("--popover-foreground", light(&c.text)),
        ("--primary", light(&c.primary)),
        ("--primary-foreground", dark(&c.background)),
        ("--secondary", dark(&c.secondary)),
        ("--secondary-foreground", light(&c.text)),
        ("--muted", dark(&c.text_muted)),
        ("--muted-foreground", light(&c.text_muted)),
        ("--accent", dark(&c.accent)),
        ("--accent-foreground", light(&c.text)),
        ("--border", format!("{} / 0.2", light(&c.text_muted))),
        ("--input", format!("{} / 0.2", light(&c.text_muted))),
        ("--ring", light(&c.primary)),
    ]
}

fn write_block(out: &mut String, selector: &str, groups: &[Vec<Declaration>]) {
    out.push_str(selector);
    out.push_str(" {\n");
    for (i, group) in groups.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        for (name, value) in group {
            out.push_str("  ");
            out.push_str(name);
            out.push_str(": ");
            out.push_str(value);
            out.push_str(";\n");
        }
    }
    out.push_str("}\n");
}

// ---------------------------------------------------------------------------
// Live apply
// ---------------------------------------------------------------------------

/// Variables to set on the document root for a fetched theme.
///
/// Only fields that are present produce declarations. Foregrounds here are
/// fixed per role rather than computed, and the card foreground falls back
/// to black when the theme has no text color.
#[must_use]
pub fn apply_partial(theme: &PartialThemeConfig) -> Vec<Declaration> {
    let c = &theme.colors;
    let mut vars = Vec::new();

    if let Some(primary) = &c.primary {
        vars.push(("--primary", hsl_components(primary)));
        vars.push(("--primary-foreground", "0 0% 100%".to_owned()));
    }
    if let Some(secondary) = &c.secondary {
        vars.push(("--secondary", hsl_components(secondary)));
        vars.push(("--secondary-foreground", "0 0% 0%".to_owned()));
    }
    if let Some(accent) = &c.accent {
        vars.push(("--accent", hsl_components(accent)));
        vars.push(("--accent-foreground", "0 0% 0%".to_owned()));
    }
    if let Some(background) = &c.background {
        vars.push(("--background", hsl_components(background)));
    }
    if let Some(text) = &c.text {
        vars.push(("--foreground", hsl_components(text)));
    }
    if let Some(surface) = &c.surface {
        vars.push(("--card", hsl_components(surface)));
        let text = c.text.as_deref().unwrap_or("#000000");
        vars.push(("--card-foreground", hsl_components(text)));
    }
    if let Some(muted) = &c.text_muted {
        vars.push(("--muted-foreground", hsl_components(muted)));
    }

    if let Some(sans) = &theme.font_sans {
        vars.push(("--font-sans", sans.join(", ")));
    }
    if let Some(mono) = &theme.font_mono {
        vars.push(("--font-mono", mono.join(", ")));
    }

    for (step, value) in theme.font_size.steps() {
        if let Some(name) = font_size_var(step) {
            vars.push((name, value.to_owned()));
        }
    }
    for (step, value) in theme.spacing.steps() {
        if let Some(name) = spacing_var(step) {
            vars.push((name, value.to_owned()));
        }
    }
    for (step, value) in theme.breakpoints.steps() {
        if let Some(name) = breakpoint_var(step) {
            vars.push((name, value.to_owned()));
        }
    }

    // Aliases read by the utility-class layer.
    if let Some(sans) = &theme.font_sans {
        vars.push(("--font-family-sans", sans.join(", ")));
    }
    if let Some(mono) = &theme.font_mono {
        vars.push(("--font-family-mono", mono.join(", ")));
    }

    vars
}

fn font_size_var(step: &str) -> Option<&'static str> {
    Some(match step {
        "xs" => "--font-size-xs",
        "sm" => "--font-size-sm",
        "base" => "--font-size-base",
        "lg" => "--font-size-lg",
        "xl" => "--font-size-xl",
        _ => return None,
    })
}

fn spacing_var(step: &str) -> Option<&'static str> {
    Some(match step {
        "xs" => "--spacing-xs",
        "sm" => "--spacing-sm",
        "md" => "--spacing-md",
        "lg" => "--spacing-lg",
        "xl" => "--spacing-xl",
        _ => return None,
    })
}

fn breakpoint_var(step: &str) -> Option<&'static str> {
    Some(match step {
        "sm" => "--breakpoint-sm",
        "md" => "--breakpoint-md",
        "lg" => "--breakpoint-lg",
        "xl" => "--breakpoint-xl",
        _ => return None,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn lookup<'a>(css: &'a str, block: &str, name: &str) -> Option<&'a str> {
        let start = css.find(block)?;
        let body = &css[start..];
        let body = &body[..body.find('}')?];
        body.lines()
            .map(str::trim)
            .find_map(|l| l.strip_prefix(name)?.strip_prefix(": ")?.strip_suffix(';'))
    }

    #[test]
    fn default_theme_root_variables() {
        let css = generate_css_variables(&ThemeConfig::default());
        assert_eq!(lookup(&css, ":root", "--primary"), Some("217 91% 60%"));
        assert_eq!(lookup(&css, ":root", "--primary-foreground"), Some("0 0% 100%"));
        assert_eq!(lookup(&css, ":root", "--background"), Some("0 0% 100%"));
        assert_eq!(lookup(&css, ":root", "--accent-foreground"), Some("0 0% 0%"));
        assert_eq!(lookup(&css, ":root", "--border"), Some("215 16% 47% / 0.2"));
        assert_eq!(lookup(&css, ":root", "--radius"), Some("0.5rem"));
        assert_eq!(lookup(&css, ":root", "--font-sans"), Some("Inter, system-ui, sans-serif"));
        assert_eq!(lookup(&css, ":root", "--breakpoint-xl"), Some("1280px"));
    }

    #[test]
    fn default_theme_dark_variables() {
        let css = generate_css_variables(&ThemeConfig::default());
        // #ffffff darkened by 0.2 is #cccccc.
        assert_eq!(lookup(&css, ".dark", "--background"), Some("0 0% 80%"));
        assert_eq!(lookup(&css, ".dark", "--primary-foreground"), Some("0 0% 80%"));
        assert_eq!(lookup(&css, ".dark", "--radius"), None);
    }

    #[test]
    fn generation_is_deterministic() {
        let config = ThemeConfig::default();
        assert_eq!(generate_css_variables(&config), generate_css_variables(&config));
    }

    #[test]
    fn block_layout() {
        let css = generate_css_variables(&ThemeConfig::default());
        assert!(css.starts_with(":root {\n  --primary: 217 91% 60%;\n"));
        assert!(css.contains("  --radius: 0.5rem;\n\n  --font-sans:"));
        assert!(css.contains("}\n\n.dark {\n"));
        assert!(css.ends_with("}\n"));
    }

    #[test]
    fn apply_partial_emits_only_present_fields() {
        let partial = PartialThemeConfig::from_value(&json!({
            "colors": { "surface": "#ffffff" },
            "breakpoints": { "md": "800px" }
        }));
        assert_eq!(
            apply_partial(&partial),
            vec![
                ("--card", "0 0% 100%".to_owned()),
                ("--card-foreground", "0 0% 0%".to_owned()),
                ("--breakpoint-md", "800px".to_owned()),
            ]
        );
    }

    #[test]
    fn apply_partial_of_empty_theme_is_empty() {
        assert_eq!(apply_partial(&PartialThemeConfig::default()), vec![]);
    }

    #[test]
    fn apply_partial_full_theme() {
        let vars = apply_partial(&PartialThemeConfig::from(&ThemeConfig::default()));
        let names: Vec<_> = vars.iter().map(|(n, _)| *n).collect();
        assert_eq!(names[..2], ["--primary", "--primary-foreground"]);
        assert!(names.contains(&"--font-size-base"));
        assert!(names.contains(&"--spacing-md"));
        assert!(!names.contains(&"--font-size-md"));
        assert_eq!(names[names.len() - 2..], ["--font-family-sans", "--font-family-mono"]);
        assert_eq!(vars.last().map(|(_, v)| v.as_str()), Some("JetBrains Mono, monospace"));
        assert_eq!(vars.len(), 11 + 2 + 5 + 5 + 4 + 2);
    }
}

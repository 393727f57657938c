// SPDX-License-Identifier: MIT

//! Theme configuration types.
//!
//! [`ThemeConfig`] is the strict shape a tenant theme must have before it is
//! stored: every color, font and size present, every value a string. It is
//! what the save path produces and what CSS generation consumes.
//!
//! [`PartialThemeConfig`] is the lenient shape used when applying a theme
//! that came back from storage or the network. Every field is optional, and
//! a value of the wrong type reads as absent instead of failing the whole
//! document, so appliers branch on presence only.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use crate::error::ThemeError;

/// Tenant name recorded when a theme carries no `branding.name`.
pub const DEFAULT_TENANT_NAME: &str = "Custom Tenant";

/// The theme every tenant starts from, and the fallback for missing or
/// unreadable stored themes.
pub const DEFAULT_THEME_JSON: &str = r##"{
  "colors": {
    "primary": "#3b82f6",
    "secondary": "#64748b",
    "accent": "#f59e0b",
    "background": "#ffffff",
    "surface": "#f8fafc",
    "text": "#1e293b",
    "textMuted": "#64748b"
  },
  "typography": {
    "fontFamily": {
      "sans": ["Inter", "system-ui", "sans-serif"],
      "mono": ["JetBrains Mono", "monospace"]
    },
    "fontSize": {
      "xs": "0.75rem",
      "sm": "0.875rem",
      "base": "1rem",
      "lg": "1.125rem",
      "xl": "1.25rem"
    }
  },
  "spacing": {
    "xs": "0.25rem",
    "sm": "0.5rem",
    "md": "1rem",
    "lg": "1.5rem",
    "xl": "2rem"
  },
  "breakpoints": {
    "sm": "640px",
    "md": "768px",
    "lg": "1024px",
    "xl": "1280px"
  }
}"##;

// ---------------------------------------------------------------------------
// ThemeConfig
// ---------------------------------------------------------------------------

/// A complete tenant theme.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeConfig {
    pub colors: Colors,
    pub typography: Typography,
    pub spacing: Spacing,
    pub breakpoints: Breakpoints,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub branding: Option<Branding>,
}

/// The seven semantic colors, as CSS color strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Colors {
    pub primary: String,
    pub secondary: String,
    pub accent: String,
    pub background: String,
    pub surface: String,
    pub text: String,
    pub text_muted: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Typography {
    pub font_family: FontFamily,
    pub font_size: FontSize,
}

/// Font stacks, most preferred first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FontFamily {
    pub sans: Vec<String>,
    pub mono: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FontSize {
    pub xs: String,
    pub sm: String,
    pub base: String,
    pub lg: String,
    pub xl: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Spacing {
    pub xs: String,
    pub sm: String,
    pub md: String,
    pub lg: String,
    pub xl: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Breakpoints {
    pub sm: String,
    pub md: String,
    pub lg: String,
    pub xl: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Branding {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub favicon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl ThemeConfig {
    /// Strict parse: every section and field must be present with the right
    /// type. Unknown keys are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`ThemeError::Invalid`] describing the first problem found.
    pub fn from_json(text: &str) -> Result<Self, ThemeError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Strict conversion from an already-parsed document.
    ///
    /// # Errors
    ///
    /// Same as [`from_json`](Self::from_json).
    pub fn from_value(value: Value) -> Result<Self, ThemeError> {
        Ok(serde_json::from_value(value)?)
    }

    /// Serialize with 2-space indentation.
    ///
    /// # Errors
    ///
    /// Only fails if serialization itself fails, which plain string fields
    /// cannot cause in practice.
    pub fn to_json_pretty(&self) -> Result<String, ThemeError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// The tenant's display name, or [`DEFAULT_TENANT_NAME`].
    #[must_use]
    pub fn tenant_name(&self) -> &str {
        self.branding
            .as_ref()
            .and_then(|b| b.name.as_deref())
            .unwrap_or(DEFAULT_TENANT_NAME)
    }
}

impl Default for ThemeConfig {
    fn default() -> Self {
        let s = String::from;
        Self {
            colors: Colors {
                primary: s("#3b82f6"),
                secondary: s("#64748b"),
                accent: s("#f59e0b"),
                background: s("#ffffff"),
                surface: s("#f8fafc"),
                text: s("#1e293b"),
                text_muted: s("#64748b"),
            },
            typography: Typography {
                font_family: FontFamily {
                    sans: vec![s("Inter"), s("system-ui"), s("sans-serif")],
                    mono: vec![s("JetBrains Mono"), s("monospace")],
                },
                font_size: FontSize {
                    xs: s("0.75rem"),
                    sm: s("0.875rem"),
                    base: s("1rem"),
                    lg: s("1.125rem"),
                    xl: s("1.25rem"),
                },
            },
            spacing: Spacing {
                xs: s("0.25rem"),
                sm: s("0.5rem"),
                md: s("1rem"),
                lg: s("1.5rem"),
                xl: s("2rem"),
            },
            breakpoints: Breakpoints {
                sm: s("640px"),
                md: s("768px"),
                lg: s("1024px"),
                xl: s("1280px"),
            },
            branding: None,
        }
    }
}

/// Parse a stored config, falling back to the default theme.
///
/// `None` (nothing stored) and anything that fails the strict parse both
/// yield [`ThemeConfig::default`]. The failure is logged, never returned.
#[must_use]
pub fn parse_theme_config(stored: Option<&str>) -> ThemeConfig {
    let Some(text) = stored else {
        return ThemeConfig::default();
    };
    ThemeConfig::from_json(text).unwrap_or_else(|e| {
        warn!(error = %e, "stored theme is unreadable, using default theme");
        ThemeConfig::default()
    })
}

// ---------------------------------------------------------------------------
// PartialThemeConfig
// ---------------------------------------------------------------------------

/// A theme where anything may be missing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PartialThemeConfig {
    pub colors: PartialColors,
    pub font_sans: Option<Vec<String>>,
    pub font_mono: Option<Vec<String>>,
    pub font_size: PartialScale,
    pub spacing: PartialScale,
    pub breakpoints: PartialScale,
    pub branding_name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PartialColors {
    pub primary: Option<String>,
    pub secondary: Option<String>,
    pub accent: Option<String>,
    pub background: Option<String>,
    pub surface: Option<String>,
    pub text: Option<String>,
    pub text_muted: Option<String>,
}

/// A named size scale (`xs` through `xl`); not every scale uses every step.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PartialScale {
    pub xs: Option<String>,
    pub sm: Option<String>,
    pub md: Option<String>,
    pub base: Option<String>,
    pub lg: Option<String>,
    pub xl: Option<String>,
}

impl PartialScale {
    /// Present steps in `xs, sm, md, base, lg, xl` order.
    pub fn steps(&self) -> impl Iterator<Item = (&'static str, &str)> {
        [
            ("xs", &self.xs),
            ("sm", &self.sm),
            ("md", &self.md),
            ("base", &self.base),
            ("lg", &self.lg),
            ("xl", &self.xl),
        ]
        .into_iter()
        .filter_map(|(name, value)| value.as_deref().map(|v| (name, v)))
    }

    fn from_value(value: Option<&Value>) -> Self {
        Self {
            xs: text_at(value, "xs"),
            sm: text_at(value, "sm"),
            md: text_at(value, "md"),
            base: text_at(value, "base"),
            lg: text_at(value, "lg"),
            xl: text_at(value, "xl"),
        }
    }
}

impl PartialThemeConfig {
    /// Read whatever is usable from an arbitrary JSON document.
    ///
    /// Only non-empty strings count as present; font stacks keep their
    /// string entries.
    #[must_use]
    pub fn from_value(value: &Value) -> Self {
        let colors = value.get("colors");
        let typography = value.get("typography");
        let family = typography.and_then(|t| t.get("fontFamily"));
        Self {
            colors: PartialColors {
                primary: text_at(colors, "primary"),
                secondary: text_at(colors, "secondary"),
                accent: text_at(colors, "accent"),
                background: text_at(colors, "background"),
                surface: text_at(colors, "surface"),
                text: text_at(colors, "text"),
                text_muted: text_at(colors, "textMuted"),
            },
            font_sans: list_at(family, "sans"),
            font_mono: list_at(family, "mono"),
            font_size: PartialScale::from_value(typography.and_then(|t| t.get("fontSize"))),
            spacing: PartialScale::from_value(value.get("spacing")),
            breakpoints: PartialScale::from_value(value.get("breakpoints")),
            branding_name: text_at(value.get("branding"), "name"),
        }
    }

    /// Page title for a tenant with a branding name.
    #[must_use]
    pub fn document_title(&self) -> Option<String> {
        self.branding_name
            .as_deref()
            .map(|name| format!("{name} - Dashboard"))
    }
}

impl From<&ThemeConfig> for PartialThemeConfig {
    fn from(config: &ThemeConfig) -> Self {
        let some = |s: &String| Some(s.clone());
        let c = &config.colors;
        let f = &config.typography.font_size;
        let sp = &config.spacing;
        let bp = &config.breakpoints;
        Self {
            colors: PartialColors {
                primary: some(&c.primary),
                secondary: some(&c.secondary),
                accent: some(&c.accent),
                background: some(&c.background),
                surface: some(&c.surface),
                text: some(&c.text),
                text_muted: some(&c.text_muted),
            },
            font_sans: Some(config.typography.font_family.sans.clone()),
            font_mono: Some(config.typography.font_family.mono.clone()),
            font_size: PartialScale {
                xs: some(&f.xs),
                sm: some(&f.sm),
                md: None,
                base: some(&f.base),
                lg: some(&f.lg),
                xl: some(&f.xl),
            },
            spacing: PartialScale {
                xs: some(&sp.xs),
                sm: some(&sp.sm),
                md: some(&sp.md),
                base: None,
                lg: some(&sp.lg),
                xl: some(&sp.xl),
            },
            breakpoints: PartialScale {
                xs: None,
                sm: some(&bp.sm),
                md: some(&bp.md),
                base: None,
                lg: some(&bp.lg),
                xl: some(&bp.xl),
            },
            branding_name: config.branding.as_ref().and_then(|b| b.name.clone()),
        }
    }
}

fn text_at(parent: Option<&Value>, key: &str) -> Option<String> {
    parent
        .and_then(|p| p.get(key))
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_owned)
}

fn list_at(parent: Option<&Value>, key: &str) -> Option<Vec<String>> {
    parent.and_then(|p| p.get(key)).and_then(Value::as_array).map(|items| {
        items
            .iter()
            .filter_map(Value::as_str)
            .map(str::to_owned)
            .collect()
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

// SPDX-License-Identifier: MIT

//! Theme linting.
//!
//! Two channels, run in order:
//!
//! 1. **Syntax**: the text is parsed with `serde_json`. A failure produces
//!    exactly one [`LintKind::Json`] error at the parser's position and
//!    stops there.
//! 2. **Structure**: the parsed document's top level is checked against
//!    the four theme sections. Unknown keys and missing sections each
//!    produce a [`LintKind::Structural`] error.
//!
//! The structural check is shallow: nested keys and value types are the
//! strict typed parse's business (`ThemeConfig::from_json` in `tt-theme`),
//! which runs on save. Lint errors are data, never `Err`.

use std::fmt;

use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::source::{Position, SourceText};

/// Top-level sections a theme must have, in reporting order.
pub const ALLOWED_SECTIONS: [&str; 4] = ["colors", "typography", "spacing", "breakpoints"];

/// Message for any syntax error. The parser's own wording is not surfaced.
pub const JSON_SYNTAX_MESSAGE: &str = "Invalid JSON syntax";

// ---------------------------------------------------------------------------
// LintError
// ---------------------------------------------------------------------------

/// Which channel produced an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LintKind {
    Json,
    Structural,
}

/// One problem in the editor text. `line` and `column` are 1-based.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LintError {
    pub line: usize,
    pub column: usize,
    pub message: String,
    pub kind: LintKind,
}

impl LintError {
    /// Build an error at a 0-indexed [`Position`].
    #[must_use]
    pub fn at(pos: Position, message: impl Into<String>, kind: LintKind) -> Self {
        Self {
            line: pos.line_number(),
            column: pos.column_number(),
            message: message.into(),
            kind,
        }
    }

    /// The 0-indexed position of this error.
    #[must_use]
    pub const fn position(&self) -> Position {
        Position::new(self.line.saturating_sub(1), self.column.saturating_sub(1))
    }
}

impl fmt::Display for LintError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}: {}", self.line, self.column, self.message)
    }
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Lint the editor text.
///
/// An empty result means the text is valid JSON with exactly the expected
/// top-level sections.
#[must_use]
pub fn validate_theme_code(text: &str) -> Vec<LintError> {
    let source = SourceText::new(text);
    match serde_json::from_str::<Value>(text) {
        Ok(value) => validate_theme(&value, &source),
        Err(err) => {
            let pos = source.byte_location_to_position(err.line(), err.column());
            debug!(line = err.line(), column = err.column(), %pos, "theme JSON does not parse");
            vec![LintError::at(pos, JSON_SYNTAX_MESSAGE, LintKind::Json)]
        }
    }
}

/// Structural lint of an already-parsed document.
///
/// `source` is only used to locate unknown keys; a key that cannot be found
/// on any line is silently skipped. A non-object root has no keys, so every
/// section is reported missing.
#[must_use]
pub fn validate_theme(value: &Value, source: &SourceText) -> Vec<LintError> {
    let mut errors = Vec::new();
    let object = value.as_object();

    if let Some(object) = object {
        for key in object.keys() {
            if ALLOWED_SECTIONS.contains(&key.as_str()) {
                continue;
            }
            if let Some(pos) = source.find(&format!("\"{key}\"")) {
                errors.push(LintError::at(
                    pos,
                    format!(
                        "Unknown property \"{key}\". Expected one of: {}",
                        ALLOWED_SECTIONS.join(", ")
                    ),
                    LintKind::Structural,
                ));
            }
        }
    }

    for section in ALLOWED_SECTIONS {
        if !object.is_some_and(|o| o.contains_key(section)) {
            errors.push(LintError::at(
                Position::ZERO,
                format!("Missing required section \"{section}\""),
                LintKind::Structural,
            ));
        }
    }

    debug!(errors = errors.len(), "structural validation");
    errors
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const VALID: &str = r#"{
  "colors": {},
  "typography": {},
  "spacing": {},
  "breakpoints": {}
}"#;

    fn missing(section: &str) -> LintError {
        LintError {
            line: 1,
            column: 1,
            message: format!("Missing required section \"{section}\""),
            kind: LintKind::Structural,
        }
    }

    // ── Syntax channel ──────────────────────────────────────────────

    #[test]
    fn valid_document_has_no_errors() {
        assert_eq!(validate_theme_code(VALID), vec![]);
    }

    #[test]
    fn syntax_error_is_single_json_error() {
        let errors = validate_theme_code(r#"{"a": }"#);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, LintKind::Json);
        assert_eq!(errors[0].message, "Invalid JSON syntax");
        assert_eq!(errors[0].line, 1);
        assert!(errors[0].column >= 1);
    }

    #[test]
    fn out_of_range_numbers_are_valid_json() {
        let text = r#"{"colors": {"big": 1e400}, "typography": {}, "spacing": {}, "breakpoints": {}}"#;
        assert_eq!(validate_theme_code(text), vec![]);
    }

    #[test]
    fn syntax_error_reports_parser_line() {
        let errors = validate_theme_code("{\n  \"colors\": {},\n  \"spacing\" {}\n}");
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].line, 3);
    }

    #[test]
    fn syntax_error_column_counts_chars() {
        // The parser points at the stray `x`: byte column 10, char column 9.
        let errors = validate_theme_code("{\"é\": 1 x}");
        assert_eq!(errors.len(), 1);
        assert_eq!((errors[0].line, errors[0].column), (1, 9));
    }

    #[test]
    fn empty_text_errors_at_origin() {
        let errors = validate_theme_code("");
        assert_eq!(errors.len(), 1);
        assert_eq!((errors[0].line, errors[0].column), (1, 1));
        assert_eq!(errors[0].kind, LintKind::Json);
    }

    #[test]
    fn syntax_error_skips_structural_checks() {
        let errors = validate_theme_code(r#"{"bogus": 1,}"#);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, LintKind::Json);
    }

    // ── Structural channel ──────────────────────────────────────────

    #[test]
    fn missing_sections_in_order() {
        assert_eq!(
            validate_theme_code(r#"{"colors": {}}"#),
            vec![missing("typography"), missing("spacing"), missing("breakpoints")]
        );
    }

    #[test]
    fn unknown_property_located_by_first_occurrence() {
        let text = VALID.replace("  \"spacing\": {},", "  \"spacing\": {},\n  \"bogus\": 1,");
        let errors = validate_theme_code(&text);
        assert_eq!(
            errors,
            vec![LintError {
                line: 5,
                column: 3,
                message: "Unknown property \"bogus\". Expected one of: colors, typography, \
                          spacing, breakpoints"
                    .into(),
                kind: LintKind::Structural,
            }]
        );
    }

    #[test]
    fn unknown_properties_follow_source_order() {
        let errors = validate_theme_code(r#"{"zeta": 1, "alpha": 2}"#);
        let unknown: Vec<_> = errors
            .iter()
            .filter(|e| e.message.starts_with("Unknown"))
            .map(|e| e.column)
            .collect();
        // "zeta" at index 1, "alpha" at index 12.
        assert_eq!(unknown, vec![2, 13]);
        // Unknown keys first, then the four missing sections.
        assert_eq!(errors.len(), 6);
        assert_eq!(errors[2], missing("colors"));
    }

    #[test]
    fn unknown_key_found_inside_a_string_value_first() {
        // The search is textual: an earlier line mentioning "bogus" wins.
        let text = "{\n  \"colors\": {\"x\": \"bogus\"},\n  \"bogus\": 1\n}";
        let errors = validate_theme_code(text);
        let bogus = errors.iter().find(|e| e.message.contains("bogus")).unwrap();
        assert_eq!(bogus.line, 2);
    }

    #[test]
    fn unlocatable_key_is_skipped() {
        // The escaped key cannot be found verbatim in the text.
        let text = r#"{"b\u0061d": 1}"#;
        let value: Value = serde_json::from_str(text).unwrap();
        assert!(value.get("bad").is_some());
        let errors = validate_theme(&value, &SourceText::new(text));
        assert!(errors.iter().all(|e| !e.message.starts_with("Unknown")));
        assert_eq!(errors.len(), 4);
    }

    #[test]
    fn non_object_root_reports_all_sections() {
        for text in ["[]", "42", "\"colors\"", "null"] {
            assert_eq!(
                validate_theme_code(text),
                ALLOWED_SECTIONS.map(missing).to_vec(),
                "root {text}"
            );
        }
    }

    #[test]
    fn shallow_check_ignores_section_contents() {
        let text = r#"{"colors": 5, "typography": [], "spacing": null, "breakpoints": "x"}"#;
        assert_eq!(validate_theme_code(text), vec![]);
    }

    // ── LintError ───────────────────────────────────────────────────

    #[test]
    fn lint_error_display_and_position() {
        let e = LintError::at(Position::new(2, 4), "boom", LintKind::Json);
        assert_eq!(e.to_string(), "3:5: boom");
        assert_eq!(e.position(), Position::new(2, 4));
    }

    #[test]
    fn lint_error_serializes_kind_lowercase() {
        let e = LintError::at(Position::ZERO, "m", LintKind::Structural);
        assert_eq!(
            serde_json::to_string(&e).unwrap(),
            r#"{"line":1,"column":1,"message":"m","kind":"structural"}"#
        );
    }
}

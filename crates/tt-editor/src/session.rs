// SPDX-License-Identifier: MIT

//! Editing session: debounced validation, throttled scroll sync,
//! format-on-blur, and the commit gate.
//!
//! Time is always passed in. Nothing here reads the clock or spawns a
//! timer, so a session is a deterministic state machine: the caller feeds
//! it `Instant`s from its event loop (or from a test) and asks what is due.

use std::time::{Duration, Instant};

use serde::Serialize;
use serde_json::Value;
use serde_json::ser::{PrettyFormatter, Serializer};
use thiserror::Error;
use tracing::debug;

use crate::validate::{LintError, validate_theme_code};

/// Quiet period after the last keystroke before the text is re-validated.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(140);

/// Minimum gap between two scroll-sync passes (about one frame).
pub const DEFAULT_SCROLL_THROTTLE: Duration = Duration::from_millis(16);

/// Indent width used when formatting on blur.
pub const DEFAULT_INDENT: usize = 2;

// ---------------------------------------------------------------------------
// Debouncer
// ---------------------------------------------------------------------------

/// Trailing-edge debounce over an explicit clock.
///
/// Each [`schedule`](Self::schedule) replaces any pending value and restarts
/// the wait. [`poll`](Self::poll) hands the value out once the wait has
/// elapsed since the last schedule.
#[derive(Debug, Clone)]
pub struct Debouncer<T> {
    wait: Duration,
    pending: Option<(T, Instant)>,
}

impl<T> Debouncer<T> {
    #[must_use]
    pub const fn new(wait: Duration) -> Self {
        Self {
            wait,
            pending: None,
        }
    }

    /// Replace the pending value and restart the wait at `now`.
    pub fn schedule(&mut self, value: T, now: Instant) {
        self.pending = Some((value, now));
    }

    /// Take the pending value if it has been quiet for `wait`.
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        let due = self
            .pending
            .as_ref()
            .is_some_and(|(_, at)| now.saturating_duration_since(*at) >= self.wait);
        if due { self.flush() } else { None }
    }

    /// Take the pending value immediately, due or not.
    pub fn flush(&mut self) -> Option<T> {
        self.pending.take().map(|(value, _)| value)
    }

    /// Drop the pending value.
    pub fn cancel(&mut self) {
        self.pending = None;
    }

    #[must_use]
    pub const fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// When the pending value becomes due, if any.
    #[must_use]
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|(_, at)| *at + self.wait)
    }
}

// ---------------------------------------------------------------------------
// Throttle
// ---------------------------------------------------------------------------

/// Leading-edge throttle: at most one acquisition per `interval`.
#[derive(Debug, Clone)]
pub struct Throttle {
    interval: Duration,
    last: Option<Instant>,
}

impl Throttle {
    #[must_use]
    pub const fn new(interval: Duration) -> Self {
        Self {
            interval,
            last: None,
        }
    }

    /// Whether the caller may run now. A `true` starts a new interval.
    pub fn try_acquire(&mut self, now: Instant) -> bool {
        let open = self
            .last
            .is_none_or(|last| now.saturating_duration_since(last) >= self.interval);
        if open {
            self.last = Some(now);
        }
        open
    }
}

// ---------------------------------------------------------------------------
// Formatting
// ---------------------------------------------------------------------------

/// Re-serialize `text` with `indent` spaces, if it parses as JSON.
///
/// Key order is preserved. Returns `None` for unparseable text, which the
/// editor leaves exactly as typed.
#[must_use]
pub fn format_json(text: &str, indent: usize) -> Option<String> {
    let value: Value = serde_json::from_str(text).ok()?;
    let spaces = " ".repeat(indent);
    let mut buf = Vec::with_capacity(text.len());
    let formatter = PrettyFormatter::with_indent(spaces.as_bytes());
    let mut ser = Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut ser).ok()?;
    String::from_utf8(buf).ok()
}

// ---------------------------------------------------------------------------
// EditorSession
// ---------------------------------------------------------------------------

/// Why a commit was refused.
#[derive(Debug, Error)]
pub enum CommitError {
    /// The text has lint errors. The message is deliberately generic; the
    /// individual errors are already on screen.
    #[error("Please fix the errors before continuing.")]
    HasErrors { count: usize },

    #[error("theme JSON does not parse: {0}")]
    Json(#[from] serde_json::Error),
}

/// Session timing and formatting knobs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionConfig {
    pub debounce: Duration,
    pub scroll_throttle: Duration,
    pub indent: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            debounce: DEFAULT_DEBOUNCE,
            scroll_throttle: DEFAULT_SCROLL_THROTTLE,
            indent: DEFAULT_INDENT,
        }
    }
}

/// The editor's text plus the errors last computed for it.
///
/// `errors` can lag `text` by up to one debounce interval while the user is
/// typing. [`commit`](Self::commit) never uses stale errors.
#[derive(Debug)]
pub struct EditorSession {
    text: String,
    errors: Vec<LintError>,
    validation: Debouncer<()>,
    scroll: Throttle,
    indent: usize,
}

impl EditorSession {
    /// Start a session on `text`, validated immediately.
    #[must_use]
    pub fn new(text: impl Into<String>, config: SessionConfig) -> Self {
        let text = text.into();
        let errors = validate_theme_code(&text);
        Self {
            text,
            errors,
            validation: Debouncer::new(config.debounce),
            scroll: Throttle::new(config.scroll_throttle),
            indent: config.indent,
        }
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn errors(&self) -> &[LintError] {
        &self.errors
    }

    #[must_use]
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Whether an edit is waiting for its validation pass.
    #[must_use]
    pub const fn validation_pending(&self) -> bool {
        self.validation.is_pending()
    }

    /// When the pending validation pass becomes due, if one is scheduled.
    #[must_use]
    pub fn validation_deadline(&self) -> Option<Instant> {
        self.validation.deadline()
    }

    /// Replace the text and schedule a validation pass.
    pub fn edit(&mut self, text: impl Into<String>, now: Instant) {
        self.text = text.into();
        self.validation.schedule((), now);
    }

    /// Run the scheduled validation if it is due. Returns whether it ran.
    pub fn tick(&mut self, now: Instant) -> bool {
        if self.validation.poll(now).is_some() {
            self.revalidate();
            true
        } else {
            false
        }
    }

    /// Focus left the editor: format the text if it parses, then validate
    /// right away. Returns whether the text changed.
    pub fn blur(&mut self) -> bool {
        self.validation.cancel();
        let changed = match format_json(&self.text, self.indent) {
            Some(formatted) if formatted != self.text => {
                self.text = formatted;
                true
            }
            _ => false,
        };
        self.revalidate();
        changed
    }

    /// The editor scrolled. Returns whether the overlay should re-sync now.
    pub fn scroll(&mut self, now: Instant) -> bool {
        self.scroll.try_acquire(now)
    }

    /// Hand the text over as parsed JSON, or refuse.
    ///
    /// A pending validation is run first, so a commit straight after a
    /// keystroke sees that keystroke's errors.
    pub fn commit(&mut self) -> Result<Value, CommitError> {
        if self.validation.flush().is_some() {
            self.revalidate();
        }
        if self.has_errors() {
            return Err(CommitError::HasErrors {
                count: self.errors.len(),
            });
        }
        Ok(serde_json::from_str(&self.text)?)
    }

    fn revalidate(&mut self) {
        self.errors = validate_theme_code(&self.text);
        debug!(errors = self.errors.len(), bytes = self.text.len(), "revalidated");
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

//! Shared terminal contracts used by the interpreter session and the browser display surface.
//!
//! This crate is intentionally runtime-agnostic. It defines serializable scrollback records,
//! render snapshots, display events, and command results without depending on Leptos, browser
//! APIs, or the interpreter internals.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Identifier of one in-flight command dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ExecutionId(pub u64);

/// Category of a scrollback line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LineKind {
    /// Echo of a submitted input line, prefixed with the prompt.
    InputEcho,
    /// Regular command output.
    Output,
    /// Unresolved commands, action failures, and error-styled notices.
    Error,
}

/// One entry in the session scrollback.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScrollbackLine {
    /// Line category.
    pub kind: LineKind,
    /// Line text; may contain embedded newlines.
    pub text: String,
    /// Creation time in unix milliseconds. Informational only.
    pub created_at_ms: u64,
}

impl ScrollbackLine {
    /// Creates a scrollback line.
    pub fn new(kind: LineKind, text: impl Into<String>, created_at_ms: u64) -> Self {
        Self {
            kind,
            text: text.into(),
            created_at_ms,
        }
    }
}

/// Read-only render state handed to the display surface after every mutation.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SessionSnapshot {
    /// Scrollback in append order.
    pub scrollback: Vec<ScrollbackLine>,
    /// Current uncommitted input text.
    pub input_buffer: String,
    /// Command names matching the current input prefix.
    pub suggestions: Vec<String>,
    /// History index being browsed, or `None` when not browsing.
    pub history_cursor: Option<usize>,
    /// Dispatch currently awaiting its command action.
    pub active_execution: Option<ExecutionId>,
}

impl SessionSnapshot {
    /// Whether the suggestions strip should be rendered.
    pub fn shows_suggestions(&self) -> bool {
        !self.suggestions.is_empty() && !self.input_buffer.trim().is_empty()
    }

    /// Whether a command action is still running.
    pub fn is_busy(&self) -> bool {
        self.active_execution.is_some()
    }
}

/// Discrete events sent by the display surface to the session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum TerminalEvent {
    /// The input field text changed.
    TextChanged {
        /// New input text.
        text: String,
    },
    /// The input line was submitted.
    Submit,
    /// Recall the previous history entry.
    HistoryPrev,
    /// Recall the next history entry.
    HistoryNext,
    /// Replace the input with the first suggestion.
    AcceptSuggestion,
}

/// Successful result of a command action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "text", rename_all = "kebab-case")]
pub enum CommandOutput {
    /// Text appended as an output line.
    Text(String),
    /// Informational text appended as an error-styled line.
    Error(String),
    /// Erase the whole scrollback.
    Clear,
}

impl CommandOutput {
    /// Plain output text.
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    /// Error-styled informational text.
    pub fn error(text: impl Into<String>) -> Self {
        Self::Error(text.into())
    }
}

/// Help row for one registered command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandSummary {
    /// Canonical command name.
    pub name: String,
    /// Human-readable description.
    pub description: String,
    /// Alternate names, in declaration order.
    pub aliases: Vec<String>,
}

/// Error raised by a command action and reported at the dispatch boundary.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("{message}")]
pub struct CommandError {
    /// Human-readable message.
    pub message: String,
}

impl CommandError {
    /// Creates a new command error.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn events_use_kebab_case_tags() {
        let raw = serde_json::to_string(&TerminalEvent::TextChanged {
            text: "he".to_string(),
        })
        .expect("serialize");
        assert_eq!(raw, r#"{"kind":"text-changed","text":"he"}"#);

        let parsed: TerminalEvent =
            serde_json::from_str(r#"{"kind":"accept-suggestion"}"#).expect("parse");
        assert_eq!(parsed, TerminalEvent::AcceptSuggestion);
    }

    #[test]
    fn snapshot_serializes_line_kinds() {
        let snapshot = SessionSnapshot {
            scrollback: vec![ScrollbackLine::new(LineKind::InputEcho, "$ help", 7)],
            ..SessionSnapshot::default()
        };
        let value = serde_json::to_value(&snapshot).expect("serialize");
        assert_eq!(value["scrollback"][0]["kind"], "input-echo");
        assert_eq!(value["history_cursor"], serde_json::Value::Null);
    }

    #[test]
    fn suggestions_hidden_for_blank_input() {
        let mut snapshot = SessionSnapshot {
            suggestions: vec!["help".to_string()],
            input_buffer: "  ".to_string(),
            ..SessionSnapshot::default()
        };
        assert!(!snapshot.shows_suggestions());
        snapshot.input_buffer = "h".to_string();
        assert!(snapshot.shows_suggestions());
    }

    #[test]
    fn command_error_displays_message() {
        let error = CommandError::new("navigation blocked");
        assert_eq!(error.to_string(), "navigation blocked");
        assert_eq!(
            serde_json::to_value(&error).expect("serialize")["message"],
            "navigation blocked"
        );
    }
}

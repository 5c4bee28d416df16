//! Interpreter session: scrollback, input buffer, history cursor, suggestions, and dispatch.
//!
//! Submission is split into [`TerminalSession::begin_submit`] and
//! [`TerminalSession::finish_submit`] so a display surface can await the command action without
//! holding a borrow of the session. [`TerminalSession::on_submit`] chains both for callers that
//! own the session outright.

use std::rc::Rc;

use leptos::logging;
use terminal_contract::{
    CommandError, CommandOutput, ExecutionId, LineKind, ScrollbackLine, SessionSnapshot,
    TerminalEvent,
};

use crate::{
    config::TerminalConfig,
    host::HostServices,
    registry::{CommandContext, CommandFuture},
};

/// Mutable state of one terminal tab.
pub struct TerminalSession {
    config: Rc<TerminalConfig>,
    host: HostServices,
    scrollback: Vec<ScrollbackLine>,
    input_buffer: String,
    history: Vec<String>,
    history_cursor: Option<usize>,
    suggestions: Vec<String>,
    active_execution: Option<ExecutionId>,
    next_execution_id: u64,
}

/// A submitted line whose command action has not run yet.
#[must_use = "a pending dispatch must be run and handed back to `finish_submit`"]
pub struct PendingDispatch {
    execution_id: ExecutionId,
    command_name: String,
    action: Option<CommandFuture>,
}

impl PendingDispatch {
    /// Awaits the resolved action, if any.
    pub async fn run(self) -> DispatchOutcome {
        let resolution = match self.action {
            Some(action) => Resolution::Completed(action.await),
            None => Resolution::NotFound,
        };
        DispatchOutcome {
            execution_id: self.execution_id,
            command_name: self.command_name,
            resolution,
        }
    }
}

/// Result of running a [`PendingDispatch`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchOutcome {
    execution_id: ExecutionId,
    command_name: String,
    resolution: Resolution,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Resolution {
    NotFound,
    Completed(Result<CommandOutput, CommandError>),
}

impl TerminalSession {
    /// Creates an empty session over shared configuration.
    pub fn new(config: Rc<TerminalConfig>, host: HostServices) -> Self {
        Self {
            config,
            host,
            scrollback: Vec::new(),
            input_buffer: String::new(),
            history: Vec::new(),
            history_cursor: None,
            suggestions: Vec::new(),
            active_execution: None,
            next_execution_id: 0,
        }
    }

    /// Render state for the display surface.
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            scrollback: self.scrollback.clone(),
            input_buffer: self.input_buffer.clone(),
            suggestions: self.suggestions.clone(),
            history_cursor: self.history_cursor,
            active_execution: self.active_execution,
        }
    }

    /// Previously submitted lines, oldest first.
    pub fn history(&self) -> &[String] {
        &self.history
    }

    /// Scrollback in append order.
    pub fn scrollback(&self) -> &[ScrollbackLine] {
        &self.scrollback
    }

    /// Current input text.
    pub fn input_buffer(&self) -> &str {
        &self.input_buffer
    }

    /// Current suggestions.
    pub fn suggestions(&self) -> &[String] {
        &self.suggestions
    }

    /// History index being browsed.
    pub fn history_cursor(&self) -> Option<usize> {
        self.history_cursor
    }

    /// Routes one display event to its handler.
    pub async fn apply(&mut self, event: TerminalEvent) {
        match event {
            TerminalEvent::TextChanged { text } => self.on_text_changed(text),
            TerminalEvent::Submit => self.on_submit().await,
            TerminalEvent::HistoryPrev => self.on_history_prev(),
            TerminalEvent::HistoryNext => self.on_history_next(),
            TerminalEvent::AcceptSuggestion => self.on_accept_suggestion(),
        }
    }

    /// Replaces the input buffer and recomputes suggestions.
    ///
    /// The history cursor is left untouched, so editing a recalled entry and pressing a history
    /// key again replaces the edit with another entry.
    pub fn on_text_changed(&mut self, text: impl Into<String>) {
        self.input_buffer = text.into();
        self.suggestions = self.config.registry.suggest(&self.input_buffer);
    }

    /// Submits the input buffer and awaits the command action.
    pub async fn on_submit(&mut self) {
        if let Some(pending) = self.begin_submit() {
            let outcome = pending.run().await;
            self.finish_submit(outcome);
        }
    }

    /// Records and echoes the input line, then resolves its command.
    ///
    /// Returns `None` when the buffer is blank or another dispatch is still running. A blank
    /// buffer is cleared without touching history or scrollback.
    pub fn begin_submit(&mut self) -> Option<PendingDispatch> {
        let raw = self.input_buffer.trim().to_string();
        if raw.is_empty() {
            self.input_buffer.clear();
            self.suggestions.clear();
            return None;
        }
        if let Some(active) = self.active_execution {
            logging::warn!("ignoring `{raw}` while execution {} is running", active.0);
            return None;
        }

        self.history.push(raw.clone());
        self.history_cursor = None;
        let echo = format!("{} {raw}", self.config.prompt());
        self.push_line(LineKind::InputEcho, echo);
        self.input_buffer.clear();
        self.suggestions.clear();

        let mut tokens = raw.split_whitespace().map(str::to_string);
        let command_name = tokens.next().unwrap_or_default();
        let args = tokens.collect::<Vec<_>>();

        self.next_execution_id = self.next_execution_id.saturating_add(1);
        let execution_id = ExecutionId(self.next_execution_id);
        self.active_execution = Some(execution_id);

        let action = self
            .config
            .registry
            .resolve(&command_name)
            .map(|descriptor| {
                (descriptor.handler)(CommandContext {
                    args,
                    registry: self.config.registry.clone(),
                    links: self.config.links.clone(),
                    host: self.host.clone(),
                })
            });

        Some(PendingDispatch {
            execution_id,
            command_name,
            action,
        })
    }

    /// Appends the outcome of a dispatch started by [`Self::begin_submit`].
    pub fn finish_submit(&mut self, outcome: DispatchOutcome) {
        if self.active_execution != Some(outcome.execution_id) {
            logging::warn!(
                "dropping outcome of stale execution {} for `{}`",
                outcome.execution_id.0,
                outcome.command_name
            );
            return;
        }
        self.active_execution = None;

        match outcome.resolution {
            Resolution::Completed(Ok(CommandOutput::Clear)) => self.scrollback.clear(),
            Resolution::Completed(Ok(CommandOutput::Text(text))) => {
                self.push_line(LineKind::Output, text)
            }
            Resolution::Completed(Ok(CommandOutput::Error(text))) => {
                self.push_line(LineKind::Error, text)
            }
            Resolution::Completed(Err(err)) => {
                logging::warn!("command `{}` failed: {err}", outcome.command_name);
                self.push_line(LineKind::Error, format!("Erro ao executar comando: {err}"));
            }
            Resolution::NotFound => self.push_line(
                LineKind::Error,
                format!(
                    "Comando não encontrado: {}. Digite 'help' para ver os comandos disponíveis.",
                    outcome.command_name
                ),
            ),
        }
    }

    /// Recalls the previous history entry, clamping at the oldest.
    pub fn on_history_prev(&mut self) {
        if self.history.is_empty() {
            return;
        }
        let index = match self.history_cursor {
            None => self.history.len() - 1,
            Some(index) => index.saturating_sub(1),
        };
        self.history_cursor = Some(index);
        self.recall(index);
    }

    /// Recalls the next history entry, leaving history browsing past the newest.
    pub fn on_history_next(&mut self) {
        let Some(index) = self.history_cursor else {
            return;
        };
        let next = index + 1;
        if next >= self.history.len() {
            self.history_cursor = None;
            self.input_buffer.clear();
            self.suggestions.clear();
        } else {
            self.history_cursor = Some(next);
            self.recall(next);
        }
    }

    fn recall(&mut self, index: usize) {
        self.input_buffer = self.history[index].clone();
        self.suggestions = self.config.registry.suggest(&self.input_buffer);
    }

    /// Replaces the input with the first suggestion.
    pub fn on_accept_suggestion(&mut self) {
        if let Some(first) = self.suggestions.first() {
            self.input_buffer = first.clone();
            self.suggestions.clear();
        }
    }

    fn push_line(&mut self, kind: LineKind, text: impl Into<String>) {
        let created_at_ms = self.host.unix_time_ms_now();
        self.scrollback
            .push(ScrollbackLine::new(kind, text, created_at_ms));
    }
}

//! Browser-terminal interpreter engine: command registry, built-in commands, and the
//! read-eval-print session state machine.
//!
//! The engine is runtime-agnostic. Display surfaces feed [`TerminalEvent`]s into a
//! [`TerminalSession`] and re-render from [`TerminalSession::snapshot`]; host capabilities such as
//! external navigation arrive through [`HostServices`].

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

pub mod builtins;
pub mod config;
pub mod host;
pub mod registry;
pub mod session;

pub use builtins::{format_locale_datetime, standard_commands, FixedTarget};
pub use config::{DisplayText, LinkTable, LinkTarget, TerminalConfig};
pub use host::{
    Clock, FixedClock, HostServices, MemoryNavigator, Navigator, NoopNavigator, SystemClock,
};
pub use registry::{
    CommandContext, CommandDescriptor, CommandFuture, CommandHandler, CommandRegistry,
    RegistryError,
};
pub use session::{DispatchOutcome, PendingDispatch, TerminalSession};
pub use terminal_contract::{
    CommandError, CommandOutput, CommandSummary, ExecutionId, LineKind,
    ScrollbackLine, SessionSnapshot, TerminalEvent,
};

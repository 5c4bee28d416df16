//! Static command table with case-insensitive name/alias resolution and prefix suggestions.

use std::{collections::BTreeMap, fmt, rc::Rc};

use futures::future::LocalBoxFuture;
use terminal_contract::{CommandError, CommandOutput, CommandSummary};
use thiserror::Error;

use crate::{config::LinkTable, host::HostServices};

/// Future returned by a command action. Always awaited, even when the action is synchronous.
pub type CommandFuture = LocalBoxFuture<'static, Result<CommandOutput, CommandError>>;

/// Async command action.
pub type CommandHandler = Rc<dyn Fn(CommandContext) -> CommandFuture>;

/// Execution context handed to a command action.
#[derive(Clone)]
pub struct CommandContext {
    /// Argument tokens after the command name.
    pub args: Vec<String>,
    /// Registry the command was resolved from.
    pub registry: CommandRegistry,
    /// Configured external links.
    pub links: Rc<LinkTable>,
    /// Host capabilities.
    pub host: HostServices,
}

/// Static record defining one command's identity and behavior.
#[derive(Clone)]
pub struct CommandDescriptor {
    /// Canonical command name.
    pub name: String,
    /// Text shown in help output.
    pub description: String,
    /// Alternate names.
    pub aliases: Vec<String>,
    /// Action invoked on dispatch.
    pub handler: CommandHandler,
}

impl CommandDescriptor {
    /// Creates a descriptor.
    pub fn new(
        name: impl Into<String>,
        aliases: &[&str],
        description: impl Into<String>,
        handler: CommandHandler,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            aliases: aliases.iter().map(|alias| alias.to_string()).collect(),
            handler,
        }
    }

    /// Help row for this command.
    pub fn summary(&self) -> CommandSummary {
        CommandSummary {
            name: self.name.clone(),
            description: self.description.clone(),
            aliases: self.aliases.clone(),
        }
    }

    fn identifiers(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.name.as_str()).chain(self.aliases.iter().map(String::as_str))
    }
}

impl fmt::Debug for CommandDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandDescriptor")
            .field("name", &self.name)
            .field("description", &self.description)
            .field("aliases", &self.aliases)
            .finish_non_exhaustive()
    }
}

/// Command table construction failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// A command name or alias is blank.
    #[error("command `{command}` declares a blank name or alias")]
    EmptyIdentifier {
        /// Name of the offending command.
        command: String,
    },
    /// Two descriptors, or one descriptor twice, claim the same identifier.
    #[error("identifier `{identifier}` is claimed by both `{first}` and `{second}`")]
    DuplicateIdentifier {
        /// Case-folded identifier.
        identifier: String,
        /// Command that claimed the identifier first.
        first: String,
        /// Command that claimed it again.
        second: String,
    },
}

/// Read-only, declaration-ordered command table.
#[derive(Clone, Debug)]
pub struct CommandRegistry {
    commands: Rc<[CommandDescriptor]>,
}

impl CommandRegistry {
    /// Builds the registry, rejecting blank or shared names and aliases.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError`] when the table violates identifier uniqueness.
    pub fn new(commands: Vec<CommandDescriptor>) -> Result<Self, RegistryError> {
        let mut owners = BTreeMap::<String, &str>::new();
        for descriptor in &commands {
            for identifier in descriptor.identifiers() {
                let folded = fold(identifier);
                if folded.is_empty() {
                    return Err(RegistryError::EmptyIdentifier {
                        command: descriptor.name.clone(),
                    });
                }
                if let Some(first) = owners.insert(folded.clone(), descriptor.name.as_str()) {
                    return Err(RegistryError::DuplicateIdentifier {
                        identifier: folded,
                        first: first.to_string(),
                        second: descriptor.name.clone(),
                    });
                }
            }
        }

        Ok(Self {
            commands: commands.into(),
        })
    }

    /// Resolves a typed token: names first, then aliases, in declaration order.
    pub fn resolve(&self, token: &str) -> Option<&CommandDescriptor> {
        let needle = fold(token);
        if needle.is_empty() {
            return None;
        }
        self.commands
            .iter()
            .find(|descriptor| fold(&descriptor.name) == needle)
            .or_else(|| {
                self.commands.iter().find(|descriptor| {
                    descriptor.aliases.iter().any(|alias| fold(alias) == needle)
                })
            })
    }

    /// Names of every command whose name or alias starts with `prefix`.
    pub fn suggest(&self, prefix: &str) -> Vec<String> {
        let prefix = fold(prefix);
        if prefix.is_empty() {
            return Vec::new();
        }
        self.commands
            .iter()
            .filter(|descriptor| {
                descriptor
                    .identifiers()
                    .any(|identifier| fold(identifier).starts_with(&prefix))
            })
            .map(|descriptor| descriptor.name.clone())
            .collect()
    }

    /// Help rows in declaration order.
    pub fn describe_all(&self) -> Vec<CommandSummary> {
        self.commands.iter().map(CommandDescriptor::summary).collect()
    }

    /// Number of registered commands.
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

fn fold(raw: &str) -> String {
    raw.trim().to_lowercase()
}

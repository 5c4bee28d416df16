//! Display configuration injected into the terminal session at startup.

use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::registry::{CommandDescriptor, CommandRegistry, RegistryError};

/// Static text rendered around the scrollback.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayText {
    /// Banner artwork shown above the scrollback.
    pub banner: String,
    /// Prompt rendered before the input and in input echoes.
    pub prompt: String,
    /// Welcome line shown under the banner.
    pub welcome_message: String,
}

/// One named external link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkTarget {
    /// Lookup name, matched after case folding.
    pub name: String,
    /// Destination URL.
    pub url: String,
}

/// Ordered name to URL mapping.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LinkTable {
    entries: Vec<LinkTarget>,
}

impl LinkTable {
    /// Creates a table preserving the supplied order.
    pub fn new(entries: Vec<LinkTarget>) -> Self {
        Self { entries }
    }

    /// Looks up a link by case-folded name.
    pub fn get(&self, name: &str) -> Option<&LinkTarget> {
        let needle = name.to_lowercase();
        self.entries
            .iter()
            .find(|entry| entry.name.to_lowercase() == needle)
    }

    /// Links in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &LinkTarget> {
        self.entries.iter()
    }

    /// Number of links.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no links are configured.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Complete terminal configuration. Built once, shared read-only.
#[derive(Debug, Clone)]
pub struct TerminalConfig {
    /// Banner, prompt, and welcome text.
    pub display: DisplayText,
    /// External links available to `links` and `open`.
    pub links: Rc<LinkTable>,
    /// Validated command table.
    pub registry: CommandRegistry,
}

impl TerminalConfig {
    /// Validates the command table and bundles the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError`] when two commands share a name or alias.
    pub fn new(
        display: DisplayText,
        links: LinkTable,
        commands: Vec<CommandDescriptor>,
    ) -> Result<Self, RegistryError> {
        Ok(Self {
            display,
            links: Rc::new(links),
            registry: CommandRegistry::new(commands)?,
        })
    }

    /// Prompt string.
    pub fn prompt(&self) -> &str {
        &self.display.prompt
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn link_lookup_is_case_insensitive_and_ordered() {
        let links = LinkTable::new(vec![
            LinkTarget {
                name: "pobreflix".to_string(),
                url: "https://pobreflix.example/".to_string(),
            },
            LinkTarget {
                name: "arquivos".to_string(),
                url: "https://docs.example/".to_string(),
            },
        ]);
        assert_eq!(
            links.get("PobreFlix").map(|link| link.url.as_str()),
            Some("https://pobreflix.example/")
        );
        assert!(links.get("nope").is_none());
        assert_eq!(
            links.iter().map(|link| link.name.as_str()).collect::<Vec<_>>(),
            vec!["pobreflix", "arquivos"]
        );
    }
}

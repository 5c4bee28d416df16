//! Terminal content loaded from the embedded `terminal.toml`.

use std::collections::BTreeSet;

use serde::Deserialize;
use terminal_engine::{
    standard_commands, DisplayText, FixedTarget, LinkTable, LinkTarget, RegistryError,
    TerminalConfig,
};
use thiserror::Error;

const TERMINAL_CONTENT_TOML: &str = include_str!("../terminal.toml");

#[derive(Debug, Clone, Deserialize)]
struct AboutSection {
    text: String,
}

#[derive(Debug, Clone, Deserialize)]
struct TerminalContent {
    display: DisplayText,
    about: AboutSection,
    hidden_command: FixedTarget,
    #[serde(default)]
    links: Vec<LinkTarget>,
}

/// Failures while turning the content file into a [`TerminalConfig`].
#[derive(Debug, Error)]
pub enum ContentError {
    /// The TOML document is malformed or misses a field.
    #[error("invalid terminal content: {0}")]
    Parse(#[from] toml::de::Error),
    /// Two links share a case-folded name.
    #[error("link `{0}` is declared more than once")]
    DuplicateLink(String),
    /// The command table failed validation.
    #[error(transparent)]
    Registry(#[from] RegistryError),
}

/// Builds the configuration from the content file compiled into the binary.
pub fn load_terminal_config() -> Result<TerminalConfig, ContentError> {
    parse_terminal_config(TERMINAL_CONTENT_TOML)
}

/// Builds a configuration from raw TOML content.
pub fn parse_terminal_config(raw: &str) -> Result<TerminalConfig, ContentError> {
    let content: TerminalContent = toml::from_str(raw)?;

    let mut seen = BTreeSet::new();
    for link in &content.links {
        if !seen.insert(link.name.to_lowercase()) {
            return Err(ContentError::DuplicateLink(link.name.clone()));
        }
    }

    Ok(TerminalConfig::new(
        content.display,
        LinkTable::new(content.links),
        standard_commands(content.about.text, content.hidden_command),
    )?)
}

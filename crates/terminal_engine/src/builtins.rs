//! Built-in command registrations: help, links, open, clear, about, date, and fixed-target
//! navigation commands.

use std::rc::Rc;

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use terminal_contract::{CommandOutput, CommandSummary};

use crate::{config::LinkTable, registry::CommandDescriptor};

const NAME_COLUMN_WIDTH: usize = 12;
const ALIAS_INDENT: usize = 16;

/// Navigation command whose single target is baked into configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixedTarget {
    /// Command name.
    pub name: String,
    /// Alternate names.
    #[serde(default)]
    pub aliases: Vec<String>,
    /// Help description.
    pub description: String,
    /// URL opened on every invocation.
    pub target: String,
    /// Text printed after navigating.
    pub confirmation: String,
}

/// Full command table in display order.
pub fn standard_commands(about_text: impl Into<String>, hidden: FixedTarget) -> Vec<CommandDescriptor> {
    vec![
        help_command(),
        links_command(),
        fixed_target_command(hidden),
        open_command(),
        clear_command(),
        about_command(about_text),
        date_command(),
    ]
}

/// `help`: lists every registered command with its aliases.
pub fn help_command() -> CommandDescriptor {
    CommandDescriptor::new(
        "help",
        &["h", "?"],
        "Mostra todos os comandos disponíveis",
        Rc::new(|context| {
            Box::pin(async move {
                Ok(CommandOutput::text(render_help(
                    &context.registry.describe_all(),
                )))
            })
        }),
    )
}

/// `links`: lists configured external links.
pub fn links_command() -> CommandDescriptor {
    CommandDescriptor::new(
        "links",
        &["l"],
        "Mostra todos os links disponíveis",
        Rc::new(|context| {
            Box::pin(async move { Ok(CommandOutput::text(render_links(&context.links))) })
        }),
    )
}

/// `open <name>`: opens a configured link in a new tab.
pub fn open_command() -> CommandDescriptor {
    CommandDescriptor::new(
        "open",
        &["go"],
        "Abre um link em uma nova aba",
        Rc::new(|context| {
            Box::pin(async move {
                let Some(raw) = context.args.first() else {
                    return Ok(CommandOutput::text(
                        "Uso: open <nome_do_link>\nUse 'links' para ver os links disponíveis.",
                    ));
                };
                let link_name = raw.to_lowercase();
                match context.links.get(&link_name) {
                    Some(link) => {
                        context.host.navigator.open_external(&link.url);
                        Ok(CommandOutput::text(format!(
                            "Abrindo {link_name}... ({})",
                            link.url
                        )))
                    }
                    None => Ok(CommandOutput::error(format!(
                        "Link '{link_name}' não encontrado. Use 'links' para ver os links disponíveis."
                    ))),
                }
            })
        }),
    )
}

/// `clear`: erases the scrollback.
pub fn clear_command() -> CommandDescriptor {
    CommandDescriptor::new(
        "clear",
        &["cls"],
        "Limpa a tela do terminal",
        Rc::new(|_| Box::pin(async { Ok(CommandOutput::Clear) })),
    )
}

/// `about`: prints static descriptive text.
pub fn about_command(text: impl Into<String>) -> CommandDescriptor {
    let text: Rc<str> = text.into().into();
    CommandDescriptor::new(
        "about",
        &[],
        "Informações sobre o terminal",
        Rc::new(move |_| {
            let text = text.clone();
            Box::pin(async move { Ok(CommandOutput::text(text.to_string())) })
        }),
    )
}

/// `date`: prints the current local date and time.
pub fn date_command() -> CommandDescriptor {
    CommandDescriptor::new(
        "date",
        &[],
        "Mostra a data e hora atual",
        Rc::new(|context| {
            Box::pin(async move {
                Ok(CommandOutput::text(format_locale_datetime(
                    &context.host.clock.now(),
                )))
            })
        }),
    )
}

/// Command that always navigates to one configured target.
pub fn fixed_target_command(command: FixedTarget) -> CommandDescriptor {
    let target: Rc<str> = command.target.into();
    let confirmation: Rc<str> = command.confirmation.into();
    let aliases = command.aliases.iter().map(String::as_str).collect::<Vec<_>>();
    CommandDescriptor::new(
        command.name.as_str(),
        &aliases,
        command.description.as_str(),
        Rc::new(move |context| {
            let target = target.clone();
            let confirmation = confirmation.clone();
            Box::pin(async move {
                context.host.navigator.open_external(&target);
                Ok(CommandOutput::text(confirmation.to_string()))
            })
        }),
    )
}

/// Formats a date/time the way the pt-BR locale prints it: `dd/mm/yyyy, HH:MM:SS`.
pub fn format_locale_datetime(value: &DateTime<FixedOffset>) -> String {
    value.format("%d/%m/%Y, %H:%M:%S").to_string()
}

fn render_help(commands: &[CommandSummary]) -> String {
    let mut help = String::from("Comandos disponíveis:\n\n");
    for command in commands {
        help.push_str(&format!(
            "  {:<width$} - {}\n",
            command.name,
            command.description,
            width = NAME_COLUMN_WIDTH
        ));
        if !command.aliases.is_empty() {
            help.push_str(&format!(
                "{}(aliases: {})\n",
                " ".repeat(ALIAS_INDENT),
                command.aliases.join(", ")
            ));
        }
    }
    help
}

fn render_links(links: &LinkTable) -> String {
    let mut output = String::from("Links disponíveis:\n\n");
    for link in links.iter() {
        output.push_str(&format!(
            "  {:<width$} - {}\n",
            link.name,
            link.url,
            width = NAME_COLUMN_WIDTH
        ));
    }
    output.push_str("\nUse 'open <nome>' para abrir um link.");
    output
}

//! Top-level help text.
//!
//! Lists every registered command except the primary one. Commands are
//! grouped by definition so a command reachable by several keys appears
//! once, labelled with all of its keys.

use super::chain::NO_PRIMARY_KEY;
use super::registry::Registry;

/// Heading for the command list.
pub const COMMANDS_HEADING: &str = "Available commands";

/// Renders help for a registry.
#[derive(Debug, Clone, Copy)]
pub struct HelpSynthesizer<'a> {
    registry: &'a Registry,
    name: &'a str,
    primary_key: Option<&'a str>,
}

impl<'a> HelpSynthesizer<'a> {
    /// Help for the interface called `name`.
    #[must_use]
    pub const fn new(registry: &'a Registry, name: &'a str) -> Self {
        Self {
            registry,
            name,
            primary_key: None,
        }
    }

    /// Primary command key, whose own arguments lead the help text.
    #[must_use]
    pub fn primary(mut self, key: Option<&'a str>) -> Self {
        self.primary_key = key.filter(|key| *key != NO_PRIMARY_KEY);
        self
    }

    /// `(label, help line)` for every listed command.
    #[must_use]
    pub fn entries(&self) -> Vec<(String, String)> {
        self.registry
            .groups()
            .into_iter()
            .filter(|group| !self.primary_key.is_some_and(|key| group.owns(key)))
            .map(|group| {
                let label = group.label();
                let help = group
                    .command
                    .description()
                    .unwrap_or_else(|| format!("Run {label} -h for more information"));
                (label, help)
            })
            .collect()
    }

    /// Build the clap command used for rendering.
    ///
    /// Starts from the primary command's parser when there is one so its
    /// flags are listed, otherwise from a bare command. An entry whose label
    /// already names a subcommand of that parser is left out, since clap
    /// rejects duplicate subcommand names.
    #[must_use]
    pub fn command(&self) -> clap::Command {
        let base = self
            .primary_key
            .and_then(|key| self.registry.get(key))
            .map_or_else(
                || clap::Command::new(self.name.to_string()),
                |primary| primary.parser().clone().name(self.name.to_string()),
            );

        self.entries().into_iter().fold(
            base.bin_name(self.name.to_string())
                .disable_help_subcommand(true)
                .subcommand_help_heading(COMMANDS_HEADING)
                .subcommand_value_name("COMMAND"),
            |command, (label, help)| {
                if command.find_subcommand(&label).is_some() {
                    tracing::warn!(%label, "Help entry shadowed by a primary subcommand");
                    return command;
                }
                command.subcommand(clap::Command::new(label).about(help))
            },
        )
    }

    /// Render the help text.
    #[must_use]
    pub fn render(&self) -> String {
        tracing::info!(name = self.name, "Rendering help");
        self.command().render_help().to_string()
    }
}

//! Command registry.
//!
//! Maps every resolved invocation key to the command definition that owns
//! it. Built once from an explicit list of definitions and read-only after.

use std::collections::HashMap;

use clap::ArgMatches;

use super::command::{CommandDefinition, Runnable};
use crate::error::{ChainError, Result};

/// A definition after its keys were resolved and its parser fixed.
pub struct RegisteredCommand {
    definition: CommandDefinition,
    primary_key: String,
    parser: clap::Command,
}

impl RegisteredCommand {
    /// Command name.
    #[must_use]
    pub fn name(&self) -> &str {
        self.definition.name()
    }

    /// Resolved primary key.
    #[must_use]
    pub fn primary_key(&self) -> &str {
        &self.primary_key
    }

    /// The parser owned by this command.
    #[must_use]
    pub const fn parser(&self) -> &clap::Command {
        &self.parser
    }

    /// Description declared on the parser, if any.
    #[must_use]
    pub fn description(&self) -> Option<String> {
        self.parser.get_about().map(ToString::to_string)
    }

    /// Parse `args` as invoked through `key`.
    ///
    /// Parser errors are returned as clap produced them.
    pub fn parse(&self, key: &str, args: &[String]) -> Result<ArgMatches> {
        self.parser
            .clone()
            .bin_name(key.to_string())
            .try_get_matches_from(std::iter::once(key.to_string()).chain(args.iter().cloned()))
            .map_err(|source| ChainError::Parse {
                key: key.to_string(),
                source,
            })
    }

    /// Build a runnable instance from parsed arguments.
    pub fn instantiate(&self, key: &str, matches: &ArgMatches) -> Result<Box<dyn Runnable>> {
        (self.definition.factory)(matches).map_err(|source| ChainError::Instantiate {
            key: key.to_string(),
            source,
        })
    }
}

impl std::fmt::Debug for RegisteredCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegisteredCommand")
            .field("name", &self.name())
            .field("primary_key", &self.primary_key)
            .finish_non_exhaustive()
    }
}

/// All keys currently owned by one registered command.
#[derive(Debug)]
pub struct KeyGroup<'a> {
    pub command: &'a RegisteredCommand,
    pub keys: Vec<&'a str>,
}

impl KeyGroup<'_> {
    /// Keys joined with a comma, e.g. `start,s`.
    #[must_use]
    pub fn label(&self) -> String {
        self.keys.join(",")
    }

    /// Whether `key` belongs to this group.
    #[must_use]
    pub fn owns(&self, key: &str) -> bool {
        self.keys.contains(&key)
    }
}

/// Key to command mapping.
#[derive(Debug, Default)]
pub struct Registry {
    commands: Vec<RegisteredCommand>,
    index: HashMap<String, usize>,
    order: Vec<String>,
}

impl Registry {
    /// Build the registry from definitions in registration order.
    ///
    /// A later definition claiming a key that is already taken overwrites
    /// the earlier mapping.
    ///
    /// # Errors
    ///
    /// Returns `InvalidKeyDefinition` if any definition's primary key does
    /// not resolve.
    pub fn build(definitions: impl IntoIterator<Item = CommandDefinition>) -> Result<Self> {
        let mut registry = Self::default();
        for definition in definitions {
            registry.register(definition)?;
        }
        tracing::debug!(
            commands = registry.commands.len(),
            keys = registry.order.len(),
            "Registry built"
        );
        Ok(registry)
    }

    fn register(&mut self, definition: CommandDefinition) -> Result<()> {
        let primary_key = definition.key.resolve_required(definition.name())?;
        let optional_keys = [&definition.short_key, &definition.alt_key]
            .into_iter()
            .flatten()
            .filter_map(|slot| slot.resolve());

        let mut keys = vec![primary_key.clone()];
        for key in optional_keys {
            if !keys.contains(&key) {
                keys.push(key);
            }
        }

        let parser = definition
            .parser
            .clone()
            .unwrap_or_else(|| clap::Command::new(primary_key.clone()));

        let slot = self.commands.len();
        for key in keys {
            tracing::debug!(key = %key, command = definition.name(), "Registering key");
            match self.index.insert(key.clone(), slot) {
                Some(previous) => {
                    tracing::warn!(
                        key = %key,
                        previous = self.commands[previous].name(),
                        command = definition.name(),
                        "Key collision, later registration wins"
                    );
                }
                None => self.order.push(key),
            }
        }

        self.commands.push(RegisteredCommand {
            definition,
            primary_key,
            parser,
        });
        Ok(())
    }

    /// Look up the command owning `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&RegisteredCommand> {
        self.index.get(key).map(|&slot| &self.commands[slot])
    }

    /// Whether `key` is registered.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    /// Number of registered keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether no key is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Registered keys in first-registration order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    /// Keys grouped by owning command, in key order.
    ///
    /// A command whose keys were all taken over by later registrations
    /// has no group.
    #[must_use]
    pub fn groups(&self) -> Vec<KeyGroup<'_>> {
        let mut groups: Vec<(usize, Vec<&str>)> = Vec::new();
        for key in &self.order {
            let slot = self.index[key];
            match groups.iter_mut().find(|(owner, _)| *owner == slot) {
                Some((_, keys)) => keys.push(key),
                None => groups.push((slot, vec![key.as_str()])),
            }
        }
        groups
            .into_iter()
            .map(|(slot, keys)| KeyGroup {
                command: &self.commands[slot],
                keys,
            })
            .collect()
    }
}

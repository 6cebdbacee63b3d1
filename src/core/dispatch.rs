//! Chain dispatch.
//!
//! Every record is parsed and instantiated before any command runs, so a
//! bad argument anywhere in the chain stops the run before side effects.

use std::any::Any;
use std::fmt;

use clap::ArgMatches;

use super::chain::Chain;
use super::command::Runnable;
use super::help::HelpSynthesizer;
use super::registry::Registry;
use crate::error::{ChainError, Result};

/// A chain record turned into a runnable instance.
pub struct InvokedCommand {
    key: String,
    type_name: String,
    args: Vec<String>,
    matches: ArgMatches,
    instance: Box<dyn Runnable>,
}

impl InvokedCommand {
    /// Key the command was invoked with.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Name of the command definition.
    #[must_use]
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// Raw tokens the command was parsed from.
    #[must_use]
    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// Parsed arguments.
    #[must_use]
    pub const fn matches(&self) -> &ArgMatches {
        &self.matches
    }

    /// The instance, if it is a `T`.
    #[must_use]
    pub fn downcast_ref<T: Runnable>(&self) -> Option<&T> {
        let instance: &dyn Any = &*self.instance;
        instance.downcast_ref::<T>()
    }

    fn run(&mut self) -> Result<()> {
        tracing::debug!(key = %self.key, command = %self.type_name, "Running command");
        self.instance.run().map_err(|source| ChainError::Run {
            key: self.key.clone(),
            source,
        })
    }
}

impl fmt::Display for InvokedCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "InvokedCommand(key={}, type={}, args={:?})",
            self.key, self.type_name, self.args
        )
    }
}

impl fmt::Debug for InvokedCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InvokedCommand")
            .field("key", &self.key)
            .field("type_name", &self.type_name)
            .field("args", &self.args)
            .finish_non_exhaustive()
    }
}

/// What a dispatch produced.
#[derive(Debug)]
pub enum Outcome {
    /// Help was requested; nothing was instantiated or run.
    Help(String),
    /// Every command in the chain ran, in order.
    Completed(Vec<InvokedCommand>),
}

impl Outcome {
    /// The commands that ran, empty after help.
    #[must_use]
    pub fn commands(&self) -> &[InvokedCommand] {
        match self {
            Self::Help(_) => &[],
            Self::Completed(commands) => commands,
        }
    }

    /// Help text, if help was requested.
    #[must_use]
    pub fn help(&self) -> Option<&str> {
        match self {
            Self::Help(text) => Some(text),
            Self::Completed(_) => None,
        }
    }
}

/// Instantiates and runs the records of a chain.
#[derive(Debug, Clone, Copy)]
pub struct Dispatcher<'a> {
    registry: &'a Registry,
    help: Option<HelpSynthesizer<'a>>,
}

impl<'a> Dispatcher<'a> {
    /// Dispatcher without help generation.
    #[must_use]
    pub const fn new(registry: &'a Registry) -> Self {
        Self {
            registry,
            help: None,
        }
    }

    /// Route `-h`/`--help` on the primary record to `help`.
    #[must_use]
    pub const fn with_help(mut self, help: HelpSynthesizer<'a>) -> Self {
        self.help = Some(help);
        self
    }

    /// Parse, instantiate and run every record of `chain`.
    ///
    /// # Errors
    ///
    /// Stops at the first failure. Commands that already ran are not
    /// undone.
    pub fn dispatch(&self, chain: &Chain) -> Result<Outcome> {
        if let Some(help) = self.help.as_ref().filter(|_| chain.wants_help()) {
            return Ok(Outcome::Help(help.render()));
        }

        let mut commands = self.instantiate(chain)?;
        Self::run_all(&mut commands)?;
        Ok(Outcome::Completed(commands))
    }

    /// Parse and instantiate every record, without running anything.
    ///
    /// # Errors
    ///
    /// `UnknownInvocationKey` for a key missing from the registry, or the
    /// command's own parse/construct error.
    pub fn instantiate(&self, chain: &Chain) -> Result<Vec<InvokedCommand>> {
        chain
            .invocations()
            .map(|record| {
                let command = self
                    .registry
                    .get(record.key())
                    .ok_or_else(|| ChainError::UnknownInvocationKey(record.key().to_string()))?;
                let matches = command.parse(record.key(), record.args())?;
                let instance = command.instantiate(record.key(), &matches)?;
                tracing::debug!(key = record.key(), command = command.name(), "Instantiated");
                Ok(InvokedCommand {
                    key: record.key().to_string(),
                    type_name: command.name().to_string(),
                    args: record.args().to_vec(),
                    matches,
                    instance,
                })
            })
            .collect()
    }

    /// Run instantiated commands in order, stopping at the first error.
    ///
    /// # Errors
    ///
    /// `ChainError::Run` naming the failing command.
    pub fn run_all(commands: &mut [InvokedCommand]) -> Result<()> {
        for command in commands.iter_mut() {
            command.run()?;
        }
        Ok(())
    }
}

//! Command definitions and the runnable capability.
//!
//! A [`CommandDefinition`] bundles everything the registry needs to know
//! about one command: its key slots, its argument parser and a factory
//! that builds a [`Runnable`] from parsed arguments.

use std::any::Any;
use std::fmt;

use clap::ArgMatches;

use super::key::KeySlot;

/// Something the dispatcher can run.
///
/// `Any` is a supertrait so callers can downcast an instance back to its
/// concrete type after the chain has run.
pub trait Runnable: Any {
    /// Run the command.
    fn run(&mut self) -> anyhow::Result<()>;
}

/// A command whose arguments are described with `clap`'s derive API.
///
/// ```rust,ignore
/// #[derive(clap::Parser)]
/// #[command(about = "Start the server.")]
/// struct StartServer {
///     #[arg(short, long)]
///     port: Option<u16>,
/// }
///
/// impl Runnable for StartServer {
///     fn run(&mut self) -> anyhow::Result<()> { Ok(()) }
/// }
///
/// impl ChainCommand for StartServer {
///     fn key() -> KeySlot { "start".into() }
///     fn short_key() -> Option<KeySlot> { Some("s".into()) }
/// }
/// ```
pub trait ChainCommand: clap::Parser + Runnable {
    /// Primary invocation key.
    fn key() -> KeySlot;

    /// Short invocation key.
    fn short_key() -> Option<KeySlot> {
        None
    }

    /// Alternate invocation key.
    fn alt_key() -> Option<KeySlot> {
        None
    }
}

/// Builds a runnable instance from parsed arguments.
pub type Factory = Box<dyn Fn(&ArgMatches) -> anyhow::Result<Box<dyn Runnable>>>;

/// A registrable command.
pub struct CommandDefinition {
    pub(crate) name: String,
    pub(crate) key: KeySlot,
    pub(crate) short_key: Option<KeySlot>,
    pub(crate) alt_key: Option<KeySlot>,
    pub(crate) parser: Option<clap::Command>,
    pub(crate) factory: Factory,
}

impl CommandDefinition {
    /// Define a command from a key and a factory.
    ///
    /// Without a call to [`parser`](Self::parser) the command gets a
    /// default parser at registry build that accepts no arguments.
    pub fn new<F, R>(key: impl Into<KeySlot>, factory: F) -> Self
    where
        F: Fn(&ArgMatches) -> anyhow::Result<R> + 'static,
        R: Runnable,
    {
        Self {
            name: short_type_name::<R>().to_string(),
            key: key.into(),
            short_key: None,
            alt_key: None,
            parser: None,
            factory: Box::new(move |matches| {
                factory(matches).map(|instance| Box::new(instance) as Box<dyn Runnable>)
            }),
        }
    }

    /// Define a command from its derive-based type.
    #[must_use]
    pub fn of<C: ChainCommand>() -> Self {
        Self {
            name: short_type_name::<C>().to_string(),
            key: C::key(),
            short_key: C::short_key(),
            alt_key: C::alt_key(),
            parser: Some(C::command()),
            factory: Box::new(|matches| {
                let instance = C::from_arg_matches(matches)?;
                Ok(Box::new(instance) as Box<dyn Runnable>)
            }),
        }
    }

    /// Name used in error messages and `Display` output.
    #[must_use]
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Set the short key slot.
    #[must_use]
    pub fn short(mut self, key: impl Into<KeySlot>) -> Self {
        self.short_key = Some(key.into());
        self
    }

    /// Set the alternate key slot.
    #[must_use]
    pub fn alt(mut self, key: impl Into<KeySlot>) -> Self {
        self.alt_key = Some(key.into());
        self
    }

    /// Set the argument parser.
    #[must_use]
    pub fn parser(mut self, parser: clap::Command) -> Self {
        self.parser = Some(parser);
        self
    }

    /// Command name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Debug for CommandDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandDefinition")
            .field("name", &self.name)
            .field("key", &self.key)
            .field("short_key", &self.short_key)
            .field("alt_key", &self.alt_key)
            .field("has_parser", &self.parser.is_some())
            .finish_non_exhaustive()
    }
}

fn short_type_name<T: ?Sized>() -> &'static str {
    let full = std::any::type_name::<T>();
    let base = full.split('<').next().unwrap_or(full);
    base.rsplit("::").next().unwrap_or(base)
}

//! `ChainCli`: one object that owns a registry and runs chains against it.
//!
//! ```rust,ignore
//! let cli = ChainCli::builder()
//!     .name("Backend Project")
//!     .primary(CommandDefinition::of::<PrimaryCommand>())
//!     .command(CommandDefinition::of::<StartServer>())
//!     .command(CommandDefinition::new("clean-db", |_| Ok(CleanDatabase)))
//!     .build()?;
//!
//! match cli.run_env()? {
//!     Outcome::Help(text) => print!("{text}"),
//!     Outcome::Completed(_) => {}
//! }
//! ```

use std::ffi::OsString;

use crate::core::{
    Chain, Chainer, CommandDefinition, Dispatcher, HelpSynthesizer, Outcome, Registry,
};
use crate::error::{ChainError, Result};
use crate::storage::config::{DEFAULT_NAME, ResolvedConfig};

/// A built interface: registry plus dispatch settings.
#[derive(Debug)]
pub struct ChainCli {
    name: String,
    registry: Registry,
    primary_key: Option<String>,
    generate_help: bool,
    enable_chaining: bool,
}

impl ChainCli {
    /// Start building an interface.
    #[must_use]
    pub fn builder() -> ChainCliBuilder {
        ChainCliBuilder::default()
    }

    /// Interface name shown in help.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The command registry.
    #[must_use]
    pub const fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Primary key of the primary command, if one was given.
    #[must_use]
    pub fn primary_key(&self) -> Option<&str> {
        self.primary_key.as_deref()
    }

    /// Whether `-h`/`--help` on the primary record renders generated help.
    #[must_use]
    pub const fn generate_help(&self) -> bool {
        self.generate_help
    }

    /// Whether several commands may be chained.
    #[must_use]
    pub const fn enable_chaining(&self) -> bool {
        self.enable_chaining
    }

    /// Split `args` (program name excluded) into a chain.
    pub fn tokenize<I, S>(&self, args: I) -> Chain
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Chainer::new(&self.registry)
            .chaining(self.enable_chaining)
            .primary(self.primary_key())
            .tokenize(args)
    }

    /// Generated help text.
    #[must_use]
    pub fn help(&self) -> String {
        self.help_synthesizer().render()
    }

    /// Tokenize `args` (program name excluded), then instantiate and run
    /// every command in the chain.
    ///
    /// # Errors
    ///
    /// The first parse, construct or run failure.
    pub fn run<I, S>(&self, args: I) -> Result<Outcome>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let chain = self.tokenize(args);
        tracing::debug!(
            name = %self.name,
            records = chain.len(),
            chaining = self.enable_chaining,
            "Dispatching chain"
        );

        let dispatcher = Dispatcher::new(&self.registry);
        if self.generate_help {
            dispatcher.with_help(self.help_synthesizer()).dispatch(&chain)
        } else {
            dispatcher.dispatch(&chain)
        }
    }

    /// [`run`](Self::run) over platform strings.
    ///
    /// Tokens are checked before tokenizing, so nothing runs when one of
    /// them is not valid Unicode.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` for the first non-UTF-8 token (1-based index),
    /// otherwise see [`run`](Self::run).
    pub fn run_os<I, S>(&self, args: I) -> Result<Outcome>
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        let args = args
            .into_iter()
            .enumerate()
            .map(|(index, arg)| {
                arg.into().into_string().map_err(|raw| ChainError::InvalidArgument {
                    index: index + 1,
                    lossy: raw.to_string_lossy().into_owned(),
                })
            })
            .collect::<Result<Vec<String>>>()?;
        self.run(args)
    }

    /// [`run_os`](Self::run_os) over the process arguments.
    ///
    /// # Errors
    ///
    /// See [`run_os`](Self::run_os).
    pub fn run_env(&self) -> Result<Outcome> {
        self.run_os(std::env::args_os().skip(1))
    }

    fn help_synthesizer(&self) -> HelpSynthesizer<'_> {
        HelpSynthesizer::new(&self.registry, &self.name).primary(self.primary_key())
    }
}

/// Builder for [`ChainCli`].
///
/// Explicit setter calls win over values taken from
/// [`with_config`](Self::with_config), which win over the defaults.
#[derive(Debug, Default)]
pub struct ChainCliBuilder {
    name: Option<String>,
    primary: Option<CommandDefinition>,
    commands: Vec<CommandDefinition>,
    generate_help: Option<bool>,
    enable_chaining: Option<bool>,
    config: Option<ResolvedConfig>,
}

impl ChainCliBuilder {
    /// Interface name shown in help. Defaults to `"Chain CLI"`.
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Command that receives the tokens before the first recognised key.
    #[must_use]
    pub fn primary(mut self, definition: CommandDefinition) -> Self {
        self.primary = Some(definition);
        self
    }

    /// Register a command.
    #[must_use]
    pub fn command(mut self, definition: CommandDefinition) -> Self {
        self.commands.push(definition);
        self
    }

    /// Register several commands, in order.
    #[must_use]
    pub fn commands(mut self, definitions: impl IntoIterator<Item = CommandDefinition>) -> Self {
        self.commands.extend(definitions);
        self
    }

    /// Enable or disable help generation. On by default.
    #[must_use]
    pub const fn generate_help(mut self, enabled: bool) -> Self {
        self.generate_help = Some(enabled);
        self
    }

    /// Enable or disable chaining. On by default.
    #[must_use]
    pub const fn enable_chaining(mut self, enabled: bool) -> Self {
        self.enable_chaining = Some(enabled);
        self
    }

    /// Take unset settings from a resolved configuration.
    #[must_use]
    pub fn with_config(mut self, config: &ResolvedConfig) -> Self {
        self.config = Some(config.clone());
        self
    }

    /// Resolve keys and build the registry.
    ///
    /// # Errors
    ///
    /// `InvalidKeyDefinition` when a command's primary key slot does not
    /// resolve.
    pub fn build(self) -> Result<ChainCli> {
        let config = self.config.as_ref();
        let name = self
            .name
            .or_else(|| config.map(|c| c.name.clone()))
            .unwrap_or_else(|| DEFAULT_NAME.to_string());
        let generate_help = self
            .generate_help
            .or_else(|| config.map(|c| c.generate_help))
            .unwrap_or(true);
        let enable_chaining = self
            .enable_chaining
            .or_else(|| config.map(|c| c.enable_chaining))
            .unwrap_or(true);

        let primary_key = self
            .primary
            .as_ref()
            .map(|primary| primary.key.resolve_required(primary.name()))
            .transpose()?;

        let registry = Registry::build(self.primary.into_iter().chain(self.commands))?;
        tracing::debug!(
            %name,
            commands = registry.len(),
            primary = primary_key.as_deref().unwrap_or("<none>"),
            "Interface built"
        );

        Ok(ChainCli {
            name,
            registry,
            primary_key,
            generate_help,
            enable_chaining,
        })
    }
}

//! Argument tokenizer and command chainer.
//!
//! Splits a flat argument list into invocation records: one record per
//! recognised command key, each holding the raw tokens that follow it
//! up to the next recognised key.

use std::fmt;

use super::registry::Registry;

/// Marks the next token as a plain argument even if it is a command key.
pub const SKIP_NEXT_COMMAND: &str = "--cli-skip-command";

/// Key of the primary record when no primary command is configured.
pub const NO_PRIMARY_KEY: &str = "_chaincli_none_key";

/// Tokens that request help when they lead the primary record.
pub const HELP_FLAGS: &[&str] = &["-h", "--help"];

/// One recognised command and the raw tokens that belong to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvocationRecord {
    key: String,
    args: Vec<String>,
}

impl InvocationRecord {
    fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            args: Vec::new(),
        }
    }

    /// Key the command was invoked with.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Raw tokens for the command's parser.
    #[must_use]
    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// Whether this is the placeholder for an absent primary command.
    #[must_use]
    pub fn is_placeholder(&self) -> bool {
        self.key == NO_PRIMARY_KEY
    }
}

impl fmt::Display for InvocationRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "InvocationRecord(key={}, args={:?})", self.key, self.args)
    }
}

/// Ordered invocation records. The first record is always the primary one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chain {
    records: Vec<InvocationRecord>,
}

impl Chain {
    fn new(primary_key: &str) -> Self {
        Self {
            records: vec![InvocationRecord::new(primary_key)],
        }
    }

    /// The primary record (possibly the placeholder).
    #[must_use]
    pub fn primary(&self) -> &InvocationRecord {
        &self.records[0]
    }

    /// All records, primary first.
    #[must_use]
    pub fn records(&self) -> &[InvocationRecord] {
        &self.records
    }

    /// Records that name a real command, in chain order.
    pub fn invocations(&self) -> impl Iterator<Item = &InvocationRecord> {
        self.records.iter().filter(|record| !record.is_placeholder())
    }

    /// Whether a primary command was configured.
    #[must_use]
    pub fn has_primary(&self) -> bool {
        !self.primary().is_placeholder()
    }

    /// Number of records including the primary one. Never zero.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Always false: a chain holds at least the primary record.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Whether the primary record's first argument is a help flag.
    #[must_use]
    pub fn wants_help(&self) -> bool {
        self.primary()
            .args
            .first()
            .is_some_and(|first| HELP_FLAGS.contains(&first.as_str()))
    }

    fn current(&mut self) -> &mut InvocationRecord {
        let last = self.records.len() - 1;
        &mut self.records[last]
    }
}

/// Builds a [`Chain`] from raw tokens.
#[derive(Debug, Clone, Copy)]
pub struct Chainer<'a> {
    registry: &'a Registry,
    chaining: bool,
    primary_key: Option<&'a str>,
}

impl<'a> Chainer<'a> {
    /// Chainer over `registry` with chaining on and no primary command.
    #[must_use]
    pub const fn new(registry: &'a Registry) -> Self {
        Self {
            registry,
            chaining: true,
            primary_key: None,
        }
    }

    /// Enable or disable chaining.
    #[must_use]
    pub const fn chaining(mut self, enabled: bool) -> Self {
        self.chaining = enabled;
        self
    }

    /// Key of the primary command, if one is configured.
    #[must_use]
    pub const fn primary(mut self, key: Option<&'a str>) -> Self {
        self.primary_key = key;
        self
    }

    /// Split `tokens` (program name excluded) into a chain.
    pub fn tokenize<I, S>(&self, tokens: I) -> Chain
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut chain = Chain::new(self.primary_key.unwrap_or(NO_PRIMARY_KEY));
        let mut skip_next = false;
        let mut tokens = tokens.into_iter().map(Into::into);

        while let Some(token) = tokens.next() {
            if token == SKIP_NEXT_COMMAND {
                tracing::trace!("Skip marker, next token is an argument");
                skip_next = true;
                continue;
            }

            if !skip_next && self.registry.contains(&token) {
                tracing::debug!(key = %token, chaining = self.chaining, "Command recognised");
                let mut record = InvocationRecord::new(token);
                if self.chaining {
                    chain.records.push(record);
                    continue;
                }
                record.args = tokens.by_ref().collect();
                chain.records.push(record);
                break;
            }

            skip_next = false;
            chain.current().args.push(token);
        }

        tracing::debug!(records = chain.len(), "Chain built");
        chain
    }
}

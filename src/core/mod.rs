//! Registry, tokenizer, dispatcher and help synthesis.

pub mod chain;
pub mod command;
pub mod dispatch;
pub mod help;
pub mod key;
pub mod logging;
pub mod registry;

pub use chain::{Chain, Chainer, HELP_FLAGS, InvocationRecord, NO_PRIMARY_KEY, SKIP_NEXT_COMMAND};
pub use command::{ChainCommand, CommandDefinition, Factory, Runnable};
pub use dispatch::{Dispatcher, InvokedCommand, Outcome};
pub use help::HelpSynthesizer;
pub use key::KeySlot;
pub use registry::{KeyGroup, RegisteredCommand, Registry};

//! Commands of the sample backend project.
//!
//! Each command prints one line describing what it would do, which is
//! what the end-to-end tests assert on.

use clap::{ArgAction, Parser};

use chaincli::{ChainCommand, CommandDefinition, KeySlot, Runnable};

/// Interface name used unless the config or environment sets one.
pub const PROJECT_NAME: &str = "Backend Project";

#[derive(Parser, Debug)]
#[command(name = "Primary Command", about = "Primary command desc")]
pub struct Primary {
    /// Primary CLI Environment
    #[arg(short, long, value_name = "ENV")]
    pub env: Option<String>,
}

impl Runnable for Primary {
    fn run(&mut self) -> anyhow::Result<()> {
        println!("primary: env={}", self.env.as_deref().unwrap_or("none"));
        Ok(())
    }
}

impl ChainCommand for Primary {
    fn key() -> KeySlot {
        "primary".into()
    }
}

#[derive(Parser, Debug)]
#[command(name = "Server", about = "Start the server.")]
pub struct StartServer {
    /// Start in debug mode.
    #[arg(short, long)]
    pub debug: bool,

    /// Server port
    #[arg(short, long)]
    pub port: Option<u16>,
}

impl Runnable for StartServer {
    fn run(&mut self) -> anyhow::Result<()> {
        let port = self
            .port
            .map_or_else(|| "default".to_string(), |port| port.to_string());
        println!("start: port={port} debug={}", self.debug);
        Ok(())
    }
}

impl ChainCommand for StartServer {
    fn key() -> KeySlot {
        "start".into()
    }

    fn short_key() -> Option<KeySlot> {
        Some("s".into())
    }
}

#[derive(Parser, Debug)]
#[command(
    name = "Database seed",
    about = "Seed the database from a SQL file or list of files."
)]
pub struct SeedDatabase {
    /// SQL seed file.
    #[arg(value_name = "SQL_FILE", required = true, num_args = 1..)]
    pub sql_file: Vec<String>,
}

impl Runnable for SeedDatabase {
    fn run(&mut self) -> anyhow::Result<()> {
        println!("seed: files={}", self.sql_file.join(","));
        Ok(())
    }
}

impl ChainCommand for SeedDatabase {
    fn key() -> KeySlot {
        "seed".into()
    }

    fn alt_key() -> Option<KeySlot> {
        Some("seed-db".into())
    }
}

#[derive(Parser, Debug)]
#[command(name = "Unit Test", about = "Run unit tests.")]
pub struct UnitTest {
    /// Debug tests.
    #[arg(short, long)]
    pub debug: bool,

    /// Run with code coverage, default true.
    #[arg(long, action = ArgAction::SetFalse)]
    pub cov: bool,
}

impl Runnable for UnitTest {
    fn run(&mut self) -> anyhow::Result<()> {
        println!("test: debug={} cov={}", self.debug, self.cov);
        Ok(())
    }
}

impl ChainCommand for UnitTest {
    fn key() -> KeySlot {
        "test".into()
    }
}

/// Takes no arguments, so it is registered without a parser.
#[derive(Debug)]
pub struct CleanDatabase;

impl Runnable for CleanDatabase {
    fn run(&mut self) -> anyhow::Result<()> {
        println!("clean-db: done");
        Ok(())
    }
}

/// The primary command definition.
pub fn primary() -> CommandDefinition {
    CommandDefinition::of::<Primary>()
}

/// Every non-primary command, in registration order.
pub fn commands() -> Vec<CommandDefinition> {
    vec![
        CommandDefinition::of::<StartServer>(),
        CommandDefinition::of::<SeedDatabase>(),
        CommandDefinition::of::<UnitTest>(),
        CommandDefinition::new("clean-db", |_| Ok(CleanDatabase)),
    ]
}

//! Backend project commands that remember whether they ran.

#![allow(dead_code)]

use chaincli::{ChainCli, ChainCommand, CommandDefinition, KeySlot, Outcome, Runnable};
use clap::{ArgAction, Parser};

#[derive(Parser, Debug)]
#[command(name = "Primary Command", about = "Primary command desc")]
pub struct Primary {
    /// Primary CLI Environment
    #[arg(short, long, value_name = "ENV")]
    pub env: Option<String>,
    #[arg(skip)]
    pub ran: bool,
}

impl Runnable for Primary {
    fn run(&mut self) -> anyhow::Result<()> {
        self.ran = true;
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
    #[arg(short, long)]
    pub debug: bool,
    #[arg(short, long)]
    pub port: Option<u16>,
    #[arg(skip)]
    pub ran: bool,
}

impl Runnable for StartServer {
    fn run(&mut self) -> anyhow::Result<()> {
        self.ran = true;
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
    #[arg(value_name = "SQL_FILE", required = true, num_args = 1..)]
    pub sql_file: Vec<String>,
    #[arg(skip)]
    pub ran: bool,
}

impl Runnable for SeedDatabase {
    fn run(&mut self) -> anyhow::Result<()> {
        self.ran = true;
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
    #[arg(short, long)]
    pub debug: bool,
    #[arg(long, action = ArgAction::SetFalse)]
    pub cov: bool,
    #[arg(skip)]
    pub ran: bool,
}

impl Runnable for UnitTest {
    fn run(&mut self) -> anyhow::Result<()> {
        self.ran = true;
        Ok(())
    }
}

impl ChainCommand for UnitTest {
    fn key() -> KeySlot {
        "test".into()
    }
}

#[derive(Debug, Default)]
pub struct CleanDatabase {
    pub ran: bool,
}

impl Runnable for CleanDatabase {
    fn run(&mut self) -> anyhow::Result<()> {
        self.ran = true;
        Ok(())
    }
}

/// The four non-primary backend commands.
pub fn commands() -> Vec<CommandDefinition> {
    vec![
        CommandDefinition::of::<StartServer>(),
        CommandDefinition::of::<SeedDatabase>(),
        CommandDefinition::of::<UnitTest>(),
        CommandDefinition::new("clean-db", |_| Ok(CleanDatabase::default())),
    ]
}

/// Backend project without a primary command.
pub fn backend_cli() -> ChainCli {
    ChainCli::builder()
        .name("Backend Project")
        .commands(commands())
        .build()
        .expect("backend commands have valid keys")
}

/// Backend project with the primary command.
pub fn backend_cli_with_primary() -> ChainCli {
    ChainCli::builder()
        .name("Backend Project")
        .primary(CommandDefinition::of::<Primary>())
        .commands(commands())
        .build()
        .expect("backend commands have valid keys")
}

/// Run `args` and return the completed commands.
pub fn run_completed(cli: &ChainCli, args: &[&str]) -> Vec<chaincli::InvokedCommand> {
    match cli.run(args.iter().copied()).expect("chain should run") {
        Outcome::Completed(commands) => commands,
        Outcome::Help(text) => panic!("unexpected help output:\n{text}"),
    }
}

//! Key slot forms, collisions and invalid definitions.

use chaincli::core::Registry;
use chaincli::test_utils::{RunLog, recording_command};
use chaincli::{ChainCli, ChainCommand, ChainError, CommandDefinition, KeySlot, Runnable};
use clap::Parser;

#[derive(Parser, Debug)]
struct ComputedKey {}

impl Runnable for ComputedKey {
    fn run(&mut self) -> anyhow::Result<()> {
        Ok(())
    }
}

impl ChainCommand for ComputedKey {
    fn key() -> KeySlot {
        KeySlot::computed(|| Some("classmethod".to_string()))
    }

    fn short_key() -> Option<KeySlot> {
        Some(KeySlot::computed(|| Some("cm".to_string())))
    }
}

/// A key that would need an instance to compute.
#[derive(Parser, Debug)]
struct InstanceKey {}

impl Runnable for InstanceKey {
    fn run(&mut self) -> anyhow::Result<()> {
        Ok(())
    }
}

impl ChainCommand for InstanceKey {
    fn key() -> KeySlot {
        KeySlot::computed(|| None)
    }
}

/// Optional slots that cannot resolve are ignored.
#[derive(Parser, Debug)]
struct UnresolvedAltKey {}

impl Runnable for UnresolvedAltKey {
    fn run(&mut self) -> anyhow::Result<()> {
        Ok(())
    }
}

impl ChainCommand for UnresolvedAltKey {
    fn key() -> KeySlot {
        "class".into()
    }

    fn alt_key() -> Option<KeySlot> {
        Some(KeySlot::computed(|| None))
    }
}

#[test]
fn literal_computed_and_static_keys_register() {
    let log = RunLog::default();
    let registry = Registry::build([
        CommandDefinition::of::<UnresolvedAltKey>(),
        CommandDefinition::of::<ComputedKey>(),
        recording_command("static", &log).alt(String::from("static-method")),
    ])
    .unwrap();

    let keys: Vec<_> = registry.keys().collect();
    assert_eq!(keys, ["class", "classmethod", "cm", "static", "static-method"]);
    assert_eq!(registry.get("cm").unwrap().name(), "ComputedKey");
    assert_eq!(registry.get("cm").unwrap().primary_key(), "classmethod");
}

#[test]
fn instance_bound_key_fails_build() {
    let err = Registry::build([CommandDefinition::of::<InstanceKey>()]).unwrap_err();

    match err {
        ChainError::InvalidKeyDefinition { command, .. } => assert_eq!(command, "InstanceKey"),
        other => panic!("expected InvalidKeyDefinition, got {other:?}"),
    }
}

#[test]
fn invalid_key_aborts_before_tokenizing() {
    let log = RunLog::default();
    let result = ChainCli::builder()
        .command(recording_command("start", &log))
        .command(CommandDefinition::of::<InstanceKey>())
        .build();

    assert!(matches!(
        result,
        Err(ChainError::InvalidKeyDefinition { .. })
    ));
    assert!(log.entries().is_empty());
}

#[test]
fn empty_literal_key_fails_build() {
    let log = RunLog::default();
    let err = Registry::build([recording_command("", &log)]).unwrap_err();

    assert_eq!(err.error_code(), "CHAIN-K001");
}

#[test]
fn later_registration_owns_colliding_key() {
    let log = RunLog::default();
    let cli = ChainCli::builder()
        .command(recording_command("start", &log).short("s").named("StartServer"))
        .command(recording_command("stop", &log).short("s").named("StopServer"))
        .build()
        .unwrap();

    assert_eq!(cli.registry().get("s").unwrap().name(), "StopServer");
    assert_eq!(cli.registry().get("start").unwrap().name(), "StartServer");

    cli.run(["s"]).unwrap();
    assert_eq!(log.entries(), ["stop"]);
}

#[test]
fn collision_on_primary_key_replaces_command() {
    let log = RunLog::default();
    let registry = Registry::build([
        recording_command("deploy", &log).named("Old"),
        recording_command("deploy", &log).named("New"),
    ])
    .unwrap();

    assert_eq!(registry.len(), 1);
    assert_eq!(registry.get("deploy").unwrap().name(), "New");
    assert_eq!(registry.groups().len(), 1);
}

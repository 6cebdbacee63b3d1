//! chaincli - chained subcommand dispatcher
//!
//! CLI entry point hosting the sample backend project.

#![forbid(unsafe_code)]
#![warn(clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

mod project;

use std::process::ExitCode;

use chaincli::core::logging;
use chaincli::storage::{ConfigSource, ResolvedConfig};
use chaincli::{ChainCli, ChainError, Outcome};

fn main() -> ExitCode {
    let config = match ResolvedConfig::resolve() {
        Ok(config) => config,
        Err(e) => return fail(&e),
    };

    logging::init(config.log_level, config.log_format, config.log_file.clone());
    tracing::debug!(
        name = %config.name,
        name_source = %config.sources.name,
        chaining = config.enable_chaining,
        chaining_source = %config.sources.enable_chaining,
        "Configuration resolved"
    );

    match run(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(ChainError::Parse { source, .. }) => source.exit(),
        Err(e) => {
            tracing::debug!(code = e.error_code(), "Chain failed");
            fail(&e)
        }
    }
}

fn run(config: &ResolvedConfig) -> chaincli::Result<()> {
    let mut builder = ChainCli::builder()
        .with_config(config)
        .primary(project::primary())
        .commands(project::commands());
    if config.sources.name == ConfigSource::Default {
        builder = builder.name(project::PROJECT_NAME);
    }

    match builder.build()?.run_env()? {
        Outcome::Help(text) => println!("{}", text.trim_end()),
        Outcome::Completed(commands) => {
            tracing::info!(count = commands.len(), "Chain completed");
        }
    }
    Ok(())
}

fn fail(error: &ChainError) -> ExitCode {
    eprintln!("{}", chaincli::render::render_error(error, false));
    ExitCode::from(error.exit_code() as u8)
}

//! Command dispatch and handler modules.

mod exists;
mod latest;
mod tree;

use miette::Result;

use pakt_ops::RegistryOptions;

use crate::cli::{Cli, Command};

/// Route a parsed CLI invocation to the appropriate command handler.
pub fn dispatch(cli: Cli) -> Result<()> {
    tracing::debug!("Running {:?}", cli.command);
    let registry = RegistryOptions {
        offline: cli.offline,
        registry: cli.registry,
    };
    match cli.command {
        Command::Tree {
            depth,
            duplicates,
            why,
        } => tree::exec(depth, duplicates, why, &registry),
        Command::Latest { name } => latest::exec(&name, &registry),
        Command::Exists { name, version } => exists::exec(&name, &version, &registry),
    }
}

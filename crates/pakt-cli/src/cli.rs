//! CLI argument definitions for Pakt.
//!
//! Uses `clap` derive macros to define the command surface. Each command
//! corresponds to a handler in the [`super::commands`] module.

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "pakt",
    version,
    about = "Resolve package dependency trees against an npm-style registry"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Use only cached registry data
    #[arg(long, global = true)]
    pub offline: bool,

    /// Registry URL to use instead of the configured one
    #[arg(long, global = true)]
    pub registry: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Display the resolved dependency tree
    Tree {
        /// Maximum depth
        #[arg(long)]
        depth: Option<u32>,
        /// Show packages resolved at more than one version
        #[arg(long)]
        duplicates: bool,
        /// Explain why a dependency is included
        #[arg(long)]
        why: Option<String>,
    },

    /// Show the version `latest` currently resolves to
    Latest {
        /// Package name
        name: String,
    },

    /// Check whether an exact version is published
    Exists {
        /// Package name
        name: String,
        /// Exact version, e.g. 1.2.3
        version: String,
    },
}

pub fn parse() -> Cli {
    Cli::parse()
}

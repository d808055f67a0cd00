//! Core data types for pakt.
//!
//! This crate defines what a pakt project looks like to the resolver: the
//! `Pakt.toml` manifest and the narrow [`manifest::PackageConfig`] view the
//! resolver consumes, local (vendored or project) packages, and the global
//! user configuration.
//!
//! This crate is intentionally free of network I/O.

/// File name of a package manifest.
pub const MANIFEST_FILE: &str = "Pakt.toml";

pub mod config;
pub mod manifest;
pub mod package;

//! Shared utilities for the pakt dependency resolver.
//!
//! This crate provides cross-cutting concerns used by all other pakt crates:
//! the error type, filesystem helpers, and terminal status output.

pub mod errors;
pub mod fs;
pub mod progress;

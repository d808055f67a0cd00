//! Package registry access: the [`Registry`] trait the resolver consumes,
//! the npm-style packument data model, and three registries behind it.
//!
//! - [`remote::RemoteRegistry`] talks HTTP to an npm-compatible registry and
//!   keeps a packument cache on disk.
//! - [`vendor::VendorRegistry`] overlays vendored packages from the project's
//!   vendor directory on top of another registry.
//! - [`memory::MemoryRegistry`] holds everything in memory.

pub mod cache;
pub mod client;
pub mod memory;
pub mod packument;
pub mod registry;
pub mod remote;
pub mod vendor;

pub use packument::{PackageData, VersionData, VersionList};
pub use registry::Registry;

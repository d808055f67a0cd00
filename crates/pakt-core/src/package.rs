use std::path::PathBuf;

use crate::manifest::{Manifest, PackageConfig};

/// A package whose sources are available on disk: either the project being
/// resolved (when it is a library) or a vendored copy of a dependency.
#[derive(Debug, Clone)]
pub struct LocalPackage {
    /// `true` when the package was loaded from the vendor directory.
    pub vendor: bool,
    /// Directory containing the package's `Pakt.toml`.
    pub path: PathBuf,
    pub manifest: Manifest,
}

impl LocalPackage {
    pub fn new(vendor: bool, path: PathBuf, manifest: Manifest) -> Self {
        Self {
            vendor,
            path,
            manifest,
        }
    }

    /// Returns the package name from the manifest.
    pub fn name(&self) -> &str {
        self.manifest.name()
    }

    /// Returns the declared package version from the manifest.
    pub fn version(&self) -> &str {
        self.manifest.version()
    }

    /// Returns the path to the manifest file.
    pub fn manifest_path(&self) -> PathBuf {
        self.path.join(crate::MANIFEST_FILE)
    }
}

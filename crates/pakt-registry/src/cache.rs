//! On-disk packument cache, one JSON file per package name.

use std::fs;
use std::path::PathBuf;

use pakt_util::errors::PaktResult;

use crate::packument::PackageData;

/// Packument cache rooted at a directory such as `~/.pakt/cache/`.
#[derive(Debug, Clone)]
pub struct PackumentCache {
    root: PathBuf,
}

impl PackumentCache {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Cache file for a package. Scoped names keep their scope in the file
    /// name (`@scope/name` becomes `@scope%2Fname.json`).
    pub fn path_for(&self, name: &str) -> PathBuf {
        self.root.join(format!("{}.json", name.replace('/', "%2F")))
    }

    /// Cached packument for `name`, if present and readable.
    pub fn get(&self, name: &str) -> Option<PackageData> {
        let path = self.path_for(name);
        if !path.is_file() {
            return None;
        }
        let content = fs::read_to_string(&path).ok()?;
        match PackageData::from_json(&content) {
            Ok(data) => Some(data),
            Err(e) => {
                tracing::warn!("Ignoring corrupt cached packument {}: {e}", path.display());
                None
            }
        }
    }

    /// Store raw packument JSON for `name`.
    pub fn put(&self, name: &str, json: &str) -> PaktResult<PathBuf> {
        let path = self.path_for(name);
        pakt_util::fs::write_atomic(&path, json.as_bytes())?;
        Ok(path)
    }
}

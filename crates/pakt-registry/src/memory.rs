//! In-memory registry.

use std::collections::HashMap;
use std::sync::Arc;

use pakt_core::manifest::DependencyMap;
use pakt_core::package::LocalPackage;
use pakt_util::errors::{PaktError, PaktResult};

use crate::packument::{PackageData, VersionList};
use crate::registry::Registry;

/// Registry holding packuments in memory. Records how often each package was
/// requested so callers can observe registry traffic.
#[derive(Debug, Default)]
pub struct MemoryRegistry {
    packages: HashMap<String, PackageData>,
    local: Vec<LocalPackage>,
    unavailable: HashMap<String, String>,
    data_requests: HashMap<String, usize>,
    list_requests: HashMap<String, usize>,
    local_loads: usize,
}

impl MemoryRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Publish `name@version` with the given dependencies.
    pub fn add_version(&mut self, name: &str, version: &str, deps: &[(&str, &str)]) -> &mut Self {
        let deps: DependencyMap = deps
            .iter()
            .map(|(n, s)| (n.to_string(), s.to_string()))
            .collect();
        self.packages
            .entry(name.to_string())
            .or_insert_with(|| PackageData::named(name))
            .insert_version(version, deps);
        self
    }

    /// Point dist-tag `tag` of `name` at `version`.
    pub fn add_tag(&mut self, name: &str, tag: &str, version: &str) -> &mut Self {
        self.packages
            .entry(name.to_string())
            .or_insert_with(|| PackageData::named(name))
            .dist_tags
            .insert(tag.to_string(), version.to_string());
        self
    }

    /// Register a local package returned from `load_local`.
    pub fn add_local(&mut self, package: LocalPackage) -> &mut Self {
        self.local.push(package);
        self
    }

    /// Make every request for `name` fail with a network error.
    pub fn set_unavailable(&mut self, name: &str, reason: &str) -> &mut Self {
        self.unavailable
            .insert(name.to_string(), reason.to_string());
        self
    }

    /// How many times `get_data` was called for `name` (including calls made
    /// on behalf of the other lookups).
    pub fn data_requests(&self, name: &str) -> usize {
        self.data_requests.get(name).copied().unwrap_or(0)
    }

    /// How many times the version list of `name` was requested.
    pub fn list_requests(&self, name: &str) -> usize {
        self.list_requests.get(name).copied().unwrap_or(0)
    }

    /// Total registry requests for any package.
    pub fn total_requests(&self) -> usize {
        self.data_requests.values().sum()
    }

    pub fn local_loads(&self) -> usize {
        self.local_loads
    }
}

impl Registry for MemoryRegistry {
    fn load_local(&mut self) -> PaktResult<Vec<LocalPackage>> {
        self.local_loads += 1;
        Ok(self.local.clone())
    }

    fn get_data(&mut self, name: &str) -> PaktResult<Arc<PackageData>> {
        *self.data_requests.entry(name.to_string()).or_default() += 1;
        if let Some(reason) = self.unavailable.get(name) {
            return Err(PaktError::network(format!("{name}: {reason}")));
        }
        self.packages
            .get(name)
            .map(|data| Arc::new(data.clone()))
            .ok_or_else(|| PaktError::PackageNotFound {
                name: name.to_string(),
            })
    }

    fn get_version_list(&mut self, name: &str) -> PaktResult<VersionList> {
        *self.list_requests.entry(name.to_string()).or_default() += 1;
        Ok(self.get_data(name)?.version_list())
    }
}

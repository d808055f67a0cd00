//! npm packument (package document) model and the ordered version list
//! derived from it.

use std::collections::BTreeMap;
use std::slice;

use semver::Version;
use serde::{Deserialize, Serialize};

use pakt_core::manifest::{DependencyMap, PackageConfig};
use pakt_core::package::LocalPackage;

/// Everything the registry publishes about one package name.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PackageData {
    #[serde(default)]
    pub name: String,
    #[serde(default, rename = "dist-tags")]
    pub dist_tags: BTreeMap<String, String>,
    #[serde(default)]
    pub versions: BTreeMap<String, VersionData>,
}

/// Metadata of one published version.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VersionData {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub dependencies: DependencyMap,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dist: Option<Dist>,
}

/// Where the published contents of a version live.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Dist {
    #[serde(default)]
    pub tarball: Option<String>,
    #[serde(default)]
    pub shasum: Option<String>,
}

impl PackageData {
    /// An empty packument for `name`.
    pub fn named(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Self::default()
        }
    }

    /// Parse a packument from registry JSON.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Publish a version with the given dependency map.
    pub fn insert_version(&mut self, version: &str, dependencies: DependencyMap) {
        self.versions.insert(
            version.to_string(),
            VersionData {
                name: self.name.clone(),
                version: version.to_string(),
                dependencies,
                dist: None,
            },
        );
    }

    /// Publish every local package's manifest as a version of this package.
    pub fn overlay_local(&mut self, packages: &[LocalPackage]) {
        for pkg in packages {
            self.insert_version(pkg.version(), pkg.manifest.dependency_map().clone());
        }
    }

    /// Published versions that parse as exact semantic versions, ascending.
    pub fn version_list(&self) -> VersionList {
        let versions = self
            .versions
            .keys()
            .filter_map(|raw| match parse_key(raw) {
                Ok(v) => Some(v),
                Err(e) => {
                    tracing::warn!("Skipping unparseable version {raw} of {}: {e}", self.name);
                    None
                }
            })
            .collect();
        VersionList::new(versions)
    }

    /// Dependency map published for `version`.
    ///
    /// Looks the version up by its canonical string first, then by comparing
    /// parsed keys, so `1.0.0` also finds a key written as `v1.0.0`.
    pub fn dependencies_of(&self, version: &Version) -> Option<&DependencyMap> {
        if let Some(data) = self.versions.get(&version.to_string()) {
            return Some(&data.dependencies);
        }
        self.versions
            .iter()
            .find(|(raw, _)| parse_key(raw).is_ok_and(|v| &v == version))
            .map(|(_, data)| &data.dependencies)
    }
}

/// Parse a `versions` key. Registries occasionally publish keys with a
/// leading `v` or `=`; both are accepted.
fn parse_key(raw: &str) -> Result<Version, semver::Error> {
    Version::parse(raw.trim().trim_start_matches(['v', '=']))
}

/// Versions of one package in ascending semantic-version order, without
/// duplicates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VersionList(Vec<Version>);

impl VersionList {
    pub fn new(mut versions: Vec<Version>) -> Self {
        versions.sort();
        versions.dedup();
        Self(versions)
    }

    /// The greatest version.
    pub fn last(&self) -> Option<&Version> {
        self.0.last()
    }

    pub fn iter(&self) -> slice::Iter<'_, Version> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[Version] {
        &self.0
    }

    pub fn contains(&self, version: &Version) -> bool {
        self.0.binary_search(version).is_ok()
    }

    /// Add versions, keeping the list sorted and unique.
    pub fn merge(&mut self, more: impl IntoIterator<Item = Version>) {
        self.0.extend(more);
        self.0.sort();
        self.0.dedup();
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<'a> IntoIterator for &'a VersionList {
    type Item = &'a Version;
    type IntoIter = slice::Iter<'a, Version>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

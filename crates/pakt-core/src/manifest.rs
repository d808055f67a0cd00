use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

use pakt_util::errors::{PaktError, PaktResult};

/// Dependency name to declared specifier (exact version, range or tag).
///
/// Ordered by name, so every walk over it is reproducible.
pub type DependencyMap = BTreeMap<String, String>;

/// Whether a package is an application or a publishable library.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PackageKind {
    #[default]
    App,
    Pkg,
}

impl fmt::Display for PackageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PackageKind::App => f.write_str("app"),
            PackageKind::Pkg => f.write_str("pkg"),
        }
    }
}

/// The part of a manifest the resolver needs.
pub trait PackageConfig {
    fn name(&self) -> &str;
    fn version(&self) -> &str;
    fn kind(&self) -> PackageKind;
    fn dependency_map(&self) -> &DependencyMap;
}

/// Package identity from the `[package]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PackageMetadata {
    pub name: String,
    pub version: String,
    #[serde(default, rename = "type")]
    pub kind: PackageKind,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub authors: Vec<String>,
    #[serde(default)]
    pub license: Option<String>,
}

/// The on-disk shape of `Pakt.toml`, before it is split by package kind.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct RawManifest {
    package: PackageMetadata,
    #[serde(default)]
    dependencies: DependencyMap,
}

/// Manifest of an application: consumes packages, is never depended on.
#[derive(Debug, Clone)]
pub struct AppManifest {
    pub name: String,
    pub version: String,
    pub description: Option<String>,
    pub dependencies: DependencyMap,
}

/// Manifest of a library package that other manifests may depend on.
#[derive(Debug, Clone)]
pub struct PkgManifest {
    pub name: String,
    pub version: String,
    pub description: Option<String>,
    pub authors: Vec<String>,
    pub license: Option<String>,
    pub dependencies: DependencyMap,
}

impl AppManifest {
    pub fn new(name: &str, version: &str) -> Self {
        Self {
            name: name.to_string(),
            version: version.to_string(),
            description: None,
            dependencies: DependencyMap::new(),
        }
    }

    pub fn with_dependency(mut self, name: &str, specifier: &str) -> Self {
        self.dependencies
            .insert(name.to_string(), specifier.to_string());
        self
    }
}

impl PkgManifest {
    pub fn new(name: &str, version: &str) -> Self {
        Self {
            name: name.to_string(),
            version: version.to_string(),
            description: None,
            authors: Vec::new(),
            license: None,
            dependencies: DependencyMap::new(),
        }
    }

    pub fn with_dependency(mut self, name: &str, specifier: &str) -> Self {
        self.dependencies
            .insert(name.to_string(), specifier.to_string());
        self
    }

    /// Build a library manifest carrying the identity and dependencies of
    /// any package configuration.
    pub fn from_config(config: &dyn PackageConfig) -> Self {
        Self {
            name: config.name().to_string(),
            version: config.version().to_string(),
            description: None,
            authors: Vec::new(),
            license: None,
            dependencies: config.dependency_map().clone(),
        }
    }
}

impl PackageConfig for AppManifest {
    fn name(&self) -> &str {
        &self.name
    }

    fn version(&self) -> &str {
        &self.version
    }

    fn kind(&self) -> PackageKind {
        PackageKind::App
    }

    fn dependency_map(&self) -> &DependencyMap {
        &self.dependencies
    }
}

impl PackageConfig for PkgManifest {
    fn name(&self) -> &str {
        &self.name
    }

    fn version(&self) -> &str {
        &self.version
    }

    fn kind(&self) -> PackageKind {
        PackageKind::Pkg
    }

    fn dependency_map(&self) -> &DependencyMap {
        &self.dependencies
    }
}

/// A parsed `Pakt.toml`, either kind.
#[derive(Debug, Clone)]
pub enum Manifest {
    App(AppManifest),
    Pkg(PkgManifest),
}

impl Manifest {
    /// Load and parse a `Pakt.toml` file from the given path.
    pub fn from_path(path: &Path) -> PaktResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| PaktError::Manifest {
            message: format!("Failed to read {}: {e}", path.display()),
        })?;
        Self::from_str(&content)
    }

    /// Parse a `Pakt.toml` from a string.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> PaktResult<Self> {
        let raw: RawManifest = toml::from_str(content).map_err(|e| PaktError::Manifest {
            message: format!("Failed to parse Pakt.toml: {e}"),
        })?;
        if raw.package.name.trim().is_empty() {
            return Err(PaktError::Manifest {
                message: "package name must not be empty".to_string(),
            });
        }

        let RawManifest {
            package,
            dependencies,
        } = raw;
        Ok(match package.kind {
            PackageKind::App => Manifest::App(AppManifest {
                name: package.name,
                version: package.version,
                description: package.description,
                dependencies,
            }),
            PackageKind::Pkg => Manifest::Pkg(PkgManifest {
                name: package.name,
                version: package.version,
                description: package.description,
                authors: package.authors,
                license: package.license,
                dependencies,
            }),
        })
    }

    fn config(&self) -> &dyn PackageConfig {
        match self {
            Manifest::App(m) => m,
            Manifest::Pkg(m) => m,
        }
    }
}

impl From<AppManifest> for Manifest {
    fn from(m: AppManifest) -> Self {
        Manifest::App(m)
    }
}

impl From<PkgManifest> for Manifest {
    fn from(m: PkgManifest) -> Self {
        Manifest::Pkg(m)
    }
}

impl PackageConfig for Manifest {
    fn name(&self) -> &str {
        self.config().name()
    }

    fn version(&self) -> &str {
        self.config().version()
    }

    fn kind(&self) -> PackageKind {
        self.config().kind()
    }

    fn dependency_map(&self) -> &DependencyMap {
        self.config().dependency_map()
    }
}

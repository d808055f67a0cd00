//! The registry contract consumed by the resolver.

use std::sync::Arc;

use semver::Version;

use pakt_core::manifest::DependencyMap;
use pakt_core::package::LocalPackage;
use pakt_util::errors::{PaktError, PaktResult};

use crate::packument::{PackageData, VersionList};

/// Source of package metadata.
///
/// Calls block until the data is available. Implementations may cache
/// internally, which is why every method takes `&mut self`.
pub trait Registry {
    /// Load the local/vendored package index and return the packages found.
    fn load_local(&mut self) -> PaktResult<Vec<LocalPackage>>;

    /// Full packument for `name`: dist-tags and every published version.
    fn get_data(&mut self, name: &str) -> PaktResult<Arc<PackageData>>;

    /// Published versions of `name`, ascending.
    fn get_version_list(&mut self, name: &str) -> PaktResult<VersionList> {
        Ok(self.get_data(name)?.version_list())
    }

    /// Dependency map declared by `name` at exactly `version`.
    fn get_version_dependencies(
        &mut self,
        name: &str,
        version: &Version,
    ) -> PaktResult<DependencyMap> {
        let data = self.get_data(name)?;
        data.dependencies_of(version).cloned().ok_or_else(|| {
            PaktError::registry(format!("no metadata published for {name}@{version}"))
        })
    }
}

impl<R: Registry + ?Sized> Registry for &mut R {
    fn load_local(&mut self) -> PaktResult<Vec<LocalPackage>> {
        (**self).load_local()
    }

    fn get_data(&mut self, name: &str) -> PaktResult<Arc<PackageData>> {
        (**self).get_data(name)
    }

    fn get_version_list(&mut self, name: &str) -> PaktResult<VersionList> {
        (**self).get_version_list(name)
    }

    fn get_version_dependencies(
        &mut self,
        name: &str,
        version: &Version,
    ) -> PaktResult<DependencyMap> {
        (**self).get_version_dependencies(name, version)
    }
}

impl<R: Registry + ?Sized> Registry for Box<R> {
    fn load_local(&mut self) -> PaktResult<Vec<LocalPackage>> {
        (**self).load_local()
    }

    fn get_data(&mut self, name: &str) -> PaktResult<Arc<PackageData>> {
        (**self).get_data(name)
    }

    fn get_version_list(&mut self, name: &str) -> PaktResult<VersionList> {
        (**self).get_version_list(name)
    }

    fn get_version_dependencies(
        &mut self,
        name: &str,
        version: &Version,
    ) -> PaktResult<DependencyMap> {
        (**self).get_version_dependencies(name, version)
    }
}

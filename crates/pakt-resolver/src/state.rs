//! State owned by one resolution run.

use std::collections::BTreeMap;

use semver::Version;

use pakt_core::package::LocalPackage;

use crate::cache::{ReusePool, VersionMemo};
use crate::tree::DependencyTree;

/// Local packages keyed by (name, version).
#[derive(Debug, Default)]
pub struct LocalPackages {
    packages: BTreeMap<(String, Version), LocalPackage>,
}

impl LocalPackages {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `package` as `name@version`, replacing any earlier entry.
    pub fn insert(&mut self, version: Version, package: LocalPackage) {
        self.packages
            .insert((package.name().to_string(), version), package);
    }

    pub fn get(&self, name: &str, version: &Version) -> Option<&LocalPackage> {
        self.packages.get(&(name.to_string(), version.clone()))
    }

    /// Every locally available version of `name`, ascending.
    pub fn versions_of(&self, name: &str) -> Vec<Version> {
        self.packages
            .keys()
            .filter(|(n, _)| n == name)
            .map(|(_, v)| v.clone())
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Version, &LocalPackage)> {
        self.packages
            .iter()
            .map(|((name, version), pkg)| (name.as_str(), version, pkg))
    }

    pub fn len(&self) -> usize {
        self.packages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }
}

/// Everything one resolution run reads and writes: the tree being built and
/// the caches that steer it.
///
/// Created by [`crate::resolve_remote`] and handed back to the caller once
/// the walk is complete.
#[derive(Debug)]
pub struct ResolverState {
    pub(crate) tree: DependencyTree,
    pub(crate) memo: VersionMemo,
    pub(crate) pool: ReusePool,
    pub(crate) local: LocalPackages,
}

impl ResolverState {
    pub fn new(tree: DependencyTree) -> Self {
        Self {
            tree,
            memo: VersionMemo::new(),
            pool: ReusePool::new(),
            local: LocalPackages::new(),
        }
    }

    pub fn tree(&self) -> &DependencyTree {
        &self.tree
    }

    pub fn memo(&self) -> &VersionMemo {
        &self.memo
    }

    pub fn reuse_pool(&self) -> &ReusePool {
        &self.pool
    }

    pub fn local_packages(&self) -> &LocalPackages {
        &self.local
    }

    pub fn into_tree(self) -> DependencyTree {
        self.tree
    }
}

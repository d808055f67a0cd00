//! Memoized depth-first dependency resolution.

use std::path::Path;

use semver::Version;

use pakt_core::manifest::{DependencyMap, Manifest, PackageConfig, PackageKind, PkgManifest};
use pakt_core::package::LocalPackage;
use pakt_registry::{Registry, VersionList};
use pakt_util::errors::{PaktError, PaktResult};

use crate::state::ResolverState;
use crate::tree::{DependencyNode, DependencyTree, NodeId};
use crate::version::{parse_exact, Query};

/// Resolve the dependencies declared by `config` into a complete tree.
///
/// The local package index is loaded from `registry` first. When `config`
/// describes a library, the project itself (located at `project_dir`) is
/// registered as a local package so dependencies may depend back on it.
/// Children are resolved in dependency-map order and the first error aborts
/// the whole run.
pub fn resolve_remote<R: Registry + ?Sized>(
    registry: &mut R,
    config: &dyn PackageConfig,
    project_dir: &Path,
) -> PaktResult<ResolverState> {
    let local = registry.load_local()?;

    let root_version = parse_exact(config.version())
        .ok_or_else(|| PaktError::invalid_version(config.version()))?;

    tracing::info!("Resolving dependencies of {}@{root_version}", config.name());

    let mut root = DependencyNode::new(config.name(), config.version());
    root.resolved = Some(root_version.clone());
    let mut state = ResolverState::new(DependencyTree::new(root));

    for package in local {
        match parse_exact(package.version()) {
            Some(version) => state.local.insert(version, package),
            None => tracing::warn!(
                "Skipping local package {} at {}: invalid version {}",
                package.name(),
                package.path.display(),
                package.version()
            ),
        }
    }

    if config.kind() == PackageKind::Pkg {
        let manifest = Manifest::Pkg(PkgManifest::from_config(config));
        state.local.insert(
            root_version,
            LocalPackage::new(false, project_dir.to_path_buf(), manifest),
        );
    }

    let root_id = state.tree.root();
    let children = add_children(&mut state.tree, root_id, config.dependency_map());

    let mut resolver = Resolver { registry, state };
    for child in children {
        resolver.resolve_tree(child)?;
    }

    let state = resolver.state;
    tracing::info!(
        "Resolved {} packages for {}",
        state.tree.len() - 1,
        config.name()
    );
    Ok(state)
}

fn add_children(tree: &mut DependencyTree, parent: NodeId, deps: &DependencyMap) -> Vec<NodeId> {
    deps.iter()
        .map(|(name, specifier)| tree.add_child(parent, name, specifier))
        .collect()
}

struct Resolver<'r, R: ?Sized> {
    registry: &'r mut R,
    state: ResolverState,
}

impl<R: Registry + ?Sized> Resolver<'_, R> {
    fn resolve_tree(&mut self, id: NodeId) -> PaktResult<()> {
        let (name, specifier) = {
            let node = self.state.tree.node(id);
            (node.name.clone(), node.specifier.clone())
        };

        // A pair seen before is a reference leaf: same version, no children.
        if let Some(version) = self.state.memo.get(&name, &specifier).cloned() {
            tracing::debug!("{name}@{specifier} -> {version} (memo)");
            let node = self.state.tree.node_mut(id);
            node.resolved = Some(version);
            node.reference = true;
            return Ok(());
        }

        let version = self.resolve_ver(&name, &specifier)?;
        tracing::debug!("{name}@{specifier} -> {version}");
        self.state.tree.node_mut(id).resolved = Some(version.clone());
        self.state.memo.insert(&name, &specifier, version.clone());

        let deps = self.dependencies_of(&name, &version)?;
        let children = add_children(&mut self.state.tree, id, &deps);
        for child in children {
            self.resolve_tree(child)?;
        }
        Ok(())
    }

    fn resolve_ver(&mut self, name: &str, specifier: &str) -> PaktResult<Version> {
        if let Some(version) = parse_exact(specifier) {
            self.state.pool.record(name, version.clone());
            return Ok(version);
        }

        let query =
            Query::parse(specifier).ok_or_else(|| PaktError::invalid_expression(specifier))?;

        if let Some(version) = self.state.pool.find(name, &query) {
            tracing::trace!("Reusing {name}@{version} for {specifier}");
            return Ok(version.clone());
        }

        let list = self.version_list(name)?;
        match query.select_best(&list) {
            Some(best) => {
                let best = best.clone();
                self.state.pool.record(name, best.clone());
                Ok(best)
            }
            None => Err(PaktError::version_not_found(name, specifier)),
        }
    }

    /// Registry versions of `name` merged with locally available ones. A
    /// package known only locally is not an error.
    fn version_list(&mut self, name: &str) -> PaktResult<VersionList> {
        let local = self.state.local.versions_of(name);
        let mut list = match self.registry.get_version_list(name) {
            Ok(list) => list,
            Err(PaktError::PackageNotFound { .. }) if !local.is_empty() => VersionList::default(),
            Err(e) => return Err(e),
        };
        list.merge(local);
        Ok(list)
    }

    fn dependencies_of(&mut self, name: &str, version: &Version) -> PaktResult<DependencyMap> {
        if let Some(package) = self.state.local.get(name, version) {
            tracing::trace!(
                "Using local package {name}@{version} at {}",
                package.path.display()
            );
            return Ok(package.manifest.dependency_map().clone());
        }
        self.registry.get_version_dependencies(name, version)
    }
}

//! Vendored packages layered over another registry.

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use pakt_core::manifest::Manifest;
use pakt_core::package::LocalPackage;
use pakt_core::MANIFEST_FILE;
use pakt_util::errors::{PaktError, PaktResult};

use crate::packument::PackageData;
use crate::registry::Registry;

/// Registry that publishes every package found under a vendor directory
/// (`<dir>/<any>/Pakt.toml`) in addition to what the inner registry knows.
///
/// For a vendored name the vendored versions are merged over the inner
/// registry's packument; a name the inner registry has never heard of is
/// served from the vendor directory alone.
#[derive(Debug)]
pub struct VendorRegistry<R> {
    dir: PathBuf,
    inner: R,
    vendored: BTreeMap<String, Vec<LocalPackage>>,
    merged: HashMap<String, Arc<PackageData>>,
}

impl<R: Registry> VendorRegistry<R> {
    pub fn new(dir: impl Into<PathBuf>, inner: R) -> Self {
        Self {
            dir: dir.into(),
            inner,
            vendored: BTreeMap::new(),
            merged: HashMap::new(),
        }
    }

    pub fn inner(&self) -> &R {
        &self.inner
    }

    fn scan(&self) -> PaktResult<Vec<LocalPackage>> {
        if !self.dir.is_dir() {
            tracing::debug!("No vendor directory at {}", self.dir.display());
            return Ok(Vec::new());
        }

        let mut dirs: Vec<PathBuf> = fs::read_dir(&self.dir)?
            .flatten()
            .map(|e| e.path())
            .filter(|p| p.join(MANIFEST_FILE).is_file())
            .collect();
        dirs.sort();

        let mut packages = Vec::with_capacity(dirs.len());
        for path in dirs {
            let manifest = Manifest::from_path(&path.join(MANIFEST_FILE))?;
            tracing::debug!("Found vendored package at {}", path.display());
            packages.push(LocalPackage::new(true, path, manifest));
        }
        Ok(packages)
    }
}

impl<R: Registry> Registry for VendorRegistry<R> {
    fn load_local(&mut self) -> PaktResult<Vec<LocalPackage>> {
        let vendored = self.scan()?;
        self.vendored.clear();
        self.merged.clear();
        for pkg in &vendored {
            self.vendored
                .entry(pkg.name().to_string())
                .or_default()
                .push(pkg.clone());
        }

        let mut all = self.inner.load_local()?;
        all.extend(vendored);
        Ok(all)
    }

    fn get_data(&mut self, name: &str) -> PaktResult<Arc<PackageData>> {
        let Some(local) = self.vendored.get(name) else {
            return self.inner.get_data(name);
        };
        if let Some(data) = self.merged.get(name) {
            return Ok(Arc::clone(data));
        }

        let mut data = match self.inner.get_data(name) {
            Ok(remote) => (*remote).clone(),
            Err(PaktError::PackageNotFound { .. }) => PackageData::named(name),
            Err(e) => return Err(e),
        };
        data.overlay_local(local);

        let data = Arc::new(data);
        self.merged.insert(name.to_string(), Arc::clone(&data));
        Ok(data)
    }
}

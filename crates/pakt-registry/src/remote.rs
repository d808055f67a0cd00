//! npm-compatible HTTP registry.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use reqwest::blocking::Client;

use pakt_core::config::GlobalConfig;
use pakt_core::package::LocalPackage;
use pakt_util::errors::{PaktError, PaktResult};

use crate::cache::PackumentCache;
use crate::client;
use crate::packument::PackageData;
use crate::registry::Registry;

/// Registry backed by `GET <base>/<name>` packument requests.
///
/// Packuments are memoized for the lifetime of the value and mirrored into
/// the disk cache; offline mode answers from the disk cache only.
#[derive(Debug)]
pub struct RemoteRegistry {
    base_url: String,
    client: Client,
    cache: Option<PackumentCache>,
    offline: bool,
    retries: u32,
    fetched: HashMap<String, Arc<PackageData>>,
}

impl RemoteRegistry {
    /// Create a registry client for `base_url` without a disk cache.
    pub fn new(base_url: &str) -> PaktResult<Self> {
        let url = base_url.trim();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(PaktError::Config {
                message: format!("Invalid registry URL '{base_url}'"),
            });
        }
        Ok(Self {
            base_url: url.trim_end_matches('/').to_string(),
            client: client::build_client(Duration::from_secs(30))?,
            cache: None,
            offline: false,
            retries: 3,
            fetched: HashMap::new(),
        })
    }

    /// Create a registry client from the global configuration.
    pub fn from_config(config: &GlobalConfig) -> PaktResult<Self> {
        let mut registry = Self::new(&config.registry.url)?;
        registry.client = client::build_client(Duration::from_secs(config.registry.timeout_secs))?;
        registry.retries = config.registry.retries;
        registry.offline = config.cache.offline;
        registry.cache = Some(PackumentCache::new(config.cache_dir()));
        Ok(registry)
    }

    pub fn with_cache(mut self, cache: PackumentCache) -> Self {
        self.cache = Some(cache);
        self
    }

    pub fn offline(mut self, offline: bool) -> Self {
        self.offline = offline;
        self
    }

    /// Packument URL for a package. Scoped names encode their `/`.
    pub fn package_url(&self, name: &str) -> String {
        let encoded = if name.starts_with('@') {
            name.replace('/', "%2F")
        } else {
            name.to_string()
        };
        format!("{}/{encoded}", self.base_url)
    }

    fn fetch(&self, name: &str) -> PaktResult<PackageData> {
        if self.offline {
            return self
                .cache
                .as_ref()
                .and_then(|c| c.get(name))
                .ok_or_else(|| {
                    PaktError::network(format!("{name} is not cached and offline mode is enabled"))
                });
        }

        let url = self.package_url(name);
        tracing::debug!("Fetching {url}");
        let Some(json) = client::fetch_text(&self.client, &url, self.retries)? else {
            return Err(PaktError::PackageNotFound {
                name: name.to_string(),
            });
        };
        let data = PackageData::from_json(&json)
            .map_err(|e| PaktError::registry(format!("Invalid packument for {name}: {e}")))?;
        if let Some(cache) = &self.cache {
            if let Err(e) = cache.put(name, &json) {
                tracing::warn!("Failed to cache packument for {name}: {e}");
            }
        }
        Ok(data)
    }
}

impl Registry for RemoteRegistry {
    fn load_local(&mut self) -> PaktResult<Vec<LocalPackage>> {
        Ok(Vec::new())
    }

    fn get_data(&mut self, name: &str) -> PaktResult<Arc<PackageData>> {
        if let Some(data) = self.fetched.get(name) {
            tracing::trace!("Packument for {name} already fetched");
            return Ok(Arc::clone(data));
        }
        let data = Arc::new(self.fetch(name)?);
        self.fetched.insert(name.to_string(), Arc::clone(&data));
        Ok(data)
    }
}

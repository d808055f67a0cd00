pub mod ops_exists;
pub mod ops_latest;
pub mod ops_tree;

use std::path::Path;

use pakt_core::config::GlobalConfig;
use pakt_registry::remote::RemoteRegistry;
use pakt_registry::vendor::VendorRegistry;
use pakt_util::errors::PaktResult;

/// Registry settings given on the command line, applied over the global
/// config.
#[derive(Debug, Clone, Default)]
pub struct RegistryOptions {
    /// Serve packuments from the disk cache only.
    pub offline: bool,
    /// Registry URL overriding config and environment.
    pub registry: Option<String>,
}

/// Load the global config and apply command-line overrides. A config file
/// that fails to load is reported and replaced by the defaults.
pub fn load_config(opts: &RegistryOptions) -> GlobalConfig {
    let mut config = GlobalConfig::load().unwrap_or_else(|e| {
        tracing::warn!("Failed to load global config, using defaults: {e}");
        let mut config = GlobalConfig::default();
        config.apply_env(|key| std::env::var(key).ok());
        config
    });
    if let Some(url) = &opts.registry {
        config.registry.url = url.clone();
    }
    if opts.offline {
        config.cache.offline = true;
    }
    config
}

/// The registry stack used for a project: vendored packages over the
/// configured remote registry.
pub fn project_registry(
    config: &GlobalConfig,
    project_root: &Path,
) -> PaktResult<VendorRegistry<RemoteRegistry>> {
    let remote = RemoteRegistry::from_config(config)?;
    Ok(VendorRegistry::new(config.vendor_dir(project_root), remote))
}

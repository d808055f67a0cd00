use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use pakt_util::errors::{PaktError, PaktResult};

/// Default npm-compatible registry.
pub const DEFAULT_REGISTRY: &str = "https://registry.npmjs.org/";

/// Environment variable overriding the registry URL.
pub const REGISTRY_ENV: &str = "PAKT_REGISTRY";

/// Environment variable forcing offline mode (`1` or `true`).
pub const OFFLINE_ENV: &str = "PAKT_OFFLINE";

/// Global user configuration loaded from `~/.pakt/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GlobalConfig {
    #[serde(default)]
    pub registry: RegistryConfig,

    #[serde(default)]
    pub cache: CacheConfig,

    #[serde(default)]
    pub vendor: VendorConfig,
}

/// Registry settings from `[registry]`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistryConfig {
    #[serde(default = "default_registry_url")]
    pub url: String,
    #[serde(default = "default_timeout_secs", rename = "timeout-secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_retries")]
    pub retries: u32,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            url: default_registry_url(),
            timeout_secs: default_timeout_secs(),
            retries: default_retries(),
        }
    }
}

fn default_registry_url() -> String {
    DEFAULT_REGISTRY.to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_retries() -> u32 {
    3
}

/// Packument cache settings from `[cache]`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    #[serde(default = "default_cache_dir")]
    pub dir: String,
    #[serde(default)]
    pub offline: bool,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            dir: default_cache_dir(),
            offline: false,
        }
    }
}

fn default_cache_dir() -> String {
    "~/.pakt/cache".to_string()
}

/// Vendored package settings from `[vendor]`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VendorConfig {
    #[serde(default = "default_vendor_dir")]
    pub dir: String,
}

impl Default for VendorConfig {
    fn default() -> Self {
        Self {
            dir: default_vendor_dir(),
        }
    }
}

fn default_vendor_dir() -> String {
    "vendor".to_string()
}

impl GlobalConfig {
    /// Load global config from the default path, applying environment
    /// overrides. A missing file yields the defaults.
    pub fn load() -> PaktResult<Self> {
        let mut config = Self::load_from(&Self::default_path())?;
        config.apply_env(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Load global config from a specific file, without environment overrides.
    pub fn load_from(path: &Path) -> PaktResult<Self> {
        if !path.is_file() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path).map_err(|e| PaktError::Config {
            message: format!("Failed to read global config: {e}"),
        })?;
        toml::from_str(&content).map_err(|e| PaktError::Config {
            message: format!("Failed to parse global config: {e}"),
        })
    }

    /// Apply `PAKT_REGISTRY` / `PAKT_OFFLINE` using the given variable lookup.
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(url) = lookup(REGISTRY_ENV).filter(|u| !u.trim().is_empty()) {
            tracing::debug!("Registry overridden from environment: {url}");
            self.registry.url = url;
        }
        if let Some(flag) = lookup(OFFLINE_ENV) {
            self.cache.offline = matches!(flag.trim(), "1" | "true" | "TRUE" | "yes");
        }
    }

    /// Returns the default path to the global config file.
    pub fn default_path() -> PathBuf {
        dirs_path().join("config.toml")
    }

    /// The packument cache directory with `~` expanded.
    pub fn cache_dir(&self) -> PathBuf {
        pakt_util::fs::expand_home(&self.cache.dir, &home_dir())
    }

    /// The vendor directory for a project rooted at `project_root`.
    pub fn vendor_dir(&self, project_root: &Path) -> PathBuf {
        project_root.join(&self.vendor.dir)
    }
}

fn home_dir() -> PathBuf {
    let home = std::env::var("HOME")
        .or_else(|_| std::env::var("USERPROFILE"))
        .unwrap_or_else(|_| ".".to_string());
    PathBuf::from(home)
}

/// Returns the path to the pakt data directory (`~/.pakt/`).
pub fn dirs_path() -> PathBuf {
    home_dir().join(".pakt")
}

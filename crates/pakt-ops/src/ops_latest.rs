//! Operation: report the version `latest` resolves to.

use pakt_registry::remote::RemoteRegistry;
use pakt_resolver::lookup;

use crate::RegistryOptions;

/// Look up the current latest version of `name`.
pub fn latest(name: &str, opts: &RegistryOptions) -> miette::Result<String> {
    let config = crate::load_config(opts);
    let mut registry = RemoteRegistry::from_config(&config)?;
    let version = lookup::get_latest(&mut registry, name)?;
    tracing::debug!("latest {name} is {version}");
    Ok(version)
}

//! Operation: check whether an exact version is published.

use pakt_registry::remote::RemoteRegistry;
use pakt_resolver::lookup;

use crate::RegistryOptions;

/// Whether `name@version` is published. `version` must be exact.
pub fn exists(name: &str, version: &str, opts: &RegistryOptions) -> miette::Result<bool> {
    let config = crate::load_config(opts);
    let mut registry = RemoteRegistry::from_config(&config)?;
    Ok(lookup::exists(&mut registry, name, version)?)
}

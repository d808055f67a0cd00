//! Single-package registry queries.

use pakt_registry::Registry;
use pakt_util::errors::{PaktError, PaktResult};

use crate::version::{parse_exact, LATEST_TAG};

/// The version `latest` currently means for `name`: the `latest` dist-tag
/// when published, otherwise the highest published version.
pub fn get_latest<R: Registry + ?Sized>(registry: &mut R, name: &str) -> PaktResult<String> {
    let data = registry.get_data(name)?;
    if let Some(tagged) = data.dist_tags.get(LATEST_TAG) {
        return Ok(tagged.clone());
    }

    let list = registry.get_version_list(name)?;
    list.last()
        .map(ToString::to_string)
        .ok_or_else(|| PaktError::version_not_found(name, LATEST_TAG))
}

/// Whether `name@version` is published. `version` must be exact; ranges and
/// tags are rejected before the registry is consulted.
pub fn exists<R: Registry + ?Sized>(
    registry: &mut R,
    name: &str,
    version: &str,
) -> PaktResult<bool> {
    let parsed = parse_exact(version).ok_or_else(|| PaktError::invalid_version(version))?;
    let data = registry.get_data(name)?;
    Ok(data.dependencies_of(&parsed).is_some())
}

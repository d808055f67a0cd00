//! Handler for `pakt tree`.

use miette::Result;

use pakt_core::MANIFEST_FILE;
use pakt_ops::ops_tree::{self, TreeOptions};
use pakt_ops::RegistryOptions;
use pakt_util::errors::PaktError;
use pakt_util::fs::find_ancestor_with;

pub fn exec(
    depth: Option<u32>,
    duplicates: bool,
    why: Option<String>,
    registry: &RegistryOptions,
) -> Result<()> {
    let cwd = std::env::current_dir().map_err(PaktError::Io)?;
    let project_root =
        find_ancestor_with(&cwd, MANIFEST_FILE).ok_or_else(|| PaktError::Manifest {
            message: format!("Could not find {MANIFEST_FILE} in current or parent directories"),
        })?;

    let opts = TreeOptions {
        depth: depth.map(|d| d as usize),
        why,
        duplicates,
    };

    ops_tree::tree(&project_root, &opts, registry)
}

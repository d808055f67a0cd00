//! Operation: display the resolved dependency tree.

use std::fmt::Write;
use std::path::Path;

use pakt_core::manifest::{Manifest, PackageConfig};
use pakt_core::MANIFEST_FILE;
use pakt_registry::Registry;
use pakt_resolver::duplicates::DuplicateReport;
use pakt_resolver::{resolve_remote, ResolverState};

use crate::RegistryOptions;

/// Options for `pakt tree`.
#[derive(Debug, Default)]
pub struct TreeOptions {
    /// Maximum tree depth to display.
    pub depth: Option<usize>,
    /// Show the path from the root to a specific dependency.
    pub why: Option<String>,
    /// Show only packages resolved at more than one version.
    pub duplicates: bool,
}

/// Resolve the project at `project_root` and print its tree.
pub fn tree(
    project_root: &Path,
    opts: &TreeOptions,
    registry_opts: &RegistryOptions,
) -> miette::Result<()> {
    let config = crate::load_config(registry_opts);
    let mut registry = crate::project_registry(&config, project_root)?;
    let state = resolve_project(&mut registry, project_root)?;
    print!("{}", render(&state, opts));
    Ok(())
}

/// Load `Pakt.toml` from `project_root` and resolve it against `registry`.
pub fn resolve_project<R: Registry + ?Sized>(
    registry: &mut R,
    project_root: &Path,
) -> miette::Result<ResolverState> {
    let manifest = Manifest::from_path(&project_root.join(MANIFEST_FILE))?;
    pakt_util::progress::status(
        "Resolving",
        &format!("{} v{}", manifest.name(), manifest.version()),
    );

    let sp = pakt_util::progress::spinner("Resolving dependencies...");
    let result = resolve_remote(registry, &manifest, project_root);
    sp.finish_and_clear();
    let state = result?;

    pakt_util::progress::status_info(
        "Resolved",
        &format!("{} packages", state.tree().len() - 1),
    );
    Ok(state)
}

/// Render a resolution according to `opts`.
pub fn render(state: &ResolverState, opts: &TreeOptions) -> String {
    let tree = state.tree();
    let mut out = String::new();

    if let Some(target) = &opts.why {
        match tree.find_path(target) {
            Some(path) => {
                let _ = writeln!(out, "Path to {target}:");
                for (i, node) in path.iter().enumerate() {
                    let indent = "  ".repeat(i);
                    let _ = writeln!(out, "{indent}{node}");
                }
            }
            None => {
                let _ = writeln!(out, "Dependency '{target}' not found in the tree.");
            }
        }
        return out;
    }

    if opts.duplicates {
        let report = DuplicateReport::from_tree(tree);
        let _ = write!(out, "{report}");
        if report.is_empty() {
            out.push('\n');
        }
        return out;
    }

    tree.print_tree(opts.depth)
}

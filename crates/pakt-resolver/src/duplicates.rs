//! Reporting of packages resolved at more than one version.

use std::collections::BTreeMap;
use std::fmt;

use semver::Version;

use crate::tree::DependencyTree;

/// Every package name that appears in a resolved tree at several versions.
#[derive(Debug, Default)]
pub struct DuplicateReport {
    pub duplicates: Vec<Duplicate>,
}

/// One package resolved at several versions, with the specifiers that led
/// to each version.
#[derive(Debug, Clone)]
pub struct Duplicate {
    pub name: String,
    pub versions: Vec<(Version, Vec<String>)>,
}

impl DuplicateReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Collect duplicates from a resolved tree, ordered by name then version.
    pub fn from_tree(tree: &DependencyTree) -> Self {
        let mut seen: BTreeMap<&str, BTreeMap<&Version, Vec<String>>> = BTreeMap::new();
        for (_, id) in tree.walk() {
            let node = tree.node(id);
            let Some(version) = &node.resolved else {
                continue;
            };
            let specifiers = seen
                .entry(node.name.as_str())
                .or_default()
                .entry(version)
                .or_default();
            if !specifiers.contains(&node.specifier) {
                specifiers.push(node.specifier.clone());
            }
        }

        let duplicates = seen
            .into_iter()
            .filter(|(_, versions)| versions.len() > 1)
            .map(|(name, versions)| Duplicate {
                name: name.to_string(),
                versions: versions
                    .into_iter()
                    .map(|(v, specs)| (v.clone(), specs))
                    .collect(),
            })
            .collect();
        Self { duplicates }
    }

    pub fn is_empty(&self) -> bool {
        self.duplicates.is_empty()
    }

    pub fn len(&self) -> usize {
        self.duplicates.len()
    }
}

impl fmt::Display for DuplicateReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.duplicates.is_empty() {
            return write!(f, "No duplicate packages.");
        }
        writeln!(f, "Duplicate packages ({}):", self.duplicates.len())?;
        for d in &self.duplicates {
            writeln!(f, "  {d}")?;
        }
        Ok(())
    }
}

impl fmt::Display for Duplicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let versions: Vec<String> = self
            .versions
            .iter()
            .map(|(v, specs)| format!("{v} ({})", specs.join(", ")))
            .collect();
        write!(f, "{}: {}", self.name, versions.join(", "))
    }
}

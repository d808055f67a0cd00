//! Per-run resolution caches: the (name, specifier) memo and the reuse pool.

use std::collections::HashMap;

use semver::Version;

use crate::version::Query;

/// Write-once map from (name, specifier) to the version it resolved to.
///
/// A hit means the pair has already been expanded somewhere in the tree.
#[derive(Debug, Default)]
pub struct VersionMemo {
    entries: HashMap<(String, String), Version>,
}

impl VersionMemo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str, specifier: &str) -> Option<&Version> {
        self.entries
            .get(&(name.to_string(), specifier.to_string()))
    }

    /// Record a resolution. Returns `false` and keeps the existing entry if
    /// the pair was already recorded.
    pub fn insert(&mut self, name: &str, specifier: &str, version: Version) -> bool {
        let key = (name.to_string(), specifier.to_string());
        if self.entries.contains_key(&key) {
            return false;
        }
        self.entries.insert(key, version);
        true
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Concrete versions already chosen per package name, in the order they
/// were first chosen.
#[derive(Debug, Default)]
pub struct ReusePool {
    versions: HashMap<String, Vec<Version>>,
}

impl ReusePool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remember that `version` of `name` is part of the tree.
    pub fn record(&mut self, name: &str, version: Version) {
        let chosen = self.versions.entry(name.to_string()).or_default();
        if !chosen.contains(&version) {
            chosen.push(version);
        }
    }

    /// First chosen version of `name` satisfying `query`, in insertion order.
    pub fn find(&self, name: &str, query: &Query) -> Option<&Version> {
        self.versions
            .get(name)?
            .iter()
            .find(|v| query.matches(v))
    }

    /// Versions chosen for `name` so far.
    pub fn versions(&self, name: &str) -> &[Version] {
        self.versions.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Number of package names with at least one chosen version.
    pub fn len(&self) -> usize {
        self.versions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.versions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(s: &str) -> Version {
        Version::parse(s).unwrap()
    }

    #[test]
    fn memo_is_write_once() {
        let mut memo = VersionMemo::new();
        assert!(memo.insert("lib", "^1.0.0", v("1.2.0")));
        assert!(!memo.insert("lib", "^1.0.0", v("1.9.0")));
        assert_eq!(memo.get("lib", "^1.0.0"), Some(&v("1.2.0")));
        assert_eq!(memo.get("lib", "^1.2.0"), None);
        assert_eq!(memo.len(), 1);
    }

    #[test]
    fn pool_keeps_insertion_order_without_duplicates() {
        let mut pool = ReusePool::new();
        pool.record("lib", v("1.5.0"));
        pool.record("lib", v("1.2.0"));
        pool.record("lib", v("1.5.0"));
        assert_eq!(pool.versions("lib"), &[v("1.5.0"), v("1.2.0")]);
        assert!(pool.versions("other").is_empty());
    }

    #[test]
    fn pool_find_returns_first_match_not_best() {
        let mut pool = ReusePool::new();
        pool.record("lib", v("1.2.0"));
        pool.record("lib", v("1.9.0"));
        let q = Query::parse("^1.0.0").unwrap();
        assert_eq!(pool.find("lib", &q), Some(&v("1.2.0")));
        let q = Query::parse("^2.0.0").unwrap();
        assert_eq!(pool.find("lib", &q), None);
        assert_eq!(pool.find("missing", &q), None);
    }
}

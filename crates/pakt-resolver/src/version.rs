//! Exact version parsing and npm-style version queries.
//!
//! Queries are normalized into `semver::VersionReq` comparator sets:
//! - `^1.2.0`, `~1.2`, `>=1.0.0 <2.0.0`, `>= 1.0.0, < 2.0.0`
//! - hyphen ranges: `1.0.0 - 2.0.0`
//! - x-ranges and bare partials: `1.x`, `1.2.*`, `1`, `1.2`
//! - unions: `^1.0.0 || ^2.0.0`
//! - `*`, `x`, the empty string and the `latest` tag match any version
//!
//! Prerelease versions only match a comparator that names a prerelease of
//! the same `major.minor.patch`, as in npm.

use std::fmt;

use semver::{Version, VersionReq};

/// Tag accepted as a query meaning "any version".
pub const LATEST_TAG: &str = "latest";

/// Parse an exact version. A leading `=` or `v` and surrounding whitespace
/// are tolerated; ranges, partial versions and tags are not exact.
pub fn parse_exact(input: &str) -> Option<Version> {
    let s = input.trim();
    let s = s.strip_prefix('=').unwrap_or(s).trim_start();
    let s = s.strip_prefix('v').unwrap_or(s);
    Version::parse(s).ok()
}

/// A parsed range or tag expression: a union of comparator sets.
#[derive(Debug, Clone)]
pub struct Query {
    raw: String,
    alternatives: Vec<VersionReq>,
}

impl Query {
    /// Parse a range or tag expression. Returns `None` when the expression
    /// is not understood.
    pub fn parse(expr: &str) -> Option<Self> {
        let alternatives = expr
            .split("||")
            .map(|alt| parse_alternative(alt.trim()))
            .collect::<Option<Vec<_>>>()?;
        Some(Self {
            raw: expr.trim().to_string(),
            alternatives,
        })
    }

    /// Whether `version` satisfies the query.
    pub fn matches(&self, version: &Version) -> bool {
        self.alternatives.iter().any(|req| req.matches(version))
    }

    /// The highest version in `versions` satisfying the query.
    pub fn select_best<'a, I>(&self, versions: I) -> Option<&'a Version>
    where
        I: IntoIterator<Item = &'a Version>,
    {
        versions.into_iter().filter(|v| self.matches(v)).max()
    }

    /// The expression as written.
    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

fn parse_alternative(alt: &str) -> Option<VersionReq> {
    if is_any(alt) {
        return Some(VersionReq::STAR);
    }

    if let Some((low, high)) = alt.split_once(" - ") {
        let (low, high) = (low.trim(), high.trim());
        if low.is_empty() || high.is_empty() {
            return None;
        }
        return VersionReq::parse(&format!(">={low}, <={high}")).ok();
    }

    let mut comparators = Vec::new();
    for token in comparator_tokens(alt)? {
        if let Some(c) = normalize_comparator(&token)? {
            comparators.push(c);
        }
    }
    if comparators.is_empty() {
        return Some(VersionReq::STAR);
    }
    VersionReq::parse(&comparators.join(", ")).ok()
}

fn is_any(s: &str) -> bool {
    s.is_empty() || s == LATEST_TAG || is_wildcard(s)
}

fn is_wildcard(s: &str) -> bool {
    matches!(s, "*" | "x" | "X")
}

/// Split a comparator set on whitespace and commas, re-attaching operators
/// written apart from their version (`>= 1.0.0` becomes `>=1.0.0`).
fn comparator_tokens(alt: &str) -> Option<Vec<String>> {
    let mut tokens = Vec::new();
    let mut pending_op = String::new();
    for part in alt.split(|c: char| c.is_whitespace() || c == ',') {
        if part.is_empty() {
            continue;
        }
        if part.chars().all(is_op_char) {
            if !pending_op.is_empty() {
                return None;
            }
            pending_op = part.to_string();
            continue;
        }
        tokens.push(format!("{pending_op}{part}"));
        pending_op.clear();
    }
    if !pending_op.is_empty() {
        return None;
    }
    Some(tokens)
}

fn is_op_char(c: char) -> bool {
    matches!(c, '<' | '>' | '=' | '^' | '~')
}

/// Rewrite one npm comparator into `semver` syntax.
///
/// Returns `Some(None)` for a comparator that matches everything and `None`
/// for one that cannot be understood.
fn normalize_comparator(token: &str) -> Option<Option<String>> {
    let split = token.find(|c: char| !is_op_char(c)).unwrap_or(token.len());
    let (op, rest) = token.split_at(split);
    let op = match op {
        "" | "=" | "==" => "",
        "^" | "~" | "~>" | ">" | ">=" | "<" | "<=" => op,
        _ => return None,
    };
    let rest = rest.strip_prefix('v').unwrap_or(rest);

    let (core, suffix) = match rest.find(['-', '+']) {
        Some(i) => rest.split_at(i),
        None => (rest, ""),
    };
    let segments: Vec<&str> = core.split('.').collect();
    if segments.len() > 3 {
        return None;
    }
    let fixed = segments.iter().take_while(|s| !is_wildcard(s)).count();
    if segments[fixed..].iter().any(|s| !is_wildcard(s)) {
        return None;
    }
    let parts = &segments[..fixed];
    if parts.iter().any(|p| p.parse::<u64>().is_err()) {
        return None;
    }
    if parts.len() < 3 && !suffix.is_empty() {
        return None;
    }

    let op = if op == "~>" { "~" } else { op };
    match (op, parts.len()) {
        (_, 0) if op.is_empty() || op == "^" || op == "~" || op == ">=" || op == "<=" => {
            Some(None)
        }
        (_, 0) => None,
        ("", 3) => Some(Some(format!("={}{suffix}", parts.join(".")))),
        ("", 1) => {
            let major: u64 = parts[0].parse().ok()?;
            let next = major.checked_add(1)?;
            Some(Some(format!(">={major}.0.0, <{next}.0.0")))
        }
        ("", 2) => {
            let major: u64 = parts[0].parse().ok()?;
            let minor: u64 = parts[1].parse().ok()?;
            let next = minor.checked_add(1)?;
            Some(Some(format!(">={major}.{minor}.0, <{major}.{next}.0")))
        }
        _ => Some(Some(format!("{op}{}{suffix}", parts.join(".")))),
    }
}

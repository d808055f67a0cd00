//! Dependency tree resolution.
//!
//! Declared specifiers (exact versions, npm-style ranges, or `latest`) are
//! turned into a concrete tree by a depth-first walk that memoizes every
//! (name, specifier) pair and prefers versions already chosen elsewhere in
//! the run. Registry data is fetched only when neither cache can answer.

pub mod cache;
pub mod duplicates;
pub mod lookup;
pub mod resolver;
pub mod state;
pub mod tree;
pub mod version;

pub use lookup::{exists, get_latest};
pub use resolver::resolve_remote;
pub use state::ResolverState;
pub use tree::{DependencyNode, DependencyTree, NodeId};

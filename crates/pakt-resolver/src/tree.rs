//! The resolved dependency tree, stored as an arena of nodes.

use std::fmt;

use petgraph::graph::{DiGraph, NodeIndex};
use semver::Version;

/// Stable handle to a node in a [`DependencyTree`].
pub type NodeId = NodeIndex;

/// One entry of the resolved tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependencyNode {
    pub name: String,
    /// Version expression as written by the manifest that declared it.
    pub specifier: String,
    /// `None` until resolution succeeds.
    pub resolved: Option<Version>,
    /// `true` when the (name, specifier) pair had already been expanded
    /// elsewhere and this node was resolved from the memo. Such nodes never
    /// have children.
    pub reference: bool,
}

impl DependencyNode {
    pub fn new(name: &str, specifier: &str) -> Self {
        Self {
            name: name.to_string(),
            specifier: specifier.to_string(),
            resolved: None,
            reference: false,
        }
    }
}

impl fmt::Display for DependencyNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.resolved {
            Some(v) => write!(f, "{}@{v}", self.name),
            None => write!(f, "{}@{} (unresolved)", self.name, self.specifier),
        }
    }
}

/// Arena-backed tree: nodes live in a petgraph `DiGraph` with one edge per
/// parent-to-child link.
#[derive(Debug, Clone)]
pub struct DependencyTree {
    graph: DiGraph<DependencyNode, ()>,
    root: NodeId,
}

impl DependencyTree {
    /// Create a tree holding only `root`.
    pub fn new(root: DependencyNode) -> Self {
        let mut graph = DiGraph::new();
        let root = graph.add_node(root);
        Self { graph, root }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn node(&self, id: NodeId) -> &DependencyNode {
        &self.graph[id]
    }

    pub fn node_mut(&mut self, id: NodeId) -> &mut DependencyNode {
        &mut self.graph[id]
    }

    /// Append a new unresolved child under `parent`.
    pub fn add_child(&mut self, parent: NodeId, name: &str, specifier: &str) -> NodeId {
        let child = self.graph.add_node(DependencyNode::new(name, specifier));
        self.graph.add_edge(parent, child, ());
        child
    }

    /// Children of `id` in the order they were added.
    pub fn children(&self, id: NodeId) -> Vec<NodeId> {
        // petgraph lists the most recently added edge first.
        let mut children: Vec<NodeId> = self.graph.neighbors(id).collect();
        children.reverse();
        children
    }

    /// Number of nodes, root included.
    pub fn len(&self) -> usize {
        self.graph.node_count()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    /// Depth-first pre-order walk: `(depth, id)` pairs, root at depth 0.
    pub fn walk(&self) -> Vec<(usize, NodeId)> {
        let mut out = Vec::with_capacity(self.len());
        let mut stack = vec![(0usize, self.root)];
        while let Some((depth, id)) = stack.pop() {
            out.push((depth, id));
            // Newest-first neighbor order pops oldest-first.
            for child in self.graph.neighbors(id) {
                stack.push((depth + 1, child));
            }
        }
        out
    }

    /// Path from the root to the first node named `name`.
    pub fn find_path(&self, name: &str) -> Option<Vec<&DependencyNode>> {
        let mut path = Vec::new();
        if self.dfs_path(self.root, name, &mut path) {
            Some(path.into_iter().map(|id| &self.graph[id]).collect())
        } else {
            None
        }
    }

    fn dfs_path(&self, current: NodeId, name: &str, path: &mut Vec<NodeId>) -> bool {
        path.push(current);
        if current != self.root && self.graph[current].name == name {
            return true;
        }
        for child in self.children(current) {
            if self.dfs_path(child, name, path) {
                return true;
            }
        }
        path.pop();
        false
    }

    /// Render the tree with box-drawing connectors. Nodes resolved from the
    /// memo are marked `(*)`.
    pub fn print_tree(&self, max_depth: Option<usize>) -> String {
        let mut output = String::new();
        output.push_str(&format!("{}\n", self.graph[self.root]));

        let children = self.children(self.root);
        let count = children.len();
        for (i, child) in children.into_iter().enumerate() {
            self.print_subtree(&mut output, child, "", i == count - 1, 1, max_depth);
        }
        output
    }

    fn print_subtree(
        &self,
        output: &mut String,
        id: NodeId,
        prefix: &str,
        is_last: bool,
        depth: usize,
        max_depth: Option<usize>,
    ) {
        let connector = if is_last { "└── " } else { "├── " };
        let node = &self.graph[id];
        let spec = match &node.resolved {
            Some(v) if v.to_string() != node.specifier => format!(" ({})", node.specifier),
            _ => String::new(),
        };
        let marker = if node.reference { " (*)" } else { "" };
        output.push_str(&format!("{prefix}{connector}{node}{spec}{marker}\n"));

        if max_depth.is_some_and(|max| depth >= max) {
            return;
        }

        let child_prefix = format!("{prefix}{}", if is_last { "    " } else { "│   " });
        let children = self.children(id);
        let count = children.len();
        for (i, child) in children.into_iter().enumerate() {
            self.print_subtree(output, child, &child_prefix, i == count - 1, depth + 1, max_depth);
        }
    }
}
